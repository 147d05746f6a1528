use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

pub fn taskbook_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".taskbook"))
}

pub fn ensure_taskbook_home() -> Result<PathBuf> {
    let dir = taskbook_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn default_store_path() -> Result<PathBuf> {
    Ok(taskbook_home()?.join("tasks_database.json"))
}
