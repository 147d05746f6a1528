use anyhow::{Context, Result};
use csv::WriterBuilder;
use std::path::Path;
use taskbook_core::Task;

const HEADER: [&str; 6] = ["id", "title", "description", "due_date", "priority", "status"];

/// Write tasks as CSV. The header is always written, even for an empty store.
pub fn write_csv(tasks: &[Task], path: &Path) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)
        .with_context(|| format!("create {}", path.display()))?;

    writer.write_record(HEADER)?;
    for task in tasks {
        writer.serialize(task)?;
    }
    writer.flush()?;
    Ok(())
}
