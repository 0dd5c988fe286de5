use crate::error::{LanesError, Result};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Atomically write content to a file using temp file + rename
/// This ensures we never have a partially written project on crash
pub fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    // Temp file must live in the target directory for the rename to be atomic
    let target_dir = match target_path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(target_dir)?;

    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| LanesError::Storage(format!("Failed to create temp file: {}", e)))?;

    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| LanesError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| LanesError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| LanesError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}
