//! Battery RAM persistence
//!
//! The save file is a raw dump of the cartridge RAM. Writes go to a temporary
//! file next to the destination which is then renamed over it, so readers
//! never observe a partially written save. A symlinked save path is written
//! through to its target and the existing file's permissions are kept.

use gc_core::{CoreError, Result};
use std::io::{ErrorKind, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Read a save file.
///
/// A missing or zero-length file yields `None`: the cartridge starts with blank RAM.
pub fn read_save_ram(path: &Path) -> Result<Option<Vec<u8>>> {
    match std::fs::read(path) {
        Ok(data) if data.is_empty() => Ok(None),
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::debug!("No save data at {}", path.display());
            Ok(None)
        }
        Err(e) => Err(CoreError::io(
            format!("Failed to read save data {}", path.display()),
            e,
        )),
    }
}

/// Directory a replacement for `path` is staged in
pub(crate) fn staging_dir(path: &Path) -> &Path {
    path.parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
}

/// Replace the save file at `path` with `data`
pub fn write_save_ram(path: &Path, data: &[u8]) -> Result<()> {
    let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let dir = staging_dir(&target);

    let mut file = NamedTempFile::new_in(dir)
        .map_err(|e| CoreError::io(format!("Failed to create save data in {}", dir.display()), e))?;
    if let Ok(meta) = std::fs::metadata(&target) {
        file.as_file()
            .set_permissions(meta.permissions())
            .map_err(|e| CoreError::io("Failed to copy save data permissions", e))?;
    }
    file.write_all(data)
        .and_then(|()| file.as_file().sync_all())
        .map_err(|e| CoreError::io("Failed to write save data", e))?;
    file.persist(&target)
        .map_err(|e| CoreError::io(format!("Failed to replace {}", target.display()), e.error))?;

    tracing::debug!("Wrote {} bytes of save data to {}", data.len(), target.display());
    Ok(())
}
