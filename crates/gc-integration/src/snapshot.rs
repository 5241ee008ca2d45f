//! Save-state files
//!
//! The snapshot format belongs to the engine; this module only owns the file.
//! Failing to open or finish writing the file is an I/O error. The engine
//! rejecting the data is an internal error. The file is closed before either
//! function returns, on every path. A new state is staged next to the
//! destination and only renamed over it once complete, so a failed save
//! leaves the previous file untouched.

use crate::savedata::staging_dir;
use gc_core::{CoreError, Result};
use gc_engine::Engine;
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;

/// Serialize the engine state into a new file at `path`
pub fn write_state<E: Engine + ?Sized>(engine: &mut E, path: &Path) -> Result<usize> {
    let mut file = NamedTempFile::new_in(staging_dir(path))
        .map_err(|e| CoreError::io("Failed to open state file", e))?;

    let size = {
        let mut writer = BufWriter::new(&mut file);
        let size = engine.save_state(&mut writer).map_err(|e| {
            tracing::error!("Engine failed to save state: {}", e);
            CoreError::Internal("Failed to save state".to_string())
        })?;
        writer
            .flush()
            .map_err(|e| CoreError::io("Failed to write state file", e))?;
        size
    };

    file.as_file()
        .sync_all()
        .map_err(|e| CoreError::io("Failed to write state file", e))?;
    file.persist(path)
        .map_err(|e| CoreError::io(format!("Failed to replace {}", path.display()), e.error))?;

    Ok(size)
}

/// Restore engine state from the file at `path`
pub fn read_state<E: Engine + ?Sized>(engine: &mut E, path: &Path) -> Result<()> {
    let file = File::open(path).map_err(|e| CoreError::io("Failed to open state file", e))?;
    let mut reader = BufReader::new(file);

    engine.load_state(&mut reader).map_err(|e| {
        tracing::error!("Engine failed to load state: {}", e);
        CoreError::Internal("Failed to load state".to_string())
    })
}
