use crate::domain::ports::Storage;
use crate::utils::error::{CatalogError, Result};
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Writes reports to the local filesystem.
///
/// Data goes to a temporary sibling first and is renamed over the target
/// only after it has been fully written and synced, so an interrupted or
/// failed write never leaves a truncated report behind.
#[derive(Debug, Clone, Default)]
pub struct LocalStorage;

impl LocalStorage {
    pub fn new() -> Self {
        Self
    }
}

fn temp_path_for(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".partial");
    path.with_file_name(name)
}

fn write_atomically(path: &Path, data: &[u8]) -> std::io::Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let temp = temp_path_for(path);
    let written = File::create(&temp).and_then(|mut file| {
        file.write_all(data)?;
        file.sync_all()
    });

    match written.and_then(|_| fs::rename(&temp, path)) {
        Ok(()) => Ok(()),
        Err(e) => {
            let _ = fs::remove_file(&temp);
            Err(e)
        }
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &Path, data: &[u8]) -> Result<()> {
        write_atomically(path, data).map_err(|source| CatalogError::Write {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), path.display());
        Ok(())
    }
}
