use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

use crate::models::FoodRecord;

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("failed to write {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize records for {}: {source}", .path.display())]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Writes the final record set as an indented JSON array, UTF-8 with
/// non-ASCII text kept literal.
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStorage { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn ensure_parent_dir(&self) -> Result<(), SinkError> {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() && !parent.exists() => {
                fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
                info!("Created output directory: {}", parent.display());
                Ok(())
            }
            _ => Ok(()),
        }
    }

    /// Returns the number of records written.
    pub fn store_records(&self, records: &[FoodRecord]) -> Result<usize, SinkError> {
        self.ensure_parent_dir()?;

        let file = File::create(&self.path).map_err(|source| self.io_error(source))?;
        let mut writer = BufWriter::new(file);

        serde_json::to_writer_pretty(&mut writer, records).map_err(|source| {
            SinkError::Serialize {
                path: self.path.clone(),
                source,
            }
        })?;
        writer.flush().map_err(|source| self.io_error(source))?;

        info!(
            "Stored {} records at: {}",
            records.len(),
            self.path.display()
        );
        Ok(records.len())
    }

    fn io_error(&self, source: std::io::Error) -> SinkError {
        SinkError::Io {
            path: self.path.clone(),
            source,
        }
    }
}
