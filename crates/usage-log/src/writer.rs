use std::path::{Path, PathBuf};

use tokio::io::{AsyncWriteExt, BufWriter};

use crate::entry::UsageEntry;

/// Errors raised while writing the usage log.
#[derive(Debug, thiserror::Error)]
pub enum UsageWriteError {
    #[error("failed to create usage log directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to open usage log {path}: {source}")]
    Open {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to serialize usage entry: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to append to usage log: {0}")]
    Write(std::io::Error),

    #[error("failed to flush usage log: {0}")]
    Flush(std::io::Error),
}

/// Appends [`UsageEntry`] values to a file, one JSON object per line.
///
/// Output is buffered; call [`flush`](Self::flush) to push it to disk.
pub struct UsageWriter {
    path: PathBuf,
    out: BufWriter<tokio::fs::File>,
}

impl UsageWriter {
    /// Open `path` for appending, creating it and its parent directories
    /// when needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, UsageWriteError> {
        let path = path.as_ref().to_path_buf();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| UsageWriteError::CreateDir {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }

        let file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await
            .map_err(|source| UsageWriteError::Open {
                path: path.clone(),
                source,
            })?;

        Ok(Self {
            path,
            out: BufWriter::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn append(&mut self, entry: &UsageEntry) -> Result<(), UsageWriteError> {
        let mut line = serde_json::to_vec(entry)?;
        line.push(b'\n');
        self.out
            .write_all(&line)
            .await
            .map_err(UsageWriteError::Write)
    }

    pub async fn flush(&mut self) -> Result<(), UsageWriteError> {
        self.out.flush().await.map_err(UsageWriteError::Flush)
    }
}
