use std::path::Path;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::entry::UsageEntry;
use crate::writer::{UsageWriteError, UsageWriter};

/// Entries buffered between producers and the writer task.
const CHANNEL_BUFFER: usize = 1024;

/// Idle time after which pending writes are flushed.
const FLUSH_INTERVAL: Duration = Duration::from_secs(1);

/// Cloneable handle feeding the background usage-log writer.
#[derive(Clone)]
pub struct UsageSink {
    tx: mpsc::Sender<UsageEntry>,
}

impl UsageSink {
    /// Open the log at `path` and spawn the writer task.
    ///
    /// The task drains entries until every `UsageSink` clone is dropped,
    /// flushing whenever the channel sits idle for [`FLUSH_INTERVAL`] and
    /// once more before it exits. I/O errors are reported through `tracing`
    /// and the affected entry is skipped.
    pub async fn start(
        path: impl AsRef<Path>,
    ) -> Result<(Self, JoinHandle<()>), UsageWriteError> {
        let writer = UsageWriter::open(path).await?;
        let (tx, rx) = mpsc::channel(CHANNEL_BUFFER);
        let handle = tokio::spawn(drain(writer, rx));
        Ok((Self { tx }, handle))
    }

    /// Queue `entry`, waiting for channel capacity.
    pub async fn log(&self, entry: UsageEntry) {
        if let Err(err) = self.tx.send(entry).await {
            tracing::warn!(tool = %err.0.tool, "usage writer stopped; entry dropped");
        }
    }
}

async fn drain(mut writer: UsageWriter, mut rx: mpsc::Receiver<UsageEntry>) {
    let mut dirty = false;

    loop {
        match tokio::time::timeout(FLUSH_INTERVAL, rx.recv()).await {
            Ok(Some(entry)) => match writer.append(&entry).await {
                Ok(()) => dirty = true,
                Err(err) => tracing::error!(%err, tool = %entry.tool, "failed to append usage entry"),
            },
            Ok(None) => break,
            Err(_idle) if dirty => match writer.flush().await {
                Ok(()) => dirty = false,
                Err(err) => tracing::error!(%err, "periodic usage log flush failed"),
            },
            Err(_idle) => {}
        }
    }

    if dirty {
        if let Err(err) = writer.flush().await {
            tracing::error!(%err, path = %writer.path().display(), "final usage log flush failed");
        }
    }
    tracing::debug!(path = %writer.path().display(), "usage writer finished");
}
