use std::path::Path;

use anyhow::{Context, Result};
use striker_core::Snapshot;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, BufReader, Split},
};

/// Perception snapshots read from a JSON-lines source, one snapshot per tick.
///
/// This stands in for the world model: whatever decodes the server's sensor
/// messages writes one [`Snapshot`] per line.
pub struct SnapshotFeed<R> {
    lines: Split<R>,
    line_no: usize,
}

impl SnapshotFeed<BufReader<File>> {
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .await
            .context(format!("Failed to open snapshot file {}", path.display()))?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: AsyncBufRead + Unpin> SnapshotFeed<R> {
    pub fn new(reader: R) -> Self {
        Self {
            lines: reader.split(b'\n'),
            line_no: 0,
        }
    }

    /// The next valid snapshot, or `None` once the source is exhausted.
    ///
    /// Blank lines are skipped; malformed ones (bad JSON or bad UTF-8) are
    /// reported and skipped.
    pub async fn next(&mut self) -> Result<Option<Snapshot>> {
        while let Some(line) = self
            .lines
            .next_segment()
            .await
            .context("Failed to read snapshot")?
        {
            self.line_no += 1;
            if line.iter().all(u8::is_ascii_whitespace) {
                continue;
            }
            match serde_json::from_slice(&line) {
                Ok(snapshot) => return Ok(Some(snapshot)),
                Err(err) => tracing::warn!("Skipping bad snapshot on line {}: {}", self.line_no, err),
            }
        }
        Ok(None)
    }
}
