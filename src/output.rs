//! Output destinations for published snapshots.

use std::path::PathBuf;

use armorywatch_types::Snapshot;

/// Where the poller writes snapshots, besides the watch channel.
#[derive(Debug)]
pub enum Output {
    /// Write snapshots to a JSON file.
    ///
    /// The file is overwritten with each snapshot.
    File(PathBuf),

    /// Send snapshots through a channel.
    ///
    /// Use `Output::channel()` to create this variant and get the receiver.
    Channel(tokio::sync::mpsc::Sender<Snapshot>),
}

impl Output {
    /// Create a file output.
    ///
    /// # Example
    ///
    /// ```rust
    /// use armorywatch::Output;
    ///
    /// let output = Output::file("snapshot.json");
    /// ```
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Output::File(path.into())
    }

    /// Create a channel output and return both the output and receiver.
    ///
    /// This is useful for wiring snapshots into your own consumer.
    ///
    /// # Example
    ///
    /// ```rust
    /// use armorywatch::Output;
    ///
    /// let (output, mut rx) = Output::channel(16);
    ///
    /// // Later, receive snapshots
    /// // while let Some(snapshot) = rx.recv().await {
    /// //     println!("{} characters", snapshot.character_count());
    /// // }
    /// ```
    pub fn channel(buffer: usize) -> (Self, tokio::sync::mpsc::Receiver<Snapshot>) {
        let (tx, rx) = tokio::sync::mpsc::channel(buffer);
        (Output::Channel(tx), rx)
    }

    /// Emit a snapshot to this output.
    pub(crate) async fn emit(&self, snapshot: &Snapshot) -> std::io::Result<()> {
        match self {
            Output::File(path) => {
                let json = serde_json::to_string_pretty(snapshot)?;
                tokio::fs::write(path, json).await?;
            }
            Output::Channel(tx) => {
                // Best effort send (don't block if the channel is full)
                let _ = tx.try_send(snapshot.clone());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use armorywatch_types::MetricRecord;

    #[tokio::test]
    async fn file_output_overwrites_with_pretty_json() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("snapshot.json");
        let output = Output::file(&path);

        let first = Snapshot::builder()
            .timestamp_ms(1)
            .character("durotan-thrall", MetricRecord::new())
            .build();
        output.emit(&first).await.unwrap();

        let second = Snapshot::builder().timestamp_ms(2).build();
        output.emit(&second).await.unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: Snapshot = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed, second);
    }

    #[tokio::test]
    async fn channel_output_delivers_snapshots() {
        let (output, mut rx) = Output::channel(4);

        let snapshot = Snapshot::builder().timestamp_ms(42).build();
        output.emit(&snapshot).await.unwrap();

        let received = rx.recv().await.unwrap();
        assert_eq!(received.timestamp_ms, 42);
    }

    #[tokio::test]
    async fn full_channel_drops_rather_than_blocks() {
        let (output, mut rx) = Output::channel(1);

        output.emit(&Snapshot::builder().timestamp_ms(1).build()).await.unwrap();
        // Second emit finds the buffer full and drops the snapshot
        output.emit(&Snapshot::builder().timestamp_ms(2).build()).await.unwrap();

        assert_eq!(rx.recv().await.unwrap().timestamp_ms, 1);
        assert!(rx.try_recv().is_err());
    }
}
