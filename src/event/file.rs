use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use parking_lot::Mutex;

use crate::event::PredictionEvent;
use crate::interfaces::EventPublisher;
use crate::{Error, Result};

/// File-backed event sink.
///
/// Appends each event as one JSON line. Suited for audit trails and offline
/// analysis of published predictions.
#[derive(Clone)]
pub struct FileEventPublisher {
    path: PathBuf,
    file: Arc<Mutex<File>>,
}

impl FileEventPublisher {
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| Error::publish(format!("failed to open {}: {}", path.display(), e)))?;
        Ok(Self {
            path,
            file: Arc::new(Mutex::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl EventPublisher for FileEventPublisher {
    async fn publish(&self, event: PredictionEvent) -> Result<()> {
        let line = serde_json::to_string(&event)?;
        let mut file = self.file.lock();
        writeln!(file, "{}", line)
            .map_err(|e| Error::publish(format!("failed to append event: {}", e)))?;
        debug!(
            "publish: stream={} partition_key={} file={}",
            event.stream,
            event.partition_key,
            self.path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{FeatureClass, Features, Labels, Prediction};

    #[tokio::test]
    async fn test_events_append_as_json_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("events.jsonl");
        let publisher = FileEventPublisher::new(&path).unwrap();

        for project in ["p1", "p2"] {
            let prediction = Prediction::new(
                project,
                "a1",
                Features::new(FeatureClass::Custom, vec![]),
                Labels::from_pairs([("yes", 1.0)]),
            );
            publisher
                .publish(PredictionEvent::completed(&prediction, "predictions"))
                .await
                .unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);

        let first: PredictionEvent = serde_json::from_str(lines[0]).unwrap();
        assert_eq!(first.partition_key, "p1");
        let second: PredictionEvent = serde_json::from_str(lines[1]).unwrap();
        assert_eq!(second.partition_key, "p2");
    }
}
