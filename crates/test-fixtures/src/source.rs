//! In-memory partitions. The offset of a record is its index, all on one
//! log file.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use multilog_core::errors::StreamError;
use multilog_core::{
    LogFile, MultilogResult, PartitionStream, Position, ReadEvent, StreamSource,
};

/// File name every in-memory partition is stored under.
pub const RECORD_LOG: &str = "log";

/// Position just before record `index`.
pub fn record_position(index: usize) -> Position {
    Position::new(LogFile::new(RECORD_LOG, 0), index as i64)
}

#[derive(Debug, Clone)]
pub struct MemorySource<T> {
    partitions: HashMap<String, Vec<T>>,
    fail_after: HashMap<String, usize>,
    truncated: HashSet<String>,
    opened: Arc<Mutex<Vec<(String, Position)>>>,
}

impl<T> Default for MemorySource<T> {
    fn default() -> Self {
        Self {
            partitions: HashMap::new(),
            fail_after: HashMap::new(),
            truncated: HashSet::new(),
            opened: Arc::default(),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> MemorySource<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_partition(mut self, name: &str, records: Vec<T>) -> Self {
        self.partitions.insert(name.to_string(), records);
        self
    }

    /// The partition yields `records` records, then an error.
    pub fn failing_after(mut self, name: &str, records: usize) -> Self {
        self.fail_after.insert(name.to_string(), records);
        self
    }

    /// The partition ends without reporting its final position.
    pub fn truncated(mut self, name: &str) -> Self {
        self.truncated.insert(name.to_string());
        self
    }

    pub fn append(&mut self, name: &str, records: impl IntoIterator<Item = T>) {
        self.partitions
            .entry(name.to_string())
            .or_default()
            .extend(records);
    }

    /// End position of a partition: the offset after its last record.
    pub fn end_of(&self, name: &str) -> Position {
        record_position(self.partitions.get(name).map_or(0, Vec::len))
    }

    /// Every `open` call seen so far, in call order.
    pub fn opened(&self) -> Vec<(String, Position)> {
        self.opened.lock().expect("opened log poisoned").clone()
    }

    fn events(&self, partition: &str, from: &Position) -> Vec<MultilogResult<ReadEvent<T>>> {
        let records = self.partitions.get(partition).map_or(&[][..], Vec::as_slice);
        let start = if from.is_initial() {
            0
        } else {
            usize::try_from(from.offset()).unwrap_or(0)
        };

        let mut events: Vec<MultilogResult<ReadEvent<T>>> = Vec::new();
        for (index, record) in records.iter().enumerate().skip(start) {
            if self.fail_after.get(partition) == Some(&(index - start)) {
                events.push(Err(StreamError::Source {
                    partition: partition.to_string(),
                    message: format!("injected failure at offset {index}"),
                }
                .into()));
                return events;
            }
            events.push(Ok(ReadEvent::Record(record.clone())));
        }
        if self.fail_after.get(partition) == Some(&records.len().saturating_sub(start)) {
            events.push(Err(StreamError::Source {
                partition: partition.to_string(),
                message: "injected failure at end of partition".to_string(),
            }
            .into()));
            return events;
        }
        if !self.truncated.contains(partition) {
            let end = if start >= records.len() {
                from.clone()
            } else {
                record_position(records.len())
            };
            events.push(Ok(ReadEvent::Finished(end)));
        }
        events
    }
}

#[async_trait]
impl<T: Clone + Send + Sync + 'static> StreamSource for MemorySource<T> {
    type Record = T;

    async fn open(
        &self,
        partition: &str,
        from: &Position,
    ) -> MultilogResult<PartitionStream<T>> {
        self.opened
            .lock()
            .expect("opened log poisoned")
            .push((partition.to_string(), from.clone()));
        Ok(Box::pin(tokio_stream::iter(self.events(partition, from))))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_stream::StreamExt;

    async fn drain(source: &MemorySource<u32>, partition: &str, from: Position) -> Vec<String> {
        let mut stream = source.open(partition, &from).await.unwrap();
        let mut seen = Vec::new();
        while let Some(item) = stream.next().await {
            seen.push(match item {
                Ok(ReadEvent::Record(r)) => format!("r{r}"),
                Ok(ReadEvent::Finished(p)) => format!("end@{}", p.offset()),
                Err(e) => format!("err:{}", e),
            });
        }
        seen
    }

    #[tokio::test]
    async fn reads_from_offset_and_reports_end() {
        let source = MemorySource::new().with_partition("p", vec![1, 2, 3]);
        assert_eq!(
            drain(&source, "p", Position::initial()).await,
            ["r1", "r2", "r3", "end@3"]
        );
        assert_eq!(drain(&source, "p", record_position(2)).await, ["r3", "end@3"]);
        assert_eq!(drain(&source, "p", record_position(3)).await, ["end@3"]);
    }

    #[tokio::test]
    async fn missing_partition_finishes_where_it_started() {
        let source: MemorySource<u32> = MemorySource::new();
        let mut stream = source.open("nope", &Position::initial()).await.unwrap();
        assert_eq!(
            stream.next().await.unwrap().unwrap(),
            ReadEvent::Finished(Position::initial())
        );
        assert!(stream.next().await.is_none());
    }

    #[tokio::test]
    async fn injected_failure_and_truncation() {
        let source = MemorySource::new()
            .with_partition("p", vec![1, 2, 3])
            .failing_after("p", 1)
            .with_partition("q", vec![7])
            .truncated("q");
        let seen = drain(&source, "p", Position::initial()).await;
        assert_eq!(seen.len(), 2);
        assert!(seen[1].starts_with("err:"));
        assert_eq!(drain(&source, "q", Position::initial()).await, ["r7"]);
    }
}
