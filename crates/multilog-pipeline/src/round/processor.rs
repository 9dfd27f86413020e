//! One round over a fixed set of partitions.

use std::collections::BTreeMap;

use multilog_core::errors::StreamError;
use multilog_core::{MultilogResult, Position, ReadEvent, RecordConsumer, StreamSource};
use multilog_ot::{LogDiff, PositionDiff};
use tokio_stream::{StreamExt, StreamMap};
use tracing::{debug, info, instrument};

/// Reads every partition from its committed position to its current end,
/// feeding records to a consumer.
///
/// Partition streams are polled together; records of one partition arrive
/// in source order, records of different partitions interleave arbitrarily.
/// Every `accept` completes before the next record is pulled.
#[derive(Debug, Clone)]
pub struct RoundProcessor<S> {
    source: S,
}

impl<S: StreamSource> RoundProcessor<S> {
    pub fn new(source: S) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Run one round and return its candidate.
    ///
    /// A partition without an entry in `positions` starts at
    /// `Position::initial()`. Partitions that did not move get no position
    /// entry. Any stream or consumer error aborts the round; the remaining
    /// streams are dropped and no candidate is produced.
    #[instrument(skip_all, fields(partitions = partitions.len()))]
    pub async fn process<C>(
        &self,
        partitions: &[String],
        positions: &BTreeMap<String, Position>,
        consumer: &mut C,
    ) -> MultilogResult<LogDiff<C::Diff>>
    where
        C: RecordConsumer<S::Record>,
    {
        let mut starts: BTreeMap<&str, Position> = BTreeMap::new();
        for partition in partitions {
            starts.entry(partition.as_str()).or_insert_with(|| {
                positions
                    .get(partition)
                    .cloned()
                    .unwrap_or_else(Position::initial)
            });
        }

        let mut streams = StreamMap::new();
        for (partition, from) in &starts {
            let stream = self.source.open(partition, from).await?;
            streams.insert(*partition, stream);
        }

        let mut ends: BTreeMap<&str, Position> = BTreeMap::new();
        let mut records = 0usize;
        while let Some((partition, item)) = streams.next().await {
            match item? {
                ReadEvent::Record(record) => {
                    if ends.contains_key(partition) {
                        return Err(StreamError::Source {
                            partition: partition.to_string(),
                            message: "record after final position".to_string(),
                        }
                        .into());
                    }
                    consumer.accept(record).await?;
                    records += 1;
                }
                ReadEvent::Finished(end) => {
                    if ends.contains_key(partition) {
                        return Err(StreamError::Source {
                            partition: partition.to_string(),
                            message: "duplicate final position".to_string(),
                        }
                        .into());
                    }
                    debug!(partition, %end, "partition drained");
                    ends.insert(partition, end);
                }
            }
        }

        let mut advances = BTreeMap::new();
        for (partition, from) in starts {
            let Some(to) = ends.remove(partition) else {
                return Err(StreamError::Truncated {
                    partition: partition.to_string(),
                }
                .into());
            };
            if to != from {
                advances.insert(partition.to_string(), PositionDiff::new(from, to));
            }
        }

        let ops = consumer.finish().await?;
        info!(records, advanced = advances.len(), ops = ops.len(), "round complete");
        Ok(LogDiff::new(advances, ops))
    }
}
