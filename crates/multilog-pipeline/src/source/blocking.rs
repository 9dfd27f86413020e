//! Bridge for partition readers that block (file or database reads).
//!
//! The reader runs on the tokio blocking pool and hands events back through
//! a bounded channel, so a slow consumer stalls the reader instead of
//! buffering the partition in memory. Dropping the stream closes the channel
//! and the reader stops at its next send.

use std::sync::Arc;

use async_trait::async_trait;
use multilog_core::config::StreamConfig;
use multilog_core::{MultilogResult, PartitionStream, Position, ReadEvent, StreamSource};
use tokio::sync::mpsc;
use tokio_stream::wrappers::ReceiverStream;
use tracing::debug;

/// A synchronous partition reader.
///
/// `read` is called on a blocking-pool thread; the returned iterator is
/// drained there and never crosses threads.
pub trait BlockingReader: Send + Sync + 'static {
    type Record: Send + 'static;
    type Events: Iterator<Item = MultilogResult<ReadEvent<Self::Record>>>;

    fn read(&self, partition: &str, from: &Position) -> MultilogResult<Self::Events>;
}

#[derive(Debug)]
pub struct BlockingSource<R> {
    reader: Arc<R>,
    channel_capacity: usize,
}

impl<R: BlockingReader> BlockingSource<R> {
    pub fn new(reader: R, config: &StreamConfig) -> Self {
        Self {
            reader: Arc::new(reader),
            channel_capacity: config.channel_capacity.max(1),
        }
    }

    pub fn reader(&self) -> &R {
        &self.reader
    }
}

#[async_trait]
impl<R: BlockingReader> StreamSource for BlockingSource<R> {
    type Record = R::Record;

    async fn open(
        &self,
        partition: &str,
        from: &Position,
    ) -> MultilogResult<PartitionStream<R::Record>> {
        let (tx, rx) = mpsc::channel(self.channel_capacity);
        let reader = Arc::clone(&self.reader);
        let partition = partition.to_string();
        let from = from.clone();

        tokio::task::spawn_blocking(move || {
            let events = match reader.read(&partition, &from) {
                Ok(events) => events,
                Err(e) => {
                    // Nobody listening is fine: the round is already gone.
                    let _ = tx.blocking_send(Err(e));
                    return;
                }
            };
            for event in events {
                if tx.blocking_send(event).is_err() {
                    debug!(partition = %partition, "stream dropped, stopping reader");
                    return;
                }
            }
        });

        Ok(Box::pin(ReceiverStream::new(rx)))
    }
}
