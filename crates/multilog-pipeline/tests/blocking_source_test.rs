//! BlockingSource: ordering through the channel, early drop, read errors.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use multilog_core::config::StreamConfig;
use multilog_core::errors::StreamError;
use multilog_core::{MultilogError, MultilogResult, Position, ReadEvent, StreamSource};
use multilog_pipeline::{BlockingReader, BlockingSource, RoundProcessor};
use test_fixtures::{record_position, CounterOp, RecordingConsumer};
use tokio_stream::StreamExt;

/// Reads `len` numbered records per partition, or forever when `len` is
/// `None`. Counts produced events and flags when the iterator is dropped.
#[derive(Debug, Default)]
struct NumberReader {
    len: Option<usize>,
    produced: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

struct Numbers {
    next: usize,
    len: Option<usize>,
    done: bool,
    produced: Arc<AtomicUsize>,
    dropped: Arc<AtomicBool>,
}

impl Iterator for Numbers {
    type Item = MultilogResult<ReadEvent<u64>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        self.produced.fetch_add(1, Ordering::SeqCst);
        if Some(self.next) == self.len {
            self.done = true;
            return Some(Ok(ReadEvent::Finished(record_position(self.next))));
        }
        self.next += 1;
        Some(Ok(ReadEvent::Record(self.next as u64 - 1)))
    }
}

impl Drop for Numbers {
    fn drop(&mut self) {
        self.dropped.store(true, Ordering::SeqCst);
    }
}

impl BlockingReader for NumberReader {
    type Record = u64;
    type Events = Numbers;

    fn read(&self, partition: &str, from: &Position) -> MultilogResult<Numbers> {
        if partition == "broken" {
            return Err(StreamError::Source {
                partition: partition.to_string(),
                message: "cannot open".to_string(),
            }
            .into());
        }
        Ok(Numbers {
            next: usize::try_from(from.offset()).unwrap_or(0),
            len: self.len,
            done: false,
            produced: Arc::clone(&self.produced),
            dropped: Arc::clone(&self.dropped),
        })
    }
}

fn small_channel() -> StreamConfig {
    StreamConfig {
        channel_capacity: 2,
    }
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn records_arrive_in_order() {
    let reader = NumberReader {
        len: Some(500),
        ..Default::default()
    };
    let processor = RoundProcessor::new(BlockingSource::new(reader, &small_channel()));
    let mut consumer = RecordingConsumer::new("n");
    let log = consumer.log();

    let diff = processor
        .process(&["p".to_string()], &BTreeMap::new(), &mut consumer)
        .await
        .unwrap();

    assert_eq!(*log.lock().unwrap(), (0..500).collect::<Vec<u64>>());
    assert_eq!(diff.position("p").map(|d| d.to()), Some(&record_position(500)));
    assert_eq!(diff.ops(), &[CounterOp::new("n", 500)]);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn dropping_the_stream_stops_the_reader() {
    let reader = NumberReader::default();
    let produced = Arc::clone(&reader.produced);
    let dropped = Arc::clone(&reader.dropped);
    let source = BlockingSource::new(reader, &small_channel());

    let mut stream = source.open("p", &Position::initial()).await.unwrap();
    for expected in 0..3u64 {
        assert!(matches!(
            stream.next().await,
            Some(Ok(ReadEvent::Record(n))) if n == expected
        ));
    }
    drop(stream);

    let mut waited = Duration::ZERO;
    while !dropped.load(Ordering::SeqCst) {
        assert!(waited < Duration::from_secs(5), "reader kept running");
        tokio::time::sleep(Duration::from_millis(10)).await;
        waited += Duration::from_millis(10);
    }
    // Bounded by what fits in the channel plus the send that failed.
    assert!(produced.load(Ordering::SeqCst) <= 3 + 2 + 2);
}

#[tokio::test]
async fn read_error_surfaces_as_first_item() {
    let source = BlockingSource::new(NumberReader::default(), &small_channel());
    let mut stream = source.open("broken", &Position::initial()).await.unwrap();
    let first = stream.next().await.unwrap();
    assert!(matches!(
        first,
        Err(MultilogError::Stream(StreamError::Source { .. }))
    ));
    assert!(stream.next().await.is_none());
}
