//! Record consumers for pipeline tests. Each finishes into a single
//! [`CounterOp`] keyed by the consumer's name.

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use multilog_core::errors::StreamError;
use multilog_core::{MultilogResult, RecordConsumer};

use crate::counter::CounterOp;

/// Logs every record it receives; finishes into `(key, record count)`.
#[derive(Debug, Clone)]
pub struct RecordingConsumer<T> {
    key: String,
    log: Arc<Mutex<Vec<T>>>,
    finished: Arc<Mutex<u32>>,
}

impl<T> RecordingConsumer<T> {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            log: Arc::default(),
            finished: Arc::default(),
        }
    }

    /// Shared handle to the received records; stays readable after the
    /// consumer has been moved into a pipeline.
    pub fn log(&self) -> Arc<Mutex<Vec<T>>> {
        Arc::clone(&self.log)
    }

    /// Number of `finish` calls so far.
    pub fn finish_count(&self) -> u32 {
        *self.finished.lock().expect("finish counter poisoned")
    }
}

#[async_trait]
impl<T: Send + 'static> RecordConsumer<T> for RecordingConsumer<T> {
    type Diff = CounterOp;

    async fn accept(&mut self, record: T) -> MultilogResult<()> {
        self.log.lock().expect("record log poisoned").push(record);
        Ok(())
    }

    async fn finish(&mut self) -> MultilogResult<Vec<CounterOp>> {
        *self.finished.lock().expect("finish counter poisoned") += 1;
        let count = self.log.lock().expect("record log poisoned").len();
        Ok(vec![CounterOp::new(self.key.clone(), count as i64)])
    }
}

/// Sums `i64` records; finishes into `(key, sum)`.
#[derive(Debug, Clone)]
pub struct SumConsumer {
    key: String,
    sum: i64,
}

impl SumConsumer {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            sum: 0,
        }
    }
}

#[async_trait]
impl RecordConsumer<i64> for SumConsumer {
    type Diff = CounterOp;

    async fn accept(&mut self, record: i64) -> MultilogResult<()> {
        self.sum += record;
        Ok(())
    }

    async fn finish(&mut self) -> MultilogResult<Vec<CounterOp>> {
        Ok(vec![CounterOp::new(self.key.clone(), self.sum)])
    }
}

/// Accepts `fail_at` records, then rejects the next one.
#[derive(Debug, Clone)]
pub struct FailingConsumer {
    fail_at: usize,
    accepted: Arc<Mutex<usize>>,
}

impl FailingConsumer {
    pub fn new(fail_at: usize) -> Self {
        Self {
            fail_at,
            accepted: Arc::default(),
        }
    }

    pub fn accepted(&self) -> usize {
        *self.accepted.lock().expect("accept counter poisoned")
    }
}

#[async_trait]
impl<T: Send + 'static> RecordConsumer<T> for FailingConsumer {
    type Diff = CounterOp;

    async fn accept(&mut self, _record: T) -> MultilogResult<()> {
        let mut accepted = self.accepted.lock().expect("accept counter poisoned");
        if *accepted == self.fail_at {
            return Err(StreamError::Consumer(format!("rejected record #{}", *accepted)).into());
        }
        *accepted += 1;
        Ok(())
    }

    async fn finish(&mut self) -> MultilogResult<Vec<CounterOp>> {
        Ok(Vec::new())
    }
}
