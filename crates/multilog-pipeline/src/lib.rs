//! # multilog-pipeline
//!
//! Drives one replica: reads a round of records from its partitions into a
//! consumer, turns the result into one commit candidate, and pushes it to a
//! commit store under optimistic concurrency.
//!
//! - `round`: `RoundProcessor`, partition streams into one `LogDiff`
//! - `fanout`: one record stream feeding several consumers
//! - `source`: bridge for blocking partition readers
//! - `replica`: checkout, commit, rebase-and-retry
//! - `store`: in-memory `CommitStore`

pub mod fanout;
pub mod replica;
pub mod round;
pub mod source;
pub mod store;

pub use fanout::{FanoutBuilder, FanoutConsumer};
pub use replica::{CommitOutcome, Replica};
pub use round::RoundProcessor;
pub use source::{BlockingReader, BlockingSource};
pub use store::MemoryCommitStore;
