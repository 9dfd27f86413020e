//! Partition sources.

pub mod blocking;

pub use blocking::{BlockingReader, BlockingSource};
