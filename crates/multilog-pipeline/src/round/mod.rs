//! Round processing: partition streams in, one commit candidate out.

pub mod processor;

pub use processor::RoundProcessor;
