//! Commit store implementations.

pub mod memory;

pub use memory::MemoryCommitStore;
