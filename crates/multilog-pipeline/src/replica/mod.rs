//! Optimistic commit loop of one replica.

pub mod driver;
pub mod outcome;

pub use driver::Replica;
pub use outcome::CommitOutcome;
