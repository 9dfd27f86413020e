//! # multilog-core
//!
//! Foundation crate for the multilog OT engine.
//! Defines log positions, the consumed traits (domain algebra, record
//! consumers, partition sources), errors, config, and tracing setup.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod position;
pub mod tracing_setup;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::MultilogConfig;
pub use errors::{MultilogError, MultilogResult};
pub use position::{LogFile, Position};
pub use traits::{
    DomainAlgebra, DomainState, Merge, OtSystem, PartitionStream, ReadEvent, RecordConsumer,
    Resolution, StreamSource, TransformResult,
};
