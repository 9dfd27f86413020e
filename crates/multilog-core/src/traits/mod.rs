//! Contracts between the engine and its collaborators.

pub mod domain;
pub mod ot_system;
pub mod record_consumer;
pub mod stream_source;

pub use domain::{DomainAlgebra, DomainState, Resolution, TransformResult};
pub use ot_system::{Merge, OtSystem};
pub use record_consumer::RecordConsumer;
pub use stream_source::{PartitionStream, ReadEvent, StreamSource};
