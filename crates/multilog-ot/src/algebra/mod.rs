//! OT algebra over [`LogDiff`](crate::LogDiff).

pub mod log_algebra;

pub use log_algebra::LogAlgebra;
