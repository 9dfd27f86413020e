//! One input stream, several independent consumers, one combined diff list.

pub mod builder;
pub mod consumer;
mod output;

pub use builder::FanoutBuilder;
pub use consumer::FanoutConsumer;
