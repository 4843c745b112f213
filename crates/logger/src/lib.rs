//! Process-wide `tracing` subscriber setup shared by the Sentinel binaries.

mod subscriber;

pub use subscriber::{init_tracing, init_tracing_with_level};
