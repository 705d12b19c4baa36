//! Shared utilities for the governance engine.

pub mod logging;
pub mod time;

pub use logging::{init_tracing, init_tracing_with, LogFormat};
pub use time::{format_duration, format_window};
