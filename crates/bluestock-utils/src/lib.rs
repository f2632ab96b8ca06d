//! Shared utilities for the Bluestock client
//!
//! Currently this is the tracing setup shared by every binary in the workspace.

pub mod logging;

pub use logging::{init_tracing, init_tracing_with_default};
