//! Workflows behind the command line
//!
//! Argument parsing stays in the binary; these functions only need paths,
//! flags and configuration, so they can be driven programmatically.

pub mod orchestration;

pub use orchestration::{increase_version, list_versions, show_versions, IncreaseOutcome};
