//! Turning raw repository history into version collections

pub mod history;

pub use history::{collect_versions, versions_from_entries, versions_from_log};
