//! Domain logic - pure version rules independent of git operations

pub mod branch;
pub mod collection;
pub mod commit;
pub mod prerelease;
pub mod tag;
pub mod version;

pub use branch::BranchContext;
pub use collection::VersionCollection;
pub use commit::HeadCommit;
pub use prerelease::{Identifier, PreRelease};
pub use tag::{parse_tag_text, parse_version_record, TagEntry};
pub use version::{larger, Tick, VersionRecord};
