//! Platform version parsing, comparison, and range matching.
//!
//! Generated-project platform versions carry a release qualifier with an
//! ordering that differs from both semver and Maven:
//! - Numeric components compare as numbers, missing components default to 0
//! - Qualifiers order as `M` (milestone) < `RC` < `RELEASE` < `SNAPSHOT`:
//!   a snapshot cut after a release sorts *after* that release
//! - A version without a qualifier is a release

pub mod range;
pub mod version;

pub use range::{Bound, VersionRange};
pub use version::{Qualifier, QualifierKind, Version};
