//! Maven collaborator for the blueprint engine: repository URL layout,
//! release-train BOM fetching and parsing, and the managed-version
//! resolver backed by an immutable BOM snapshot cache.

pub mod bom;
pub mod fetch;
pub mod repository;
pub mod train;

pub use bom::{parse_bom, ManagedBom, ManagedDependency};
pub use repository::MavenRepository;
pub use train::ReleaseTrainResolver;
