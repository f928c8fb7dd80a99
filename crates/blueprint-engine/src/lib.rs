//! The build-transformation engine: an ordered pipeline of conditional
//! transformation units over a mutable build descriptor.
//!
//! A request's immutable [`FeatureSelection`](blueprint_core::selection::FeatureSelection)
//! seeds a [`Build`](blueprint_core::build::Build) from the catalog, then
//! every registered customizer whose condition holds runs exactly once in
//! declared order. Identical inputs yield structurally identical
//! descriptors: no wall clock, no randomness, no unordered iteration.

pub mod customizer;
pub mod defaults;
pub mod dispatch;
pub mod ordering;
pub mod pin;
pub mod pipeline;
pub mod rule;

pub use customizer::{BuildCustomizer, FnCustomizer};
pub use pin::{FixedVersionResolver, ManagedVersionPin, ManagedVersionResolver, PinTarget};
pub use pipeline::Pipeline;
pub use rule::{ImplicitRule, RuleRegistry, RuleRegistryCustomizer, RuleScope};
