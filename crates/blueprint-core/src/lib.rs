//! Core data model for the blueprint generation engine.
//!
//! This crate defines the types that represent one generation request:
//! the immutable feature selection, the mutable build descriptor with its
//! insertion-ordered item containers (dependencies, BOMs, properties,
//! plugins, repositories), the TOML-declared dependency catalog, and the
//! help-document model mutated alongside the build.
//!
//! This crate is intentionally free of async code and network I/O.

pub mod bom;
pub mod build;
pub mod catalog;
pub mod container;
pub mod dependency;
pub mod help;
pub mod plugin;
pub mod property;
pub mod repository;
pub mod selection;
