//! Shared utilities for the blueprint generation engine.
//!
//! This crate holds the unified error type used across the workspace.
//! It is intentionally free of async code and network I/O.

pub mod errors;
