//! Core types for shimhook
//!
//! This is the foundation crate (Layer 0) that all other shimhook crates depend on.
//! It provides:
//! - The hook specification data model (HookDescriptor, Hooks, RuntimeSpec)
//! - Lifecycle phase names
//! - The error taxonomy shared by the engine and its callers
//!
//! This crate has no dependencies on other shimhook crates.

pub mod error;
pub mod spec;

pub use error::{Error, PhaseError, Result};
pub use spec::{HookDescriptor, Hooks, Phase, RuntimeSpec};
