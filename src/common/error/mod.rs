//! Unified error types for deckwright.
//!
//! This module provides the error type returned by the public generation API.

// Submodule declarations
pub mod types;

// Re-exports
pub use types::{Error, Result};
