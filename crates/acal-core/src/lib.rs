//! # acal-core
//!
//! Core error definitions shared by the accounting-calendar crates.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure_config!` / `ensure_date!` macros.
pub mod errors;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
