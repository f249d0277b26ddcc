//! Shared primitives and traits for the Velella metrics ecosystem.
//!
//! `velella-core` provides the foundation that the other Velella crates
//! build on:
//!
//! - **Error types** — [`VelellaError`] and [`Result`] for structured error handling
//! - **Traits** — [`Mergeable`] for distributed state merging, [`Summarizable`] for display

pub mod error;
pub mod traits;

pub use error::{Result, VelellaError};
pub use traits::*;
