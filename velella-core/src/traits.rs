//! Core trait definitions for the Velella ecosystem.
//!
//! These traits define the contracts that metric types implement across crates.

use crate::{Result, VelellaError};

/// A partial metric state that can absorb a peer's state.
///
/// Merging consumes the donor: after [`merge`](Mergeable::merge) the receiver
/// reflects both states and the donor is gone. Implementations must be
/// commutative and associative in their effect on any final computation, so
/// that independent workers can hand off their states in arbitrary order.
pub trait Mergeable: Sized {
    /// Fold `donor` into `self`.
    ///
    /// # Errors
    ///
    /// Returns an error if the two states are not compatible (e.g. were
    /// configured with different shapes).
    fn merge(&mut self, donor: Self) -> Result<()>;

    /// Merge a collection of states into one.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection is empty or any pair of states is
    /// incompatible.
    fn merge_all<I>(states: I) -> Result<Self>
    where
        I: IntoIterator<Item = Self>,
    {
        let mut iter = states.into_iter();
        let mut merged = iter
            .next()
            .ok_or_else(|| VelellaError::InvalidInput("empty state collection".into()))?;
        for state in iter {
            merged.merge(state)?;
        }
        Ok(merged)
    }
}

/// A type that can produce a summary of its contents.
pub trait Summarizable {
    /// A one-line summary suitable for display.
    fn summary(&self) -> String;
}
