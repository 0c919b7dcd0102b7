//! Shared utilities for the `bestfit` crates.
//!
//! Currently only the hash containers used by the value model and the
//! type registry, see [`hash`].

// -----------------------------------------------------------------------------
// Modules

pub mod hash;
