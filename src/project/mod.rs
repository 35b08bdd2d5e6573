//! Revisioned, single-writer ownership of the mutable project.

/// Project store.
pub mod store;
