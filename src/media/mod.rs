//! Seam to external narration/image synthesis.

/// Bounded batch dispatch.
pub mod batch;
