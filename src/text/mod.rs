//! Text reveal engine: segmentation into units and the three reveal modes.

/// Instant, typewriter and word-bounce reveal state.
pub mod reveal;
/// Units and chunks.
pub mod segment;
