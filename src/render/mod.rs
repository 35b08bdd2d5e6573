//! Frame renderer: `render(frame) -> VisualTree`, plus range rendering into sinks.

/// Visual fingerprints.
pub mod fingerprint;
/// The pure per-frame renderer.
pub mod frame;
/// Range rendering.
pub mod session;
/// Frame sinks.
pub mod sink;
/// Output tree types.
pub mod tree;
