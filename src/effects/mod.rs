//! Per-scene visual engines. Every function here is pure in its scene data and local frame.

/// Decorative asset animation.
pub mod asset_motion;
/// Ken-Burns pan/zoom.
pub mod ken_burns;
/// Tint, light sweep and vignette overlays.
pub mod overlays;
/// Entry/exit transition state machine.
pub mod transitions;
