//! Pure animation primitives: easing curves, closed-form springs and seeded noise.

/// Easing curves.
pub mod ease;
/// Seeded, stateless noise.
pub mod noise;
/// Damped springs.
pub mod spring;
