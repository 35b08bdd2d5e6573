//! Declarative audio compositor.

/// Audio directives and the project-wide plan.
pub mod directives;
