//! Frame/time units, colors, errors and small numeric helpers shared by every engine.

pub(crate) mod core;
pub(crate) mod error;
pub(crate) mod math;
pub(crate) mod warning;
