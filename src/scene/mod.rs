//! Project boundary model: scenes, assets, sound effects and engine tunables.

/// Engine tunables.
pub mod config;
/// Project and scene data model.
pub mod model;
