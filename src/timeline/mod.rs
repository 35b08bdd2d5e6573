//! Scene layout on the absolute frame axis and its re-stitching after narration is measured.

/// Timeline construction and lookup.
pub mod builder;
/// Timesheet reconciliation.
pub mod reconcile;
