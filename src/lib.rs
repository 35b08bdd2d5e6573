//! Storyreel is a deterministic timeline and animation engine for narrated scene videos.
//!
//! A [`Project`] is an ordered list of scenes (text, background image, narration, assets, sound
//! effects) with optional opening and ending cards. The engine:
//!
//! - lays scenes end-to-end on a frame axis ([`Timeline`]) and re-stitches that layout when
//!   measured narration arrives ([`reconcile`], [`ProjectStore`])
//! - turns any absolute frame into a [`VisualTree`] through a pure [`Renderer`]
//! - streams frame ranges into a [`FrameSink`] through a [`RenderSession`]
//! - dispatches external narration/image synthesis in bounded batches ([`dispatch_batches`])
//!
//! Pixel rasterization and audio mixing are left to the host consuming the trees.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

/// Easing curves, springs and seeded noise.
pub mod animation;
/// Audio directives for narration, music and sound effects.
pub mod audio;
/// Per-frame visual effects: transitions, Ken-Burns, overlays, asset motion.
pub mod effects;
/// External media synthesis.
pub mod media;
/// Revisioned project ownership.
pub mod project;
/// Frame rendering and range sessions.
pub mod render;
/// Boundary data model.
pub mod scene;
/// Text segmentation and reveal animation.
pub mod text;
/// Frame-axis layout of scenes.
pub mod timeline;

pub use crate::foundation::core::{
    Affine, AspectRatio, Canvas, Fps, FrameIndex, FrameRange, Rect, Rgba8, Vec2,
};
pub use crate::foundation::error::{StoryError, StoryResult};
pub use crate::foundation::warning::{MediaKind, Warning};

pub use crate::audio::directives::{AudioDirective, AudioPlan, AudioRole, build_audio_plan};
pub use crate::effects::transitions::TransitionKind;
pub use crate::media::batch::{
    BatchOpts, BatchReport, CancelToken, MediaSynthesizer, dispatch_batches,
};
pub use crate::project::store::{ApplyOutcome, ProjectSnapshot, ProjectStore};
pub use crate::render::fingerprint::{FrameFingerprint, fingerprint_tree};
pub use crate::render::frame::Renderer;
pub use crate::render::session::{RenderOpts, RenderSession, RenderStats};
pub use crate::render::sink::{FrameSink, InMemorySink, JsonLinesSink, SinkConfig};
pub use crate::render::tree::{Layer, VisualTree};
pub use crate::scene::config::EngineConfig;
pub use crate::scene::model::{Project, RenderRequest, Scene, SceneDescriptor, TextDisplayMode};
pub use crate::timeline::builder::{Segment, Timeline, TimelineWindow, build_timeline};
pub use crate::timeline::reconcile::{Reconciled, TimesheetEntry, reconcile};
