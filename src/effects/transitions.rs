use crate::{
    animation::ease::Ease,
    foundation::core::{Affine, AspectRatio, Canvas, Fps, FrameIndex, FrameRange, Vec2},
    foundation::math::lerp,
};

/// Visual transition played at both ends of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionKind {
    /// Opacity ramp.
    Fade,
    /// Translation along the layout's long axis.
    Slide,
    /// Scale from half size in, and past full size out.
    Zoom,
    /// Growing clip rectangle.
    Wipe,
}

impl TransitionKind {
    /// Default rotation for scenes without an explicit transition, indexed by scene position.
    pub const ROTATION: [Self; 4] = [Self::Fade, Self::Slide, Self::Zoom, Self::Fade];

    /// Explicit override, else the rotation entry for `scene_index`.
    pub fn for_scene(explicit: Option<Self>, scene_index: usize) -> Self {
        explicit.unwrap_or(Self::ROTATION[scene_index % Self::ROTATION.len()])
    }

    /// Window length in frames at 30fps.
    pub fn base_frames(self) -> u64 {
        match self {
            Self::Fade => 15,
            Self::Slide => 12,
            Self::Zoom => 18,
            Self::Wipe => 12,
        }
    }

    /// Window length at `fps`, clamped to half of a `scene_frames` long scene.
    pub fn window_frames(self, fps: Fps, scene_frames: u64) -> u64 {
        fps.scale_from_30(self.base_frames()).min(scene_frames / 2)
    }
}

/// Entry and exit windows of one scene, in scene-local frames.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TransitionWindows {
    /// `[0, D)`.
    pub entry: FrameRange,
    /// `[T - D, T)`.
    pub exit: FrameRange,
}

impl TransitionWindows {
    /// Windows for a scene of `scene_frames` frames. They never overlap.
    pub fn new(kind: TransitionKind, fps: Fps, scene_frames: u64) -> Self {
        let d = kind.window_frames(fps, scene_frames);
        Self {
            entry: FrameRange {
                start: FrameIndex(0),
                end: FrameIndex(d),
            },
            exit: FrameRange {
                start: FrameIndex(scene_frames - d),
                end: FrameIndex(scene_frames),
            },
        }
    }
}

/// Where a local frame sits relative to the transition windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TransitionPhase {
    /// Inside the entry window.
    Entry,
    /// Between the windows; identity transform.
    Hold,
    /// Inside the exit window.
    Exit,
}

/// Scene-level transform produced by the transition state machine.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionState {
    /// Active kind.
    pub kind: TransitionKind,
    /// Current phase.
    pub phase: TransitionPhase,
    /// Eased progress through the current window (`0` during hold).
    pub progress: f64,
    /// Scene opacity.
    pub opacity: f64,
    /// Horizontal offset in percent of the canvas width.
    pub translate_x_pct: f64,
    /// Vertical offset in percent of the canvas height.
    pub translate_y_pct: f64,
    /// Uniform scale about the canvas center.
    pub scale: f64,
    /// Visible width of the scene, in percent, revealed from the left edge.
    pub clip_width_pct: f64,
}

impl TransitionState {
    /// Fully visible, untransformed.
    pub fn identity(kind: TransitionKind) -> Self {
        Self {
            kind,
            phase: TransitionPhase::Hold,
            progress: 0.0,
            opacity: 1.0,
            translate_x_pct: 0.0,
            translate_y_pct: 0.0,
            scale: 1.0,
            clip_width_pct: 100.0,
        }
    }

    /// Return `true` when nothing is transformed.
    pub fn is_identity(&self) -> bool {
        self.opacity == 1.0
            && self.translate_x_pct == 0.0
            && self.translate_y_pct == 0.0
            && self.scale == 1.0
            && self.clip_width_pct == 100.0
    }

    /// Translation and scale as a canvas-space affine.
    pub fn affine(&self, canvas: Canvas) -> Affine {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let center = Vec2::new(w * 0.5, h * 0.5);
        Affine::translate(Vec2::new(
            self.translate_x_pct * w / 100.0,
            self.translate_y_pct * h / 100.0,
        )) * Affine::translate(center)
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

/// Inputs of [`transition_state`] that stay fixed for a whole scene.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TransitionParams {
    /// Kind, already resolved through [`TransitionKind::for_scene`].
    pub kind: TransitionKind,
    /// Scene length in frames.
    pub scene_frames: u64,
    /// Output layout; picks the slide axis.
    pub aspect_ratio: AspectRatio,
    /// Composition frame rate.
    pub fps: Fps,
    /// Apply the entry fade instead of starting fully opaque.
    pub symmetric_fade_in: bool,
}

/// Transition state at `local_frame`.
///
/// Entry progress is `f / D`, so the first frame is the untouched start value; exit progress is
/// `(f - (T - D) + 1) / D`, so the last frame reaches the end value. Both go through the CSS `ease`
/// curve. A plain fade only affects opacity on exit unless symmetric fade-in is enabled, which
/// keeps back-to-back scenes from dipping to black at the cut.
pub fn transition_state(params: &TransitionParams, local_frame: u64) -> TransitionState {
    let kind = params.kind;
    let windows = TransitionWindows::new(kind, params.fps, params.scene_frames);
    let f = FrameIndex(local_frame);

    let (phase, raw) = if windows.entry.contains(f) {
        let d = windows.entry.len_frames() as f64;
        (TransitionPhase::Entry, local_frame as f64 / d)
    } else if windows.exit.contains(f) {
        let d = windows.exit.len_frames() as f64;
        let into = (local_frame - windows.exit.start.0 + 1) as f64;
        (TransitionPhase::Exit, into / d)
    } else {
        return TransitionState::identity(kind);
    };

    let p = Ease::CSS_EASE.apply(raw);
    let mut state = TransitionState {
        phase,
        progress: p,
        ..TransitionState::identity(kind)
    };
    let entering = phase == TransitionPhase::Entry;

    match kind {
        TransitionKind::Fade => {
            if !entering {
                state.opacity = lerp(1.0, 0.0, p);
            } else if params.symmetric_fade_in {
                state.opacity = lerp(0.0, 1.0, p);
            }
        }
        TransitionKind::Slide => {
            let offset = if entering {
                lerp(100.0, 0.0, p)
            } else {
                lerp(0.0, -100.0, p)
            };
            if params.aspect_ratio.is_portrait() {
                state.translate_y_pct = offset;
            } else {
                state.translate_x_pct = offset;
            }
        }
        TransitionKind::Zoom => {
            state.scale = if entering {
                lerp(0.5, 1.0, p)
            } else {
                lerp(1.0, 1.5, p)
            };
        }
        TransitionKind::Wipe => {
            state.clip_width_pct = if entering {
                lerp(0.0, 100.0, p)
            } else {
                lerp(100.0, 0.0, p)
            };
        }
    }
    state
}

#[cfg(test)]
#[path = "../../tests/unit/effects/transitions.rs"]
mod tests;
