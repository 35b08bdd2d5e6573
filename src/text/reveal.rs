use std::collections::BTreeSet;
use std::f64::consts::TAU;

use crate::{
    animation::{ease::Ease, spring::SpringConfig},
    foundation::core::{Fps, Rgba8},
    foundation::math::interpolate_clamped,
    scene::config::EngineConfig,
    scene::model::TextDisplayMode,
    text::segment::{TextUnit, bounce_chunks, typewriter_units},
};

/// Accent color of emphasized units.
pub const EMPHASIS_COLOR: Rgba8 = Rgba8::rgb(255, 214, 10);
/// Color of regular units.
pub const TEXT_COLOR: Rgba8 = Rgba8::WHITE;
/// Font weight of regular units.
pub const REGULAR_WEIGHT: u16 = 600;
/// Font weight of emphasized units.
pub const EMPHASIS_WEIGHT: u16 = 800;
/// Glow radius in pixels of emphasized word-bounce chunks.
pub const EMPHASIS_GLOW_PX: f64 = 12.0;

const BOUNCE_DROP_PX: f64 = 40.0;
const BOUNCE_TILT_DEG: f64 = 12.0;
const BOUNCE_FADE_FRAMES: f64 = 5.0;
const CARET_BLINK_SECS: f64 = 1.0;

/// Visual state of one reveal unit.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnitState {
    /// Unit text.
    pub text: String,
    /// Render a space after this unit.
    pub space_after: bool,
    /// Emphasis flag carried from segmentation.
    pub emphasized: bool,
    /// Opacity in `[0, 1]`.
    pub opacity: f64,
    /// Scale about the unit's center.
    pub scale: f64,
    /// Vertical offset in pixels (negative is up).
    pub translate_y_px: f64,
    /// Rotation in degrees.
    pub rotation_deg: f64,
    /// Fill color.
    pub color: Rgba8,
    /// Font weight.
    pub weight: u16,
    /// Glow radius in pixels; zero for none.
    pub glow_px: f64,
}

impl UnitState {
    fn settled(unit: &TextUnit) -> Self {
        let (color, weight) = if unit.emphasized {
            (EMPHASIS_COLOR, EMPHASIS_WEIGHT)
        } else {
            (TEXT_COLOR, REGULAR_WEIGHT)
        };
        Self {
            text: unit.text.clone(),
            space_after: unit.space_after,
            emphasized: unit.emphasized,
            opacity: 1.0,
            scale: 1.0,
            translate_y_px: 0.0,
            rotation_deg: 0.0,
            color,
            weight,
            glow_px: 0.0,
        }
    }
}

/// Typewriter caret.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Caret {
    /// Index of the most recently revealed unit; `None` before the first one.
    pub after_unit: Option<usize>,
    /// Blink phase.
    pub visible: bool,
}

/// Reveal state of a scene's center text at one frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextReveal {
    /// Mode that produced this state.
    pub mode: TextDisplayMode,
    /// Every unit, revealed or not, in reading order.
    pub units: Vec<UnitState>,
    /// Caret, while a typewriter reveal is in progress.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caret: Option<Caret>,
}

impl TextReveal {
    /// Return `true` when no unit is visible.
    pub fn is_blank(&self) -> bool {
        self.units.iter().all(|u| u.opacity <= 0.0)
    }
}

/// Per-unit start frames of a typewriter reveal.
///
/// `frames_per_unit = floor(fraction * T / n)`; unit `i` starts at `delay + i * frames_per_unit`.
/// The delay is shortened when needed so the last unit starts no later than `fraction * T`,
/// leaving the tail of the scene for the fully revealed text.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypewriterSchedule {
    /// Units to reveal.
    pub unit_count: usize,
    /// Frames between consecutive unit starts.
    pub frames_per_unit: u64,
    /// Frame of the first unit.
    pub start_delay: u64,
    /// Last frame a unit may start on.
    pub reveal_frames: u64,
}

impl TypewriterSchedule {
    /// Schedule `unit_count` units over a scene of `scene_frames` frames.
    pub fn new(unit_count: usize, scene_frames: u64, cfg: &EngineConfig, fps: Fps) -> Self {
        let reveal_frames = (cfg.typewriter_reveal_fraction * scene_frames as f64).floor() as u64;
        let n = unit_count as u64;
        let frames_per_unit = if n == 0 { 0 } else { reveal_frames / n };
        let wanted_delay = scaled_frames(cfg.typewriter_start_delay_frames, fps);
        let span = n.saturating_sub(1) * frames_per_unit;
        Self {
            unit_count,
            frames_per_unit,
            start_delay: wanted_delay.min(reveal_frames.saturating_sub(span)),
            reveal_frames,
        }
    }

    /// Local frame on which unit `index` starts to appear.
    pub fn start_frame(&self, index: usize) -> u64 {
        let i = index as u64;
        if self.frames_per_unit > 0 {
            return self.start_delay + i * self.frames_per_unit;
        }
        // More units than frames: spread them evenly instead of revealing all at once.
        let budget = self.reveal_frames.saturating_sub(self.start_delay);
        let n = (self.unit_count as u64).max(1);
        self.start_delay + i * budget / n
    }
}

fn scaled_frames(frames_at_30: u64, fps: Fps) -> u64 {
    if frames_at_30 == 0 {
        0
    } else {
        fps.scale_from_30(frames_at_30)
    }
}

#[derive(Clone, Debug, PartialEq)]
enum Plan {
    Instant,
    Typewriter {
        schedule: TypewriterSchedule,
        fade_frames: u64,
    },
    Bounce {
        starts: Vec<u64>,
    },
}

/// Segmented text of one scene, ready to be sampled at any local frame.
///
/// Built once per scene; [`SceneText::at`] only reads it, so samples may be taken in any order and
/// from several threads.
#[derive(Clone, Debug, PartialEq)]
pub struct SceneText {
    mode: TextDisplayMode,
    units: Vec<TextUnit>,
    plan: Plan,
    fps: Fps,
}

impl SceneText {
    /// Segment `text` for `mode` in a scene of `scene_frames` frames.
    pub fn new(
        text: &str,
        emphasis: &BTreeSet<String>,
        mode: TextDisplayMode,
        scene_frames: u64,
        cfg: &EngineConfig,
        fps: Fps,
    ) -> Self {
        let (units, plan) = match mode {
            TextDisplayMode::Instant => (typewriter_units(text, emphasis), Plan::Instant),
            TextDisplayMode::SyncTypewriter => {
                let units = typewriter_units(text, emphasis);
                let schedule = TypewriterSchedule::new(units.len(), scene_frames, cfg, fps);
                let fade_frames = scaled_frames(cfg.typewriter_fade_frames, fps).max(1);
                (
                    units,
                    Plan::Typewriter {
                        schedule,
                        fade_frames,
                    },
                )
            }
            TextDisplayMode::WordBounce => {
                let units = bounce_chunks(
                    text,
                    emphasis,
                    cfg.dense_chunk_min_chars,
                    cfg.dense_chunk_max_chars,
                );
                let stagger = cfg.word_bounce_stagger_seconds * fps.as_f64();
                let starts = (0..units.len())
                    .map(|i| (i as f64 * stagger).round() as u64)
                    .collect();
                (units, Plan::Bounce { starts })
            }
        };
        Self {
            mode,
            units,
            plan,
            fps,
        }
    }

    /// Reveal mode.
    pub fn mode(&self) -> TextDisplayMode {
        self.mode
    }

    /// Segmented units.
    pub fn units(&self) -> &[TextUnit] {
        &self.units
    }

    /// Return `true` when the text has nothing to show.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Typewriter schedule, for typewriter scenes.
    pub fn schedule(&self) -> Option<&TypewriterSchedule> {
        match &self.plan {
            Plan::Typewriter { schedule, .. } => Some(schedule),
            _ => None,
        }
    }

    /// Reveal state at `local_frame`.
    pub fn at(&self, local_frame: u64) -> TextReveal {
        let (units, caret) = match &self.plan {
            Plan::Instant => (self.units.iter().map(UnitState::settled).collect(), None),
            Plan::Typewriter {
                schedule,
                fade_frames,
            } => self.typewriter_at(schedule, *fade_frames, local_frame),
            Plan::Bounce { starts } => (self.bounce_at(starts, local_frame), None),
        };
        TextReveal {
            mode: self.mode,
            units,
            caret,
        }
    }

    fn typewriter_at(
        &self,
        schedule: &TypewriterSchedule,
        fade_frames: u64,
        f: u64,
    ) -> (Vec<UnitState>, Option<Caret>) {
        let mut last_started = None;
        let units: Vec<UnitState> = self
            .units
            .iter()
            .enumerate()
            .map(|(i, unit)| {
                let start = schedule.start_frame(i);
                let mut s = UnitState::settled(unit);
                if f < start {
                    s.opacity = 0.0;
                } else {
                    last_started = Some(i);
                    let t = (f - start + 1) as f64 / fade_frames as f64;
                    s.opacity = Ease::OutQuad.apply(t);
                }
                s
            })
            .collect();

        let finished = units.last().is_none_or(|u| u.opacity >= 1.0);
        let caret = (!finished).then(|| {
            let phase = (f as f64 / self.fps.as_f64()) * TAU / CARET_BLINK_SECS;
            Caret {
                after_unit: last_started,
                visible: phase.sin() >= 0.0,
            }
        });
        (units, caret)
    }

    fn bounce_at(&self, starts: &[u64], f: u64) -> Vec<UnitState> {
        self.units
            .iter()
            .zip(starts)
            .map(|(unit, &start)| {
                let mut s = UnitState::settled(unit);
                if unit.emphasized {
                    s.glow_px = EMPHASIS_GLOW_PX;
                }
                let elapsed = f as f64 - start as f64;
                let k = if elapsed <= 0.0 {
                    0.0
                } else {
                    SpringConfig::BOUNCY.sample(elapsed, self.fps)
                };
                s.scale = k;
                s.translate_y_px = -BOUNCE_DROP_PX * (1.0 - k);
                s.rotation_deg = -BOUNCE_TILT_DEG * (1.0 - k);
                s.opacity = interpolate_clamped(elapsed, [0.0, BOUNCE_FADE_FRAMES], [0.0, 1.0]);
                s
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/text/reveal.rs"]
mod tests;
