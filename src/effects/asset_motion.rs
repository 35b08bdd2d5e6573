use std::f64::consts::TAU;

use crate::{
    animation::{ease::Ease, spring::SpringConfig},
    foundation::core::Fps,
    foundation::math::interpolate_clamped,
    scene::model::{Asset, AssetAnimation},
};

/// Animated state of a decorative asset at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetMotion {
    /// Opacity in `[0, resting opacity]`.
    pub opacity: f64,
    /// Vertical offset in percent of the canvas height (negative is up).
    pub translate_y_pct: f64,
    /// Uniform scale about the asset's center.
    pub scale: f64,
}

impl AssetMotion {
    fn resting(opacity: f64) -> Self {
        Self {
            opacity,
            translate_y_pct: 0.0,
            scale: 1.0,
        }
    }

    fn hidden() -> Self {
        Self {
            opacity: 0.0,
            translate_y_pct: 0.0,
            scale: 1.0,
        }
    }
}

const SLIDE_DISTANCE_PCT: f64 = 10.0;
const BOUNCE_FADE_FRAMES: f64 = 5.0;
const PULSE_PERIOD_SECS: f64 = 1.5;
const PULSE_AMPLITUDE: f64 = 0.05;
const FLOAT_PERIOD_SECS: f64 = 3.0;
const FLOAT_AMPLITUDE_PCT: f64 = 1.5;

/// Motion of `asset` at scene-local `local_frame`.
pub fn asset_motion(asset: &Asset, local_frame: u64, fps: Fps) -> AssetMotion {
    let rest = asset.opacity.clamp(0.0, 1.0);
    if asset.animation_kind == AssetAnimation::None {
        return AssetMotion::resting(rest);
    }

    let delay = asset.animation_delay_seconds * fps.as_f64();
    let elapsed = local_frame as f64 - delay;
    if elapsed < 0.0 {
        return AssetMotion::hidden();
    }
    let duration = asset.animation_duration_seconds * fps.as_f64();
    let raw = if duration <= 0.0 {
        1.0
    } else {
        (elapsed / duration).min(1.0)
    };
    let p = Ease::OutCubic.apply(raw);
    let after_entry_secs = ((elapsed - duration).max(0.0)) / fps.as_f64();

    let mut m = AssetMotion {
        opacity: rest * p,
        ..AssetMotion::resting(rest)
    };
    match asset.animation_kind {
        AssetAnimation::None | AssetAnimation::FadeIn => {}
        AssetAnimation::SlideUp => {
            m.translate_y_pct = SLIDE_DISTANCE_PCT * (1.0 - p);
        }
        AssetAnimation::ZoomIn => {
            m.scale = 0.5 + 0.5 * p;
        }
        AssetAnimation::Bounce => {
            m.scale = SpringConfig::BOUNCY.sample(elapsed, fps);
            m.opacity = rest * interpolate_clamped(elapsed, [0.0, BOUNCE_FADE_FRAMES], [0.0, 1.0]);
        }
        AssetAnimation::Pulse => {
            m.scale = 1.0 + PULSE_AMPLITUDE * (TAU * after_entry_secs / PULSE_PERIOD_SECS).sin();
        }
        AssetAnimation::Float => {
            m.translate_y_pct =
                -FLOAT_AMPLITUDE_PCT * (TAU * after_entry_secs / FLOAT_PERIOD_SECS).sin();
        }
    }
    m
}

#[cfg(test)]
#[path = "../../tests/unit/effects/asset_motion.rs"]
mod tests;
