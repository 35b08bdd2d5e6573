use crate::{
    foundation::core::{Fps, Rgba8},
    scene::model::Emotion,
};

/// Vertical tint gradient drawn over the background.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TintGradient {
    /// Color at the top edge.
    pub top: Rgba8,
    /// Color at the bottom edge.
    pub bottom: Rgba8,
}

/// Soft diagonal light band sweeping across the frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LightSweep {
    /// Band center in percent of the canvas width; travels from -20 to 120.
    pub center_x_pct: f64,
    /// Band width in percent of the canvas width.
    pub width_pct: f64,
    /// Band tilt in degrees.
    pub angle_deg: f64,
    /// Peak additive brightness in `[0, 1]`.
    pub intensity: f64,
}

/// Radial edge darkening.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vignette {
    /// Radius of the untouched center, in percent of the half diagonal.
    pub inner_radius_pct: f64,
    /// Opacity of black at the corners.
    pub strength: f64,
}

/// Every overlay of one scene frame, in draw order.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneOverlays {
    /// Mood tint.
    pub tint: TintGradient,
    /// Moving light.
    pub light: LightSweep,
    /// Edge darkening.
    pub vignette: Vignette,
}

/// Fixed vignette applied to every scene.
pub const VIGNETTE: Vignette = Vignette {
    inner_radius_pct: 60.0,
    strength: 0.35,
};

const SWEEP_PERIOD_SECS: f64 = 8.0;
const SWEEP_PEAK: f64 = 0.08;

/// Gradient tint for a scene mood; no mood reads as neutral.
pub fn tint_for(emotion: Option<Emotion>) -> TintGradient {
    let (top, bottom) = match emotion.unwrap_or(Emotion::Neutral) {
        Emotion::Neutral => (Rgba8::rgb(0, 0, 0), Rgba8::rgb(0, 0, 0)),
        Emotion::Happy => (Rgba8::rgb(255, 200, 80), Rgba8::rgb(255, 120, 60)),
        Emotion::Sad => (Rgba8::rgb(40, 60, 120), Rgba8::rgb(10, 20, 60)),
        Emotion::Excited => (Rgba8::rgb(255, 80, 120), Rgba8::rgb(255, 160, 0)),
        Emotion::Calm => (Rgba8::rgb(80, 180, 200), Rgba8::rgb(40, 100, 160)),
        Emotion::Serious => (Rgba8::rgb(30, 30, 40), Rgba8::rgb(0, 0, 0)),
        Emotion::Surprised => (Rgba8::rgb(180, 90, 255), Rgba8::rgb(60, 200, 255)),
    };
    TintGradient {
        top: top.scale_alpha(0.18),
        bottom: bottom.scale_alpha(0.45),
    }
}

/// Light sweep position at `local_frame`; loops every few seconds.
pub fn light_sweep(local_frame: u64, fps: Fps) -> LightSweep {
    let period = (SWEEP_PERIOD_SECS * fps.as_f64()).max(1.0);
    let phase = (local_frame as f64 / period).fract();
    LightSweep {
        center_x_pct: -20.0 + 140.0 * phase,
        width_pct: 25.0,
        angle_deg: 20.0,
        intensity: SWEEP_PEAK * (std::f64::consts::PI * phase).sin(),
    }
}

/// All overlays for a scene at `local_frame`.
pub fn scene_overlays(emotion: Option<Emotion>, local_frame: u64, fps: Fps) -> SceneOverlays {
    SceneOverlays {
        tint: tint_for(emotion),
        light: light_sweep(local_frame, fps),
        vignette: VIGNETTE,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/overlays.rs"]
mod tests;
