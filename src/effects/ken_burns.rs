use crate::{
    animation::{ease::Ease, noise::value_noise_1d},
    foundation::core::{Affine, Canvas, Vec2},
    foundation::math::lerp,
    scene::config::EngineConfig,
};

/// One pan/zoom pattern: zoom and pan ranges, pans in percent of the canvas.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KenBurnsPattern {
    /// Zoom at scene start and end.
    pub zoom: [f64; 2],
    /// Horizontal pan at scene start and end.
    pub pan_x: [f64; 2],
    /// Vertical pan at scene start and end.
    pub pan_y: [f64; 2],
}

impl KenBurnsPattern {
    const fn new(zoom: [f64; 2], pan_x: [f64; 2], pan_y: [f64; 2]) -> Self {
        Self { zoom, pan_x, pan_y }
    }
}

/// Fixed pattern catalogue, cycled by scene position.
pub const PATTERNS: [KenBurnsPattern; 6] = [
    // slow push in
    KenBurnsPattern::new([1.0, 1.15], [0.0, 0.0], [0.0, 0.0]),
    // pull back while drifting right
    KenBurnsPattern::new([1.15, 1.05], [-3.0, 3.0], [0.0, 0.0]),
    // held zoom, pan left
    KenBurnsPattern::new([1.1, 1.1], [3.0, -3.0], [0.0, 0.0]),
    // push in, tilt up
    KenBurnsPattern::new([1.05, 1.2], [0.0, 0.0], [2.0, -2.0]),
    // pull back, tilt down
    KenBurnsPattern::new([1.2, 1.08], [0.0, 0.0], [-2.0, 2.0]),
    // diagonal drift
    KenBurnsPattern::new([1.08, 1.18], [-2.0, 2.0], [-1.5, 1.5]),
];

/// Pattern for the scene at `scene_index`.
pub fn pattern_for(scene_index: usize) -> (usize, KenBurnsPattern) {
    let i = scene_index % PATTERNS.len();
    (i, PATTERNS[i])
}

/// Background image transform at one frame.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundTransform {
    /// Catalogue entry in use.
    pub pattern_index: usize,
    /// Horizontal pan in percent of the canvas width.
    pub pan_x_pct: f64,
    /// Vertical pan in percent of the canvas height.
    pub pan_y_pct: f64,
    /// Pattern zoom times breathing.
    pub scale: f64,
}

impl BackgroundTransform {
    /// `translate(pan) * scale(zoom)` about the canvas center.
    pub fn affine(&self, canvas: Canvas) -> Affine {
        let w = f64::from(canvas.width);
        let h = f64::from(canvas.height);
        let center = Vec2::new(w * 0.5, h * 0.5);
        Affine::translate(Vec2::new(
            self.pan_x_pct * w / 100.0,
            self.pan_y_pct * h / 100.0,
        )) * Affine::translate(center)
            * Affine::scale(self.scale)
            * Affine::translate(-center)
    }
}

// Noise lattice spacing in frames; keeps the jitter drift slow and smooth.
const JITTER_PERIOD_FRAMES: f64 = 60.0;
const JITTER_Y_SALT: u64 = 0xA5A5_0F0F_3C3C_9696;

/// Ken-Burns transform for a scene.
///
/// `seed` comes from the scene's content (see [`crate::animation::noise::scene_seed`]), so the
/// jitter differs per scene but is identical every time a frame is re-rendered.
pub fn background_transform(
    scene_index: usize,
    local_frame: u64,
    scene_frames: u64,
    seed: u64,
    cfg: &EngineConfig,
) -> BackgroundTransform {
    let (pattern_index, pattern) = pattern_for(scene_index);
    let t = if scene_frames == 0 {
        1.0
    } else {
        (local_frame as f64 / scene_frames as f64).min(1.0)
    };
    let p = Ease::MATERIAL.apply(t);

    let f = local_frame as f64;
    let breathing = 1.0 + cfg.breathing_amplitude * (f * cfg.breathing_rate).sin();
    let jx = cfg.pan_jitter_pct * value_noise_1d(seed, f / JITTER_PERIOD_FRAMES);
    let jy = cfg.pan_jitter_pct * value_noise_1d(seed ^ JITTER_Y_SALT, f / JITTER_PERIOD_FRAMES);

    BackgroundTransform {
        pattern_index,
        pan_x_pct: lerp(pattern.pan_x[0], pattern.pan_x[1], p) + jx,
        pan_y_pct: lerp(pattern.pan_y[0], pattern.pan_y[1], p) + jy,
        scale: lerp(pattern.zoom[0], pattern.zoom[1], p) * breathing,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/ken_burns.rs"]
mod tests;
