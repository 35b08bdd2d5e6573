use crate::foundation::error::{StoryError, StoryResult};

/// Tunables of the timeline and animation engines.
///
/// Every field has a default, so a project may omit the section entirely or override only a few
/// values.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seconds added to each measured narration duration so speech is not clipped.
    pub padding_seconds: f64,
    /// Duration substituted for scenes whose design duration is missing or non-positive.
    pub fallback_duration_seconds: f64,
    /// Gain of a scene's narration audio.
    pub narration_gain: f64,
    /// Gain of the looping project-wide background music.
    pub music_gain: f64,
    /// Upper bound on any sound effect's gain.
    pub sound_effect_max_gain: f64,
    /// Start offset between consecutive word-bounce chunks, in seconds.
    pub word_bounce_stagger_seconds: f64,
    /// Minimum characters per word-bounce chunk for dense scripts.
    pub dense_chunk_min_chars: usize,
    /// Maximum characters per word-bounce chunk for dense scripts.
    pub dense_chunk_max_chars: usize,
    /// Share of the scene the typewriter may spend revealing text.
    pub typewriter_reveal_fraction: f64,
    /// Frames (at 30fps) a typewriter unit takes to fade in once revealed.
    pub typewriter_fade_frames: u64,
    /// Frames (at 30fps) before the first typewriter unit appears.
    pub typewriter_start_delay_frames: u64,
    /// Apply the entry fade as well as the exit fade.
    ///
    /// Off by default: back-to-back scenes otherwise flash through black at every cut.
    pub symmetric_fade_in: bool,
    /// Amplitude of the Ken-Burns breathing scale.
    pub breathing_amplitude: f64,
    /// Angular rate of the Ken-Burns breathing scale, in radians per frame.
    pub breathing_rate: f64,
    /// Maximum seeded pan jitter, in percent of the canvas.
    pub pan_jitter_pct: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            padding_seconds: 0.3,
            fallback_duration_seconds: 3.0,
            narration_gain: 0.85,
            music_gain: 0.12,
            sound_effect_max_gain: 0.20,
            word_bounce_stagger_seconds: 0.12,
            dense_chunk_min_chars: 2,
            dense_chunk_max_chars: 4,
            typewriter_reveal_fraction: 0.9,
            typewriter_fade_frames: 3,
            typewriter_start_delay_frames: 3,
            symmetric_fade_in: false,
            breathing_amplitude: 0.02,
            breathing_rate: 0.015,
            pan_jitter_pct: 0.6,
        }
    }
}

impl EngineConfig {
    /// Validate ranges of the tunables.
    pub fn validate(&self) -> StoryResult<()> {
        if !(self.padding_seconds.is_finite() && self.padding_seconds >= 0.0) {
            return Err(StoryError::validation("paddingSeconds must be finite and >= 0"));
        }
        if !(self.fallback_duration_seconds.is_finite() && self.fallback_duration_seconds > 0.0) {
            return Err(StoryError::validation(
                "fallbackDurationSeconds must be finite and > 0",
            ));
        }
        for (name, gain) in [
            ("narrationGain", self.narration_gain),
            ("musicGain", self.music_gain),
            ("soundEffectMaxGain", self.sound_effect_max_gain),
        ] {
            if !(gain.is_finite() && (0.0..=1.0).contains(&gain)) {
                return Err(StoryError::validation(format!("{name} must be in [0, 1]")));
            }
        }
        if self.dense_chunk_min_chars == 0 || self.dense_chunk_min_chars > self.dense_chunk_max_chars
        {
            return Err(StoryError::validation(
                "dense chunk widths must satisfy 1 <= min <= max",
            ));
        }
        if !(self.typewriter_reveal_fraction > 0.0 && self.typewriter_reveal_fraction <= 1.0) {
            return Err(StoryError::validation(
                "typewriterRevealFraction must be in (0, 1]",
            ));
        }
        if !(self.word_bounce_stagger_seconds.is_finite() && self.word_bounce_stagger_seconds >= 0.0)
        {
            return Err(StoryError::validation(
                "wordBounceStaggerSeconds must be finite and >= 0",
            ));
        }
        Ok(())
    }
}
