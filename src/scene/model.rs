use std::collections::{BTreeSet, HashSet};

use crate::{
    effects::transitions::TransitionKind,
    foundation::core::{AspectRatio, Fps, Rgba8},
    foundation::error::{StoryError, StoryResult},
    foundation::warning::Warning,
    scene::config::EngineConfig,
};

/// A narrated video: an ordered scene list plus optional opening/ending cards.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Scenes in playback order.
    pub scenes: Vec<Scene>,
    /// Title card before the first scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opening: Option<OpeningConfig>,
    /// Closing card after the last scene.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ending: Option<EndingConfig>,
    /// Composition frame rate (30fps for every narrated video).
    #[serde(default)]
    pub fps: Fps,
    /// Output aspect ratio.
    #[serde(default)]
    pub aspect_ratio: AspectRatio,
    /// Project-wide looping background music.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_music_ref: Option<String>,
    /// Engine tunables.
    #[serde(default)]
    pub engine: EngineConfig,
}

/// One narrated segment of the video.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Scene {
    /// Stable identifier; independent of the scene's position on the timeline.
    pub id: String,
    /// Scene length in seconds (design-time guess until narration is measured).
    pub duration_seconds: f64,
    /// Synthesized narration audio.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub narration_audio_ref: Option<String>,
    /// Background still image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_image_ref: Option<String>,
    /// Prompt for a background image that has not been synthesized yet.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_prompt: Option<String>,
    /// Narrated text, shown centered and as the bottom subtitle.
    #[serde(default)]
    pub subtitle_text: String,
    /// Words rendered with emphasis styling.
    #[serde(default)]
    pub emphasis_words: BTreeSet<String>,
    /// Explicit transition; `None` picks from the default rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionKind>,
    /// Mood of the scene; tints the overlay gradient.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    /// Speaker name shown on the narration layer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Decorative assets owned by this scene.
    #[serde(default)]
    pub assets: Vec<Asset>,
    /// How the center text is revealed.
    #[serde(default)]
    pub text_display_mode: TextDisplayMode,
    /// Scheduled sound effects.
    #[serde(default)]
    pub sound_effects: Vec<SoundEffect>,
}

impl Scene {
    /// Minimal scene with only an id, a duration and text.
    pub fn new(id: impl Into<String>, duration_seconds: f64, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            duration_seconds,
            narration_audio_ref: None,
            background_image_ref: None,
            image_prompt: None,
            subtitle_text: text.into(),
            emphasis_words: BTreeSet::new(),
            transition: None,
            emotion: None,
            speaker: None,
            assets: Vec::new(),
            text_display_mode: TextDisplayMode::default(),
            sound_effects: Vec::new(),
        }
    }
}

/// Title card shown before the first scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OpeningConfig {
    /// Card length in seconds.
    pub duration_seconds: f64,
    /// Main title.
    pub title: String,
    /// Optional subtitle line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Optional background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_ref: Option<String>,
}

/// Closing card shown after the last scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EndingConfig {
    /// Card length in seconds.
    pub duration_seconds: f64,
    /// Closing message.
    pub message: String,
    /// Optional background image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_ref: Option<String>,
}

/// Mood of a scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Emotion {
    /// No particular mood.
    Neutral,
    /// Cheerful.
    Happy,
    /// Melancholic.
    Sad,
    /// High energy.
    Excited,
    /// Quiet and relaxed.
    Calm,
    /// Grave.
    Serious,
    /// Unexpected turn.
    Surprised,
}

/// How a scene's center text is revealed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TextDisplayMode {
    /// Whole text visible for the whole scene.
    #[default]
    Instant,
    /// Units appear one by one, paced to finish before narration ends.
    SyncTypewriter,
    /// Word-like chunks spring in with a staggered start.
    WordBounce,
}

/// A decorative element placed over the background.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    /// What the asset draws.
    #[serde(flatten)]
    pub kind: AssetKind,
    /// Placement in percent of the canvas.
    pub position: AssetPosition,
    /// Entry/idle animation.
    #[serde(default)]
    pub animation_kind: AssetAnimation,
    /// Seconds after scene start before the animation begins.
    #[serde(default)]
    pub animation_delay_seconds: f64,
    /// Length of the entry animation in seconds.
    #[serde(default = "default_asset_animation_secs")]
    pub animation_duration_seconds: f64,
    /// Resting opacity in `[0, 1]`.
    #[serde(default = "default_opacity")]
    pub opacity: f64,
    /// Stacking order among the scene's assets (higher draws on top).
    #[serde(default)]
    pub z_index: i32,
}

fn default_asset_animation_secs() -> f64 {
    0.5
}

fn default_opacity() -> f64 {
    1.0
}

/// Asset payload variants.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AssetKind {
    /// Filled geometric shape.
    Shape {
        /// Geometry.
        shape: ShapeKind,
        /// Fill color.
        color: Rgba8,
    },
    /// Named icon from the host's icon set.
    Icon {
        /// Icon name.
        name: String,
        /// Tint color.
        color: Rgba8,
    },
    /// Free-standing text label.
    Text {
        /// Label content.
        text: String,
        /// Text color.
        color: Rgba8,
        /// Font size in percent of canvas height.
        #[serde(rename = "fontSizePct", default = "default_font_size_pct")]
        font_size_pct: f64,
    },
    /// Vector animation played by the host (Lottie-like).
    Lottie {
        /// Animation source reference.
        source: String,
        /// Loop after the last frame.
        #[serde(default)]
        looped: bool,
    },
    /// Static vector graphic (SVG-like).
    Svg {
        /// Graphic source reference.
        source: String,
    },
}

fn default_font_size_pct() -> f64 {
    4.0
}

/// Geometry of a shape asset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    /// Axis-aligned rectangle.
    Rect,
    /// Ellipse inscribed in the placement box.
    Ellipse,
    /// Horizontal line through the box center.
    Line,
    /// Right-pointing arrow.
    Arrow,
}

/// Asset placement box, every field in percent of the canvas.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct AssetPosition {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

/// Animation applied to an asset.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AssetAnimation {
    /// Static at its resting state.
    #[default]
    None,
    /// Opacity 0 → resting opacity.
    FadeIn,
    /// Rises into place while fading in.
    SlideUp,
    /// Grows from half size while fading in.
    ZoomIn,
    /// Springs in with overshoot.
    Bounce,
    /// Fades in, then pulses gently.
    Pulse,
    /// Fades in, then bobs up and down.
    Float,
}

/// A short sound scheduled inside a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundEffect {
    /// Search keyword the effect was picked with.
    pub keyword: String,
    /// Where in the scene the effect starts.
    pub timing: SoundTiming,
    /// Requested gain; capped by the engine.
    pub volume: f64,
    /// Resolved audio; effects without one are skipped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub audio_ref: Option<String>,
}

/// Start position of a sound effect within its scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SoundTiming {
    /// Scene start.
    Start,
    /// Scene midpoint.
    Middle,
    /// 80% into the scene.
    End,
    /// Whole scene, looped.
    Throughout,
}

/// Scene description produced by upstream script/asset generation.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneDescriptor {
    /// Design-time duration guess.
    pub duration_seconds: f64,
    /// Narration text.
    pub voice_text: String,
    /// Either an image prompt or an already resolved image reference.
    #[serde(default)]
    pub image_prompt_or_ref: String,
    /// Narrator.
    #[serde(default)]
    pub speaker: String,
    /// Mood.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotion: Option<Emotion>,
    /// Explicit transition.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionKind>,
    /// Text reveal mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_display_mode: Option<TextDisplayMode>,
    /// Decorative assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

const IMAGE_EXTENSIONS: [&str; 6] = [".png", ".jpg", ".jpeg", ".webp", ".gif", ".avif"];

fn looks_like_image_ref(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    if lower.starts_with("http://")
        || lower.starts_with("https://")
        || lower.starts_with("data:image/")
    {
        return true;
    }
    !lower.contains(char::is_whitespace) && IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

impl SceneDescriptor {
    /// Convert into a [`Scene`] with the given stable id.
    pub fn into_scene(self, id: impl Into<String>) -> Scene {
        let (background_image_ref, image_prompt) = if self.image_prompt_or_ref.trim().is_empty() {
            (None, None)
        } else if looks_like_image_ref(&self.image_prompt_or_ref) {
            (Some(self.image_prompt_or_ref.trim().to_owned()), None)
        } else {
            (None, Some(self.image_prompt_or_ref))
        };
        let speaker = Some(self.speaker).filter(|s| !s.trim().is_empty());

        Scene {
            id: id.into(),
            duration_seconds: self.duration_seconds,
            narration_audio_ref: None,
            background_image_ref,
            image_prompt,
            subtitle_text: self.voice_text,
            emphasis_words: BTreeSet::new(),
            transition: self.transition,
            emotion: self.emotion,
            speaker,
            assets: self.assets,
            text_display_mode: self.text_display_mode.unwrap_or_default(),
            sound_effects: Vec::new(),
        }
    }
}

/// Host request to render a project.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderRequest {
    /// Project to render.
    pub project: Project,
    /// Output aspect ratio; overrides the project's.
    pub aspect_ratio: AspectRatio,
    /// Output frame rate; overrides the project's.
    #[serde(default)]
    pub fps: Fps,
}

impl RenderRequest {
    /// Project with the request's aspect ratio and frame rate applied.
    pub fn into_project(self) -> Project {
        Project {
            aspect_ratio: self.aspect_ratio,
            fps: self.fps,
            ..self.project
        }
    }
}

impl Project {
    /// Empty 30fps landscape project.
    pub fn new(scenes: Vec<Scene>) -> Self {
        Self {
            scenes,
            opening: None,
            ending: None,
            fps: Fps::STANDARD,
            aspect_ratio: AspectRatio::default(),
            background_music_ref: None,
            engine: EngineConfig::default(),
        }
    }

    /// Build a project from upstream descriptors, assigning ids `scene-1`, `scene-2`, ...
    pub fn from_descriptors(descriptors: Vec<SceneDescriptor>) -> Self {
        let scenes = descriptors
            .into_iter()
            .enumerate()
            .map(|(i, d)| d.into_scene(format!("scene-{}", i + 1)))
            .collect();
        Self::new(scenes)
    }

    /// Validate structural invariants (ids, fps, config, media-independent ranges).
    ///
    /// Durations are checked by the timeline builder, which owns that failure mode.
    pub fn validate(&self) -> StoryResult<()> {
        if self.fps.num == 0 || self.fps.den == 0 {
            return Err(StoryError::validation("fps must have num>0 and den>0"));
        }
        self.engine.validate()?;

        let mut seen = HashSet::with_capacity(self.scenes.len());
        for scene in &self.scenes {
            if scene.id.trim().is_empty() {
                return Err(StoryError::validation("scene id must be non-empty"));
            }
            if !seen.insert(scene.id.as_str()) {
                return Err(StoryError::validation(format!(
                    "duplicate scene id '{}'",
                    scene.id
                )));
            }
            for fx in &scene.sound_effects {
                if !(fx.volume.is_finite() && fx.volume >= 0.0) {
                    return Err(StoryError::validation(format!(
                        "scene '{}' sound effect '{}' has invalid volume",
                        scene.id, fx.keyword
                    )));
                }
            }
            for asset in &scene.assets {
                if !(asset.animation_delay_seconds.is_finite()
                    && asset.animation_delay_seconds >= 0.0
                    && asset.animation_duration_seconds.is_finite()
                    && asset.animation_duration_seconds >= 0.0)
                {
                    return Err(StoryError::validation(format!(
                        "scene '{}' has an asset with invalid animation timing",
                        scene.id
                    )));
                }
            }
        }
        Ok(())
    }

    /// Position of the scene with `id`.
    pub fn scene_index(&self, id: &str) -> Option<usize> {
        self.scenes.iter().position(|s| s.id == id)
    }

    /// Copy of the project with every non-positive or non-finite design duration replaced by the
    /// fallback duration, plus one warning per substitution. Opening and ending cards report as
    /// `"opening"` and `"ending"`.
    pub fn sanitized(&self) -> (Project, Vec<Warning>) {
        let fallback = self.engine.fallback_duration_seconds;
        let mut out = self.clone();
        let mut warnings = Vec::new();
        let mut substitute = |id: &str, secs: &mut f64| {
            if !(secs.is_finite() && *secs > 0.0) {
                warnings.push(Warning::DurationSubstituted {
                    scene_id: id.to_owned(),
                    seconds: *secs,
                    fallback_seconds: fallback,
                });
                *secs = fallback;
            }
        };
        if let Some(opening) = out.opening.as_mut() {
            substitute("opening", &mut opening.duration_seconds);
        }
        for scene in &mut out.scenes {
            substitute(&scene.id, &mut scene.duration_seconds);
        }
        if let Some(ending) = out.ending.as_mut() {
            substitute("ending", &mut ending.duration_seconds);
        }
        (out, warnings)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/scene/model.rs"]
mod tests;
