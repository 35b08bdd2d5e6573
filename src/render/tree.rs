use smallvec::SmallVec;

use crate::{
    audio::directives::AudioDirective,
    effects::asset_motion::AssetMotion,
    effects::ken_burns::BackgroundTransform,
    effects::overlays::{LightSweep, TintGradient, Vignette},
    effects::transitions::TransitionState,
    foundation::core::{Affine, Canvas, Fps, FrameIndex, Rect, Rgba8},
    foundation::warning::Warning,
    scene::model::AssetKind,
    text::reveal::TextReveal,
    timeline::builder::Segment,
};

/// Background drawn when a scene has no image yet.
pub const NEUTRAL_GRADIENT: BackgroundSource = BackgroundSource::Gradient {
    top: Rgba8::rgb(44, 48, 58),
    bottom: Rgba8::rgb(16, 18, 24),
};

/// Complete, serializable description of one output frame.
///
/// Rebuilt from scratch on every render call and never mutated afterwards; two renders of the same
/// frame over the same project serialize to identical bytes.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualTree {
    /// Absolute frame.
    pub frame: FrameIndex,
    /// Output size.
    pub canvas: Canvas,
    /// Frame rate.
    pub fps: Fps,
    /// Composition length in frames.
    pub total_frames: u64,
    /// What occupies this frame.
    pub segment: Segment,
    /// Scene id for scene frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    /// Frame relative to the start of the segment.
    pub local_frame: u64,
    /// Segment length in frames.
    pub segment_frames: u64,
    /// Scene entry/exit transition, for scene frames.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transition: Option<TransitionState>,
    /// Opacity applied to the whole layer stack.
    pub opacity: f64,
    /// Layers, bottom to top.
    pub layers: Vec<Layer>,
    /// Audio playing at this frame.
    pub audio: SmallVec<[AudioDirective; 4]>,
    /// Non-fatal conditions of the active scene.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<Warning>,
}

impl VisualTree {
    /// Center-text layer, if the frame has one.
    pub fn center_text(&self) -> Option<&CenterTextLayer> {
        self.layers.iter().find_map(|l| match l {
            Layer::CenterText(t) => Some(t),
            _ => None,
        })
    }

    /// Background layer, if the frame has one.
    pub fn background(&self) -> Option<&BackgroundLayer> {
        self.layers.iter().find_map(|l| match l {
            Layer::Background(b) => Some(b),
            _ => None,
        })
    }
}

/// One entry of the layer stack.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "layer", rename_all = "camelCase")]
pub enum Layer {
    /// Ken-Burns background.
    Background(BackgroundLayer),
    /// Mood tint gradient.
    Tint(TintGradient),
    /// Moving light band.
    LightSweep(LightSweep),
    /// Edge darkening.
    Vignette(Vignette),
    /// Decorative asset.
    Asset(AssetLayer),
    /// Revealed center text.
    CenterText(CenterTextLayer),
    /// Bottom subtitle.
    Subtitle(SubtitleLayer),
    /// Narrator / avatar badge.
    Narration(NarrationLayer),
    /// Opening or ending card.
    TitleCard(TitleCardLayer),
}

/// Image or substitute gradient behind a scene.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum BackgroundSource {
    /// Still image reference.
    #[serde(rename_all = "camelCase")]
    Image {
        /// Image reference.
        image_ref: String,
    },
    /// Vertical gradient.
    Gradient {
        /// Top color.
        top: Rgba8,
        /// Bottom color.
        bottom: Rgba8,
    },
}

impl BackgroundSource {
    /// Image for `image_ref`, or [`NEUTRAL_GRADIENT`] when absent.
    pub fn image_or_neutral(image_ref: Option<&str>) -> Self {
        match image_ref.filter(|r| !r.is_empty()) {
            Some(r) => Self::Image {
                image_ref: r.to_owned(),
            },
            None => NEUTRAL_GRADIENT,
        }
    }
}

/// Scene background with its Ken-Burns transform.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundLayer {
    /// What to draw.
    pub source: BackgroundSource,
    /// Pan/zoom parameters.
    pub motion: BackgroundTransform,
    /// `motion` as a canvas-space affine.
    pub transform: Affine,
}

/// Placed decorative asset.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetLayer {
    /// Payload.
    pub asset: AssetKind,
    /// Resting placement in canvas pixels.
    pub rect: Rect,
    /// Stacking order among assets.
    pub z_index: i32,
    /// Animated state.
    pub motion: AssetMotion,
}

/// Center text block.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CenterTextLayer {
    /// Per-unit reveal state.
    pub reveal: TextReveal,
    /// Base font size in pixels.
    pub font_size_px: f64,
    /// Wrap width in pixels.
    pub max_width_px: f64,
}

/// Bottom subtitle, always fully shown.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubtitleLayer {
    /// Subtitle text.
    pub text: String,
    /// Font size in pixels.
    pub font_size_px: f64,
    /// Distance of the baseline from the bottom edge in pixels.
    pub bottom_margin_px: f64,
}

/// Narrator badge.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NarrationLayer {
    /// Narrator name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speaker: Option<String>,
    /// Narration is playing.
    pub speaking: bool,
}

/// Opening or ending card.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TitleCardLayer {
    /// Main line.
    pub title: String,
    /// Secondary line.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Card background.
    pub background: BackgroundSource,
    /// Card fade.
    pub opacity: f64,
    /// Title font size in pixels.
    pub font_size_px: f64,
}
