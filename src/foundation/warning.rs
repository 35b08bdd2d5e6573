/// Which piece of scene media a [`Warning::MissingMedia`] refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MediaKind {
    /// Background still image.
    BackgroundImage,
    /// Narration voice-over audio.
    NarrationAudio,
}

/// Non-fatal condition attached to the affected scene. Never aborts a render.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Warning {
    /// A media reference is absent; a neutral substitute is rendered instead.
    #[serde(rename_all = "camelCase")]
    MissingMedia {
        /// Affected scene.
        scene_id: String,
        /// Which media is missing.
        media: MediaKind,
    },
    /// The scene has no text to reveal.
    #[serde(rename_all = "camelCase")]
    EmptyText {
        /// Affected scene.
        scene_id: String,
    },
    /// A non-positive design duration was replaced by the fallback duration.
    #[serde(rename_all = "camelCase")]
    DurationSubstituted {
        /// Affected scene.
        scene_id: String,
        /// Rejected duration in seconds.
        seconds: f64,
        /// Duration used instead.
        fallback_seconds: f64,
    },
    /// External narration/image synthesis failed for this scene; placeholders stay in place.
    #[serde(rename_all = "camelCase")]
    SynthesisFailed {
        /// Affected scene.
        scene_id: String,
        /// Failure description from the synthesizer.
        message: String,
    },
}

impl Warning {
    /// Scene the warning is attached to.
    pub fn scene_id(&self) -> &str {
        match self {
            Self::MissingMedia { scene_id, .. }
            | Self::EmptyText { scene_id }
            | Self::DurationSubstituted { scene_id, .. }
            | Self::SynthesisFailed { scene_id, .. } => scene_id,
        }
    }
}
