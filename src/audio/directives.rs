use crate::{
    foundation::core::{FrameIndex, FrameRange},
    foundation::warning::{MediaKind, Warning},
    scene::config::EngineConfig,
    scene::model::{Project, Scene, SoundTiming},
    timeline::builder::{Timeline, TimelineWindow},
};

/// What an audio directive plays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AudioRole {
    /// A scene's voice-over.
    Narration,
    /// Project-wide background music.
    Music,
    /// A scene's scheduled sound effect.
    SoundEffect,
}

/// One `(audioRef, startFrame, endFrame, gain, loop)` instruction for the host player or encoder.
///
/// The core never mixes samples; it only states what plays where and how loud.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioDirective {
    /// Kind of audio.
    pub role: AudioRole,
    /// Owning scene; `None` for project-wide music.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    /// Audio reference.
    pub audio_ref: String,
    /// Absolute frame on which playback starts.
    pub start_frame: u64,
    /// Absolute frame on which playback is cut (exclusive).
    pub end_frame: u64,
    /// Linear gain.
    pub gain: f64,
    /// Restart from the beginning when the source ends before `end_frame`.
    pub looped: bool,
}

impl AudioDirective {
    /// Active range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }

    /// Return `true` when the directive plays at `frame`.
    pub fn is_active(&self, frame: FrameIndex) -> bool {
        self.range().contains(frame)
    }
}

/// Local start offset of a sound effect in a scene of `scene_frames` frames.
pub fn sound_effect_offset(timing: SoundTiming, scene_frames: u64) -> u64 {
    match timing {
        SoundTiming::Start | SoundTiming::Throughout => 0,
        SoundTiming::Middle => scene_frames / 2,
        SoundTiming::End => scene_frames * 4 / 5,
    }
}

/// Narration and sound-effect directives of one scene.
///
/// A missing narration reference yields a [`Warning::MissingMedia`] instead of a directive; sound
/// effects without a resolved reference are skipped.
pub fn scene_directives(
    scene: &Scene,
    window: &TimelineWindow,
    cfg: &EngineConfig,
) -> (Vec<AudioDirective>, Vec<Warning>) {
    let mut directives = Vec::with_capacity(1 + scene.sound_effects.len());
    let mut warnings = Vec::new();

    match scene.narration_audio_ref.as_deref().filter(|r| !r.is_empty()) {
        Some(audio_ref) => directives.push(AudioDirective {
            role: AudioRole::Narration,
            scene_id: Some(scene.id.clone()),
            audio_ref: audio_ref.to_owned(),
            start_frame: window.start_frame,
            end_frame: window.end_frame,
            gain: cfg.narration_gain,
            looped: false,
        }),
        None => warnings.push(Warning::MissingMedia {
            scene_id: scene.id.clone(),
            media: MediaKind::NarrationAudio,
        }),
    }

    let len = window.len_frames();
    for fx in &scene.sound_effects {
        let Some(audio_ref) = fx.audio_ref.as_deref().filter(|r| !r.is_empty()) else {
            continue;
        };
        directives.push(AudioDirective {
            role: AudioRole::SoundEffect,
            scene_id: Some(scene.id.clone()),
            audio_ref: audio_ref.to_owned(),
            start_frame: window.start_frame + sound_effect_offset(fx.timing, len),
            end_frame: window.end_frame,
            gain: fx.volume.min(cfg.sound_effect_max_gain),
            looped: fx.timing == SoundTiming::Throughout,
        });
    }

    (directives, warnings)
}

/// Every audio directive of a project, in timeline order, plus the warnings raised on the way.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioPlan {
    /// Composition length in frames.
    pub total_frames: u64,
    /// Music first, then each scene's narration and effects.
    pub directives: Vec<AudioDirective>,
    /// Missing narration per scene.
    pub warnings: Vec<Warning>,
}

impl AudioPlan {
    /// Directives playing at `frame`.
    pub fn active_at(&self, frame: FrameIndex) -> impl Iterator<Item = &AudioDirective> {
        self.directives.iter().filter(move |d| d.is_active(frame))
    }
}

/// Complete directive list for an encoder.
///
/// `timeline` must have been built from `project`; scenes and windows are paired by position.
#[tracing::instrument(skip_all, fields(scenes = project.scenes.len()))]
pub fn build_audio_plan(project: &Project, timeline: &Timeline) -> AudioPlan {
    let total_frames = timeline.total_frames();
    let mut plan = AudioPlan {
        total_frames,
        ..AudioPlan::default()
    };

    if let Some(music) = project.background_music_ref.as_deref().filter(|r| !r.is_empty())
        && total_frames > 0
    {
        plan.directives.push(AudioDirective {
            role: AudioRole::Music,
            scene_id: None,
            audio_ref: music.to_owned(),
            start_frame: 0,
            end_frame: total_frames,
            gain: project.engine.music_gain,
            looped: true,
        });
    }

    for (scene, window) in project.scenes.iter().zip(&timeline.windows) {
        let (directives, warnings) = scene_directives(scene, window, &project.engine);
        plan.directives.extend(directives);
        plan.warnings.extend(warnings);
    }

    tracing::debug!(
        directives = plan.directives.len(),
        warnings = plan.warnings.len(),
        "audio plan built"
    );
    plan
}

#[cfg(test)]
#[path = "../../tests/unit/audio/directives.rs"]
mod tests;
