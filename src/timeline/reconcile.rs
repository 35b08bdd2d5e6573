use std::collections::HashMap;

use crate::{
    foundation::error::{StoryError, StoryResult},
    scene::model::{Project, Scene},
    timeline::builder::Timeline,
};

/// One measured narration, produced by external speech synthesis.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimesheetEntry {
    /// Scene the narration belongs to.
    #[serde(alias = "sceneId")]
    pub id: String,
    /// Length of the synthesized audio.
    pub measured_duration_seconds: f64,
    /// Synthesized audio reference.
    pub audio_ref: String,
}

/// Result of applying a timesheet: updated scenes and their freshly derived timeline.
#[derive(Clone, Debug, PartialEq)]
pub struct Reconciled {
    /// Scenes in original order, with measured durations applied.
    pub scenes: Vec<Scene>,
    /// Timeline rebuilt from scratch over `scenes`.
    pub timeline: Timeline,
    /// Ids of scenes whose duration or narration changed.
    pub changed: Vec<String>,
}

impl Reconciled {
    /// Replace `project`'s scenes with the reconciled ones.
    pub fn apply_to(self, project: &mut Project) {
        project.scenes = self.scenes;
    }
}

/// Apply measured narration durations and re-lay the whole timeline.
///
/// Scenes with an entry get `measured + padding` seconds and the entry's audio; scenes without
/// one keep their current duration. The timeline is rebuilt over the complete scene list in
/// original order, so every downstream window is re-derived. An entry naming an unknown scene or
/// carrying an unusable duration rejects the whole timesheet; nothing is partially merged.
#[tracing::instrument(skip_all, fields(scenes = project.scenes.len(), entries = timesheet.len()))]
pub fn reconcile(project: &Project, timesheet: &[TimesheetEntry]) -> StoryResult<Reconciled> {
    let padding = project.engine.padding_seconds;

    // Later entries for the same scene win.
    let mut by_id = HashMap::<&str, &TimesheetEntry>::with_capacity(timesheet.len());
    for entry in timesheet {
        if project.scene_index(&entry.id).is_none() {
            return Err(StoryError::UnknownScene(entry.id.clone()));
        }
        let secs = entry.measured_duration_seconds;
        if !(secs.is_finite() && secs > 0.0) {
            return Err(StoryError::invalid_duration(entry.id.as_str(), secs));
        }
        by_id.insert(entry.id.as_str(), entry);
    }

    let mut changed = Vec::new();
    let scenes = project
        .scenes
        .iter()
        .map(|scene| {
            let Some(entry) = by_id.get(scene.id.as_str()) else {
                return scene.clone();
            };
            let duration_seconds = entry.measured_duration_seconds + padding;
            let narration_audio_ref = Some(entry.audio_ref.clone());
            if scene.duration_seconds != duration_seconds
                || scene.narration_audio_ref != narration_audio_ref
            {
                changed.push(scene.id.clone());
            }
            Scene {
                duration_seconds,
                narration_audio_ref,
                ..scene.clone()
            }
        })
        .collect::<Vec<_>>();

    let updated = Project {
        scenes,
        ..project.clone()
    };
    let timeline = Timeline::for_project(&updated)?;
    tracing::debug!(
        changed = changed.len(),
        total_frames = timeline.total_frames(),
        "timesheet reconciled"
    );

    Ok(Reconciled {
        scenes: updated.scenes,
        timeline,
        changed,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/reconcile.rs"]
mod tests;
