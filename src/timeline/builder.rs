use crate::{
    foundation::core::{Fps, FrameIndex, FrameRange},
    foundation::error::{StoryError, StoryResult},
    scene::model::Project,
};

/// A scene's absolute `[start_frame, end_frame)` range. Derived, never stored as ground truth.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimelineWindow {
    /// Scene this window belongs to.
    pub scene_id: String,
    /// Inclusive first frame.
    pub start_frame: u64,
    /// Exclusive end frame.
    pub end_frame: u64,
}

impl TimelineWindow {
    /// Window as a [`FrameRange`].
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(self.start_frame),
            end: FrameIndex(self.end_frame),
        }
    }

    /// Window length in frames.
    pub fn len_frames(&self) -> u64 {
        self.end_frame - self.start_frame
    }

    /// Local (scene-relative) frame for absolute `frame`.
    pub fn local_frame(&self, frame: FrameIndex) -> u64 {
        frame.0.saturating_sub(self.start_frame)
    }
}

/// What occupies a given absolute frame.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(tag = "segment", rename_all = "camelCase")]
pub enum Segment {
    /// The opening title card.
    Opening,
    /// Scene at `index` in project order.
    Scene {
        /// Scene position.
        index: usize,
    },
    /// The ending card.
    Ending,
}

/// Contiguous layout of opening card, scenes and ending card on the frame axis.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    /// Frame rate the layout was computed at.
    pub fps: Fps,
    /// Opening card range, starting at frame 0.
    pub opening: Option<FrameRange>,
    /// Scene windows in project order.
    pub windows: Vec<TimelineWindow>,
    /// Ending card range, directly after the last scene.
    pub ending: Option<FrameRange>,
}

fn duration_frames(label: &str, seconds: f64, fps: Fps) -> StoryResult<u64> {
    if !(seconds.is_finite() && seconds > 0.0) {
        return Err(StoryError::invalid_duration(label, seconds));
    }
    Ok(fps.secs_to_frames_round(seconds).max(1))
}

/// Lay scenes end-to-end on the frame axis.
///
/// `scenes` yields `(scene_id, duration_seconds)` in playback order. Every window is derived from
/// the running sum, so `windows[i].end_frame == windows[i + 1].start_frame` always holds and the
/// first scene starts right after the opening card.
pub fn build_timeline<'a>(
    scenes: impl IntoIterator<Item = (&'a str, f64)>,
    opening_seconds: Option<f64>,
    ending_seconds: Option<f64>,
    fps: Fps,
) -> StoryResult<Timeline> {
    let opening_frames = opening_seconds
        .map(|s| duration_frames("opening", s, fps))
        .transpose()?;

    let mut cursor = opening_frames.unwrap_or(0);
    let opening = opening_frames.map(|n| FrameRange {
        start: FrameIndex(0),
        end: FrameIndex(n),
    });

    let scenes = scenes.into_iter();
    let mut windows = Vec::with_capacity(scenes.size_hint().0);
    for (id, seconds) in scenes {
        let len = duration_frames(id, seconds, fps)?;
        let start_frame = cursor;
        cursor += len;
        windows.push(TimelineWindow {
            scene_id: id.to_owned(),
            start_frame,
            end_frame: cursor,
        });
    }

    let ending = ending_seconds
        .map(|s| duration_frames("ending", s, fps))
        .transpose()?
        .map(|n| FrameRange {
            start: FrameIndex(cursor),
            end: FrameIndex(cursor + n),
        });

    Ok(Timeline {
        fps,
        opening,
        windows,
        ending,
    })
}

impl Timeline {
    /// Build the timeline for a project's current durations.
    #[tracing::instrument(skip(project), fields(scenes = project.scenes.len()))]
    pub fn for_project(project: &Project) -> StoryResult<Self> {
        let timeline = build_timeline(
            project
                .scenes
                .iter()
                .map(|s| (s.id.as_str(), s.duration_seconds)),
            project.opening.as_ref().map(|o| o.duration_seconds),
            project.ending.as_ref().map(|e| e.duration_seconds),
            project.fps,
        )?;
        tracing::debug!(total_frames = timeline.total_frames(), "timeline built");
        Ok(timeline)
    }

    /// Total composition length in frames.
    pub fn total_frames(&self) -> u64 {
        if let Some(ending) = self.ending {
            return ending.end.0;
        }
        if let Some(last) = self.windows.last() {
            return last.end_frame;
        }
        self.opening.map(|o| o.end.0).unwrap_or(0)
    }

    /// Whole composition as a range.
    pub fn range(&self) -> FrameRange {
        FrameRange {
            start: FrameIndex(0),
            end: FrameIndex(self.total_frames()),
        }
    }

    /// Frames taken by the opening card.
    pub fn opening_frames(&self) -> u64 {
        self.opening.map(FrameRange::len_frames).unwrap_or(0)
    }

    /// Segment containing `frame`, or `None` past the end.
    pub fn locate(&self, frame: FrameIndex) -> Option<Segment> {
        if self.opening.is_some_and(|o| o.contains(frame)) {
            return Some(Segment::Opening);
        }
        // Windows are sorted and contiguous, so the first window ending after `frame` holds it.
        let idx = self.windows.partition_point(|w| w.end_frame <= frame.0);
        if let Some(w) = self.windows.get(idx)
            && w.start_frame <= frame.0
        {
            return Some(Segment::Scene { index: idx });
        }
        if self.ending.is_some_and(|e| e.contains(frame)) {
            return Some(Segment::Ending);
        }
        None
    }

    /// Window of the scene with `scene_id`.
    pub fn window_for(&self, scene_id: &str) -> Option<&TimelineWindow> {
        self.windows.iter().find(|w| w.scene_id == scene_id)
    }

    /// `(start, end)` pairs of every scene window, in order.
    pub fn frame_pairs(&self) -> Vec<(u64, u64)> {
        self.windows
            .iter()
            .map(|w| (w.start_frame, w.end_frame))
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/builder.rs"]
mod tests;
