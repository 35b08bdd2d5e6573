use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use rayon::prelude::*;

use crate::{
    foundation::error::{StoryError, StoryResult},
    foundation::warning::Warning,
    project::store::ProjectStore,
    scene::model::Scene,
    timeline::reconcile::TimesheetEntry,
};

/// External narration and image generation.
///
/// Implementations wrap whatever service produces the media; the engine only consumes their
/// outputs. Calls for different scenes may run concurrently.
pub trait MediaSynthesizer: Send + Sync {
    /// Synthesize narration for `scene` and report its measured length.
    fn synthesize_narration(&self, scene: &Scene) -> anyhow::Result<TimesheetEntry>;
    /// Produce a background image for `scene` and return its reference.
    fn synthesize_image(&self, scene: &Scene) -> anyhow::Result<String>;
}

/// Cooperative cancellation flag shared with whoever may want to stop synthesis.
#[derive(Clone, Debug, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    /// Fresh, not cancelled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation. In-flight calls finish; nothing new is started.
    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    /// Return `true` once [`CancelToken::cancel`] was called.
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Options of [`dispatch_batches`].
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BatchOpts {
    /// Scenes synthesized concurrently per batch.
    pub batch_size: usize,
    /// Attempts per scene and media kind before giving up.
    pub max_attempts: usize,
    /// Worker threads; `None` uses `batch_size`.
    pub threads: Option<usize>,
    /// Synthesize narration for scenes without it.
    pub narration: bool,
    /// Synthesize images for scenes without a background.
    pub images: bool,
}

impl Default for BatchOpts {
    fn default() -> Self {
        Self {
            batch_size: 3,
            max_attempts: 2,
            threads: None,
            narration: true,
            images: true,
        }
    }
}

/// What a dispatch run achieved.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchReport {
    /// Batches started.
    pub batches: usize,
    /// Scenes whose narration was merged.
    pub narrated: Vec<String>,
    /// Scenes whose image was merged.
    pub imaged: Vec<String>,
    /// Per-scene failures; those scenes keep their placeholders.
    pub warnings: Vec<Warning>,
    /// The run stopped early on cancellation.
    pub cancelled: bool,
    /// Store revision after the last merge.
    pub revision: u64,
}

#[derive(Debug)]
struct SceneOutcome {
    scene_id: String,
    narration: Option<StoryResult<TimesheetEntry>>,
    image: Option<StoryResult<String>>,
}

fn with_retry<T>(
    scene_id: &str,
    what: &str,
    max_attempts: usize,
    cancel: &CancelToken,
    mut f: impl FnMut() -> anyhow::Result<T>,
) -> StoryResult<T> {
    let mut last = None;
    for attempt in 1..=max_attempts.max(1) {
        if cancel.is_cancelled() {
            return Err(StoryError::Cancelled);
        }
        match f() {
            Ok(v) => return Ok(v),
            Err(e) => {
                tracing::warn!(scene = scene_id, what, attempt, error = %e, "synthesis attempt failed");
                last = Some(e);
            }
        }
    }
    Err(StoryError::Other(last.unwrap_or_else(|| {
        anyhow::anyhow!("{what} synthesis made no attempt")
    })))
}

fn synthesize_scene(
    scene: &Scene,
    synth: &dyn MediaSynthesizer,
    opts: &BatchOpts,
    cancel: &CancelToken,
) -> SceneOutcome {
    let wants_narration = opts.narration && scene.narration_audio_ref.is_none();
    let wants_image = opts.images && scene.background_image_ref.is_none();

    let narration = wants_narration.then(|| {
        with_retry(&scene.id, "narration", opts.max_attempts, cancel, || {
            synth.synthesize_narration(scene)
        })
        .and_then(|entry| {
            if entry.id != scene.id {
                return Err(StoryError::validation(format!(
                    "narration for '{}' came back labelled '{}'",
                    scene.id, entry.id
                )));
            }
            let secs = entry.measured_duration_seconds;
            if !(secs.is_finite() && secs > 0.0) {
                return Err(StoryError::invalid_duration(scene.id.as_str(), secs));
            }
            Ok(entry)
        })
    });
    let image = wants_image.then(|| {
        with_retry(&scene.id, "image", opts.max_attempts, cancel, || {
            synth.synthesize_image(scene)
        })
    });

    SceneOutcome {
        scene_id: scene.id.clone(),
        narration,
        image,
    }
}

fn build_pool(opts: &BatchOpts) -> StoryResult<rayon::ThreadPool> {
    if opts.batch_size == 0 {
        return Err(StoryError::validation("batch_size must be >= 1"));
    }
    let threads = opts.threads.unwrap_or(opts.batch_size);
    if threads == 0 {
        return Err(StoryError::validation("threads must be >= 1 when set"));
    }
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build()
        .map_err(|e| StoryError::evaluation(format!("failed to build rayon thread pool: {e}")))
}

/// Synthesize missing narration and images in bounded batches and merge them into `store`.
///
/// Each batch runs up to `batch_size` scenes concurrently. After a batch completes, successful
/// images and narration are committed (narration through the store's single-writer timesheet
/// path, which re-lays the timeline). A scene that fails keeps its placeholder media and is
/// reported as a warning; it never blocks the rest of its batch. Cancellation is checked between
/// batches and between retries; whatever was merged before stays merged.
#[tracing::instrument(skip_all, fields(batch_size = opts.batch_size))]
pub fn dispatch_batches(
    store: &ProjectStore,
    synth: &dyn MediaSynthesizer,
    opts: &BatchOpts,
    cancel: &CancelToken,
) -> StoryResult<BatchReport> {
    let pool = build_pool(opts)?;
    let snapshot = store.snapshot()?;
    let pending: Vec<&Scene> = snapshot
        .project
        .scenes
        .iter()
        .filter(|s| {
            (opts.narration && s.narration_audio_ref.is_none())
                || (opts.images && s.background_image_ref.is_none())
        })
        .collect();

    let mut report = BatchReport {
        revision: snapshot.revision,
        ..BatchReport::default()
    };

    for batch in pending.chunks(opts.batch_size) {
        if cancel.is_cancelled() {
            report.cancelled = true;
            break;
        }
        report.batches += 1;

        let outcomes: Vec<SceneOutcome> = pool.install(|| {
            batch
                .par_iter()
                .map(|scene| synthesize_scene(scene, synth, opts, cancel))
                .collect()
        });

        let mut images = BTreeMap::new();
        let mut timesheet = Vec::new();
        for outcome in outcomes {
            if let Some(result) = outcome.image {
                match result {
                    Ok(image) => {
                        images.insert(outcome.scene_id.clone(), image);
                    }
                    Err(e) => record_failure(&mut report, &outcome.scene_id, e),
                }
            }
            if let Some(result) = outcome.narration {
                match result {
                    Ok(entry) => timesheet.push(entry),
                    Err(e) => record_failure(&mut report, &outcome.scene_id, e),
                }
            }
        }

        if !images.is_empty() {
            report.revision = store.set_background_images(&images)?;
            report.imaged.extend(images.into_keys());
        }
        if !timesheet.is_empty() {
            let applied = store.apply_timesheet(&timesheet)?;
            report.revision = applied.revision;
            report
                .narrated
                .extend(timesheet.into_iter().map(|entry| entry.id));
        }
    }

    tracing::debug!(
        batches = report.batches,
        narrated = report.narrated.len(),
        imaged = report.imaged.len(),
        failures = report.warnings.len(),
        cancelled = report.cancelled,
        "synthesis dispatch finished"
    );
    Ok(report)
}

fn record_failure(report: &mut BatchReport, scene_id: &str, err: StoryError) {
    if matches!(err, StoryError::Cancelled) {
        report.cancelled = true;
        return;
    }
    tracing::warn!(scene = scene_id, error = %err, "scene keeps placeholder media");
    report.warnings.push(Warning::SynthesisFailed {
        scene_id: scene_id.to_owned(),
        message: err.to_string(),
    });
}

#[cfg(test)]
#[path = "../../tests/unit/media/batch.rs"]
mod tests;
