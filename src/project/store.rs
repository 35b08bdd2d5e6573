use std::collections::BTreeMap;
use std::sync::{Mutex, MutexGuard};

use crate::{
    foundation::error::{StoryError, StoryResult},
    scene::model::Project,
    timeline::builder::Timeline,
    timeline::reconcile::{Reconciled, TimesheetEntry, reconcile},
};

const MAX_RECONCILE_ATTEMPTS: usize = 8;

/// Consistent copy of the project at one revision.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectSnapshot {
    /// Revision the copy was taken at.
    pub revision: u64,
    /// Project data.
    pub project: Project,
    /// Timeline derived from `project`.
    pub timeline: Timeline,
}

/// Outcome of a committed timesheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ApplyOutcome {
    /// Revision after the commit.
    pub revision: u64,
    /// Scenes whose duration or narration changed.
    pub changed: Vec<String>,
    /// Conflicts that forced a retry before the commit succeeded.
    pub retries: usize,
}

#[derive(Debug)]
struct StoreState {
    revision: u64,
    project: Project,
    timeline: Timeline,
}

/// Owner of the mutable project.
///
/// Mutations go through one lock and bump a revision. A reconciliation is computed against a
/// snapshot outside the lock and committed only if no other write landed in between; stale
/// results are rejected with [`StoryError::ReconciliationConflict`], never merged.
#[derive(Debug)]
pub struct ProjectStore {
    state: Mutex<StoreState>,
}

impl ProjectStore {
    /// Validate `project`, build its timeline and start at revision 0.
    pub fn new(project: Project) -> StoryResult<Self> {
        project.validate()?;
        let timeline = Timeline::for_project(&project)?;
        Ok(Self {
            state: Mutex::new(StoreState {
                revision: 0,
                project,
                timeline,
            }),
        })
    }

    fn lock(&self) -> StoryResult<MutexGuard<'_, StoreState>> {
        self.state
            .lock()
            .map_err(|_| StoryError::evaluation("project store lock poisoned"))
    }

    /// Current revision.
    pub fn revision(&self) -> StoryResult<u64> {
        Ok(self.lock()?.revision)
    }

    /// Consistent copy of the current state.
    pub fn snapshot(&self) -> StoryResult<ProjectSnapshot> {
        let st = self.lock()?;
        Ok(ProjectSnapshot {
            revision: st.revision,
            project: st.project.clone(),
            timeline: st.timeline.clone(),
        })
    }

    /// Commit a reconciliation computed against `expected_revision`.
    pub fn commit(&self, expected_revision: u64, result: Reconciled) -> StoryResult<u64> {
        let mut st = self.lock()?;
        if st.revision != expected_revision {
            return Err(StoryError::ReconciliationConflict {
                expected: expected_revision,
                actual: st.revision,
            });
        }
        st.project.scenes = result.scenes;
        st.timeline = result.timeline;
        st.revision += 1;
        Ok(st.revision)
    }

    /// Reconcile `timesheet` against the latest project and commit it.
    ///
    /// On a conflict the reconciliation is recomputed from a fresh snapshot, up to a bounded
    /// number of attempts.
    #[tracing::instrument(skip_all, fields(entries = timesheet.len()))]
    pub fn apply_timesheet(&self, timesheet: &[TimesheetEntry]) -> StoryResult<ApplyOutcome> {
        let mut retries = 0;
        loop {
            let snap = self.snapshot()?;
            let result = reconcile(&snap.project, timesheet)?;
            let changed = result.changed.clone();
            match self.commit(snap.revision, result) {
                Ok(revision) => {
                    tracing::debug!(revision, retries, "timesheet committed");
                    return Ok(ApplyOutcome {
                        revision,
                        changed,
                        retries,
                    });
                }
                Err(StoryError::ReconciliationConflict { expected, actual })
                    if retries + 1 < MAX_RECONCILE_ATTEMPTS =>
                {
                    tracing::debug!(expected, actual, "stale reconciliation, retrying");
                    retries += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// Set background images for the given scenes. Durations are unaffected, so the timeline is
    /// kept as is. Unknown ids are ignored.
    pub fn set_background_images(&self, images: &BTreeMap<String, String>) -> StoryResult<u64> {
        let mut st = self.lock()?;
        let mut touched = false;
        for scene in &mut st.project.scenes {
            if let Some(image) = images.get(&scene.id) {
                scene.background_image_ref = Some(image.clone());
                touched = true;
            }
        }
        if touched {
            st.revision += 1;
        }
        Ok(st.revision)
    }

    /// Consume the store and return the project.
    pub fn into_project(self) -> StoryResult<Project> {
        self.state
            .into_inner()
            .map(|st| st.project)
            .map_err(|_| StoryError::evaluation("project store lock poisoned"))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/project/store.rs"]
mod tests;
