/// Convenience result type used across storyreel.
pub type StoryResult<T> = Result<T, StoryError>;

/// Top-level error taxonomy used by engine APIs.
#[derive(thiserror::Error, Debug)]
pub enum StoryError {
    /// Invalid user-provided or project data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A scene (or opening/ending card) has a duration that cannot be laid out on the timeline.
    #[error("invalid duration for '{scene}': {seconds}s (must be finite and > 0)")]
    InvalidDuration {
        /// Scene id, or `opening`/`ending`.
        scene: String,
        /// The rejected duration in seconds.
        seconds: f64,
    },

    /// A timesheet entry references a scene id that is not part of the project.
    #[error("timesheet references unknown scene '{0}'")]
    UnknownScene(String),

    /// A reconciliation result was computed against a stale project revision.
    #[error("reconciliation conflict: computed against revision {expected}, project is at {actual}")]
    ReconciliationConflict {
        /// Revision the reconciliation was computed against.
        expected: u64,
        /// Revision the project had when the commit was attempted.
        actual: u64,
    },

    /// Errors while evaluating timeline state for a frame.
    #[error("evaluation error: {0}")]
    Evaluation(String),

    /// External synthesis work was cancelled.
    #[error("operation cancelled")]
    Cancelled,

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StoryError {
    /// Build a [`StoryError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StoryError::Evaluation`] value.
    pub fn evaluation(msg: impl Into<String>) -> Self {
        Self::Evaluation(msg.into())
    }

    /// Build a [`StoryError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }

    /// Build a [`StoryError::InvalidDuration`] value.
    pub fn invalid_duration(scene: impl Into<String>, seconds: f64) -> Self {
        Self::InvalidDuration {
            scene: scene.into(),
            seconds,
        }
    }
}

impl From<serde_json::Error> for StoryError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
