//! Error types for the talentflow stage engine.
//!
//! Storage-layer failures are surfaced as [`StageError`] variants named after
//! the operation that failed. Transition rejections and re-parent cycle
//! rejections are deliberately *not* errors; they are ordinary boolean/enum
//! returns, since dragging to an illegal column is an expected user action.

use thiserror::Error;

/// The main error type for stage operations.
#[derive(Debug, Clone, Error)]
pub enum StageError {
    /// Fetching the stage list from storage failed.
    #[error("failed to fetch stages: {0}")]
    Fetch(String),

    /// Inserting a new stage failed.
    #[error("failed to create stage: {0}")]
    Create(String),

    /// A partial update to a stage failed.
    #[error("failed to update stage '{stage_id}': {message}")]
    Update {
        /// The stage being updated.
        stage_id: String,
        /// The underlying storage message.
        message: String,
    },

    /// Deleting a stage failed.
    #[error("failed to delete stage '{stage_id}': {message}")]
    Delete {
        /// The stage being deleted.
        stage_id: String,
        /// The underlying storage message.
        message: String,
    },

    /// A reorder sequence aborted mid-flight. Indices remain unique but may
    /// be left in the displaced range until a retry completes.
    #[error("failed to reorder stages: {0}")]
    Reorder(String),

    /// A lookup that must return exactly one row returned none.
    #[error("no matching stage: {0}")]
    LookupMiss(String),

    /// A lookup that must return exactly one row returned more than one.
    #[error("ambiguous stage lookup: {0}")]
    LookupAmbiguity(String),
}

impl StageError {
    /// Creates an update error.
    #[must_use]
    pub fn update(stage_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Update {
            stage_id: stage_id.into(),
            message: message.into(),
        }
    }

    /// Creates a delete error.
    #[must_use]
    pub fn delete(stage_id: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Delete {
            stage_id: stage_id.into(),
            message: message.into(),
        }
    }

    /// Returns true if this error means a lookup did not resolve to exactly
    /// one row. These are hard stops: the system cannot safely guess which
    /// stage was meant.
    #[must_use]
    pub fn is_lookup_failure(&self) -> bool {
        matches!(self, Self::LookupMiss(_) | Self::LookupAmbiguity(_))
    }
}
