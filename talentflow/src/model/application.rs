//! Read-side application records, trimmed to the fields the pipeline
//! placement logic consumes. Applications are owned by an external
//! collaborator; the core only reads them and requests stage changes.

use crate::model::{StageId, StageType};
use crate::utils::Timestamp;
use serde::{Deserialize, Serialize};

/// Opaque application identifier.
pub type ApplicationId = String;

/// Candidate display-name fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateName {
    /// Given name.
    pub first_name: String,
    /// Family name.
    pub last_name: String,
}

impl CandidateName {
    /// Returns "First Last" for display.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Job display fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobSummary {
    /// Job title.
    pub title: String,
}

/// The stage an application currently sits in.
///
/// Board flows correlate this to the stage table by `name`; `id` is the
/// canonical storage reference written on persisted moves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentStage {
    /// Stage id as last persisted.
    pub id: StageId,
    /// Stage display name, the board's join key.
    pub name: String,
    /// Stage type tag at the time of placement.
    pub stage_type: StageType,
}

/// Lifecycle status of an application, independent of its stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    /// In-flight.
    Active,
    /// Hired.
    Hired,
    /// Rejected.
    Rejected,
    /// Candidate withdrew.
    Withdrawn,
}

impl Default for ApplicationStatus {
    fn default() -> Self {
        Self::Active
    }
}

/// An in-flight application as consumed by the pipeline board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    /// Unique identifier.
    pub id: ApplicationId,
    /// Candidate display fields.
    pub candidate: CandidateName,
    /// Job display fields.
    pub job: JobSummary,
    /// Current pipeline placement.
    pub current_stage: CurrentStage,
    /// Lifecycle status.
    #[serde(default)]
    pub status: ApplicationStatus,
    /// Optional screening score.
    #[serde(default)]
    pub score: Option<f64>,
    /// Optional interviewer rating.
    #[serde(default)]
    pub rating: Option<i32>,
    /// When the candidate applied.
    pub applied_at: Timestamp,
}
