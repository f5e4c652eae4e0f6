//! Canonical data model for the pipeline core.
//!
//! One canonical [`Stage`] and one canonical [`Application`] shape are used
//! everywhere the core logic runs; view-specific projections belong at the
//! UI boundary.

mod application;
mod stage;

pub use application::{
    Application, ApplicationId, ApplicationStatus, CandidateName, CurrentStage, JobSummary,
};
pub use stage::{
    CompanyId, NewStage, Stage, StageColor, StageId, StagePatch, StageType,
};
