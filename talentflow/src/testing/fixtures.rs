//! Canonical stage and application fixtures.

use crate::model::{
    Application, ApplicationStatus, CandidateName, CurrentStage, JobSummary, NewStage, Stage,
    StageType,
};
use crate::utils::now_utc;

/// Builds a stage in company `co-1` with explicit id, optional parent,
/// and order index.
#[must_use]
pub fn stage(id: &str, name: &str, parent: Option<&str>, order_index: i64) -> Stage {
    let mut new = NewStage::new("co-1", name).with_order_index(order_index);
    if let Some(parent) = parent {
        new = new.with_parent(parent);
    }
    new.into_stage(id, now_utc())
}

/// The flat three-stage funnel: Applied(1), Screen(2), Offer(3), no
/// hierarchy.
#[must_use]
pub fn flat_funnel() -> Vec<Stage> {
    vec![
        stage("a", "Applied", None, 1),
        stage("b", "Screen", None, 2),
        stage("c", "Offer", None, 3),
    ]
}

/// The hierarchical set: Applied with children Screen and Tech Interview;
/// Offer under Screen.
#[must_use]
pub fn hierarchical_stages() -> Vec<Stage> {
    vec![
        stage("a", "Applied", None, 1),
        stage("b", "Screen", Some("a"), 2),
        stage("c", "Tech Interview", Some("a"), 3),
        stage("d", "Offer", Some("b"), 4),
    ]
}

/// Builds an active application currently sitting in the named stage.
#[must_use]
pub fn application_in(id: &str, stage_name: &str) -> Application {
    Application {
        id: id.to_string(),
        candidate: CandidateName {
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
        },
        job: JobSummary {
            title: "Engineer".into(),
        },
        current_stage: CurrentStage {
            id: format!("stage-{}", stage_name.to_lowercase().replace(' ', "-")),
            name: stage_name.to_string(),
            stage_type: StageType::Custom,
        },
        status: ApplicationStatus::Active,
        score: None,
        rating: None,
        applied_at: now_utc(),
    }
}
