//! Grouping applications into stage columns.

use crate::model::{Application, Stage};
use std::collections::HashSet;

/// One board column: a stage and the applications currently in it.
#[derive(Debug, Clone)]
pub struct StageGroup {
    /// The column's stage.
    pub stage: Stage,
    /// Applications whose `current_stage.name` matches the stage.
    pub applications: Vec<Application>,
}

/// Groups applications by matching `current_stage.name` to each stage.
///
/// Every application lands in exactly one group, the first stage (in list
/// order) whose name matches, or in none when its stage name matches no
/// stage in the set. The join is by name, not id; two active stages
/// sharing a name would silently capture for the earlier one.
#[must_use]
pub fn group_by_stage(stages: &[Stage], applications: &[Application]) -> Vec<StageGroup> {
    let mut assigned: HashSet<usize> = HashSet::new();
    stages
        .iter()
        .map(|stage| {
            let mut members = Vec::new();
            for (index, app) in applications.iter().enumerate() {
                if !assigned.contains(&index) && app.current_stage.name == stage.name {
                    assigned.insert(index);
                    members.push(app.clone());
                }
            }
            StageGroup {
                stage: stage.clone(),
                applications: members,
            }
        })
        .collect()
}

/// Placeholder column sizes rendered while stage or application data is
/// still loading: one entry per stage, each showing `placeholders` cards
/// with no interactivity.
#[must_use]
pub fn skeleton_counts(stages: &[Stage], placeholders: usize) -> Vec<(String, usize)> {
    stages
        .iter()
        .map(|stage| (stage.name.clone(), placeholders))
        .collect()
}
