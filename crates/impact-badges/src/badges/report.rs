use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::domain::{BadgeView, Person, PersonId};
use super::{BadgeError, BadgeRunner};
use crate::metrics::{as_proportion, percentile};

/// Evaluation result handed to presentation layers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub person_id: PersonId,
    pub evaluated_on: NaiveDate,
    pub badge_count: usize,
    pub badges: Vec<BadgeView>,
    /// Share of posts per channel, rounded to two decimals.
    pub source_proportions: BTreeMap<String, f64>,
    /// Rank of the person's score within the caller's reference scores.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score_percentile: Option<f64>,
}

impl EvaluationReport {
    pub fn build(
        runner: &BadgeRunner,
        person: &Person,
        reference_scores: &[f64],
        evaluated_on: NaiveDate,
    ) -> Result<Self, BadgeError> {
        let badges = runner.evaluate_views(person)?;

        let post_counts: BTreeMap<String, f64> = person
            .post_counts
            .iter()
            .map(|(source, count)| (source.clone(), *count as f64))
            .collect();

        let mut sorted_scores = reference_scores.to_vec();
        sorted_scores.sort_by(|a, b| a.total_cmp(b));

        Ok(Self {
            person_id: person.id.clone(),
            evaluated_on,
            badge_count: badges.len(),
            badges,
            source_proportions: as_proportion(&post_counts),
            score_percentile: percentile(&sorted_scores, Some(person.altmetric_score)),
        })
    }
}
