//! Participation statistics for a cycle.

use crate::model::Response;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// Respondent and response counts for one organizational group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupParticipation {
    pub org_group: String,
    pub unique_respondents: usize,
    pub total_responses: usize,
}

/// Who took part in a cycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParticipationStats {
    pub cycle_id: String,
    pub total_respondents: usize,
    pub total_responses: usize,
    /// Sorted by group name
    pub by_group: Vec<GroupParticipation>,
}

impl ParticipationStats {
    /// Count distinct respondents overall and per group.
    #[must_use]
    pub fn compute(responses: &[Response], cycle_id: &str) -> Self {
        let mut respondents: HashSet<&str> = HashSet::new();
        let mut groups: BTreeMap<&str, (HashSet<&str>, usize)> = BTreeMap::new();
        let mut total_responses = 0;

        for response in responses.iter().filter(|r| r.cycle_id == cycle_id) {
            total_responses += 1;
            respondents.insert(&response.respondent_id);
            let (members, rows) = groups.entry(&response.org_group).or_default();
            members.insert(&response.respondent_id);
            *rows += 1;
        }

        let by_group = groups
            .into_iter()
            .map(|(group, (members, rows))| GroupParticipation {
                org_group: group.to_string(),
                unique_respondents: members.len(),
                total_responses: rows,
            })
            .collect();

        Self {
            cycle_id: cycle_id.to_string(),
            total_respondents: respondents.len(),
            total_responses,
            by_group,
        }
    }

    /// Whether the best-represented group has more than three times the
    /// respondents of the least-represented one.
    #[must_use]
    pub fn is_unbalanced(&self) -> bool {
        let counts = self.by_group.iter().map(|g| g.unique_respondents);
        match (counts.clone().min(), counts.max()) {
            (Some(min), Some(max)) => max > min * 3,
            _ => false,
        }
    }
}
