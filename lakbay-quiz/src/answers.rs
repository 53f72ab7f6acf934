//! Answer vector
//!
//! Raw quiz answers keyed by question id. Multi-select answers are stored
//! comma-joined. The vector is mutated one key at a time by the quiz flow.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const KEY_ISLAND: &str = "island";
pub const KEY_ENVIRONMENT: &str = "environment";
pub const KEY_VIBE: &str = "vibe";
pub const KEY_ACTIVITY: &str = "activity";
pub const KEY_SEASON: &str = "season";
pub const KEY_BUDGET: &str = "budget";
pub const KEY_GROUP: &str = "group";

pub const KEY_TRAVELER_MORNING: &str = "traveler_morning";
pub const KEY_TRAVELER_AFTERNOON: &str = "traveler_afternoon";
pub const KEY_TRAVELER_SPEND: &str = "traveler_spend";
pub const KEY_TRAVELER_SUITCASE: &str = "traveler_suitcase";
pub const KEY_TRAVELER_PLANS: &str = "traveler_plans";

/// Answers whose change makes the recorded `activity` answer stale
const ACTIVITY_DEPENDENCIES: [&str; 2] = [KEY_ENVIRONMENT, KEY_VIBE];

/// Question id → raw answer
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnswerVector {
    answers: BTreeMap<String, String>,
}

impl AnswerVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Raw answer for a question
    pub fn get(&self, key: &str) -> Option<&str> {
        self.answers.get(key).map(String::as_str)
    }

    /// Multi-select answer split on commas; blank items are dropped
    pub fn get_list(&self, key: &str) -> Vec<&str> {
        self.get(key)
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|item| !item.is_empty())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// Record an answer
    ///
    /// Changing `environment` or `vibe` to a different value drops the
    /// `activity` answer, whose option set depends on both.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();

        if ACTIVITY_DEPENDENCIES.contains(&key.as_str())
            && self.get(&key) != Some(value.as_str())
            && self.answers.remove(KEY_ACTIVITY).is_some()
        {
            tracing::debug!(changed = %key, "Dropped activity answer after dependency change");
        }

        self.answers.insert(key, value);
    }

    /// Record a multi-select answer
    pub fn set_list<S: AsRef<str>>(&mut self, key: impl Into<String>, values: &[S]) {
        let joined = values
            .iter()
            .map(|v| v.as_ref().trim())
            .filter(|v| !v.is_empty())
            .collect::<Vec<_>>()
            .join(",");
        self.set(key, joined);
    }

    /// Remove an answer, returning the old value
    pub fn remove(&mut self, key: &str) -> Option<String> {
        let removed = self.answers.remove(key);
        if removed.is_some() && ACTIVITY_DEPENDENCIES.contains(&key) {
            self.answers.remove(KEY_ACTIVITY);
        }
        removed
    }

    /// Reset the quiz
    pub fn clear(&mut self) {
        self.answers.clear();
    }

    pub fn len(&self) -> usize {
        self.answers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.answers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.answers.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl From<BTreeMap<String, String>> for AnswerVector {
    /// Snapshot of answers; no invalidation is applied
    fn from(answers: BTreeMap<String, String>) -> Self {
        Self { answers }
    }
}
