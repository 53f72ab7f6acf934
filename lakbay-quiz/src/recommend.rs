//! Answers to ranked destinations in one call

use crate::answers::AnswerVector;
use crate::destination::Destination;
use crate::personality::{classify, PersonalityScore};
use crate::preference::Preference;
use crate::scorer::{score_destinations, ScoredDestination};
use crate::taxonomy::Activity;
use serde::Serialize;

/// Everything derived from one answer vector
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Recommendation {
    pub preference: Preference,
    /// `None` until at least one traveler question is answered
    pub personality: Option<PersonalityScore>,
    pub destinations: Vec<ScoredDestination>,
}

impl Recommendation {
    /// Activity hint for text providers: the user's first chosen activity,
    /// else the personality's primary preferred activity
    pub fn activity_hint(&self) -> Option<Activity> {
        self.preference.primary_activity().or_else(|| {
            self.personality
                .as_ref()
                .and_then(|p| p.preferred_activities.first().copied())
        })
    }
}

/// Normalize, classify, and score
pub fn recommend(answers: &AnswerVector, destinations: &[Destination]) -> Recommendation {
    let preference = Preference::from_answers(answers);
    let personality = classify(answers);
    let personality_activities = personality
        .as_ref()
        .map(|p| p.preferred_activities.as_slice())
        .unwrap_or_default();

    let ranked = score_destinations(&preference, destinations, personality_activities);

    Recommendation {
        preference,
        personality,
        destinations: ranked,
    }
}
