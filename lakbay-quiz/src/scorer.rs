//! Destination scorer
//!
//! Each destination collects points from six independent criteria. Every
//! matched criterion appends a reason, always in the order listed below.
//! Destinations scoring zero are dropped and the rest are ranked by score,
//! keeping catalog order between equal scores.

use crate::destination::Destination;
use crate::preference::{IslandGroup, Preference, Season};
use crate::taxonomy::{Activity, Environment};
use serde::{Deserialize, Serialize};

pub const WEIGHT_ISLAND: u32 = 2;
pub const WEIGHT_ENVIRONMENT: u32 = 3;
pub const WEIGHT_ACTIVITY: u32 = 4;
pub const WEIGHT_SEASON: u32 = 2;
pub const WEIGHT_BUDGET: u32 = 1;
pub const WEIGHT_GROUP: u32 = 1;

pub const REASON_ISLAND: &str = "Matches island group";
pub const REASON_ENVIRONMENT: &str = "Matches environment";
pub const REASON_ACTIVITY: &str = "Fits your main activity";
pub const REASON_SEASON: &str = "Good for your travel season";
pub const REASON_BUDGET: &str = "Matches your budget";
pub const REASON_GROUP: &str = "Good for your travel group";

/// A destination with its score and the reasons behind it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoredDestination {
    pub destination: Destination,
    pub score: u32,
    pub reasons: Vec<String>,
}

/// Score one destination
///
/// `personality_activities` widens the activity criterion: the destination
/// matches if it offers any chosen activity or any personality-preferred
/// activity. The criterion still counts once.
pub fn score_destination(
    preference: &Preference,
    destination: &Destination,
    personality_activities: &[Activity],
) -> (u32, Vec<String>) {
    let mut score = 0;
    let mut reasons = Vec::new();
    let mut add = |matched: bool, weight: u32, reason: &str| {
        if matched {
            score += weight;
            reasons.push(reason.to_string());
        }
    };

    add(
        matches!(preference.island, Some(island) if island != IslandGroup::Any && island == destination.island),
        WEIGHT_ISLAND,
        REASON_ISLAND,
    );

    add(
        matches!(preference.environment, Some(env) if env != Environment::Any && destination.environments.contains(&env)),
        WEIGHT_ENVIRONMENT,
        REASON_ENVIRONMENT,
    );

    add(
        preference
            .activities
            .iter()
            .chain(personality_activities)
            .any(|activity| destination.activities.contains(activity)),
        WEIGHT_ACTIVITY,
        REASON_ACTIVITY,
    );

    add(
        preference
            .seasons
            .iter()
            .any(|season| *season != Season::Any && destination.best_seasons.contains(season)),
        WEIGHT_SEASON,
        REASON_SEASON,
    );

    add(
        preference.budget == Some(destination.budget),
        WEIGHT_BUDGET,
        REASON_BUDGET,
    );

    add(
        match (&preference.group, &destination.groups) {
            (Some(group), Some(groups)) => groups.contains(group),
            _ => false,
        },
        WEIGHT_GROUP,
        REASON_GROUP,
    );

    (score, reasons)
}

/// Rank destinations against a preference
///
/// Returns a fresh list; the input slice is never modified.
pub fn score_destinations(
    preference: &Preference,
    destinations: &[Destination],
    personality_activities: &[Activity],
) -> Vec<ScoredDestination> {
    let mut scored: Vec<ScoredDestination> = destinations
        .iter()
        .filter_map(|destination| {
            let (score, reasons) = score_destination(preference, destination, personality_activities);
            (score > 0).then(|| ScoredDestination {
                destination: destination.clone(),
                score,
                reasons,
            })
        })
        .collect();

    // Vec::sort_by is stable: equal scores keep input order
    scored.sort_by(|a, b| b.score.cmp(&a.score));

    tracing::debug!(
        candidates = destinations.len(),
        matched = scored.len(),
        top = scored.first().map(|s| s.destination.id.as_str()).unwrap_or("none"),
        "Scored destinations"
    );

    scored
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::destination::CrowdLevel;
    use crate::preference::{BudgetTier, TravelGroup};
    use std::collections::BTreeSet;

    fn destination(id: &str) -> Destination {
        Destination {
            id: id.to_string(),
            name: id.to_string(),
            island: IslandGroup::Visayas,
            environments: vec![Environment::Beach],
            activities: vec![Activity::Diving],
            best_seasons: vec![Season::Summer],
            budget: BudgetTier::Budget,
            crowd: CrowdLevel::Low,
            groups: Some(vec![TravelGroup::Friends]),
            region: None,
            location: None,
            search_name: None,
        }
    }

    #[test]
    fn test_island_environment_activity_scores_nine() {
        let preference = Preference {
            island: Some(IslandGroup::Visayas),
            environment: Some(Environment::Beach),
            activities: BTreeSet::from([Activity::Diving]),
            ..Preference::default()
        };

        let (score, reasons) = score_destination(&preference, &destination("d"), &[]);

        assert_eq!(score, 9);
        assert_eq!(reasons, vec![REASON_ISLAND, REASON_ENVIRONMENT, REASON_ACTIVITY]);
    }

    #[test]
    fn test_all_criteria_sum() {
        let preference = Preference {
            island: Some(IslandGroup::Visayas),
            environment: Some(Environment::Beach),
            activities: BTreeSet::from([Activity::Diving]),
            seasons: BTreeSet::from([Season::Summer]),
            budget: Some(BudgetTier::Budget),
            group: Some(TravelGroup::Friends),
            ..Preference::default()
        };

        let (score, reasons) = score_destination(&preference, &destination("d"), &[]);

        assert_eq!(score, 2 + 3 + 4 + 2 + 1 + 1);
        assert_eq!(
            reasons,
            vec![
                REASON_ISLAND,
                REASON_ENVIRONMENT,
                REASON_ACTIVITY,
                REASON_SEASON,
                REASON_BUDGET,
                REASON_GROUP
            ]
        );
    }

    #[test]
    fn test_any_values_never_match() {
        let preference = Preference {
            island: Some(IslandGroup::Any),
            environment: Some(Environment::Any),
            seasons: BTreeSet::from([Season::Any]),
            ..Preference::default()
        };

        let (score, reasons) = score_destination(&preference, &destination("d"), &[]);

        assert_eq!(score, 0);
        assert!(reasons.is_empty());
    }

    #[test]
    fn test_personality_activities_broaden_match_once() {
        let preference = Preference {
            activities: BTreeSet::from([Activity::Museums]),
            ..Preference::default()
        };

        let (score, _) =
            score_destination(&preference, &destination("d"), &[Activity::Diving, Activity::Diving]);

        assert_eq!(score, WEIGHT_ACTIVITY);
    }

    #[test]
    fn test_missing_group_list_never_matches() {
        let mut dest = destination("d");
        dest.groups = None;
        let preference = Preference {
            group: Some(TravelGroup::Friends),
            ..Preference::default()
        };

        assert_eq!(score_destination(&preference, &dest, &[]).0, 0);
    }

    #[test]
    fn test_zero_score_excluded_and_stable_order() {
        let mut miss = destination("miss");
        miss.island = IslandGroup::Luzon;
        miss.environments = vec![Environment::City];
        miss.activities = vec![Activity::Museums];

        let mut top = destination("top");
        top.environments = vec![Environment::Beach];

        let preference = Preference {
            island: Some(IslandGroup::Visayas),
            environment: Some(Environment::Beach),
            ..Preference::default()
        };
        let mut island_only = destination("island_only");
        island_only.environments = vec![Environment::Mountains];
        let mut island_only_2 = destination("island_only_2");
        island_only_2.environments = vec![Environment::City];

        let input = vec![island_only, miss, top, island_only_2];
        let ranked = score_destinations(&preference, &input, &[]);

        let ids: Vec<_> = ranked.iter().map(|s| s.destination.id.as_str()).collect();
        assert_eq!(ids, vec!["top", "island_only", "island_only_2"]);
        assert_eq!(input.len(), 4, "input untouched");
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let preference = Preference {
            island: Some(IslandGroup::Luzon),
            activities: BTreeSet::from([Activity::Hiking]),
            ..Preference::default()
        };
        let catalog = crate::destination::catalog();

        let first = score_destinations(&preference, catalog, &[Activity::Photography]);
        let second = score_destinations(&preference, catalog, &[Activity::Photography]);

        assert_eq!(first, second);
    }
}
