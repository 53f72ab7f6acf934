//! Preference normalizer
//!
//! Turns raw answer strings into a typed [`Preference`]. Answers that are
//! missing stay `None`/empty; answers that don't parse are treated the same
//! way and logged at debug level. No field is defaulted here: defaulting is
//! the scorer's decision.

use crate::answers::{
    AnswerVector, KEY_ACTIVITY, KEY_BUDGET, KEY_ENVIRONMENT, KEY_GROUP, KEY_ISLAND, KEY_SEASON,
    KEY_VIBE,
};
use crate::taxonomy::{Activity, Environment, Vibe};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

token_enum! {
    /// Philippine island group
    pub enum IslandGroup ("island group") {
        Luzon => "luzon",
        Visayas => "visayas",
        Mindanao => "mindanao",
        Any => "any",
    }
}

token_enum! {
    /// Travel season
    pub enum Season ("season") {
        /// March to May
        Summer => "summer",
        /// June to October
        Rainy => "rainy",
        /// November to February
        Cool => "cool",
        Any => "any",
    }
}

token_enum! {
    /// Who is traveling
    pub enum TravelGroup ("travel group") {
        Solo => "solo",
        Couple => "couple",
        Family => "family",
        Friends => "friends",
    }
}

token_enum! {
    /// Spending level
    pub enum BudgetTier ("budget") {
        Budget => "budget",
        MidRange => "mid_range",
        Luxury => "luxury",
    }
}

/// Structured view of the answer vector
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preference {
    pub island: Option<IslandGroup>,
    pub environment: Option<Environment>,
    pub vibe: Option<Vibe>,
    /// Chosen activities (multi-select)
    pub activities: BTreeSet<Activity>,
    /// Travel seasons (multi-select)
    pub seasons: BTreeSet<Season>,
    pub budget: Option<BudgetTier>,
    pub group: Option<TravelGroup>,
}

impl Preference {
    /// Normalize raw answers
    pub fn from_answers(answers: &AnswerVector) -> Self {
        Self {
            island: parse_single(answers, KEY_ISLAND),
            environment: parse_single(answers, KEY_ENVIRONMENT),
            vibe: parse_single(answers, KEY_VIBE),
            activities: parse_set(answers, KEY_ACTIVITY),
            seasons: parse_set(answers, KEY_SEASON),
            budget: parse_single(answers, KEY_BUDGET),
            group: parse_single(answers, KEY_GROUP),
        }
    }

    /// First chosen activity in declaration order, used as a text-provider hint
    pub fn primary_activity(&self) -> Option<Activity> {
        self.activities.iter().next().copied()
    }
}

fn parse_single<T>(answers: &AnswerVector, key: &str) -> Option<T>
where
    T: FromStr<Err = crate::ParseError>,
{
    let raw = answers.get(key)?;
    if raw.trim().is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::debug!(key, error = %e, "Ignoring unparseable answer");
            None
        }
    }
}

fn parse_set<T>(answers: &AnswerVector, key: &str) -> BTreeSet<T>
where
    T: FromStr<Err = crate::ParseError> + Ord,
{
    answers
        .get_list(key)
        .into_iter()
        .filter_map(|item| match item.parse() {
            Ok(value) => Some(value),
            Err(e) => {
                tracing::debug!(key, error = %e, "Ignoring unparseable list item");
                None
            }
        })
        .collect()
}
