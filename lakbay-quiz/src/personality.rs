//! Personality classifier
//!
//! Five traveler questions are each answered with a letter a–d. The letter
//! tally is reduced to one of eleven archetypes:
//!
//! | Pattern | Archetype |
//! |---|---|
//! | all four letters present, spread of at most 1 | chaotic wanderer |
//! | three or more letters present, top count at most 2 | mood traveler |
//! | top two counts within 1 of each other | hybrid of the top pair |
//! | otherwise | pure archetype of the top letter |
//!
//! The a+b pair has no hybrid and resolves to the top letter's pure type.

use crate::answers::{
    AnswerVector, KEY_TRAVELER_AFTERNOON, KEY_TRAVELER_MORNING, KEY_TRAVELER_PLANS,
    KEY_TRAVELER_SPEND, KEY_TRAVELER_SUITCASE,
};
use crate::taxonomy::Activity;
use serde::{Deserialize, Serialize};

/// The questions that feed the classifier
pub const PERSONALITY_QUESTION_KEYS: [&str; 5] = [
    KEY_TRAVELER_MORNING,
    KEY_TRAVELER_AFTERNOON,
    KEY_TRAVELER_SPEND,
    KEY_TRAVELER_SUITCASE,
    KEY_TRAVELER_PLANS,
];

token_enum! {
    /// Traveler archetype
    pub enum PersonalityId ("personality") {
        RelaxedEscapist => "relaxed_escapist",
        AdventureSeeker => "adventure_seeker",
        CuriousWanderer => "curious_wanderer",
        MeticulousPlanner => "meticulous_planner",
        SlowExplorer => "slow_explorer",
        ThrillStrategist => "thrill_strategist",
        WildDiscoverer => "wild_discoverer",
        ComfortCurator => "comfort_curator",
        CultureScholar => "culture_scholar",
        ChaoticWanderer => "chaotic_wanderer",
        MoodTraveler => "mood_traveler",
    }
}

/// Answer letter; declaration order is the tie-break priority
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Letter {
    A,
    B,
    C,
    D,
}

impl Letter {
    pub const ALL: [Letter; 4] = [Letter::A, Letter::B, Letter::C, Letter::D];

    /// Parse a single-letter answer, ignoring case and surrounding space
    pub fn parse(raw: &str) -> Option<Letter> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "a" => Some(Letter::A),
            "b" => Some(Letter::B),
            "c" => Some(Letter::C),
            "d" => Some(Letter::D),
            _ => None,
        }
    }

    /// Archetype for a single dominant letter
    pub fn pure_archetype(self) -> PersonalityId {
        match self {
            Letter::A => PersonalityId::RelaxedEscapist,
            Letter::B => PersonalityId::AdventureSeeker,
            Letter::C => PersonalityId::CuriousWanderer,
            Letter::D => PersonalityId::MeticulousPlanner,
        }
    }
}

/// Per-letter answer tally
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterCounts {
    pub a: u8,
    pub b: u8,
    pub c: u8,
    pub d: u8,
}

impl LetterCounts {
    pub fn get(&self, letter: Letter) -> u8 {
        match letter {
            Letter::A => self.a,
            Letter::B => self.b,
            Letter::C => self.c,
            Letter::D => self.d,
        }
    }

    fn increment(&mut self, letter: Letter) {
        let slot = match letter {
            Letter::A => &mut self.a,
            Letter::B => &mut self.b,
            Letter::C => &mut self.c,
            Letter::D => &mut self.d,
        };
        *slot = slot.saturating_add(1);
    }

    pub fn is_empty(&self) -> bool {
        self.a == 0 && self.b == 0 && self.c == 0 && self.d == 0
    }

    /// Tally the personality questions; missing or invalid answers are skipped
    pub fn from_answers(answers: &AnswerVector) -> Self {
        let mut counts = Self::default();
        for key in PERSONALITY_QUESTION_KEYS {
            if let Some(letter) = answers.get(key).and_then(Letter::parse) {
                counts.increment(letter);
            }
        }
        counts
    }

    /// Letters by descending count; equal counts keep a, b, c, d order
    fn ranked(&self) -> [(Letter, u8); 4] {
        let mut ranked = Letter::ALL.map(|letter| (letter, self.get(letter)));
        // slice::sort_by is stable
        ranked.sort_by(|x, y| y.1.cmp(&x.1));
        ranked
    }
}

/// Classifier output
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalityScore {
    pub primary: PersonalityId,
    pub counts: LetterCounts,
    /// Ordered; the first entry is the primary preferred activity
    pub preferred_activities: Vec<Activity>,
}

/// Hybrid archetype for an unordered letter pair
fn hybrid_for(first: Letter, second: Letter) -> Option<PersonalityId> {
    let pair = if first <= second { (first, second) } else { (second, first) };
    match pair {
        (Letter::A, Letter::C) => Some(PersonalityId::SlowExplorer),
        (Letter::B, Letter::D) => Some(PersonalityId::ThrillStrategist),
        (Letter::B, Letter::C) => Some(PersonalityId::WildDiscoverer),
        (Letter::A, Letter::D) => Some(PersonalityId::ComfortCurator),
        (Letter::C, Letter::D) => Some(PersonalityId::CultureScholar),
        _ => None,
    }
}

/// Reduce a tally to an archetype; `None` when nothing was answered
pub fn classify_counts(counts: &LetterCounts) -> Option<PersonalityId> {
    if counts.is_empty() {
        return None;
    }

    let ranked = counts.ranked();
    let (top, max) = ranked[0];
    let (runner_up, second_max) = ranked[1];
    let fourth = ranked[3].1;
    let distinct = ranked.iter().filter(|(_, count)| *count > 0).count();

    let id = if distinct == 4 && max - fourth <= 1 {
        PersonalityId::ChaoticWanderer
    } else if distinct >= 3 && max <= 2 {
        PersonalityId::MoodTraveler
    } else if second_max > 0 && max - second_max <= 1 {
        hybrid_for(top, runner_up).unwrap_or_else(|| top.pure_archetype())
    } else {
        top.pure_archetype()
    };

    Some(id)
}

/// Classify the traveler questions of an answer vector
///
/// Returns `None` when none of the five questions has a valid answer; the
/// caller treats that as "not enough answers yet".
pub fn classify(answers: &AnswerVector) -> Option<PersonalityScore> {
    let counts = LetterCounts::from_answers(answers);
    let primary = classify_counts(&counts)?;

    tracing::trace!(?counts, personality = %primary, "Classified traveler personality");

    Some(PersonalityScore {
        primary,
        counts,
        preferred_activities: preferred_activities(primary).to_vec(),
    })
}

/// Static preferred-activity table
pub fn preferred_activities(id: PersonalityId) -> &'static [Activity] {
    use Activity::*;

    match id {
        PersonalityId::RelaxedEscapist => &[BeachLounging, Wellness, Swimming, HotSprings],
        PersonalityId::AdventureSeeker => &[Diving, Hiking, Surfing, Canyoneering],
        PersonalityId::CuriousWanderer => &[HeritageWalk, Museums, FoodTrip, Sightseeing],
        PersonalityId::MeticulousPlanner => &[Sightseeing, IslandHopping, HeritageWalk, Museums],
        PersonalityId::SlowExplorer => &[CafeHopping, HeritageWalk, BeachLounging, Photography],
        PersonalityId::ThrillStrategist => &[Canyoneering, Diving, Hiking, IslandHopping],
        PersonalityId::WildDiscoverer => &[IslandHopping, Waterfalls, Snorkeling, FoodTrip],
        PersonalityId::ComfortCurator => &[Wellness, Shopping, Sightseeing, Swimming],
        PersonalityId::CultureScholar => &[Museums, HeritageWalk, FoodTrip, Photography],
        PersonalityId::ChaoticWanderer => &[IslandHopping, Nightlife, FoodTrip, Surfing],
        PersonalityId::MoodTraveler => &[Photography, CafeHopping, Swimming, Hiking],
    }
}
