//! Personality profiles
//!
//! Display data for each archetype plus two directed relations:
//! `compatible_with` and `avoid_with`. The relations are declared per
//! profile and are not symmetric: A listing B says nothing about B's list.

use crate::personality::PersonalityId;
use serde::Serialize;

token_enum! {
    /// How common an archetype is
    pub enum PersonalityCategory ("personality category") {
        Core => "core",
        Hybrid => "hybrid",
        Rare => "rare",
    }
}

/// Static profile of one archetype
#[derive(Debug, Clone, Serialize)]
pub struct PersonalityProfile {
    pub id: PersonalityId,
    pub emoji: &'static str,
    pub name: &'static str,
    pub category: PersonalityCategory,
    pub description: &'static str,
    pub strengths: &'static [&'static str],
    pub struggles: &'static [&'static str],
    pub compatible_with: &'static [PersonalityId],
    pub avoid_with: &'static [PersonalityId],
}

use PersonalityCategory::{Core, Hybrid, Rare};
use PersonalityId::*;

static PROFILES: [PersonalityProfile; 11] = [
    PersonalityProfile {
        id: RelaxedEscapist,
        emoji: "🏖️",
        name: "The Relaxed Escapist",
        category: Core,
        description: "Travels to slow down. A hammock, a view, and nowhere to be.",
        strengths: &["Easygoing company", "Finds calm anywhere"],
        struggles: &["Early call times", "Packed itineraries"],
        compatible_with: &[SlowExplorer, ComfortCurator, MoodTraveler],
        avoid_with: &[ThrillStrategist],
    },
    PersonalityProfile {
        id: AdventureSeeker,
        emoji: "🧗",
        name: "The Adventure Seeker",
        category: Core,
        description: "Chases adrenaline: deep dives, steep trails, big waves.",
        strengths: &["Fearless", "High energy"],
        struggles: &["Rest days", "Waiting in lines"],
        compatible_with: &[ThrillStrategist, WildDiscoverer, ChaoticWanderer],
        avoid_with: &[ComfortCurator, RelaxedEscapist],
    },
    PersonalityProfile {
        id: CuriousWanderer,
        emoji: "🧭",
        name: "The Curious Wanderer",
        category: Core,
        description: "Follows stories: old streets, local kitchens, museum corners.",
        strengths: &["Asks locals everything", "Great at finding hidden spots"],
        struggles: &["Staying on schedule"],
        compatible_with: &[CultureScholar, SlowExplorer, WildDiscoverer],
        avoid_with: &[],
    },
    PersonalityProfile {
        id: MeticulousPlanner,
        emoji: "📋",
        name: "The Meticulous Planner",
        category: Core,
        description: "Has a spreadsheet for the trip and a backup spreadsheet.",
        strengths: &["Never misses a booking", "Budget under control"],
        struggles: &["Last-minute changes", "Unplanned detours"],
        compatible_with: &[ComfortCurator, CultureScholar, ThrillStrategist],
        avoid_with: &[ChaoticWanderer, MoodTraveler],
    },
    PersonalityProfile {
        id: SlowExplorer,
        emoji: "☕",
        name: "The Slow Explorer",
        category: Hybrid,
        description: "Relaxed pace, curious mind. Lingers in cafés and side streets.",
        strengths: &["Notices details", "Low-stress travel buddy"],
        struggles: &["Tight connections"],
        compatible_with: &[RelaxedEscapist, CuriousWanderer],
        avoid_with: &[ThrillStrategist],
    },
    PersonalityProfile {
        id: ThrillStrategist,
        emoji: "🎯",
        name: "The Thrill Strategist",
        category: Hybrid,
        description: "Plans every detail of the adventure so the adventure can be bigger.",
        strengths: &["Safe risk-taker", "Efficient"],
        struggles: &["Idle afternoons"],
        compatible_with: &[AdventureSeeker, MeticulousPlanner],
        avoid_with: &[RelaxedEscapist, MoodTraveler],
    },
    PersonalityProfile {
        id: WildDiscoverer,
        emoji: "🌿",
        name: "The Wild Discoverer",
        category: Hybrid,
        description: "Off the map on purpose. Waterfalls first, questions later.",
        strengths: &["Adaptable", "Finds places before they trend"],
        struggles: &["Crowded tourist spots"],
        compatible_with: &[AdventureSeeker, CuriousWanderer, ChaoticWanderer],
        avoid_with: &[ComfortCurator],
    },
    PersonalityProfile {
        id: ComfortCurator,
        emoji: "🛎️",
        name: "The Comfort Curator",
        category: Hybrid,
        description: "Relaxation, well organized. Good hotels, booked spas, smooth transfers.",
        strengths: &["Great recommendations", "Stress-free logistics"],
        struggles: &["Roughing it"],
        compatible_with: &[RelaxedEscapist, MeticulousPlanner],
        avoid_with: &[AdventureSeeker, WildDiscoverer],
    },
    PersonalityProfile {
        id: CultureScholar,
        emoji: "🏛️",
        name: "The Culture Scholar",
        category: Hybrid,
        description: "Researches the history before arriving and still wants the guided tour.",
        strengths: &["Deep context", "Respectful visitor"],
        struggles: &["Beach-only trips"],
        compatible_with: &[CuriousWanderer, MeticulousPlanner, SlowExplorer],
        avoid_with: &[],
    },
    PersonalityProfile {
        id: ChaoticWanderer,
        emoji: "🌀",
        name: "The Chaotic Wanderer",
        category: Rare,
        description: "A bit of everything, all at once. No two trips look alike.",
        strengths: &["Up for anything", "Great stories"],
        struggles: &["Sticking to one plan"],
        compatible_with: &[MoodTraveler, WildDiscoverer, AdventureSeeker],
        avoid_with: &[MeticulousPlanner],
    },
    PersonalityProfile {
        id: MoodTraveler,
        emoji: "🌦️",
        name: "The Mood Traveler",
        category: Rare,
        description: "Decides the day by how the morning feels.",
        strengths: &["Flexible", "Reads the room"],
        struggles: &["Committing early", "Fixed tours"],
        compatible_with: &[ChaoticWanderer, RelaxedEscapist],
        avoid_with: &[MeticulousPlanner, ThrillStrategist],
    },
];

/// All profiles in classifier declaration order
pub fn all_profiles() -> &'static [PersonalityProfile] {
    &PROFILES
}

/// Profile for an archetype
pub fn profile(id: PersonalityId) -> &'static PersonalityProfile {
    // PROFILES is declared in PersonalityId::ALL order
    &PROFILES[id as usize]
}

/// Does `from` list `to` as compatible (directed)
pub fn is_compatible(from: PersonalityId, to: PersonalityId) -> bool {
    profile(from).compatible_with.contains(&to)
}

/// Does `from` list `to` as one to avoid (directed)
pub fn should_avoid(from: PersonalityId, to: PersonalityId) -> bool {
    profile(from).avoid_with.contains(&to)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profiles_follow_id_order() {
        for (index, id) in PersonalityId::ALL.iter().enumerate() {
            assert_eq!(all_profiles()[index].id, *id);
            assert_eq!(profile(*id).id, *id);
        }
    }

    #[test]
    fn test_categories() {
        let count = |category| {
            all_profiles()
                .iter()
                .filter(|p| p.category == category)
                .count()
        };
        assert_eq!(count(Core), 4);
        assert_eq!(count(Hybrid), 5);
        assert_eq!(count(Rare), 2);
    }

    #[test]
    fn test_relations_are_directed() {
        assert!(is_compatible(CuriousWanderer, WildDiscoverer));
        assert!(is_compatible(WildDiscoverer, CuriousWanderer));

        // Declared one way only; must stay that way
        assert!(is_compatible(CultureScholar, SlowExplorer));
        assert!(!is_compatible(SlowExplorer, CultureScholar));
    }

    #[test]
    fn test_avoid_relation() {
        assert!(should_avoid(MeticulousPlanner, ChaoticWanderer));
        assert!(should_avoid(ChaoticWanderer, MeticulousPlanner));
        assert!(should_avoid(RelaxedEscapist, ThrillStrategist));
        assert!(!should_avoid(CuriousWanderer, ChaoticWanderer));
    }

    #[test]
    fn test_relations_reference_other_profiles() {
        for p in all_profiles() {
            assert!(!p.compatible_with.contains(&p.id), "{} lists itself", p.id);
            assert!(!p.avoid_with.contains(&p.id), "{} avoids itself", p.id);
        }
    }
}
