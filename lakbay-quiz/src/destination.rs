//! Destinations and the built-in catalog

use crate::preference::{BudgetTier, IslandGroup, Season, TravelGroup};
use crate::taxonomy::{Activity, Environment};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

token_enum! {
    /// Expected crowding
    pub enum CrowdLevel ("crowd level") {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

/// A scorable destination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Destination {
    pub id: String,
    pub name: String,
    pub island: IslandGroup,
    pub environments: Vec<Environment>,
    pub activities: Vec<Activity>,
    pub best_seasons: Vec<Season>,
    pub budget: BudgetTier,
    pub crowd: CrowdLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub groups: Option<Vec<TravelGroup>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Photo search query override when the display name searches poorly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_name: Option<String>,
}

impl Destination {
    /// Name to use for targeted photo searches
    pub fn preferred_search_name(&self) -> &str {
        self.search_name.as_deref().unwrap_or(&self.name)
    }

    /// First listed environment
    pub fn primary_environment(&self) -> Option<Environment> {
        self.environments.first().copied()
    }
}

struct Entry {
    id: &'static str,
    name: &'static str,
    island: IslandGroup,
    environments: &'static [Environment],
    activities: &'static [Activity],
    best_seasons: &'static [Season],
    budget: BudgetTier,
    crowd: CrowdLevel,
    groups: &'static [TravelGroup],
    region: &'static str,
    location: &'static str,
    search_name: Option<&'static str>,
}

impl Entry {
    fn build(&self) -> Destination {
        Destination {
            id: self.id.to_string(),
            name: self.name.to_string(),
            island: self.island,
            environments: self.environments.to_vec(),
            activities: self.activities.to_vec(),
            best_seasons: self.best_seasons.to_vec(),
            budget: self.budget,
            crowd: self.crowd,
            groups: (!self.groups.is_empty()).then(|| self.groups.to_vec()),
            region: Some(self.region.to_string()),
            location: Some(self.location.to_string()),
            search_name: self.search_name.map(str::to_string),
        }
    }
}

use Activity::*;
use BudgetTier::{Budget, Luxury, MidRange};
use CrowdLevel::{High, Low, Moderate};
use Environment::{Beach, City, Mountains};
use IslandGroup::{Luzon, Mindanao, Visayas};
use Season::{Cool, Rainy, Summer};
use TravelGroup::{Couple, Family, Friends, Solo};

const ENTRIES: &[Entry] = &[
    Entry {
        id: "boracay",
        name: "Boracay",
        island: Visayas,
        environments: &[Beach],
        activities: &[Swimming, BeachLounging, IslandHopping, Nightlife, Diving],
        best_seasons: &[Summer, Cool],
        budget: MidRange,
        crowd: High,
        groups: &[Friends, Couple],
        region: "Western Visayas",
        location: "Malay, Aklan",
        search_name: Some("Boracay White Beach"),
    },
    Entry {
        id: "el_nido",
        name: "El Nido",
        island: Luzon,
        environments: &[Beach],
        activities: &[IslandHopping, Snorkeling, Kayaking, Diving, Photography],
        best_seasons: &[Summer, Cool],
        budget: MidRange,
        crowd: Moderate,
        groups: &[Couple, Friends, Family],
        region: "MIMAROPA",
        location: "Palawan",
        search_name: Some("El Nido Palawan"),
    },
    Entry {
        id: "coron",
        name: "Coron",
        island: Luzon,
        environments: &[Beach],
        activities: &[Diving, Snorkeling, IslandHopping, HotSprings, Kayaking],
        best_seasons: &[Summer, Cool],
        budget: MidRange,
        crowd: Moderate,
        groups: &[Friends, Couple],
        region: "MIMAROPA",
        location: "Busuanga, Palawan",
        search_name: Some("Coron Palawan lagoon"),
    },
    Entry {
        id: "siargao",
        name: "Siargao",
        island: Mindanao,
        environments: &[Beach],
        activities: &[Surfing, IslandHopping, Swimming, Nightlife],
        best_seasons: &[Rainy, Cool],
        budget: Budget,
        crowd: Moderate,
        groups: &[Friends, Solo],
        region: "Caraga",
        location: "Surigao del Norte",
        search_name: None,
    },
    Entry {
        id: "baguio",
        name: "Baguio City",
        island: Luzon,
        environments: &[Mountains, City],
        activities: &[FoodTrip, Sightseeing, Shopping, CafeHopping],
        best_seasons: &[Cool, Summer],
        budget: Budget,
        crowd: High,
        groups: &[Family, Friends],
        region: "Cordillera Administrative Region",
        location: "Benguet",
        search_name: Some("Baguio City Philippines"),
    },
    Entry {
        id: "sagada",
        name: "Sagada",
        island: Luzon,
        environments: &[Mountains],
        activities: &[Hiking, Stargazing, Photography, Waterfalls, Camping],
        best_seasons: &[Cool, Summer],
        budget: Budget,
        crowd: Moderate,
        groups: &[Solo, Friends],
        region: "Cordillera Administrative Region",
        location: "Mountain Province",
        search_name: None,
    },
    Entry {
        id: "batanes",
        name: "Batanes",
        island: Luzon,
        environments: &[Mountains, Beach],
        activities: &[Sightseeing, Photography, Hiking, Stargazing],
        best_seasons: &[Summer],
        budget: Luxury,
        crowd: Low,
        groups: &[Couple, Solo],
        region: "Cagayan Valley",
        location: "Batanes",
        search_name: Some("Batanes rolling hills"),
    },
    Entry {
        id: "vigan",
        name: "Vigan",
        island: Luzon,
        environments: &[City],
        activities: &[HeritageWalk, FoodTrip, Museums, Photography, Sightseeing],
        best_seasons: &[Summer, Cool],
        budget: Budget,
        crowd: Moderate,
        groups: &[Family, Couple],
        region: "Ilocos Region",
        location: "Ilocos Sur",
        search_name: Some("Calle Crisologo Vigan"),
    },
    Entry {
        id: "manila",
        name: "Manila",
        island: Luzon,
        environments: &[City],
        activities: &[Museums, HeritageWalk, FoodTrip, Shopping, Nightlife],
        best_seasons: &[Cool],
        budget: MidRange,
        crowd: High,
        groups: &[Solo, Friends, Family],
        region: "National Capital Region",
        location: "Metro Manila",
        search_name: Some("Intramuros Manila"),
    },
    Entry {
        id: "tagaytay",
        name: "Tagaytay",
        island: Luzon,
        environments: &[Mountains, City],
        activities: &[CafeHopping, FoodTrip, Wellness, Sightseeing],
        best_seasons: &[Cool, Rainy],
        budget: MidRange,
        crowd: High,
        groups: &[Family, Couple],
        region: "CALABARZON",
        location: "Cavite",
        search_name: Some("Taal Volcano Tagaytay"),
    },
    Entry {
        id: "cebu_city",
        name: "Cebu City",
        island: Visayas,
        environments: &[City, Beach],
        activities: &[FoodTrip, HeritageWalk, Shopping, Nightlife],
        best_seasons: &[Summer, Cool],
        budget: MidRange,
        crowd: High,
        groups: &[Family, Friends],
        region: "Central Visayas",
        location: "Cebu",
        search_name: None,
    },
    Entry {
        id: "moalboal",
        name: "Moalboal",
        island: Visayas,
        environments: &[Beach],
        activities: &[Diving, Snorkeling, Canyoneering, Swimming],
        best_seasons: &[Summer, Cool],
        budget: Budget,
        crowd: Moderate,
        groups: &[Solo, Friends, Couple],
        region: "Central Visayas",
        location: "Cebu",
        search_name: Some("Moalboal sardine run"),
    },
    Entry {
        id: "bohol",
        name: "Bohol",
        island: Visayas,
        environments: &[Beach, Mountains],
        activities: &[Sightseeing, IslandHopping, Swimming, Diving, Photography],
        best_seasons: &[Summer, Cool],
        budget: MidRange,
        crowd: Moderate,
        groups: &[Family, Couple],
        region: "Central Visayas",
        location: "Bohol",
        search_name: Some("Chocolate Hills Bohol"),
    },
    Entry {
        id: "siquijor",
        name: "Siquijor",
        island: Visayas,
        environments: &[Beach],
        activities: &[Swimming, Waterfalls, Wellness, BeachLounging],
        best_seasons: &[Summer, Cool],
        budget: Budget,
        crowd: Low,
        groups: &[Solo, Couple],
        region: "Central Visayas",
        location: "Siquijor",
        search_name: None,
    },
    Entry {
        id: "camiguin",
        name: "Camiguin",
        island: Mindanao,
        environments: &[Beach, Mountains],
        activities: &[HotSprings, Waterfalls, Snorkeling, Hiking, Swimming],
        best_seasons: &[Summer],
        budget: Budget,
        crowd: Low,
        groups: &[Couple, Family, Solo],
        region: "Northern Mindanao",
        location: "Camiguin",
        search_name: None,
    },
    Entry {
        id: "davao_city",
        name: "Davao City",
        island: Mindanao,
        environments: &[City, Mountains],
        activities: &[FoodTrip, Hiking, Sightseeing, Shopping],
        best_seasons: &[Summer, Cool, Rainy],
        budget: MidRange,
        crowd: Moderate,
        groups: &[Family],
        region: "Davao Region",
        location: "Davao del Sur",
        search_name: None,
    },
];

static CATALOG: Lazy<Vec<Destination>> = Lazy::new(|| ENTRIES.iter().map(Entry::build).collect());

/// Built-in destination list
pub fn catalog() -> &'static [Destination] {
    &CATALOG
}

/// Look up a built-in destination by id
pub fn find(id: &str) -> Option<&'static Destination> {
    CATALOG.iter().find(|d| d.id == id)
}
