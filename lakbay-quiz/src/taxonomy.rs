//! Activity taxonomy
//!
//! Which activities are offered as answer options for an environment/vibe
//! pair. The same [`Activity`] tokens are used by the destination catalog,
//! the personality tables and the scorer.

token_enum! {
    /// Coarse destination category
    pub enum Environment ("environment") {
        Beach => "beach",
        Mountains => "mountains",
        City => "city",
        Any => "any",
    }
}

token_enum! {
    /// Desired pacing of a travel day
    pub enum Vibe ("vibe") {
        Relaxed => "relaxed",
        Balanced => "balanced",
        Active => "active",
    }
}

token_enum! {
    /// Activity tag
    pub enum Activity ("activity") {
        Swimming => "swimming",
        Snorkeling => "snorkeling",
        Diving => "diving",
        Surfing => "surfing",
        IslandHopping => "island_hopping",
        BeachLounging => "beach_lounging",
        Kayaking => "kayaking",
        Hiking => "hiking",
        Camping => "camping",
        Waterfalls => "waterfalls",
        Canyoneering => "canyoneering",
        HotSprings => "hot_springs",
        Stargazing => "stargazing",
        FoodTrip => "food_trip",
        Museums => "museums",
        HeritageWalk => "heritage_walk",
        Nightlife => "nightlife",
        Shopping => "shopping",
        CafeHopping => "cafe_hopping",
        Photography => "photography",
        Wellness => "wellness",
        Sightseeing => "sightseeing",
    }
}

impl Activity {
    /// Human-readable label used in text-provider prompts
    pub fn label(&self) -> String {
        self.as_str().replace('_', " ")
    }
}

impl Environment {
    /// Concrete environments (everything except `Any`)
    pub const CONCRETE: [Environment; 3] = [Environment::Beach, Environment::Mountains, Environment::City];
}

/// Activities offered for one concrete environment and vibe
fn table(environment: Environment, vibe: Vibe) -> &'static [Activity] {
    use Activity::*;

    match (environment, vibe) {
        (Environment::Beach, Vibe::Relaxed) => &[BeachLounging, Swimming, Wellness, Photography],
        (Environment::Beach, Vibe::Balanced) => &[Snorkeling, IslandHopping, Kayaking, Swimming],
        (Environment::Beach, Vibe::Active) => &[Diving, Surfing, Kayaking, IslandHopping],
        (Environment::Mountains, Vibe::Relaxed) => &[HotSprings, Stargazing, Photography, Sightseeing],
        (Environment::Mountains, Vibe::Balanced) => &[Hiking, Waterfalls, Camping, Photography],
        (Environment::Mountains, Vibe::Active) => &[Hiking, Canyoneering, Camping, Waterfalls],
        (Environment::City, Vibe::Relaxed) => &[CafeHopping, Wellness, Shopping, Museums],
        (Environment::City, Vibe::Balanced) => &[FoodTrip, HeritageWalk, Museums, Sightseeing],
        (Environment::City, Vibe::Active) => &[Nightlife, FoodTrip, HeritageWalk, Shopping],
        (Environment::Any, _) => &[],
    }
}

/// Activity options for an environment and optional vibe
///
/// `Environment::Any` expands to every concrete environment and a missing
/// vibe expands to every vibe. The result keeps table order and contains no
/// duplicates.
pub fn activities_for(environment: Environment, vibe: Option<Vibe>) -> Vec<Activity> {
    let environments: &[Environment] = match environment {
        Environment::Any => &Environment::CONCRETE,
        _ => std::slice::from_ref(&environment),
    };
    let vibes: &[Vibe] = match &vibe {
        Some(v) => std::slice::from_ref(v),
        None => Vibe::ALL,
    };

    let mut activities = Vec::new();
    for env in environments {
        for v in vibes {
            for activity in table(*env, *v) {
                if !activities.contains(activity) {
                    activities.push(*activity);
                }
            }
        }
    }
    activities
}

/// Whether `activity` is a valid option for the pair
pub fn is_valid_activity(environment: Environment, vibe: Option<Vibe>, activity: Activity) -> bool {
    activities_for(environment, vibe).contains(&activity)
}
