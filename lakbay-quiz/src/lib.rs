//! # Lakbay Quiz
//!
//! Pure, synchronous quiz logic:
//! - Answer vector with dependent-answer invalidation
//! - Activity taxonomy (environment × vibe)
//! - Personality classifier and profiles
//! - Preference normalizer
//! - Destination catalog and scorer
//!
//! Nothing here performs I/O; every function is deterministic in its inputs
//! and safe to memoize.

#[macro_use]
mod token;

pub mod answers;
pub mod destination;
pub mod error;
pub mod personality;
pub mod preference;
pub mod profiles;
pub mod questions;
pub mod recommend;
pub mod scorer;
pub mod taxonomy;

pub use answers::AnswerVector;
pub use destination::{CrowdLevel, Destination};
pub use error::ParseError;
pub use personality::{classify, LetterCounts, PersonalityId, PersonalityScore};
pub use preference::{BudgetTier, IslandGroup, Preference, Season, TravelGroup};
pub use profiles::{PersonalityCategory, PersonalityProfile};
pub use recommend::{recommend, Recommendation};
pub use scorer::{score_destinations, ScoredDestination};
pub use taxonomy::{Activity, Environment, Vibe};
