//! Quiz question list

use crate::answers::*;
use serde::Serialize;

/// How a question is answered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Single,
    /// Comma-joined answer
    Multi,
}

#[derive(Debug, Clone, Serialize)]
pub struct QuestionOption {
    pub value: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub kind: QuestionKind,
    /// Empty when options are computed from other answers
    pub options: &'static [QuestionOption],
    /// Answers the option set is derived from
    pub depends_on: &'static [&'static str],
}

const fn opt(value: &'static str, label: &'static str) -> QuestionOption {
    QuestionOption { value, label }
}

static QUESTIONS: &[Question] = &[
    Question {
        id: KEY_ISLAND,
        prompt: "Which island group are you drawn to?",
        kind: QuestionKind::Single,
        options: &[
            opt("luzon", "Luzon"),
            opt("visayas", "Visayas"),
            opt("mindanao", "Mindanao"),
            opt("any", "Surprise me"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_ENVIRONMENT,
        prompt: "Where do you want to wake up?",
        kind: QuestionKind::Single,
        options: &[
            opt("beach", "By the beach"),
            opt("mountains", "In the mountains"),
            opt("city", "In the city"),
            opt("any", "Anywhere"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_VIBE,
        prompt: "What pace feels right?",
        kind: QuestionKind::Single,
        options: &[
            opt("relaxed", "Slow and easy"),
            opt("balanced", "A bit of both"),
            opt("active", "Go go go"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_ACTIVITY,
        prompt: "What do you want to do there?",
        kind: QuestionKind::Multi,
        options: &[],
        depends_on: &[KEY_ENVIRONMENT, KEY_VIBE],
    },
    Question {
        id: KEY_SEASON,
        prompt: "When are you traveling?",
        kind: QuestionKind::Multi,
        options: &[
            opt("summer", "March to May"),
            opt("rainy", "June to October"),
            opt("cool", "November to February"),
            opt("any", "Not sure yet"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_BUDGET,
        prompt: "What's your budget?",
        kind: QuestionKind::Single,
        options: &[
            opt("budget", "Backpacker"),
            opt("mid_range", "Comfortable"),
            opt("luxury", "Treat myself"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_GROUP,
        prompt: "Who's coming along?",
        kind: QuestionKind::Single,
        options: &[
            opt("solo", "Just me"),
            opt("couple", "My partner"),
            opt("family", "Family"),
            opt("friends", "Friends"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_TRAVELER_MORNING,
        prompt: "First morning of the trip. You...",
        kind: QuestionKind::Single,
        options: &[
            opt("a", "Sleep in, then breakfast with a view"),
            opt("b", "Already out on a sunrise hike"),
            opt("c", "Wander to the market to see what locals eat"),
            opt("d", "Follow the itinerary you printed"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_TRAVELER_AFTERNOON,
        prompt: "A free afternoon opens up. You...",
        kind: QuestionKind::Single,
        options: &[
            opt("a", "Nap by the pool"),
            opt("b", "Rent a motorbike and find a waterfall"),
            opt("c", "Visit the old church everyone skips"),
            opt("d", "Book tomorrow's tour in advance"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_TRAVELER_SPEND,
        prompt: "You splurge on...",
        kind: QuestionKind::Single,
        options: &[
            opt("a", "A massage"),
            opt("b", "A dive trip"),
            opt("c", "A cooking class"),
            opt("d", "A better room, booked months ago"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_TRAVELER_SUITCASE,
        prompt: "Your suitcase is...",
        kind: QuestionKind::Single,
        options: &[
            opt("a", "Mostly swimwear"),
            opt("b", "A backpack and hiking shoes"),
            opt("c", "Half empty, for souvenirs"),
            opt("d", "Packed from a checklist"),
        ],
        depends_on: &[],
    },
    Question {
        id: KEY_TRAVELER_PLANS,
        prompt: "Plans fall through. You...",
        kind: QuestionKind::Single,
        options: &[
            opt("a", "Shrug and order another drink"),
            opt("b", "Take it as a sign to explore"),
            opt("c", "Ask a local what to do instead"),
            opt("d", "Switch to plan B"),
        ],
        depends_on: &[],
    },
];

/// All questions in quiz order
pub fn questions() -> &'static [Question] {
    QUESTIONS
}

pub fn find_question(id: &str) -> Option<&'static Question> {
    QUESTIONS.iter().find(|q| q.id == id)
}
