// src/quiz/archetype.rs

use serde::{Deserialize, Serialize};

/// The closed set of quiz outcomes.
///
/// Declaration order matters: the resolver breaks score ties by picking the
/// first archetype in this order, and an all-zero score resolves to the
/// first variant. Reordering variants changes tie-break results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    PeoplePleaser,
    Perfectionist,
    Rebel,
}

impl Archetype {
    /// All archetypes, in declaration (tie-break) order.
    pub const ALL: [Archetype; 3] = [
        Archetype::PeoplePleaser,
        Archetype::Perfectionist,
        Archetype::Rebel,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Archetype::PeoplePleaser => "people_pleaser",
            Archetype::Perfectionist => "perfectionist",
            Archetype::Rebel => "rebel",
        }
    }

    /// Lead source tag recorded for quiz-sourced leads (e.g. "quiz_rebel").
    pub fn source_tag(&self) -> String {
        format!("quiz_{}", self.as_str())
    }

    /// Static display/email content for this archetype.
    ///
    /// Exhaustive match over the enum: adding or renaming an archetype is a
    /// compile-time-checked change, not a runtime lookup that can miss.
    pub const fn profile(&self) -> &'static ResultProfile {
        match self {
            Archetype::PeoplePleaser => &PEOPLE_PLEASER_PROFILE,
            Archetype::Perfectionist => &PERFECTIONIST_PROFILE,
            Archetype::Rebel => &REBEL_PROFILE,
        }
    }
}

/// Static descriptive content shown and emailed for an archetype.
#[derive(Debug, Serialize)]
pub struct ResultProfile {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub description: &'static [&'static str],
    pub traits: &'static [&'static str],
    pub next_action: &'static str,
}

static PEOPLE_PLEASER_PROFILE: ResultProfile = ResultProfile {
    title: "The People Pleaser",
    subtitle: "You keep the peace by putting yourself last",
    description: &[
        "You are finely tuned to the moods and needs of everyone around you, \
         and you instinctively shape yourself to fit them. Saying no feels \
         dangerous, so you rarely do.",
        "The cost is quiet but constant: your own needs go unspoken until \
         resentment or exhaustion forces them to the surface.",
    ],
    traits: &[
        "Apologizes before asking for anything",
        "Overscheduled and secretly drained",
        "Avoids conflict even at personal cost",
        "Feels responsible for other people's feelings",
    ],
    next_action: "Start with the free grounding meditation, then book a \
                  discovery call to practice one honest no this week.",
};

static PERFECTIONIST_PROFILE: ResultProfile = ResultProfile {
    title: "The Perfectionist",
    subtitle: "Nothing you do ever feels like enough",
    description: &[
        "Your standards are a fortress. They earned you praise early on, and \
         now they run your life: every task is an audition, every mistake a \
         verdict.",
        "Rest feels like falling behind, so you never quite get any. The way \
         out is not lower standards but a different relationship to them.",
    ],
    traits: &[
        "Rewrites the email four times before sending",
        "Procrastinates on anything that can't be done flawlessly",
        "Harsh inner critic that never clocks out",
        "Achievements feel flat within a day",
    ],
    next_action: "Watch the masterclass on self-trust and try shipping one \
                  deliberately imperfect thing this week.",
};

static REBEL_PROFILE: ResultProfile = ResultProfile {
    title: "The Rebel",
    subtitle: "You'd rather burn the map than follow it",
    description: &[
        "Rules, routines, and other people's expectations feel like a cage, \
         and you have a gift for kicking the door off its hinges. Freedom is \
         your non-negotiable.",
        "But the same reflex that protects you also isolates you: resisting \
         every structure means building none of your own.",
    ],
    traits: &[
        "Allergic to being told what to do",
        "Starts strong, bores fast",
        "Mistakes self-abandonment for spontaneity",
        "Loyal fiercely, but on their own terms",
    ],
    next_action: "Apply for mentorship and design a structure you actually \
                  chose, instead of one you inherited.",
};
