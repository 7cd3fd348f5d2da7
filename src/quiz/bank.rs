// src/quiz/bank.rs

use serde::Serialize;

use crate::quiz::scoring::ScoreVector;

/// One question in the static bank.
#[derive(Debug, Serialize)]
pub struct Question {
    pub id: &'static str,
    pub prompt: &'static str,
    pub options: [QuizOption; 4],
}

/// A selectable option carrying its point-vector over all archetypes.
/// Every option defines a weight (possibly zero) for every archetype, so
/// vector addition is always total.
#[derive(Debug, Serialize)]
pub struct QuizOption {
    pub id: &'static str,
    pub text: &'static str,
    #[serde(skip)]
    pub points: ScoreVector,
}

const fn opt(id: &'static str, text: &'static str, points: ScoreVector) -> QuizOption {
    QuizOption { id, text, points }
}

/// The ordered question bank. Immutable, defined at process start.
pub static QUESTIONS: [Question; 8] = [
    Question {
        id: "q1",
        prompt: "A friend asks for a favor on a day you are already stretched thin. What happens?",
        options: [
            opt("a", "I say yes before I've even checked my calendar.", ScoreVector::weights(3, 0, 0)),
            opt("b", "I say yes, then stay up late so nothing I owe slips.", ScoreVector::weights(1, 2, 0)),
            opt("c", "I say no. My time is mine.", ScoreVector::weights(0, 0, 3)),
            opt("d", "I negotiate a smaller version I can do properly.", ScoreVector::weights(0, 2, 1)),
        ],
    },
    Question {
        id: "q2",
        prompt: "You finish a piece of work you're proud of. What's the first thought?",
        options: [
            opt("a", "I hope everyone likes it.", ScoreVector::weights(3, 0, 0)),
            opt("b", "There's a typo somewhere. I can feel it.", ScoreVector::weights(0, 3, 0)),
            opt("c", "Done. Next thing.", ScoreVector::weights(0, 0, 3)),
            opt("d", "I re-read it twice before showing anyone.", ScoreVector::weights(1, 2, 0)),
        ],
    },
    Question {
        id: "q3",
        prompt: "Someone gives you unsolicited advice about how to live your life.",
        options: [
            opt("a", "I thank them warmly, even if it stung.", ScoreVector::weights(3, 0, 0)),
            opt("b", "I quietly compare their advice against my own standards.", ScoreVector::weights(0, 3, 0)),
            opt("c", "I do the opposite, possibly out of spite.", ScoreVector::weights(0, 0, 3)),
            opt("d", "I nod and change the subject.", ScoreVector::weights(2, 0, 1)),
        ],
    },
    Question {
        id: "q4",
        prompt: "A plan you committed to stops making sense halfway through.",
        options: [
            opt("a", "I stick with it. People are counting on me.", ScoreVector::weights(3, 0, 0)),
            opt("b", "I stick with it. Quitting feels like failing.", ScoreVector::weights(0, 3, 0)),
            opt("c", "I drop it without ceremony.", ScoreVector::weights(0, 0, 3)),
            opt("d", "I redesign it and tell everyone after.", ScoreVector::weights(0, 1, 2)),
        ],
    },
    Question {
        id: "q5",
        prompt: "When conflict shows up in a close relationship, you...",
        options: [
            opt("a", "Smooth it over fast, whatever it takes.", ScoreVector::weights(3, 0, 0)),
            opt("b", "Build a complete, airtight case before speaking.", ScoreVector::weights(0, 3, 0)),
            opt("c", "Say the blunt thing and accept the fallout.", ScoreVector::weights(0, 0, 3)),
            opt("d", "Withdraw until I know what I actually feel.", ScoreVector::weights(1, 1, 1)),
        ],
    },
    Question {
        id: "q6",
        prompt: "Your ideal morning routine is...",
        options: [
            opt("a", "Whatever the people I live with need it to be.", ScoreVector::weights(3, 0, 0)),
            opt("b", "The same optimized sequence, every single day.", ScoreVector::weights(0, 3, 0)),
            opt("c", "Routine? No.", ScoreVector::weights(0, 0, 3)),
            opt("d", "A loose shape I mostly follow.", ScoreVector::weights(0, 1, 2)),
        ],
    },
    Question {
        id: "q7",
        prompt: "You get critical feedback that is partly fair and partly off-base.",
        options: [
            opt("a", "I apologize for all of it, fair or not.", ScoreVector::weights(3, 0, 0)),
            opt("b", "I fixate on the fair part for a week.", ScoreVector::weights(0, 3, 0)),
            opt("c", "I discard all of it. Consider the source.", ScoreVector::weights(0, 0, 3)),
            opt("d", "I keep the fair part, drop the rest.", ScoreVector::weights(0, 2, 1)),
        ],
    },
    Question {
        id: "q8",
        prompt: "Deep down, what are you most afraid of?",
        options: [
            opt("a", "Being a burden to the people I love.", ScoreVector::weights(3, 0, 0)),
            opt("b", "Being exposed as not good enough.", ScoreVector::weights(0, 3, 0)),
            opt("c", "Being trapped in a life someone else designed.", ScoreVector::weights(0, 0, 3)),
            opt("d", "All of the above, on different days.", ScoreVector::weights(1, 1, 1)),
        ],
    },
];
