// src/quiz/scoring.rs

use std::collections::HashMap;

use serde::Serialize;

use crate::error::AppError;
use crate::quiz::archetype::Archetype;
use crate::quiz::bank::{self, Question};

/// A respondent's completed answers: question id -> chosen option id.
pub type AnswerSet = HashMap<String, String>;

/// Running per-archetype point totals, indexed by declaration order.
///
/// Doubles as an option's point-vector in the question bank, so applying an
/// answer is plain vector addition. Totals only ever increase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreVector([u32; Archetype::ALL.len()]);

impl ScoreVector {
    pub const fn zero() -> Self {
        ScoreVector([0; Archetype::ALL.len()])
    }

    /// Const constructor used by the static question bank.
    pub const fn weights(people_pleaser: u32, perfectionist: u32, rebel: u32) -> Self {
        ScoreVector([people_pleaser, perfectionist, rebel])
    }

    pub fn get(&self, archetype: Archetype) -> u32 {
        self.0[archetype as usize]
    }

    pub fn add(&mut self, other: &ScoreVector) {
        for i in 0..self.0.len() {
            self.0[i] += other.0[i];
        }
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    /// Picks the archetype with the strictly greatest total.
    ///
    /// Ties resolve to the first archetype in `Archetype::ALL` order; an
    /// all-zero vector resolves to the first archetype. Same input always
    /// yields the same output.
    pub fn resolve(&self) -> Archetype {
        let mut best = Archetype::ALL[0];
        for &candidate in &Archetype::ALL[1..] {
            if self.get(candidate) > self.get(best) {
                best = candidate;
            }
        }
        best
    }
}

/// Folds one answer into the score vector.
///
/// `option_id` must name an option belonging to `question`; anything else is
/// an `InvalidAnswer` error, never silently ignored.
pub fn apply_answer(
    score: &mut ScoreVector,
    question: &Question,
    option_id: &str,
) -> Result<(), AppError> {
    let option = question
        .options
        .iter()
        .find(|o| o.id == option_id)
        .ok_or_else(|| {
            AppError::InvalidAnswer(format!(
                "Option '{}' does not belong to question '{}'",
                option_id, question.id
            ))
        })?;

    score.add(&option.points);
    Ok(())
}

/// Scores a complete answer set against the question bank, in bank order.
///
/// The set must cover every question exactly once: missing or unrecognized
/// question ids are rejected, so partial quiz progress is never scored.
pub fn score_answers(answers: &AnswerSet) -> Result<ScoreVector, AppError> {
    if answers.len() != bank::QUESTIONS.len() {
        return Err(AppError::Validation(format!(
            "Expected {} answers, got {}",
            bank::QUESTIONS.len(),
            answers.len()
        )));
    }

    let mut score = ScoreVector::zero();
    for question in &bank::QUESTIONS {
        let option_id = answers.get(question.id).ok_or_else(|| {
            AppError::Validation(format!("Missing answer for question '{}'", question.id))
        })?;
        apply_answer(&mut score, question, option_id)?;
    }

    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a complete answer set choosing the option at `index` for every
    /// question.
    fn uniform_answers(index: usize) -> AnswerSet {
        bank::QUESTIONS
            .iter()
            .map(|q| (q.id.to_string(), q.options[index].id.to_string()))
            .collect()
    }

    #[test]
    fn fold_conserves_every_point() {
        let answers = uniform_answers(2);
        let score = score_answers(&answers).unwrap();

        let expected: u32 = bank::QUESTIONS
            .iter()
            .map(|q| q.options[2].points.total())
            .sum();

        assert_eq!(score.total(), expected);
    }

    #[test]
    fn resolve_is_deterministic() {
        let score = score_answers(&uniform_answers(0)).unwrap();
        assert_eq!(score.resolve(), score.resolve());
    }

    #[test]
    fn tie_breaks_to_first_declared_archetype() {
        let score = ScoreVector::weights(5, 5, 2);
        assert_eq!(score.resolve(), Archetype::PeoplePleaser);
    }

    #[test]
    fn clear_winner_is_selected() {
        let score = ScoreVector::weights(3, 1, 9);
        assert_eq!(score.resolve(), Archetype::Rebel);
    }

    #[test]
    fn zero_vector_resolves_to_first_archetype() {
        assert_eq!(ScoreVector::zero().resolve(), Archetype::PeoplePleaser);
    }

    #[test]
    fn unknown_option_is_rejected() {
        let question = &bank::QUESTIONS[0];
        let mut score = ScoreVector::zero();
        let err = apply_answer(&mut score, question, "nope").unwrap_err();
        assert!(matches!(err, AppError::InvalidAnswer(_)));
        // The failed answer must not have contributed any points.
        assert_eq!(score.total(), 0);
    }

    #[test]
    fn incomplete_answer_set_is_rejected() {
        let mut answers = uniform_answers(1);
        let first = bank::QUESTIONS[0].id.to_string();
        answers.remove(&first);
        let err = score_answers(&answers).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn unknown_question_id_is_rejected() {
        let mut answers = uniform_answers(1);
        let first = bank::QUESTIONS[0].id.to_string();
        answers.remove(&first);
        answers.insert("q99".to_string(), "a".to_string());
        assert!(score_answers(&answers).is_err());
    }
}
