// src/quiz/mod.rs

pub mod archetype;
pub mod bank;
pub mod scoring;

pub use archetype::{Archetype, ResultProfile};
pub use scoring::{AnswerSet, ScoreVector};
