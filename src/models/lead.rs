// src/models/lead.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::HashMap;
use validator::Validate;

use crate::quiz::Archetype;

/// Source tag recorded for leads coming through the meditation download gate.
pub const MEDITATION_SOURCE: &str = "meditation_download";

/// Represents the 'leads' table in the database.
/// Created once at submission; never mutated by this service.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Lead {
    pub id: i64,

    pub email: String,

    pub name: Option<String>,

    /// Free-text tag describing the entry funnel (e.g. "quiz_rebel",
    /// "meditation_download").
    pub source: String,

    /// Resolved archetype key; present only for quiz-sourced leads.
    pub archetype: Option<String>,

    /// Raw answer set as submitted; present only for quiz-sourced leads.
    pub quiz_answers: Option<serde_json::Value>,

    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for capturing a lead from any funnel.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateLeadRequest {
    #[validate(
        email(message = "A valid email address is required."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,

    #[validate(length(max = 100, message = "Name must be at most 100 characters."))]
    pub name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Source is required."))]
    pub source: String,

    /// Pre-resolved archetype, for funnels that score client-side.
    pub quiz_result: Option<Archetype>,

    pub quiz_answers: Option<HashMap<String, String>>,
}
