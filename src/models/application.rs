// src/models/application.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'applications' table in the database.
/// One row per mentorship application; reviewed from the admin dashboard.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Application {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub goals: String,
    pub obstacles: Option<String>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for submitting a mentorship application.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateApplicationRequest {
    #[validate(
        email(message = "A valid email address is required."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Name is required (max 100 characters)."))]
    pub name: String,

    #[validate(length(min = 1, max = 4000, message = "Goals are required (max 4000 characters)."))]
    pub goals: String,

    #[validate(length(max = 4000, message = "Obstacles must be at most 4000 characters."))]
    pub obstacles: Option<String>,
}
