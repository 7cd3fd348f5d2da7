// src/models/magic_link.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Represents the 'magic_links' table in the database.
///
/// A link is single-use: `used` transitions false -> true exactly once, via
/// a conditional UPDATE so racing verifications cannot both succeed.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MagicLink {
    pub token: String,
    pub email: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub used: bool,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// Represents the 'admin_sessions' table in the database.
/// Expiry is checked lazily on each access; there is no background sweeper.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct AdminSession {
    pub token: String,
    pub email: String,
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for requesting a magic link.
#[derive(Debug, Deserialize, Validate)]
pub struct RequestMagicLinkRequest {
    #[validate(
        email(message = "A valid email address is required."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,
}

/// DTO for exchanging a magic-link token for a session.
#[derive(Debug, Deserialize, Validate)]
pub struct VerifyMagicLinkRequest {
    #[validate(length(min = 1, max = 128, message = "Token is required."))]
    pub token: String,
}
