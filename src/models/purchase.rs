// src/models/purchase.rs

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Canonical product key used when gating masterclass video access.
pub const MASTERCLASS_PRODUCT: &str = "masterclass";

/// Represents the 'purchases' table in the database.
///
/// Rows are written by the payment flow (out of scope here) or granted
/// manually from the admin dashboard; this service mostly just reads them
/// by email to gate access.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Purchase {
    pub id: i64,
    pub email: String,
    pub product: String,
    pub created_at: Option<chrono::DateTime<chrono::Utc>>,
}

/// DTO for manually granting a purchase from the admin dashboard.
#[derive(Debug, Deserialize, Validate)]
pub struct CreatePurchaseRequest {
    #[validate(
        email(message = "A valid email address is required."),
        length(max = 255, message = "Email must be at most 255 characters.")
    )]
    pub email: String,

    #[validate(length(min = 1, max = 100, message = "Product is required."))]
    pub product: String,
}
