//! Borrower model and related types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Borrower (library member) record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Borrower {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub membership_date: NaiveDate,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Create borrower request
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateBorrower {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, message = "Phone number is required"))]
    pub phone_number: String,
    /// Defaults to today
    pub membership_date: Option<NaiveDate>,
    pub created_at: Option<DateTime<Utc>>,
}
