//! Form payloads and the string coercions shared by every form handler
//!
//! HTML forms submit everything as text. Each form struct keeps the raw
//! strings and converts into the matching `Create*` model in one place.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::{CreateAuthor, CreateBook, CreateBorrower, CreateTransaction, TransactionType},
};

/// Treat blank form fields as absent
pub fn non_empty(value: Option<String>) -> Option<String> {
    value.and_then(|v| {
        let trimmed = v.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

pub fn parse_id(field: &str, value: &str) -> AppResult<Uuid> {
    Uuid::parse_str(value.trim())
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", field, value)))
}

/// Parse a `YYYY-MM-DD` calendar date
pub fn parse_date(field: &str, value: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: {}", field, value)))
}

/// Parse a timestamp: RFC 3339, `datetime-local` input (read as UTC) or a
/// bare date (midnight UTC)
pub fn parse_timestamp(field: &str, value: &str) -> AppResult<DateTime<Utc>> {
    let value = value.trim();

    if let Ok(ts) = DateTime::parse_from_rfc3339(value) {
        return Ok(ts.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ts) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(ts.and_utc());
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        if let Some(ts) = date.and_hms_opt(0, 0, 0) {
            return Ok(ts.and_utc());
        }
    }

    Err(AppError::BadRequest(format!("Invalid {}: {}", field, value)))
}

fn optional<T>(
    field: &str,
    value: Option<String>,
    parse: impl Fn(&str, &str) -> AppResult<T>,
) -> AppResult<Option<T>> {
    non_empty(value).map(|v| parse(field, &v)).transpose()
}

#[derive(Debug, Deserialize)]
pub struct AuthorForm {
    pub name: String,
    pub email: String,
    pub date_of_birth: String,
    pub created_at: Option<String>,
}

impl TryFrom<AuthorForm> for CreateAuthor {
    type Error = AppError;

    fn try_from(form: AuthorForm) -> AppResult<Self> {
        Ok(CreateAuthor {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            date_of_birth: parse_date("date_of_birth", &form.date_of_birth)?,
            created_at: optional("created_at", form.created_at, parse_timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BookForm {
    pub title: String,
    pub author_id: String,
    pub published_date: String,
    pub isbn: String,
    pub quantity: i32,
    pub available_copies: i32,
    pub created_at: Option<String>,
}

impl TryFrom<BookForm> for CreateBook {
    type Error = AppError;

    fn try_from(form: BookForm) -> AppResult<Self> {
        Ok(CreateBook {
            title: form.title.trim().to_string(),
            author_id: parse_id("author_id", &form.author_id)?,
            published_date: parse_date("published_date", &form.published_date)?,
            isbn: form.isbn.trim().to_string(),
            quantity: form.quantity,
            available_copies: form.available_copies,
            created_at: optional("created_at", form.created_at, parse_timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct BorrowerForm {
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub membership_date: Option<String>,
    pub created_at: Option<String>,
}

impl TryFrom<BorrowerForm> for CreateBorrower {
    type Error = AppError;

    fn try_from(form: BorrowerForm) -> AppResult<Self> {
        Ok(CreateBorrower {
            name: form.name.trim().to_string(),
            email: form.email.trim().to_string(),
            phone_number: form.phone_number.trim().to_string(),
            membership_date: optional("membership_date", form.membership_date, parse_date)?,
            created_at: optional("created_at", form.created_at, parse_timestamp)?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct TransactionForm {
    pub book_id: String,
    pub borrower_id: String,
    pub transaction_type: Option<String>,
    pub transaction_date: Option<String>,
    pub due_date: String,
    pub return_date: Option<String>,
}

impl TryFrom<TransactionForm> for CreateTransaction {
    type Error = AppError;

    fn try_from(form: TransactionForm) -> AppResult<Self> {
        let transaction_type = match non_empty(form.transaction_type) {
            Some(value) => value.parse::<TransactionType>().map_err(AppError::BadRequest)?,
            None => TransactionType::default(),
        };

        Ok(CreateTransaction {
            book_id: parse_id("book_id", &form.book_id)?,
            borrower_id: parse_id("borrower_id", &form.borrower_id)?,
            transaction_type,
            transaction_date: optional("transaction_date", form.transaction_date, parse_timestamp)?,
            due_date: parse_date("due_date", &form.due_date)?,
            return_date: optional("return_date", form.return_date, parse_timestamp)?,
        })
    }
}
