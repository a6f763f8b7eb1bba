//! Domain Layer - Core Entity Trait
//!
//! Every persisted portal record has a numeric id and is shared across
//! request tasks.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Core trait for all domain entities
pub trait Entity: Sized + Send + Sync + Clone {
    /// The type of the entity's unique identifier
    type Id: Copy + Eq + std::hash::Hash + Send + Sync;

    fn id(&self) -> Self::Id;
}

/// Common result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Domain-level errors
#[derive(Debug, Clone, Error, Serialize, Deserialize)]
pub enum DomainError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Conflict: {0}")]
    Conflict(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// The message without the category prefix, as shown to API clients.
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::InvalidInput(msg)
            | DomainError::Conflict(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}

impl From<rusqlite::Error> for DomainError {
    fn from(e: rusqlite::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::Internal(e.to_string())
    }
}

/// Current time in the RFC 3339 form stored in `created_at`/`updated_at`.
pub fn timestamp_now() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

/// Precondition for optimistic concurrency: when the caller names the
/// `updated_at` it last saw, the stored value must still match.
pub fn check_version(expected: Option<&str>, stored: Option<&str>) -> DomainResult<()> {
    match expected {
        Some(expected) if Some(expected) != stored => Err(DomainError::Conflict(
            "Record was modified by someone else; reload and try again".to_string(),
        )),
        _ => Ok(()),
    }
}

/// Rejects blank required text fields.
pub fn require_text(field: &str, value: &str) -> DomainResult<()> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Accepts `YYYY-MM-DD` calendar dates only.
pub fn require_date(field: &str, value: &str) -> DomainResult<()> {
    chrono::NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| DomainError::InvalidInput(format!("{} must be a YYYY-MM-DD date", field)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_check_version() {
        assert!(check_version(None, Some("a")).is_ok());
        assert!(check_version(Some("a"), Some("a")).is_ok());
        assert!(matches!(check_version(Some("a"), Some("b")), Err(DomainError::Conflict(_))));
        assert!(matches!(check_version(Some("a"), None), Err(DomainError::Conflict(_))));
    }

    #[test]
    fn test_require_date() {
        assert!(require_date("target_date", "2026-02-01").is_ok());
        assert!(require_date("target_date", "02/01/2026").is_err());
        assert!(require_date("target_date", "").is_err());
    }

    #[test]
    fn test_message_strips_category() {
        let err = DomainError::NotFound("Meeting not found".to_string());
        assert_eq!(err.message(), "Meeting not found");
        assert_eq!(err.to_string(), "Not found: Meeting not found");
    }
}
