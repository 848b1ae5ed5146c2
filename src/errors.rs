//! Centralized error handling.
//!
//! Provides a unified error type for the whole storefront core. Every
//! ledger write that can fail returns `StoreResult` so callers must
//! handle failure explicitly; nothing on the public contract panics.

use thiserror::Error;

/// Storefront error types
/// SOLID - Open/Closed: Extend via new variants without modifying behavior
#[derive(Error, Debug)]
pub enum StoreError {
    // Account errors
    #[error("Email is already registered")]
    DuplicateEmail,

    #[error("You must be logged in")]
    NotAuthenticated,

    // Review errors
    #[error("You have already reviewed this product")]
    DuplicateReview,

    // Catalog errors
    #[error("Product '{0}' already exists in the catalog")]
    AlreadyExists(String),

    // Resource errors
    #[error("Resource not found")]
    NotFound,

    // Validation
    #[error("{0}")]
    Validation(String),

    // Internal
    #[error("Internal error")]
    Internal(String),
}

impl StoreError {
    /// Get user-facing message (hides internal details)
    pub fn user_message(&self) -> String {
        match self {
            StoreError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                "An internal error occurred".to_string()
            }
            _ => self.to_string(),
        }
    }
}

impl From<validator::ValidationErrors> for StoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        // Surface the first declared message; field name as fallback.
        let detail = errors
            .field_errors()
            .iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| {
                    e.message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("invalid value for {field}"))
                })
            })
            .next()
            .unwrap_or_else(|| "invalid input".to_string());
        StoreError::Validation(detail)
    }
}

/// Result type alias
pub type StoreResult<T> = Result<T, StoreError>;

/// Extension trait for Option -> StoreError conversion
pub trait OptionExt<T> {
    fn ok_or_not_found(self) -> StoreResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_not_found(self) -> StoreResult<T> {
        self.ok_or(StoreError::NotFound)
    }
}

/// Convenience constructors
impl StoreError {
    pub fn validation(msg: impl Into<String>) -> Self {
        StoreError::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        StoreError::Internal(msg.into())
    }
}
