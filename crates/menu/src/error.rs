//! Unified error handling for the menu page.
//!
//! Provides a `PageError` type covering every seam the page touches. Nothing
//! here is fatal: the page dispatcher absorbs these into toasts and keeps the
//! page interactive. Handlers below the dispatcher return `Result<T, PageError>`.

use thiserror::Error;

use crate::api::ApiError;
use crate::cart::storage::StorageError;

/// Application-level error type for the menu page.
#[derive(Debug, Error)]
pub enum PageError {
    /// Durable client-side storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Backend API request failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// The viewer must be signed in for this action.
    #[error("Authentication required")]
    AuthRequired,

    /// Referenced item does not exist on this page.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Result type alias for `PageError`.
pub type Result<T> = std::result::Result<T, PageError>;
