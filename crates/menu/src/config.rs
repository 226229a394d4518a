//! Menu page configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `MENU_BACKEND_URL` - Base URL of the server-rendered backend
//!
//! ## Optional
//! - `MENU_STORAGE_DIR` - Directory for the durable client-side store
//!   (default: `.masala`)
//! - `MENU_CSRF_COOKIE` - Name of the anti-forgery cookie (default: `csrftoken`)
//! - `MENU_VIEWER` - Display name of the signed-in viewer. Absent means the
//!   page was rendered without a session and favorites require login.

use std::path::PathBuf;

use thiserror::Error;
use url::Url;

/// Default anti-forgery cookie name issued by the backend.
pub const DEFAULT_CSRF_COOKIE: &str = "csrftoken";

/// Default directory for the durable client-side store.
const DEFAULT_STORAGE_DIR: &str = ".masala";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Menu page configuration.
#[derive(Debug, Clone)]
pub struct MenuConfig {
    /// Base URL of the backend serving the JSON endpoints.
    pub backend_url: Url,
    /// Directory backing the durable client-side key/value store.
    pub storage_dir: PathBuf,
    /// Name of the cookie carrying the anti-forgery token.
    pub csrf_cookie: String,
    /// Signed-in viewer marker. `None` means unauthenticated.
    pub viewer: Option<String>,
}

impl MenuConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let backend_url = get_required_env("MENU_BACKEND_URL")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_BACKEND_URL".to_string(), e.to_string()))?;
        let storage_dir = PathBuf::from(get_env_or_default("MENU_STORAGE_DIR", DEFAULT_STORAGE_DIR));
        let csrf_cookie = get_env_or_default("MENU_CSRF_COOKIE", DEFAULT_CSRF_COOKIE);
        let viewer = get_optional_env("MENU_VIEWER");

        Ok(Self {
            backend_url,
            storage_dir,
            csrf_cookie,
            viewer,
        })
    }

    /// Whether the page was rendered with a signed-in viewer.
    #[must_use]
    pub const fn is_signed_in(&self) -> bool {
        self.viewer.is_some()
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
