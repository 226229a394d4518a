//! Backend API client.
//!
//! Thin JSON client over the server-rendered backend's endpoints. State-
//! mutating requests carry the anti-forgery token read from the `csrftoken`
//! cookie in the client's jar, plus the `X-Requested-With` marker the
//! backend uses to recognize asynchronous calls. Item-detail reads are
//! cached for 5 minutes.

pub mod types;

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::cookie::{CookieStore, Jar};
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::instrument;
use url::Url;

use masala_core::FoodId;

use crate::config::MenuConfig;
use types::{DetailResponse, FavoriteAction, FavoriteRecord, ItemDetail, ToggleFavoriteResponse};

/// Favorites listing endpoint, relative to the backend base URL.
const FAVORITES_PATH: &str = "api/favorites/";

/// Header carrying the anti-forgery token.
const CSRF_HEADER: &str = "X-CSRFToken";

/// Marker header the backend uses to recognize asynchronous requests.
const REQUESTED_WITH: (&str, &str) = ("X-Requested-With", "XMLHttpRequest");

/// Item-detail cache time to live.
const DETAIL_CACHE_TTL: Duration = Duration::from_secs(300);

/// Errors that can occur when calling the backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Backend answered with a non-success status.
    #[error("backend returned {0}")]
    Status(reqwest::StatusCode),

    /// Backend rejected the request with a message.
    #[error("rejected: {0}")]
    Rejected(String),

    /// Requested item does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// Endpoint URL could not be built.
    #[error("invalid endpoint URL: {0}")]
    Url(#[from] url::ParseError),
}

/// Client for the backend's JSON endpoints.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base_url: Url,
    jar: Arc<Jar>,
    csrf_cookie: String,
    detail_cache: Cache<FoodId, ItemDetail>,
}

impl ApiClient {
    /// Create a new client for the configured backend.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::Http` if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: &MenuConfig) -> Result<Self, ApiError> {
        let jar = Arc::new(Jar::default());
        let http = reqwest::Client::builder()
            .cookie_provider(jar.clone())
            .build()?;

        let detail_cache = Cache::builder()
            .max_capacity(500)
            .time_to_live(DETAIL_CACHE_TTL)
            .build();

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                http,
                base_url: config.backend_url.clone(),
                jar,
                csrf_cookie: config.csrf_cookie.clone(),
                detail_cache,
            }),
        })
    }

    /// Fetch the viewer's current favorites.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a non-2xx status (e.g. the
    /// viewer is not authenticated), or a malformed body. Callers treat any
    /// error as "no favorites".
    #[instrument(skip(self))]
    pub async fn fetch_favorites(&self) -> Result<Vec<FavoriteRecord>, ApiError> {
        let url = self.inner.base_url.join(FAVORITES_PATH)?;
        let response = self
            .inner
            .http
            .get(url)
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(body = %truncate(&body), "Malformed favorites listing");
            ApiError::Parse(e)
        })
    }

    /// Add or remove a favorite.
    ///
    /// The response is returned as-is; a `success: false` body is not an
    /// error at this layer.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure, a rejected request, or a
    /// malformed body.
    #[instrument(skip(self))]
    pub async fn toggle_favorite(
        &self,
        id: FoodId,
        action: FavoriteAction,
    ) -> Result<ToggleFavoriteResponse, ApiError> {
        let url = self.inner.base_url.join(action.path())?;

        let mut request = self
            .inner
            .http
            .post(url)
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .json(&serde_json::json!({ "food_id": id }));

        if let Some(token) = self.csrf_token() {
            request = request.header(CSRF_HEADER, token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            // Failure bodies still carry a message worth surfacing.
            if let Ok(rejected) = serde_json::from_str::<ToggleFavoriteResponse>(&body)
                && let Some(message) = rejected.message
            {
                return Err(ApiError::Rejected(message));
            }
            return Err(ApiError::Status(status));
        }

        serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(body = %truncate(&body), "Malformed toggle response");
            ApiError::Parse(e)
        })
    }

    /// Fetch detail for one item, for the quick-view modal.
    ///
    /// Successful responses are cached for 5 minutes.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::NotFound` when the backend reports an error body
    /// or a 404, and other `ApiError` variants for transport and parse
    /// failures.
    #[instrument(skip(self))]
    pub async fn food_detail(&self, id: FoodId) -> Result<ItemDetail, ApiError> {
        if let Some(detail) = self.inner.detail_cache.get(&id).await {
            return Ok(detail);
        }

        let url = self.inner.base_url.join(&format!("api/foods/{id}/"))?;
        let response = self
            .inner
            .http
            .get(url)
            .header(REQUESTED_WITH.0, REQUESTED_WITH.1)
            .send()
            .await?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(format!("food {id}")));
        }
        if !status.is_success() {
            return Err(ApiError::Status(status));
        }

        let body = response.text().await?;
        let parsed: DetailResponse = serde_json::from_str(&body).map_err(|e| {
            tracing::debug!(body = %truncate(&body), "Malformed item detail");
            ApiError::Parse(e)
        })?;

        match parsed {
            DetailResponse::Detail(detail) => {
                let detail = *detail;
                self.inner.detail_cache.insert(id, detail.clone()).await;
                Ok(detail)
            }
            DetailResponse::Error { error } => Err(ApiError::NotFound(error)),
        }
    }

    /// Read the anti-forgery token from the cookie jar, if the backend has
    /// issued one.
    #[must_use]
    pub fn csrf_token(&self) -> Option<SecretString> {
        let header = self.inner.jar.cookies(&self.inner.base_url)?;
        let raw = header.to_str().ok()?;

        raw.split(';').map(str::trim).find_map(|pair| {
            let (name, value) = pair.split_once('=')?;
            (name == self.inner.csrf_cookie).then(|| SecretString::from(value.to_string()))
        })
    }

    /// Base URL this client talks to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.inner.base_url
    }
}

/// Cap logged response bodies at a diagnosable size.
fn truncate(body: &str) -> String {
    body.chars().take(200).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn client_for(base: &str) -> ApiClient {
        let config = MenuConfig {
            backend_url: base.parse().expect("valid url"),
            storage_dir: PathBuf::from(".masala"),
            csrf_cookie: "csrftoken".to_string(),
            viewer: None,
        };
        ApiClient::new(&config).expect("client")
    }

    #[test]
    fn test_csrf_token_absent_without_cookie() {
        let client = client_for("http://localhost:8000/");
        assert!(client.csrf_token().is_none());
    }

    #[test]
    fn test_csrf_token_read_from_jar() {
        let client = client_for("http://localhost:8000/");
        let url = client.base_url().clone();
        client
            .inner
            .jar
            .add_cookie_str("csrftoken=tok-123; Path=/", &url);
        client.inner.jar.add_cookie_str("session=abc; Path=/", &url);

        let token = client.csrf_token().expect("token present");
        assert_eq!(token.expose_secret(), "tok-123");
    }

    #[test]
    fn test_favorite_action_paths() {
        assert_eq!(FavoriteAction::Add.path(), "api/favorites/add/");
        assert_eq!(FavoriteAction::Remove.path(), "api/favorites/remove/");
    }
}
