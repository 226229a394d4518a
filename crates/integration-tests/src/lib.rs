//! Integration tests for Masala Menu.
//!
//! Provides a mock backend standing in for the server-rendered site: the
//! favorites listing/toggle endpoints and the item-detail endpoint, with
//! switchable authentication and failure behavior. Tests drive a real
//! `MenuPage` against it.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p masala-integration-tests
//! ```

use std::collections::{HashMap, HashSet};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::extract::{Path, State};
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{Value, json};

/// Shared state behind the mock backend.
#[derive(Debug)]
pub struct MockState {
    /// Whether requests are treated as authenticated.
    pub authenticated: bool,
    /// When set, toggle endpoints answer 500.
    pub fail_toggles: bool,
    /// Favorited food ids.
    pub favorites: Mutex<HashSet<i64>>,
    /// Item details served by the food endpoint.
    pub foods: Mutex<HashMap<i64, Value>>,
    /// `X-CSRFToken` values observed on state-mutating requests.
    pub seen_csrf: Mutex<Vec<Option<String>>>,
}

impl MockState {
    fn new(authenticated: bool, fail_toggles: bool) -> Arc<Self> {
        Arc::new(Self {
            authenticated,
            fail_toggles,
            favorites: Mutex::new(HashSet::new()),
            foods: Mutex::new(HashMap::new()),
            seen_csrf: Mutex::new(Vec::new()),
        })
    }
}

/// A running mock backend.
pub struct MockBackend {
    pub state: Arc<MockState>,
    addr: SocketAddr,
}

impl MockBackend {
    /// Start a mock backend for an authenticated viewer.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot bind (test environment failure).
    pub async fn start() -> Self {
        Self::start_with(MockState::new(true, false)).await
    }

    /// Start a mock backend that answers 401 to every favorites request.
    pub async fn start_unauthenticated() -> Self {
        Self::start_with(MockState::new(false, false)).await
    }

    /// Start a mock backend whose toggle endpoints fail with 500.
    pub async fn start_failing_toggles() -> Self {
        Self::start_with(MockState::new(true, true)).await
    }

    async fn start_with(state: Arc<MockState>) -> Self {
        let app = Router::new()
            .route("/api/favorites/", get(list_favorites))
            .route("/api/favorites/add/", post(add_favorite))
            .route("/api/favorites/remove/", post(remove_favorite))
            .route("/api/foods/{id}/", get(food_detail))
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock backend");
        let addr = listener.local_addr().expect("mock backend addr");

        tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self { state, addr }
    }

    /// Base URL of the running backend, with a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> String {
        format!("http://{}/", self.addr)
    }

    /// Seed one favorited item.
    pub fn seed_favorite(&self, id: i64) {
        self.state
            .favorites
            .lock()
            .expect("favorites lock")
            .insert(id);
    }

    /// Seed one item detail body.
    pub fn seed_food(&self, id: i64, detail: Value) {
        self.state
            .foods
            .lock()
            .expect("foods lock")
            .insert(id, detail);
    }

    /// CSRF header values observed on toggle requests so far.
    #[must_use]
    pub fn seen_csrf(&self) -> Vec<Option<String>> {
        self.state.seen_csrf.lock().expect("csrf lock").clone()
    }

    /// Current favorite ids, sorted.
    #[must_use]
    pub fn favorite_ids(&self) -> Vec<i64> {
        let mut ids: Vec<i64> = self
            .state
            .favorites
            .lock()
            .expect("favorites lock")
            .iter()
            .copied()
            .collect();
        ids.sort_unstable();
        ids
    }
}

/// The anti-forgery cookie the mock issues, Django-style.
const CSRF_COOKIE: &str = "csrftoken=test-csrf-token; Path=/";

async fn list_favorites(State(state): State<Arc<MockState>>) -> Response {
    if !state.authenticated {
        return (StatusCode::UNAUTHORIZED, Json(json!({"detail": "Authentication required"})))
            .into_response();
    }

    let records: Vec<Value> = state
        .favorites
        .lock()
        .expect("favorites lock")
        .iter()
        .map(|id| json!({"food": id}))
        .collect();

    (
        [(header::SET_COOKIE, CSRF_COOKIE)],
        Json(Value::Array(records)),
    )
        .into_response()
}

async fn add_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    toggle(&state, &headers, &body, true)
}

async fn remove_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    toggle(&state, &headers, &body, false)
}

fn toggle(state: &MockState, headers: &HeaderMap, body: &Value, add: bool) -> Response {
    state.seen_csrf.lock().expect("csrf lock").push(
        headers
            .get("X-CSRFToken")
            .and_then(|v| v.to_str().ok())
            .map(String::from),
    );

    if state.fail_toggles {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({"success": false, "message": "Favorites are temporarily unavailable"})),
        )
            .into_response();
    }

    let Some(food_id) = body.get("food_id").and_then(Value::as_i64) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"success": false, "message": "food_id is required"})),
        )
            .into_response();
    };

    let mut favorites = state.favorites.lock().expect("favorites lock");
    let (action, message) = if add {
        favorites.insert(food_id);
        ("added", "Added to favorites")
    } else {
        favorites.remove(&food_id);
        ("removed", "Removed from favorites")
    };

    Json(json!({
        "success": true,
        "action": action,
        "message": message,
        "favorites_count": favorites.len(),
    }))
    .into_response()
}

async fn food_detail(
    State(state): State<Arc<MockState>>,
    Path(id): Path<i64>,
) -> Response {
    let foods = state.foods.lock().expect("foods lock");
    foods.get(&id).map_or_else(
        || Json(json!({"error": "Food not found"})).into_response(),
        |detail| Json(detail.clone()).into_response(),
    )
}
