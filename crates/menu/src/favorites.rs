//! Favorites sync.
//!
//! Mirrors the viewer's server-side favorite set into button state and a
//! count badge. The mirror is best-effort and never authoritative: it is
//! painted from a fetch on page init and flipped only after the backend
//! confirms a toggle.

use std::collections::HashSet;

use tracing::instrument;

use masala_core::FoodId;

use crate::api::types::{FavoriteAction, ToggleAction};
use crate::api::{ApiClient, ApiError};

/// One favorite button as rendered next to a card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FavoriteButton {
    pub id: FoodId,
    /// Solid icon plus `favorited` class when set.
    pub favorited: bool,
}

/// Outcome of a toggle request, for the page to turn into feedback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToggleOutcome {
    /// Backend confirmed the toggle.
    Toggled {
        action: ToggleAction,
        message: Option<String>,
    },
    /// Backend answered but declined (`success: false`).
    Rejected { message: Option<String> },
    /// No signed-in viewer; no request was made.
    LoginRequired,
}

/// The favorites component: server mirror, buttons, and badge.
#[derive(Debug)]
pub struct FavoritesSync {
    mirror: HashSet<FoodId>,
    buttons: Vec<FavoriteButton>,
    badge: u32,
    signed_in: bool,
}

impl FavoritesSync {
    /// Build the component for the buttons rendered into the page.
    #[must_use]
    pub fn new(button_ids: &[FoodId], signed_in: bool) -> Self {
        Self {
            mirror: HashSet::new(),
            buttons: button_ids
                .iter()
                .map(|&id| FavoriteButton {
                    id,
                    favorited: false,
                })
                .collect(),
            badge: 0,
            signed_in,
        }
    }

    /// Fetch the viewer's favorites and repaint buttons and badge.
    ///
    /// Any failure (unauthenticated, transport, malformed body) leaves the
    /// set empty and the badge at 0 without surfacing an error.
    #[instrument(skip(self, api))]
    pub async fn refresh(&mut self, api: &ApiClient) {
        match api.fetch_favorites().await {
            Ok(records) => {
                self.mirror = records.into_iter().map(|record| record.food).collect();
                self.badge = u32::try_from(self.mirror.len()).unwrap_or(u32::MAX);
            }
            Err(e) => {
                tracing::debug!("Favorites unavailable, treating as empty: {e}");
                self.mirror.clear();
                self.badge = 0;
            }
        }
        self.paint();
    }

    /// Toggle one item's favorite state via the backend.
    ///
    /// No optimistic update: local state flips only after the backend
    /// confirms. On failure the mirror and buttons are left unchanged.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` on transport failure or a rejected request; the
    /// caller surfaces it to the viewer.
    #[instrument(skip(self, api))]
    pub async fn toggle(
        &mut self,
        api: &ApiClient,
        id: FoodId,
    ) -> Result<ToggleOutcome, ApiError> {
        if !self.signed_in {
            return Ok(ToggleOutcome::LoginRequired);
        }

        let action = if self.mirror.contains(&id) {
            FavoriteAction::Remove
        } else {
            FavoriteAction::Add
        };

        let response = api.toggle_favorite(id, action).await?;
        if !response.success {
            return Ok(ToggleOutcome::Rejected {
                message: response.message,
            });
        }

        // Bodies missing `action` are treated as confirming the request.
        let confirmed = response.action.unwrap_or(match action {
            FavoriteAction::Add => ToggleAction::Added,
            FavoriteAction::Remove => ToggleAction::Removed,
        });

        match confirmed {
            ToggleAction::Added => {
                self.mirror.insert(id);
            }
            ToggleAction::Removed => {
                self.mirror.remove(&id);
            }
        }

        self.badge = response
            .favorites_count
            .unwrap_or_else(|| u32::try_from(self.mirror.len()).unwrap_or(u32::MAX));
        self.paint();

        Ok(ToggleOutcome::Toggled {
            action: confirmed,
            message: response.message,
        })
    }

    /// Repaint every button from the mirror.
    fn paint(&mut self) {
        for button in &mut self.buttons {
            button.favorited = self.mirror.contains(&button.id);
        }
    }

    /// Whether the given item is currently favorited.
    #[must_use]
    pub fn is_favorited(&self, id: FoodId) -> bool {
        self.mirror.contains(&id)
    }

    /// The favorites count badge.
    #[must_use]
    pub const fn badge(&self) -> u32 {
        self.badge
    }

    /// Buttons with their painted state.
    #[must_use]
    pub fn buttons(&self) -> &[FavoriteButton] {
        &self.buttons
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_starts_unfavorited() {
        let sync = FavoritesSync::new(&[FoodId::new(1), FoodId::new(2)], true);
        assert_eq!(sync.badge(), 0);
        assert!(sync.buttons().iter().all(|b| !b.favorited));
        assert!(!sync.is_favorited(FoodId::new(1)));
    }

    #[tokio::test]
    async fn test_toggle_without_viewer_makes_no_request() {
        // Client pointed at an unroutable port; a request here would error,
        // so reaching LoginRequired proves none was made.
        let config = crate::config::MenuConfig {
            backend_url: "http://127.0.0.1:1/".parse().expect("url"),
            storage_dir: std::path::PathBuf::from(".masala"),
            csrf_cookie: "csrftoken".to_string(),
            viewer: None,
        };
        let api = ApiClient::new(&config).expect("client");

        let mut sync = FavoritesSync::new(&[FoodId::new(1)], false);
        let outcome = sync.toggle(&api, FoodId::new(1)).await.expect("outcome");
        assert_eq!(outcome, ToggleOutcome::LoginRequired);
        assert!(!sync.is_favorited(FoodId::new(1)));
    }
}
