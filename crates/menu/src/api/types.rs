//! Wire types for the backend's JSON endpoints.

use rust_decimal::Decimal;
use serde::Deserialize;

use masala_core::FoodId;

/// One record from the favorites listing endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct FavoriteRecord {
    /// Id of the favorited food item.
    pub food: FoodId,
}

/// Direction of a favorite toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteAction {
    Add,
    Remove,
}

impl FavoriteAction {
    /// Endpoint path relative to the backend base URL.
    #[must_use]
    pub const fn path(self) -> &'static str {
        match self {
            Self::Add => "api/favorites/add/",
            Self::Remove => "api/favorites/remove/",
        }
    }
}

/// What the backend reports it did to the favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToggleAction {
    Added,
    Removed,
}

/// Response body from the favorite add/remove endpoints.
///
/// Success: `{ success: true, action, message, favorites_count }`.
/// Failure: `{ success: false, message }`.
#[derive(Debug, Clone, Deserialize)]
pub struct ToggleFavoriteResponse {
    pub success: bool,
    #[serde(default)]
    pub action: Option<ToggleAction>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub favorites_count: Option<u32>,
}

/// Item detail returned by the quick-view endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ItemDetail {
    pub id: FoodId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub rating: Option<f32>,
    #[serde(default)]
    pub calories: Option<u32>,
    #[serde(default)]
    pub is_vegetarian: bool,
    #[serde(default)]
    pub is_spicy: bool,
}

/// Item detail endpoint response: either the detail or an error body.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum DetailResponse {
    Error {
        error: String,
    },
    Detail(Box<ItemDetail>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_favorites_listing_parses() {
        let body = r#"[{"food": 3}, {"food": 7}]"#;
        let records: Vec<FavoriteRecord> = serde_json::from_str(body).expect("parse");
        let ids: Vec<i64> = records.iter().map(|r| r.food.as_i64()).collect();
        assert_eq!(ids, vec![3, 7]);
    }

    #[test]
    fn test_toggle_success_parses() {
        let body = r#"{
            "success": true,
            "action": "added",
            "message": "Added to favorites",
            "favorites_count": 4
        }"#;
        let resp: ToggleFavoriteResponse = serde_json::from_str(body).expect("parse");
        assert!(resp.success);
        assert_eq!(resp.action, Some(ToggleAction::Added));
        assert_eq!(resp.favorites_count, Some(4));
    }

    #[test]
    fn test_toggle_failure_parses_without_action() {
        let body = r#"{"success": false, "message": "Login required"}"#;
        let resp: ToggleFavoriteResponse = serde_json::from_str(body).expect("parse");
        assert!(!resp.success);
        assert!(resp.action.is_none());
        assert_eq!(resp.message.as_deref(), Some("Login required"));
    }

    #[test]
    fn test_detail_response_detail_variant() {
        let body = r#"{
            "id": 5,
            "title": "Butter Chicken",
            "price": "450.00",
            "is_spicy": true
        }"#;
        let resp: DetailResponse = serde_json::from_str(body).expect("parse");
        match resp {
            DetailResponse::Detail(detail) => {
                assert_eq!(detail.id.as_i64(), 5);
                assert!(detail.is_spicy);
                assert!(!detail.is_vegetarian);
                assert!(detail.description.is_none());
            }
            DetailResponse::Error { .. } => panic!("expected detail"),
        }
    }

    #[test]
    fn test_detail_response_error_variant() {
        let body = r#"{"error": "Food not found"}"#;
        let resp: DetailResponse = serde_json::from_str(body).expect("parse");
        match resp {
            DetailResponse::Error { error } => assert_eq!(error, "Food not found"),
            DetailResponse::Detail(_) => panic!("expected error"),
        }
    }
}
