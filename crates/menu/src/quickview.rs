//! Quick-view modal.
//!
//! Shows expanded details for one catalog item without leaving the listing
//! page. The modal model is built from an item-detail fetch; missing fields
//! fall back the same way the rendered page does.

use masala_core::{Currency, FoodId, Price};

use crate::api::types::ItemDetail;
use crate::api::{ApiClient, ApiError};
use crate::cart::{MAX_QUANTITY, MIN_QUANTITY};

/// Inline SVG shown when an item has no image.
pub const PLACEHOLDER_IMAGE: &str = "data:image/svg+xml;base64,PHN2ZyB3aWR0aD0iNDAwIiBoZWlnaHQ9IjQwMCIgdmlld0JveD0iMCAwIDQwMCA0MDAiIGZpbGw9Im5vbmUiIHhtbG5zPSJodHRwOi8vd3d3LnczLm9yZy8yMDAwL3N2ZyI+CjxyZWN0IHdpZHRoPSI0MDAiIGhlaWdodD0iNDAwIiBmaWxsPSIjRjhGOUZBIi8+CjxwYXRoIGQ9Ik0xNjAgMTgwSDI0MFYyMjBIMTYwVjE4MFoiIGZpbGw9IiNERUUyRTYiLz4KPHBhdGggZD0iTTE4MCAyMDBIMjIwVjI0MEgxODBWMjAwWiIgZmlsbD0iI0RFRTJFNiIvPgo8dGV4dCB4PSIyMDAiIHk9IjI4MCIgdGV4dC1hbmNob3I9Im1pZGRsZSIgZmlsbD0iIzZCNzI4MCIgZm9udC1mYW1pbHk9IkFyaWFsLCBzYW5zLXNlcmlmIiBmb250LXNpemU9IjE2Ij5ObyBJbWFnZTwvdGV4dD4KPC9zdmc+";

/// Fallback description when the item has none.
const NO_DESCRIPTION: &str = "No description available";

/// Fallback category label.
const UNCATEGORIZED: &str = "Uncategorized";

/// Fallback rating shown when the item has none.
const DEFAULT_RATING: &str = "4.5";

/// Dietary badges shown under the description.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DietaryBadges {
    pub vegetarian: bool,
    pub spicy: bool,
}

/// Display data for the quick-view modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickViewModal {
    pub id: FoodId,
    pub title: String,
    pub description: String,
    pub price: String,
    pub image: String,
    pub category: String,
    pub rating: String,
    pub calories: Option<String>,
    pub dietary: DietaryBadges,
    /// Stepper value inside the modal; resets to 1 on open.
    pub quantity: u32,
    pub favorited: bool,
}

impl QuickViewModal {
    /// Build the modal from fetched detail, applying display fallbacks.
    #[must_use]
    pub fn from_detail(detail: ItemDetail, favorited: bool) -> Self {
        Self {
            id: detail.id,
            title: detail.title,
            description: detail
                .description
                .filter(|d| !d.trim().is_empty())
                .unwrap_or_else(|| NO_DESCRIPTION.to_string()),
            price: Price::new(detail.price, Currency::Npr).to_string(),
            image: detail
                .image
                .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            category: detail
                .category
                .unwrap_or_else(|| UNCATEGORIZED.to_string()),
            rating: detail
                .rating
                .map_or_else(|| DEFAULT_RATING.to_string(), |r| format!("{r}")),
            calories: detail.calories.map(|c| format!("{c} cal")),
            dietary: DietaryBadges {
                vegetarian: detail.is_vegetarian,
                spicy: detail.is_spicy,
            },
            quantity: MIN_QUANTITY,
            favorited,
        }
    }

    /// Step the modal quantity, clamped into `[1, 50]`.
    pub fn step_quantity(&mut self, delta: i32) {
        let stepped = i64::from(self.quantity) + i64::from(delta);
        self.quantity = u32::try_from(stepped.clamp(
            i64::from(MIN_QUANTITY),
            i64::from(MAX_QUANTITY),
        ))
        .unwrap_or(MIN_QUANTITY);
    }
}

/// The quick-view component: at most one open modal.
#[derive(Debug, Default)]
pub struct QuickView {
    modal: Option<QuickViewModal>,
}

impl QuickView {
    /// Create the component with no modal open.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch item detail and open the modal.
    ///
    /// # Errors
    ///
    /// Returns `ApiError` when the fetch fails; no modal opens and any
    /// previously open modal is left as it was.
    pub async fn open(
        &mut self,
        api: &ApiClient,
        id: FoodId,
        favorited: bool,
    ) -> Result<(), ApiError> {
        let detail = api.food_detail(id).await?;
        self.modal = Some(QuickViewModal::from_detail(detail, favorited));
        Ok(())
    }

    /// Dismiss the modal.
    pub fn close(&mut self) {
        self.modal = None;
    }

    /// The open modal, if any.
    #[must_use]
    pub const fn modal(&self) -> Option<&QuickViewModal> {
        self.modal.as_ref()
    }

    /// Mutable access for in-modal controls.
    pub fn modal_mut(&mut self) -> Option<&mut QuickViewModal> {
        self.modal.as_mut()
    }
}
