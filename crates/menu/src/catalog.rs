//! Category and free-text filtering of the rendered menu cards.
//!
//! The catalog is a view-layer projection over statically rendered item
//! cards: filtering only toggles per-card visibility and the "no results"
//! placeholder. Filter state is transient and resets with the page.

use rust_decimal::Decimal;

use masala_core::FoodId;

use crate::cart::{MAX_QUANTITY, MIN_QUANTITY};

/// Category slug that matches every card.
pub const ALL_CATEGORIES: &str = "all";

/// One item card as rendered into the page. Read-only to this layer apart
/// from its visibility and the pending stepper quantity.
#[derive(Debug, Clone)]
pub struct CatalogCard {
    pub id: FoodId,
    pub category: String,
    pub title: String,
    pub description: String,
    pub price: Decimal,
    /// Whether the card is currently shown.
    pub visible: bool,
    /// Quantity selected on the card's stepper, applied on add-to-cart.
    pub pending_quantity: u32,
}

impl CatalogCard {
    /// Create a card from pre-rendered item data. Cards start visible with
    /// a stepper quantity of 1.
    #[must_use]
    pub fn new(
        id: FoodId,
        category: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        price: Decimal,
    ) -> Self {
        Self {
            id,
            category: category.into(),
            title: title.into(),
            description: description.into(),
            price,
            visible: true,
            pending_quantity: MIN_QUANTITY,
        }
    }
}

/// One category button with its active highlight.
#[derive(Debug, Clone)]
pub struct CategoryButton {
    pub slug: String,
    pub active: bool,
}

/// The filterable catalog: cards, category buttons, and filter state.
#[derive(Debug)]
pub struct Catalog {
    cards: Vec<CatalogCard>,
    categories: Vec<CategoryButton>,
    active_category: String,
    search_term: String,
    no_results: bool,
}

impl Catalog {
    /// Build the catalog from rendered cards and the category button row.
    /// The "all" button leads the row and starts active.
    #[must_use]
    pub fn new(cards: Vec<CatalogCard>, category_slugs: &[&str]) -> Self {
        let mut categories = vec![CategoryButton {
            slug: ALL_CATEGORIES.to_string(),
            active: true,
        }];
        categories.extend(category_slugs.iter().map(|slug| CategoryButton {
            slug: (*slug).to_string(),
            active: false,
        }));

        let mut catalog = Self {
            cards,
            categories,
            active_category: ALL_CATEGORIES.to_string(),
            search_term: String::new(),
            no_results: false,
        };
        catalog.apply();
        catalog
    }

    /// Handle a category button click: move the active highlight and
    /// recompute visibility.
    pub fn select_category(&mut self, slug: &str) {
        self.active_category = slug.to_string();
        for button in &mut self.categories {
            button.active = button.slug == slug;
        }
        self.apply();
    }

    /// Handle a search keystroke or submit: store the term and recompute
    /// visibility. Recomputed on every call - no debouncing.
    pub fn search(&mut self, term: &str) {
        self.search_term = term.to_string();
        self.apply();
    }

    /// Recompute per-card visibility from the current filter state.
    ///
    /// A card is visible iff the category matches (or "all" is active) AND
    /// the trimmed term is empty or appears case-insensitively in the title
    /// or description.
    fn apply(&mut self) {
        let term = self.search_term.trim().to_lowercase();
        let mut visible = 0usize;

        for card in &mut self.cards {
            let category_ok = self.active_category == ALL_CATEGORIES
                || card.category == self.active_category;
            let term_ok = term.is_empty()
                || card.title.to_lowercase().contains(&term)
                || card.description.to_lowercase().contains(&term);

            card.visible = category_ok && term_ok;
            if card.visible {
                visible += 1;
            }
        }

        self.no_results = visible == 0;
    }

    /// Step a card's pending stepper quantity, clamped into bounds.
    pub fn step_quantity(&mut self, id: FoodId, delta: i32) {
        let Some(card) = self.cards.iter_mut().find(|card| card.id == id) else {
            return;
        };
        let stepped = i64::from(card.pending_quantity) + i64::from(delta);
        card.pending_quantity = u32::try_from(stepped.clamp(
            i64::from(MIN_QUANTITY),
            i64::from(MAX_QUANTITY),
        ))
        .unwrap_or(MIN_QUANTITY);
    }

    /// Reset a card's stepper back to 1 (after an add-to-cart).
    pub fn reset_quantity(&mut self, id: FoodId) {
        if let Some(card) = self.cards.iter_mut().find(|card| card.id == id) {
            card.pending_quantity = MIN_QUANTITY;
        }
    }

    /// Look up a card by id.
    #[must_use]
    pub fn card(&self, id: FoodId) -> Option<&CatalogCard> {
        self.cards.iter().find(|card| card.id == id)
    }

    /// All cards in render order.
    #[must_use]
    pub fn cards(&self) -> &[CatalogCard] {
        &self.cards
    }

    /// Currently visible cards in render order.
    pub fn visible(&self) -> impl Iterator<Item = &CatalogCard> {
        self.cards.iter().filter(|card| card.visible)
    }

    /// Category buttons with their active flags.
    #[must_use]
    pub fn categories(&self) -> &[CategoryButton] {
        &self.categories
    }

    /// Whether the "no results" placeholder should be shown.
    #[must_use]
    pub const fn no_results(&self) -> bool {
        self.no_results
    }

    /// The active category slug.
    #[must_use]
    pub fn active_category(&self) -> &str {
        &self.active_category
    }

    /// The current search term, as typed.
    #[must_use]
    pub fn search_term(&self) -> &str {
        &self.search_term
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn sample() -> Catalog {
        Catalog::new(
            vec![
                CatalogCard::new(
                    FoodId::new(1),
                    "pizza",
                    "Margherita Pizza",
                    "Classic tomato and basil",
                    dec("10.00"),
                ),
                CatalogCard::new(
                    FoodId::new(2),
                    "momo",
                    "Steamed Momo",
                    "Chicken dumplings with achar",
                    dec("4.50"),
                ),
                CatalogCard::new(
                    FoodId::new(3),
                    "pizza",
                    "Tandoori Pizza",
                    "Spicy paneer topping",
                    dec("11.00"),
                ),
            ],
            &["pizza", "momo"],
        )
    }

    fn visible_ids(catalog: &Catalog) -> Vec<i64> {
        catalog.visible().map(|card| card.id.as_i64()).collect()
    }

    #[test]
    fn test_everything_visible_by_default() {
        let catalog = sample();
        assert_eq!(visible_ids(&catalog), vec![1, 2, 3]);
        assert!(!catalog.no_results());
        assert_eq!(catalog.active_category(), ALL_CATEGORIES);
    }

    #[test]
    fn test_category_filter() {
        let mut catalog = sample();
        catalog.select_category("pizza");
        assert_eq!(visible_ids(&catalog), vec![1, 3]);

        catalog.select_category(ALL_CATEGORIES);
        assert_eq!(visible_ids(&catalog), vec![1, 2, 3]);
    }

    #[test]
    fn test_category_buttons_track_active() {
        let mut catalog = sample();
        catalog.select_category("momo");

        let active: Vec<&str> = catalog
            .categories()
            .iter()
            .filter(|b| b.active)
            .map(|b| b.slug.as_str())
            .collect();
        assert_eq!(active, vec!["momo"]);
    }

    #[test]
    fn test_search_matches_title_and_description() {
        let mut catalog = sample();

        catalog.search("PIZZA");
        assert_eq!(visible_ids(&catalog), vec![1, 3], "title match, any case");

        catalog.search("dumplings");
        assert_eq!(visible_ids(&catalog), vec![2], "description match");

        catalog.search("  basil  ");
        assert_eq!(visible_ids(&catalog), vec![1], "term is trimmed");
    }

    #[test]
    fn test_category_and_search_combine_with_and() {
        let mut catalog = sample();
        catalog.select_category("pizza");
        catalog.search("spicy");
        assert_eq!(visible_ids(&catalog), vec![3]);

        // Matching term in the wrong category stays hidden.
        catalog.search("dumplings");
        assert_eq!(visible_ids(&catalog), Vec::<i64>::new());
        assert!(catalog.no_results());
    }

    #[test]
    fn test_no_results_clears_when_term_relaxes() {
        let mut catalog = sample();
        catalog.search("no such dish");
        assert!(catalog.no_results());

        catalog.search("");
        assert!(!catalog.no_results());
    }

    #[test]
    fn test_stepper_clamps() {
        let mut catalog = sample();
        let id = FoodId::new(1);

        catalog.step_quantity(id, -1);
        assert_eq!(catalog.card(id).expect("card").pending_quantity, 1);

        for _ in 0..60 {
            catalog.step_quantity(id, 1);
        }
        assert_eq!(catalog.card(id).expect("card").pending_quantity, 50);

        catalog.reset_quantity(id);
        assert_eq!(catalog.card(id).expect("card").pending_quantity, 1);

        // Unknown card is a no-op.
        catalog.step_quantity(FoodId::new(99), 1);
    }
}
