//! Cart panel and badge view binder.
//!
//! Pure projection of [`CartStore`](super::CartStore) state into display
//! data. The page re-renders the panel after every cart mutation; the binder
//! holds no state of its own.

use rust_decimal::Decimal;

use masala_core::{Currency, FoodId, Price};

use super::{CartLine, CartStore};

/// Cart line display data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartLineView {
    pub id: FoodId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
}

/// Cart panel display data: the dropdown list plus the count badge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartPanelView {
    pub items: Vec<CartLineView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartPanelView {
    /// Create an empty panel.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: format_price(Decimal::ZERO),
            item_count: 0,
        }
    }

    /// Project the current store state into display data.
    #[must_use]
    pub fn render(store: &CartStore) -> Self {
        Self {
            items: store.lines().iter().map(CartLineView::from).collect(),
            subtotal: format_price(store.total()),
            item_count: store.count(),
        }
    }

    /// Whether the panel should show the empty-cart placeholder.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl From<&CartLine> for CartLineView {
    fn from(line: &CartLine) -> Self {
        Self {
            id: line.id,
            name: line.name.clone(),
            quantity: line.quantity,
            price: format_price(line.unit_price),
            line_price: format_price(line.line_total()),
        }
    }
}

/// Format an amount as a menu price string.
fn format_price(amount: Decimal) -> String {
    Price::new(amount, Currency::Npr).to_string()
}

#[cfg(test)]
mod tests {
    use super::super::storage::MemoryStorage;
    use super::*;
    use masala_core::FoodId;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    #[test]
    fn test_empty_panel() {
        let panel = CartPanelView::empty();
        assert!(panel.is_empty());
        assert_eq!(panel.subtotal, "Rs 0.00");
        assert_eq!(panel.item_count, 0);
    }

    #[test]
    fn test_render_projects_store_state() {
        let mut store = CartStore::open(Box::new(MemoryStorage::new()));
        store.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);
        store.add_item(FoodId::new(2), "Momo", dec("4.50"), 1);

        let panel = CartPanelView::render(&store);
        assert_eq!(panel.items.len(), 2);
        assert_eq!(panel.items[0].price, "Rs 10.00");
        assert_eq!(panel.items[0].line_price, "Rs 20.00");
        assert_eq!(panel.subtotal, "Rs 24.50");
        assert_eq!(panel.item_count, 3);
        assert!(!panel.is_empty());
    }

    #[test]
    fn test_render_tracks_mutations() {
        let mut store = CartStore::open(Box::new(MemoryStorage::new()));
        store.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);

        store.update_quantity(0, -1);
        let panel = CartPanelView::render(&store);
        assert_eq!(panel.items[0].quantity, 1);
        assert_eq!(panel.subtotal, "Rs 10.00");

        store.remove_item(0);
        let panel = CartPanelView::render(&store);
        assert!(panel.is_empty());
    }
}
