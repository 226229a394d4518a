//! Client-held shopping cart.
//!
//! The cart is local-only authoritative: an ordered list of lines persisted
//! as JSON under a fixed key in the durable client-side store after every
//! mutation. Storage failures are never fatal - unreadable state loads as an
//! empty cart and write failures are logged and ignored.

pub mod storage;
pub mod view;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use masala_core::FoodId;

use storage::Storage;

/// Storage key holding the serialized cart.
pub const CART_KEY: &str = "cart";

/// Smallest quantity a line can hold.
pub const MIN_QUANTITY: u32 = 1;

/// Largest quantity a line can hold.
pub const MAX_QUANTITY: u32 = 50;

/// One product entry and its quantity inside the cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: FoodId,
    pub name: String,
    pub unit_price: Decimal,
    pub quantity: u32,
}

impl CartLine {
    /// Price of the whole line.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.unit_price * Decimal::from(self.quantity)
    }
}

/// The cart store: ordered lines plus the storage backend they persist to.
pub struct CartStore {
    storage: Box<dyn Storage>,
    lines: Vec<CartLine>,
}

impl CartStore {
    /// Open the cart over the given storage backend, restoring any
    /// previously persisted state.
    ///
    /// Corrupt or unreadable state is treated as an empty cart.
    #[must_use]
    pub fn open(storage: Box<dyn Storage>) -> Self {
        let lines = match storage.get(CART_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartLine>>(&raw) {
                Ok(lines) => lines,
                Err(e) => {
                    tracing::warn!("Discarding corrupt cart state: {e}");
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!("Failed to read cart state: {e}");
                Vec::new()
            }
        };

        Self { storage, lines }
    }

    /// Add `quantity` of an item, merging into an existing line with the
    /// same id. Quantities clamp into `[MIN_QUANTITY, MAX_QUANTITY]`.
    pub fn add_item(&mut self, id: FoodId, name: &str, unit_price: Decimal, quantity: u32) {
        let unit_price = unit_price.max(Decimal::ZERO);

        if let Some(line) = self.lines.iter_mut().find(|line| line.id == id) {
            line.quantity = line.quantity.saturating_add(quantity).min(MAX_QUANTITY);
        } else {
            self.lines.push(CartLine {
                id,
                name: name.to_string(),
                unit_price,
                quantity: quantity.clamp(MIN_QUANTITY, MAX_QUANTITY),
            });
        }

        self.persist();
    }

    /// Delete the line at ordinal `index`. Out-of-bounds is a no-op.
    pub fn remove_item(&mut self, index: usize) {
        if index < self.lines.len() {
            self.lines.remove(index);
            self.persist();
        }
    }

    /// Step the quantity of the line at `index` by `delta` (+1/-1),
    /// clamped into `[MIN_QUANTITY, MAX_QUANTITY]`. Decrementing past the
    /// floor never deletes the line. Out-of-bounds is a no-op.
    pub fn update_quantity(&mut self, index: usize, delta: i32) {
        let Some(line) = self.lines.get_mut(index) else {
            return;
        };

        let stepped = i64::from(line.quantity) + i64::from(delta);
        line.quantity = u32::try_from(stepped.clamp(
            i64::from(MIN_QUANTITY),
            i64::from(MAX_QUANTITY),
        ))
        .unwrap_or(MIN_QUANTITY);

        self.persist();
    }

    /// Remove every line and clear the persisted state.
    pub fn clear(&mut self) {
        self.lines.clear();
        if let Err(e) = self.storage.remove(CART_KEY) {
            tracing::warn!("Failed to clear cart state: {e}");
        }
    }

    /// Ordered read-only snapshot of the lines.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Sum of `unit_price x quantity` over all lines, rounded to 2 decimals.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.lines
            .iter()
            .map(CartLine::line_total)
            .sum::<Decimal>()
            .round_dp(2)
    }

    /// Sum of quantities across all lines (the badge number).
    #[must_use]
    pub fn count(&self) -> u32 {
        self.lines.iter().map(|line| line.quantity).sum()
    }

    /// Persist the current lines. Best effort: failures are logged only.
    fn persist(&self) {
        let serialized = match serde_json::to_string(&self.lines) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("Failed to serialize cart state: {e}");
                return;
            }
        };

        if let Err(e) = self.storage.set(CART_KEY, &serialized) {
            tracing::warn!("Failed to persist cart state: {e}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::storage::{MemoryStorage, StorageError};
    use super::*;

    fn dec(s: &str) -> Decimal {
        s.parse().expect("decimal literal")
    }

    fn store() -> CartStore {
        CartStore::open(Box::new(MemoryStorage::new()))
    }

    /// Storage handle that can outlive one `CartStore`, for reload tests.
    struct Shared(std::sync::Arc<MemoryStorage>);

    impl Storage for Shared {
        fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
            self.0.get(key)
        }
        fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
            self.0.set(key, value)
        }
        fn remove(&self, key: &str) -> Result<(), StorageError> {
            self.0.remove(key)
        }
    }

    #[test]
    fn test_add_item_appends_and_merges() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);
        cart.add_item(FoodId::new(2), "Momo", dec("4.50"), 1);
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 3);

        assert_eq!(cart.lines().len(), 2);
        assert_eq!(cart.lines()[0].quantity, 5);
        assert_eq!(cart.lines()[1].name, "Momo");
    }

    #[test]
    fn test_add_item_clamps_to_ceiling() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 49);
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 5);

        assert_eq!(cart.lines()[0].quantity, 50);
    }

    #[test]
    fn test_add_item_clamps_new_line_bounds() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 0);
        cart.add_item(FoodId::new(2), "Momo", dec("4.50"), 99);

        assert_eq!(cart.lines()[0].quantity, MIN_QUANTITY);
        assert_eq!(cart.lines()[1].quantity, MAX_QUANTITY);
    }

    #[test]
    fn test_repeated_adds_sum_to_min_with_ceiling() {
        let mut cart = store();
        for _ in 0..12 {
            cart.add_item(FoodId::new(7), "Thali", dec("8.25"), 6);
        }
        // min(50, 12 * 6)
        assert_eq!(cart.lines()[0].quantity, 50);
    }

    #[test]
    fn test_update_quantity_stays_in_bounds() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 1);

        cart.update_quantity(0, -1);
        assert_eq!(cart.lines()[0].quantity, 1, "floor holds at 1");

        for _ in 0..60 {
            cart.update_quantity(0, 1);
        }
        assert_eq!(cart.lines()[0].quantity, 50, "ceiling holds at 50");

        // Out of bounds index is a no-op.
        cart.update_quantity(9, 1);
        assert_eq!(cart.lines().len(), 1);
    }

    #[test]
    fn test_decrement_never_deletes() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 1);
        cart.update_quantity(0, -1);
        cart.update_quantity(0, -1);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.lines()[0].quantity, 1);
    }

    #[test]
    fn test_remove_item_preserves_order() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 1);
        cart.add_item(FoodId::new(2), "Momo", dec("4.50"), 1);
        cart.add_item(FoodId::new(3), "Chow Mein", dec("6.00"), 1);

        cart.remove_item(1);

        let ids: Vec<i64> = cart.lines().iter().map(|l| l.id.as_i64()).collect();
        assert_eq!(ids, vec![1, 3]);

        // Out of bounds is a silent no-op.
        cart.remove_item(5);
        assert_eq!(cart.lines().len(), 2);
    }

    #[test]
    fn test_total_and_count() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);
        assert_eq!(cart.total(), dec("20.00"));
        assert_eq!(cart.count(), 2);

        cart.add_item(FoodId::new(2), "Momo", dec("4.55"), 3);
        assert_eq!(cart.total(), dec("33.65"));
        assert_eq!(cart.count(), 5);
    }

    #[test]
    fn test_total_rounds_to_two_decimals() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Third", dec("0.333"), 3);
        assert_eq!(cart.total(), dec("1.00"));
    }

    #[test]
    fn test_negative_unit_price_clamps_to_zero() {
        let mut cart = store();
        cart.add_item(FoodId::new(1), "Freebie", dec("-5.00"), 2);
        assert_eq!(cart.total(), dec("0.00"));
    }

    #[test]
    fn test_persists_across_instances() {
        let storage = std::sync::Arc::new(MemoryStorage::new());

        {
            let mut cart = CartStore::open(Box::new(Shared(storage.clone())));
            cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);
        }

        let cart = CartStore::open(Box::new(Shared(storage)));
        assert_eq!(cart.lines().len(), 1);
        assert_eq!(cart.count(), 2);
    }

    #[test]
    fn test_corrupt_state_loads_empty() {
        let storage = MemoryStorage::new();
        storage.set(CART_KEY, "{not json").expect("seed corrupt state");

        let cart = CartStore::open(Box::new(storage));
        assert!(cart.lines().is_empty());
    }

    #[test]
    fn test_clear_removes_persisted_state() {
        let storage = std::sync::Arc::new(MemoryStorage::new());

        let mut cart = CartStore::open(Box::new(Shared(storage.clone())));
        cart.add_item(FoodId::new(1), "Pizza", dec("10.00"), 2);
        cart.clear();

        assert!(cart.lines().is_empty());
        assert!(storage.get(CART_KEY).expect("get").is_none());
    }
}
