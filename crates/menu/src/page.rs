//! Page orchestration.
//!
//! One initialization routine builds every component from configuration,
//! restored cart state, and the rendered catalog; one dispatcher maps page
//! events onto component operations. Errors surface as toasts - the page
//! stays interactive after any failure.

use masala_core::FoodId;

use crate::api::ApiClient;
use crate::cart::storage::Storage;
use crate::cart::view::CartPanelView;
use crate::cart::CartStore;
use crate::catalog::{Catalog, CatalogCard};
use crate::config::MenuConfig;
use crate::error::PageError;
use crate::favorites::{FavoritesSync, ToggleOutcome};
use crate::notify::{Notifications, ToastKind};
use crate::quickview::QuickView;

/// Confetti surface size used for bursts (the page viewport).
const VIEWPORT: (f32, f32) = (1280.0, 720.0);

/// A discrete user-interaction event on the menu page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// A category button was clicked.
    CategorySelected(String),
    /// The search input changed (fires on every keystroke).
    SearchInput(String),
    /// A card's quantity stepper was clicked.
    QuantityStep { id: FoodId, delta: i32 },
    /// A card's add-to-cart button was clicked.
    AddToCart { id: FoodId },
    /// A cart line's quantity stepper was clicked.
    CartLineStep { index: usize, delta: i32 },
    /// A cart line's remove control was clicked.
    CartLineRemove { index: usize },
    /// A favorite button was clicked.
    FavoriteToggle { id: FoodId },
    /// A quick-view button was clicked.
    QuickViewOpen { id: FoodId },
    /// The quick-view modal was dismissed.
    QuickViewClose,
    /// The modal's quantity stepper was clicked.
    ModalQuantityStep { delta: i32 },
    /// The modal's add-to-cart button was clicked.
    ModalAddToCart,
    /// The modal's favorite button was clicked.
    ModalFavoriteToggle,
    /// Timer tick: sweep toasts, shake, and confetti.
    Tick,
}

/// The menu page: every interactive component behind one dispatcher.
pub struct MenuPage {
    api: ApiClient,
    catalog: Catalog,
    cart: CartStore,
    cart_panel: CartPanelView,
    favorites: FavoritesSync,
    quick_view: QuickView,
    notifications: Notifications,
}

impl MenuPage {
    /// Build and wire the whole page.
    ///
    /// Restores the cart from storage, paints the cart badge, and kicks the
    /// initial favorites fetch (whose failure is absorbed, matching an
    /// unauthenticated viewer).
    ///
    /// # Errors
    ///
    /// Returns `PageError` only when the API client cannot be constructed.
    pub async fn init(
        config: &MenuConfig,
        cards: Vec<CatalogCard>,
        category_slugs: &[&str],
        storage: Box<dyn Storage>,
    ) -> Result<Self, PageError> {
        let api = ApiClient::new(config)?;

        let button_ids: Vec<FoodId> = cards.iter().map(|card| card.id).collect();
        let catalog = Catalog::new(cards, category_slugs);

        let cart = CartStore::open(storage);
        let cart_panel = CartPanelView::render(&cart);

        let mut favorites = FavoritesSync::new(&button_ids, config.is_signed_in());
        favorites.refresh(&api).await;

        Ok(Self {
            api,
            catalog,
            cart,
            cart_panel,
            favorites,
            quick_view: QuickView::new(),
            notifications: Notifications::new(),
        })
    }

    /// Handle one page event to completion.
    pub async fn dispatch(&mut self, event: PageEvent) {
        match event {
            PageEvent::CategorySelected(slug) => self.catalog.select_category(&slug),
            PageEvent::SearchInput(term) => self.catalog.search(&term),
            PageEvent::QuantityStep { id, delta } => self.catalog.step_quantity(id, delta),
            PageEvent::AddToCart { id } => self.add_to_cart(id),
            PageEvent::CartLineStep { index, delta } => {
                self.cart.update_quantity(index, delta);
                self.cart_panel = CartPanelView::render(&self.cart);
            }
            PageEvent::CartLineRemove { index } => {
                self.cart.remove_item(index);
                self.cart_panel = CartPanelView::render(&self.cart);
            }
            PageEvent::FavoriteToggle { id } => self.toggle_favorite(id).await,
            PageEvent::QuickViewOpen { id } => self.open_quick_view(id).await,
            PageEvent::QuickViewClose => self.quick_view.close(),
            PageEvent::ModalQuantityStep { delta } => {
                if let Some(modal) = self.quick_view.modal_mut() {
                    modal.step_quantity(delta);
                }
            }
            PageEvent::ModalAddToCart => self.modal_add_to_cart(),
            PageEvent::ModalFavoriteToggle => {
                if let Some(id) = self.quick_view.modal().map(|modal| modal.id) {
                    self.toggle_favorite(id).await;
                    let favorited = self.favorites.is_favorited(id);
                    if let Some(modal) = self.quick_view.modal_mut() {
                        modal.favorited = favorited;
                    }
                }
            }
            PageEvent::Tick => self.notifications.tick(),
        }
    }

    /// Add a card's pending quantity to the cart with full feedback.
    fn add_to_cart(&mut self, id: FoodId) {
        let Some(card) = self.catalog.card(id) else {
            tracing::debug!("Add-to-cart for unknown card {id}");
            return;
        };

        let name = card.title.clone();
        let quantity = card.pending_quantity;
        self.cart.add_item(id, &name, card.price, quantity);
        self.catalog.reset_quantity(id);

        self.after_cart_add(&name);
    }

    /// Add from the quick-view modal, using the modal's stepper value.
    fn modal_add_to_cart(&mut self) {
        let Some(modal) = self.quick_view.modal() else {
            return;
        };
        let id = modal.id;
        let quantity = modal.quantity;

        // Price comes from the card when the item is on the page; the modal
        // is display-formatted only.
        let Some(card) = self.catalog.card(id) else {
            tracing::debug!("Modal add-to-cart for item {id} not on this page");
            return;
        };

        let name = card.title.clone();
        self.cart.add_item(id, &name, card.price, quantity);
        if let Some(modal) = self.quick_view.modal_mut() {
            modal.quantity = crate::cart::MIN_QUANTITY;
        }

        self.after_cart_add(&name);
    }

    /// Shared post-add feedback: re-render, toast, shake, confetti.
    fn after_cart_add(&mut self, name: &str) {
        self.cart_panel = CartPanelView::render(&self.cart);
        self.notifications
            .push(format!("Added {name} to cart"), ToastKind::Success);
        self.notifications.shake();
        self.notifications.launch_confetti(VIEWPORT.0, VIEWPORT.1);
    }

    /// Toggle a favorite and surface the outcome.
    async fn toggle_favorite(&mut self, id: FoodId) {
        match self.favorites.toggle(&self.api, id).await {
            Ok(ToggleOutcome::Toggled { message, .. }) => {
                let message =
                    message.unwrap_or_else(|| "Favorites updated".to_string());
                self.notifications.push(message, ToastKind::Success);
            }
            Ok(ToggleOutcome::Rejected { message }) => {
                let message =
                    message.unwrap_or_else(|| "Could not update favorite".to_string());
                self.notifications
                    .push(format!("Error: {message}"), ToastKind::Error);
            }
            Ok(ToggleOutcome::LoginRequired) => {
                self.notifications
                    .push("Please login to add favorites", ToastKind::Warning);
            }
            Err(e) => {
                tracing::warn!("Favorite toggle failed: {e}");
                self.notifications
                    .push("Error updating favorite", ToastKind::Error);
            }
        }
    }

    /// Open the quick-view modal for an item.
    async fn open_quick_view(&mut self, id: FoodId) {
        let favorited = self.favorites.is_favorited(id);
        if let Err(e) = self.quick_view.open(&self.api, id, favorited).await {
            tracing::warn!("Quick view fetch failed: {e}");
            self.notifications
                .push("Error loading item details", ToastKind::Error);
        }
    }

    // Accessors for the host rendering layer.

    /// The filterable catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The cart store (read paths; mutations go through events).
    #[must_use]
    pub const fn cart(&self) -> &CartStore {
        &self.cart
    }

    /// The rendered cart panel and badge.
    #[must_use]
    pub const fn cart_panel(&self) -> &CartPanelView {
        &self.cart_panel
    }

    /// The favorites component.
    #[must_use]
    pub const fn favorites(&self) -> &FavoritesSync {
        &self.favorites
    }

    /// The quick-view component.
    #[must_use]
    pub const fn quick_view(&self) -> &QuickView {
        &self.quick_view
    }

    /// Feedback currently showing.
    #[must_use]
    pub const fn notifications(&self) -> &Notifications {
        &self.notifications
    }
}
