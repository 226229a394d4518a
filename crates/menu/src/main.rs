//! Masala Menu - terminal driver for the menu page engine.
//!
//! Stands in for the browser event loop: builds the page from environment
//! configuration and file-backed storage, then maps typed commands onto
//! page events.
//!
//! # Usage
//!
//! ```bash
//! MENU_BACKEND_URL=http://localhost:8000/ masala-menu
//! ```
//!
//! Commands: `menu`, `category <slug>`, `search <term>`, `qty <id> +|-`,
//! `add <id>`, `cart`, `plus|minus|rm <index>`, `fav <id>`, `view <id>`,
//! `modal +|-|add|fav`, `close`, `quit`.

#![cfg_attr(not(test), forbid(unsafe_code))]
// Terminal driver: stdout is the rendering surface.
#![allow(clippy::print_stdout)]

use std::io::BufRead;

use rust_decimal::Decimal;

use masala_core::FoodId;
use masala_menu::cart::storage::FileStorage;
use masala_menu::catalog::CatalogCard;
use masala_menu::config::MenuConfig;
use masala_menu::page::{MenuPage, PageEvent};

#[tokio::main]
async fn main() {
    // Load configuration from environment
    let config = MenuConfig::from_env().expect("Failed to load configuration");

    // Initialize tracing with EnvFilter
    // Defaults to info level for our crate if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "masala_menu=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let storage =
        FileStorage::open(&config.storage_dir).expect("Failed to open cart storage");

    let mut page = MenuPage::init(
        &config,
        demo_cards(),
        &["starters", "mains", "momo", "dessert"],
        Box::new(storage),
    )
    .await
    .expect("Failed to initialize menu page");

    tracing::info!(backend = %config.backend_url, "menu page ready");
    println!("Masala Court menu. Type 'help' for commands.");

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else { break };
        let line = line.trim().to_string();
        if line.is_empty() {
            continue;
        }
        if line == "quit" || line == "exit" {
            break;
        }

        match parse_command(&line) {
            Some(Command::Help) => print_help(),
            Some(Command::Menu) => print_menu(&page),
            Some(Command::Cart) => print_cart(&page),
            Some(Command::Event(event)) => {
                page.dispatch(event).await;
                page.dispatch(PageEvent::Tick).await;
                print_feedback(&page);
            }
            None => println!("Unrecognized command. Type 'help'."),
        }
    }
}

enum Command {
    Help,
    Menu,
    Cart,
    Event(PageEvent),
}

fn parse_command(line: &str) -> Option<Command> {
    let mut parts = line.split_whitespace();
    let verb = parts.next()?;
    let rest: Vec<&str> = parts.collect();

    let event = match verb {
        "help" => return Some(Command::Help),
        "menu" => return Some(Command::Menu),
        "cart" if rest.is_empty() => return Some(Command::Cart),
        "category" => PageEvent::CategorySelected(rest.first()?.to_string()),
        "search" => PageEvent::SearchInput(rest.join(" ")),
        "qty" => PageEvent::QuantityStep {
            id: parse_id(rest.first()?)?,
            delta: parse_delta(rest.get(1)?)?,
        },
        "add" => PageEvent::AddToCart {
            id: parse_id(rest.first()?)?,
        },
        "plus" => PageEvent::CartLineStep {
            index: rest.first()?.parse().ok()?,
            delta: 1,
        },
        "minus" => PageEvent::CartLineStep {
            index: rest.first()?.parse().ok()?,
            delta: -1,
        },
        "rm" => PageEvent::CartLineRemove {
            index: rest.first()?.parse().ok()?,
        },
        "fav" => PageEvent::FavoriteToggle {
            id: parse_id(rest.first()?)?,
        },
        "view" => PageEvent::QuickViewOpen {
            id: parse_id(rest.first()?)?,
        },
        "close" => PageEvent::QuickViewClose,
        "modal" => match *rest.first()? {
            "+" => PageEvent::ModalQuantityStep { delta: 1 },
            "-" => PageEvent::ModalQuantityStep { delta: -1 },
            "add" => PageEvent::ModalAddToCart,
            "fav" => PageEvent::ModalFavoriteToggle,
            _ => return None,
        },
        _ => return None,
    };

    Some(Command::Event(event))
}

fn parse_id(raw: &str) -> Option<FoodId> {
    raw.parse::<i64>().ok().map(FoodId::new)
}

fn parse_delta(raw: &str) -> Option<i32> {
    match raw {
        "+" => Some(1),
        "-" => Some(-1),
        _ => None,
    }
}

fn print_help() {
    println!("  menu                 show visible items");
    println!("  category <slug>      filter by category ('all' resets)");
    println!("  search <term>        filter by text");
    println!("  qty <id> +|-         step a card's quantity");
    println!("  add <id>             add the card's quantity to the cart");
    println!("  cart                 show the cart panel");
    println!("  plus|minus <index>   step a cart line");
    println!("  rm <index>           remove a cart line");
    println!("  fav <id>             toggle a favorite");
    println!("  view <id>            open quick view");
    println!("  modal +|-|add|fav    drive the open modal");
    println!("  close                dismiss quick view");
    println!("  quit                 exit");
}

fn print_menu(page: &MenuPage) {
    let catalog = page.catalog();
    for card in catalog.visible() {
        let fav = if page.favorites().is_favorited(card.id) {
            "*"
        } else {
            " "
        };
        println!(
            "{fav} [{}] {} ({}) Rs {:.2} x{}",
            card.id, card.title, card.category, card.price, card.pending_quantity
        );
    }
    if catalog.no_results() {
        println!("No dishes match your search.");
    }
}

fn print_cart(page: &MenuPage) {
    let panel = page.cart_panel();
    if panel.is_empty() {
        println!("Your cart is empty.");
        return;
    }
    for (index, item) in panel.items.iter().enumerate() {
        println!(
            "{index}: {} x{} @ {} = {}",
            item.name, item.quantity, item.price, item.line_price
        );
    }
    println!("subtotal {} | {} item(s)", panel.subtotal, panel.item_count);
}

fn print_feedback(page: &MenuPage) {
    for toast in page.notifications().toasts() {
        println!("[{:?}] {}", toast.kind, toast.message);
    }
    if let Some(modal) = page.quick_view().modal() {
        println!(
            "-- {} | {} | {} | rating {} --",
            modal.title, modal.category, modal.price, modal.rating
        );
        println!("   {}", modal.description);
    }
    println!(
        "cart badge: {} | favorites badge: {}",
        page.cart_panel().item_count,
        page.favorites().badge()
    );
}

/// Demo rendering of the menu page's cards, used when no backend-rendered
/// catalog is wired in.
fn demo_cards() -> Vec<CatalogCard> {
    fn dec(s: &str) -> Decimal {
        s.parse().unwrap_or_default()
    }

    vec![
        CatalogCard::new(
            FoodId::new(1),
            "starters",
            "Paneer Pakora",
            "Crisp chickpea-battered paneer with mint chutney",
            dec("220.00"),
        ),
        CatalogCard::new(
            FoodId::new(2),
            "momo",
            "Steamed Chicken Momo",
            "Ten dumplings with sesame achar",
            dec("260.00"),
        ),
        CatalogCard::new(
            FoodId::new(3),
            "mains",
            "Butter Chicken",
            "Tomato gravy, served with basmati rice",
            dec("450.00"),
        ),
        CatalogCard::new(
            FoodId::new(4),
            "mains",
            "Dal Bhat Set",
            "Lentils, rice, seasonal tarkari and pickle",
            dec("380.00"),
        ),
        CatalogCard::new(
            FoodId::new(5),
            "dessert",
            "Gulab Jamun",
            "Warm, with cardamom syrup",
            dec("150.00"),
        ),
    ]
}
