//! Catalog, cart, and checkout commands.
//!
//! Each invocation opens the shop from disk, applies one command, and lets
//! the shop write the cart back. Checkout review is not persisted between
//! runs, so `checkout --confirm` reviews and confirms in one step.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use mini_shop_core::{CurrencyCode, Product, ProductId, SortKey};
use mini_shop_storefront::blob::{FileBlobStore, StoreError};
use mini_shop_storefront::checkout::{CheckoutOutcome, Receipt};
use mini_shop_storefront::debounce::LiveSearch;
use mini_shop_storefront::routes::checkout::{EMPTY_CART_MESSAGE, ORDER_PLACED_MESSAGE};
use mini_shop_storefront::shop::{Shop, ShopOptions};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

/// Subdirectory of the data dir that holds the generated catalog.
const SESSION_DIR: &str = "session";

/// Where the CLI keeps its state.
#[derive(Debug, Clone)]
pub struct Storage {
    data_dir: PathBuf,
    currency: CurrencyCode,
    catalog_size: usize,
}

impl Storage {
    pub const fn new(data_dir: PathBuf, currency: CurrencyCode, catalog_size: usize) -> Self {
        Self {
            data_dir,
            currency,
            catalog_size,
        }
    }

    fn open(&self) -> Result<Shop, StoreError> {
        let device = Arc::new(FileBlobStore::open(&self.data_dir)?);
        let session = FileBlobStore::open(self.data_dir.join(SESSION_DIR))?;
        Ok(Shop::open(
            device,
            &session,
            ShopOptions {
                catalog_size: self.catalog_size,
                currency: self.currency,
            },
        ))
    }
}

/// List products matching `search`, ordered by `sort`.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn products(
    storage: &Storage,
    search: &str,
    sort: SortKey,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = storage.open()?;
    print_products(&shop.apply_filters(search, sort), shop.currency());
    Ok(())
}

/// Show one product's details.
///
/// # Errors
///
/// Returns an error if the id is malformed or not in the catalog.
pub fn product(storage: &Storage, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let shop = storage.open()?;
    let id = ProductId::parse(id)?;
    let product = shop.product(&id)?;

    println!("{} ({})", product.name, product.id);
    println!("{}", shop.format_price(product.price));
    println!("{}", product.description);
    println!("{}", product.image_url);
    Ok(())
}

/// Print cart lines and totals.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn cart_show(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let shop = storage.open()?;
    print_cart(&shop);
    Ok(())
}

/// Add `quantity` of a product to the cart.
///
/// # Errors
///
/// Returns an error if the id is malformed or the quantity is zero.
pub fn cart_add(
    storage: &Storage,
    id: &str,
    quantity: u32,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = storage.open()?;
    let id = ProductId::parse(id)?;
    shop.add_to_cart(&id, quantity)?;
    print_cart(&shop);
    Ok(())
}

/// Remove a product's line from the cart.
///
/// # Errors
///
/// Returns an error if the id is malformed.
pub fn cart_remove(storage: &Storage, id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = storage.open()?;
    let id = ProductId::parse(id)?;
    shop.remove_from_cart(&id);
    print_cart(&shop);
    Ok(())
}

/// Empty the cart.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn cart_clear(storage: &Storage) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = storage.open()?;
    shop.clear_cart();
    println!("Cart cleared.");
    Ok(())
}

/// Review the cart, and place the order when `confirm` is set.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened.
pub fn checkout(storage: &Storage, confirm: bool) -> Result<(), Box<dyn std::error::Error>> {
    let mut shop = storage.open()?;

    let CheckoutOutcome::Review(receipt) = shop.checkout() else {
        println!("{EMPTY_CART_MESSAGE}");
        return Ok(());
    };
    print_receipt(&receipt, &shop);

    if confirm {
        shop.confirm_checkout()?;
        println!("{ORDER_PLACED_MESSAGE}");
    } else {
        shop.cancel_checkout();
        println!("Run again with --confirm to place the order.");
    }
    Ok(())
}

/// Live search: each stdin line replaces the query, and the listing is
/// printed whenever the debounced view changes.
///
/// # Errors
///
/// Returns an error if the data directory cannot be opened or stdin fails.
pub async fn browse(
    storage: &Storage,
    sort: SortKey,
    debounce_ms: u64,
) -> Result<(), Box<dyn std::error::Error>> {
    let shop = storage.open()?;
    let currency = shop.currency();
    let delay = Duration::from_millis(debounce_ms);

    let search = LiveSearch::new(Arc::new(tokio::sync::Mutex::new(shop)), delay).await;
    search.set_sort(sort).await;
    let mut results = search.subscribe();
    print_products(&results.borrow_and_update(), currency);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => match line? {
                Some(query) => search.input(&query),
                None => break,
            },
            changed = results.changed() => {
                changed?;
                print_products(&results.borrow_and_update(), currency);
            }
        }
    }

    // Let a query typed just before EOF settle
    if tokio::time::timeout(delay * 2, results.changed()).await.is_ok() {
        print_products(&results.borrow_and_update(), currency);
    }
    info!("Browse finished");
    Ok(())
}

fn print_products(products: &[Product], currency: CurrencyCode) {
    println!("{} product(s)", products.len());
    for p in products {
        println!("  {:<5} {:<28} {:>12}", p.id, p.name, p.price.display(currency));
    }
}

fn print_cart(shop: &Shop) {
    let lines = shop.lines();
    if lines.is_empty() {
        println!("{EMPTY_CART_MESSAGE}");
        return;
    }
    for line in &lines {
        println!(
            "  {:<5} {:<28} x{:<3} {:>12}",
            line.product_id,
            line.name,
            line.quantity,
            shop.format_price(line.line_total)
        );
    }
    let totals = shop.totals();
    println!(
        "{} item(s), total {}",
        totals.item_count,
        shop.format_price(totals.total_price)
    );
}

fn print_receipt(receipt: &Receipt, shop: &Shop) {
    println!("Order summary");
    for line in &receipt.lines {
        println!(
            "  {} x{} @ {} = {}",
            line.name,
            line.quantity,
            shop.format_price(line.unit_price),
            shop.format_price(line.line_total)
        );
    }
    println!(
        "Total: {} ({} item(s))",
        shop.format_price(receipt.totals.total_price),
        receipt.totals.item_count
    );
}
