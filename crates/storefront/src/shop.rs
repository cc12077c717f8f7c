//! Catalog & cart store.
//!
//! [`Shop`] owns the session catalog, the cart, and the checkout phase. All
//! cart mutations are written through to the device blob store immediately.
//!
//! # Phases
//!
//! ```text
//! Browsing --checkout (non-empty)--> Reviewing --confirm--> Browsing (cart cleared)
//!                                    Reviewing --cancel---> Browsing (cart kept)
//! ```
//!
//! Any cart mutation while reviewing drops back to `Browsing`, so a confirmed
//! order always matches the receipt that was shown.

use std::num::NonZeroU32;
use std::sync::Arc;

use mini_shop_core::{CurrencyCode, Price, Product, ProductId, SortKey};
use serde::Serialize;
use thiserror::Error;
use tracing::{info, warn};

use crate::blob::BlobStore;
use crate::cart::{self, Cart};
use crate::catalog::{self, Catalog};
use crate::checkout::{self, CartLine, CartTotals, CheckoutOutcome, Receipt};
use crate::filter;

/// Errors returned by [`Shop`] operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ShopError {
    /// Quantity to add must be at least one.
    #[error("quantity must be at least 1")]
    InvalidQuantity,

    /// Confirm was called without a pending review.
    #[error("no checkout is awaiting confirmation")]
    NotReviewing,

    /// Product id not present in the catalog.
    #[error("product not found: {0}")]
    ProductNotFound(ProductId),
}

/// Where the shopper is in the checkout flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    #[default]
    Browsing,
    Reviewing,
}

/// Settings used when opening a [`Shop`].
#[derive(Debug, Clone, Copy)]
pub struct ShopOptions {
    pub catalog_size: usize,
    pub currency: CurrencyCode,
}

impl Default for ShopOptions {
    fn default() -> Self {
        Self {
            catalog_size: catalog::DEFAULT_CATALOG_SIZE,
            currency: CurrencyCode::default(),
        }
    }
}

/// The authoritative catalog and cart state for one session.
#[derive(Debug)]
pub struct Shop {
    catalog: Catalog,
    cart: Cart,
    phase: Phase,
    currency: CurrencyCode,
    device: Arc<dyn BlobStore>,
}

impl Shop {
    /// Open a shop: load (or generate) the session catalog and load the
    /// persisted cart. Never fails; storage problems fall back to defaults.
    pub fn open(device: Arc<dyn BlobStore>, session: &dyn BlobStore, options: ShopOptions) -> Self {
        let catalog = catalog::load_catalog(session, options.catalog_size);
        Self::with_catalog(catalog, device, options.currency)
    }

    /// Open a shop over a known catalog, loading the cart from `device`.
    pub fn with_catalog(catalog: Catalog, device: Arc<dyn BlobStore>, currency: CurrencyCode) -> Self {
        let cart = cart::load_cart(device.as_ref());
        info!(
            products = catalog.len(),
            cart_lines = cart.len(),
            "Shop opened"
        );
        Self {
            catalog,
            cart,
            phase: Phase::Browsing,
            currency,
            device,
        }
    }

    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    #[must_use]
    pub const fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Format a price in this shop's currency.
    #[must_use]
    pub fn format_price(&self, price: Price) -> String {
        price.display(self.currency)
    }

    /// Look up one product for the details view.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::ProductNotFound` if the id is not in the catalog.
    pub fn product(&self, id: &ProductId) -> Result<&Product, ShopError> {
        self.catalog
            .get(id)
            .ok_or_else(|| ShopError::ProductNotFound(id.clone()))
    }

    /// Filtered and sorted view of the catalog.
    #[must_use]
    pub fn apply_filters(&self, search: &str, sort: SortKey) -> Vec<Product> {
        filter::apply_filters(self.catalog.products(), search, sort)
    }

    /// Add `qty` of `id` to the cart and persist.
    ///
    /// The id need not exist in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::InvalidQuantity` if `qty` is zero; the cart is
    /// left untouched.
    pub fn add_to_cart(&mut self, id: &ProductId, qty: u32) -> Result<CartTotals, ShopError> {
        let qty = NonZeroU32::new(qty).ok_or(ShopError::InvalidQuantity)?;
        let line_qty = self.cart.add(id.clone(), qty);
        info!(product_id = %id, added = qty.get(), line_qty, "Added to cart");
        self.after_mutation();
        Ok(self.totals())
    }

    /// Delete the whole line for `id` and persist. Removing an absent id is
    /// a no-op apart from the write.
    pub fn remove_from_cart(&mut self, id: &ProductId) -> CartTotals {
        if let Some(removed) = self.cart.remove(id) {
            info!(product_id = %id, removed, "Removed from cart");
        }
        self.after_mutation();
        self.totals()
    }

    /// Empty the cart and persist.
    pub fn clear_cart(&mut self) {
        self.cart.clear();
        info!("Cart cleared");
        self.after_mutation();
    }

    /// Current item count and total price.
    #[must_use]
    pub fn totals(&self) -> CartTotals {
        checkout::compute_totals(&self.cart, &self.catalog)
    }

    /// Cart lines joined with catalog data, in cart order.
    #[must_use]
    pub fn lines(&self) -> Vec<CartLine> {
        checkout::cart_lines(&self.cart, &self.catalog)
    }

    /// Start checkout. A non-empty cart moves the shop to `Reviewing`.
    pub fn checkout(&mut self) -> CheckoutOutcome {
        let outcome = checkout::checkout(&self.cart, &self.catalog);
        self.phase = match outcome {
            CheckoutOutcome::Empty => Phase::Browsing,
            CheckoutOutcome::Review(_) => Phase::Reviewing,
        };
        outcome
    }

    /// Confirm the reviewed order: clears the cart and returns to browsing.
    ///
    /// Returns the receipt that was confirmed. No payment is taken.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::NotReviewing` unless [`Shop::checkout`] produced
    /// a receipt and the cart has not changed since.
    pub fn confirm_checkout(&mut self) -> Result<Receipt, ShopError> {
        if self.phase != Phase::Reviewing {
            return Err(ShopError::NotReviewing);
        }
        let CheckoutOutcome::Review(receipt) = checkout::checkout(&self.cart, &self.catalog)
        else {
            self.phase = Phase::Browsing;
            return Err(ShopError::NotReviewing);
        };

        info!(
            lines = receipt.lines.len(),
            total = %self.format_price(receipt.totals.total_price),
            "Order confirmed"
        );
        self.clear_cart();
        Ok(receipt)
    }

    /// Leave review without changing the cart.
    pub fn cancel_checkout(&mut self) {
        self.phase = Phase::Browsing;
    }

    fn after_mutation(&mut self) {
        self.phase = Phase::Browsing;
        if let Err(e) = cart::save_cart(self.device.as_ref(), &self.cart) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
