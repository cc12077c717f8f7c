//! Checkout route handlers.
//!
//! Checkout is a mock: confirming clears the cart and takes no payment.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::checkout::{CheckoutOutcome, Receipt};
use crate::error::Result;
use crate::routes::cart::{CartItemView, CartView};
use crate::shop::Shop;
use crate::state::AppState;

/// Message shown when checkout is started with nothing in the cart.
pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// Message shown after a confirmed order.
pub const ORDER_PLACED_MESSAGE: &str = "Order placed (demo only).";

/// Receipt display data.
#[derive(Debug, Clone, Serialize)]
pub struct ReceiptView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub total: String,
    pub total_minor: u64,
}

impl ReceiptView {
    fn new(receipt: &Receipt, shop: &Shop) -> Self {
        Self {
            items: receipt
                .lines
                .iter()
                .map(|line| CartItemView::new(line, shop))
                .collect(),
            item_count: receipt.totals.item_count,
            total: shop.format_price(receipt.totals.total_price),
            total_minor: receipt.totals.total_price.minor_units(),
        }
    }
}

/// Result of starting checkout.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CheckoutView {
    Empty { message: &'static str },
    Review { receipt: ReceiptView },
}

/// Confirmed order.
#[derive(Debug, Serialize)]
pub struct OrderView {
    pub message: &'static str,
    pub receipt: ReceiptView,
}

/// Start checkout and return the receipt for review.
#[instrument(skip(state))]
pub async fn start(State(state): State<AppState>) -> Json<CheckoutView> {
    let mut shop = state.shop().lock().await;
    let view = match shop.checkout() {
        CheckoutOutcome::Empty => CheckoutView::Empty {
            message: EMPTY_CART_MESSAGE,
        },
        CheckoutOutcome::Review(receipt) => CheckoutView::Review {
            receipt: ReceiptView::new(&receipt, &shop),
        },
    };
    Json(view)
}

/// Confirm the reviewed order.
#[instrument(skip(state))]
pub async fn confirm(State(state): State<AppState>) -> Result<Json<OrderView>> {
    let mut shop = state.shop().lock().await;
    let receipt = shop.confirm_checkout()?;
    Ok(Json(OrderView {
        message: ORDER_PLACED_MESSAGE,
        receipt: ReceiptView::new(&receipt, &shop),
    }))
}

/// Close the review without placing the order.
#[instrument(skip(state))]
pub async fn cancel(State(state): State<AppState>) -> Json<CartView> {
    let mut shop = state.shop().lock().await;
    shop.cancel_checkout();
    Json(CartView::from(&*shop))
}
