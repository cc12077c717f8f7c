//! Cart route handlers.
//!
//! Every mutation responds with the full cart so clients can redraw the
//! drawer and badge from one payload.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use mini_shop_core::ProductId;
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::checkout::CartLine;
use crate::error::Result;
use crate::shop::{Phase, Shop};
use crate::state::AppState;

/// Cart item display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub id: ProductId,
    pub name: String,
    pub quantity: u32,
    pub price: String,
    pub line_price: String,
    /// False when the product is no longer in the catalog.
    pub known: bool,
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub item_count: u64,
    pub total: String,
    pub total_minor: u64,
    pub phase: Phase,
}

impl CartItemView {
    pub(crate) fn new(line: &CartLine, shop: &Shop) -> Self {
        Self {
            id: line.product_id.clone(),
            name: line.name.clone(),
            quantity: line.quantity,
            price: shop.format_price(line.unit_price),
            line_price: shop.format_price(line.line_total),
            known: line.known,
        }
    }
}

impl From<&Shop> for CartView {
    fn from(shop: &Shop) -> Self {
        let totals = shop.totals();
        Self {
            items: shop
                .lines()
                .iter()
                .map(|line| CartItemView::new(line, shop))
                .collect(),
            item_count: totals.item_count,
            total: shop.format_price(totals.total_price),
            total_minor: totals.total_price.minor_units(),
            phase: shop.phase(),
        }
    }
}

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub id: String,
    pub quantity: Option<u32>,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub id: String,
}

/// Display the cart.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<CartView> {
    let shop = state.shop().lock().await;
    Json(CartView::from(&*shop))
}

/// Add a product to the cart. Quantity defaults to one.
#[instrument(skip(state))]
pub async fn add(
    State(state): State<AppState>,
    body: std::result::Result<Json<AddToCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = body?;
    let id = ProductId::parse(&body.id)?;
    let mut shop = state.shop().lock().await;
    shop.add_to_cart(&id, body.quantity.unwrap_or(1))?;
    Ok(Json(CartView::from(&*shop)))
}

/// Remove a product's line from the cart.
#[instrument(skip(state))]
pub async fn remove(
    State(state): State<AppState>,
    body: std::result::Result<Json<RemoveFromCartRequest>, JsonRejection>,
) -> Result<Json<CartView>> {
    let Json(body) = body?;
    let id = ProductId::parse(&body.id)?;
    let mut shop = state.shop().lock().await;
    shop.remove_from_cart(&id);
    Ok(Json(CartView::from(&*shop)))
}

/// Empty the cart.
#[instrument(skip(state))]
pub async fn clear(State(state): State<AppState>) -> Json<CartView> {
    let mut shop = state.shop().lock().await;
    shop.clear_cart();
    Json(CartView::from(&*shop))
}
