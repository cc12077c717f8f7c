//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use mini_shop_core::{CurrencyCode, Product, ProductId, SortKey};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::state::AppState;

/// Product display data.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: ProductId,
    pub name: String,
    pub price: String,
    pub price_minor: u64,
    pub description: String,
    pub image_url: String,
}

impl ProductView {
    /// Build a view with the price formatted in `currency`.
    #[must_use]
    pub fn new(product: &Product, currency: CurrencyCode) -> Self {
        Self {
            id: product.id.clone(),
            name: product.name.clone(),
            price: product.price.display(currency),
            price_minor: product.price.minor_units(),
            description: product.description.clone(),
            image_url: product.image_url.clone(),
        }
    }
}

/// Listing response.
#[derive(Debug, Serialize)]
pub struct ProductListView {
    /// Number of products in `products`.
    pub count: usize,
    pub products: Vec<ProductView>,
}

/// Query parameters for the listing.
#[derive(Debug, Default, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub q: String,
    #[serde(default)]
    pub sort: Option<String>,
}

/// List products matching `q`, ordered by `sort`.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<ProductListView>> {
    let sort = query
        .sort
        .as_deref()
        .map_or(Ok(SortKey::default()), str::parse::<SortKey>)?;

    let shop = state.shop().lock().await;
    let currency = shop.currency();
    let products: Vec<ProductView> = shop
        .apply_filters(&query.q, sort)
        .iter()
        .map(|p| ProductView::new(p, currency))
        .collect();

    Ok(Json(ProductListView {
        count: products.len(),
        products,
    }))
}

/// Display a single product.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ProductView>> {
    let id = ProductId::parse(&id)?;
    let shop = state.shop().lock().await;
    let product = shop.product(&id)?;
    Ok(Json(ProductView::new(product, shop.currency())))
}
