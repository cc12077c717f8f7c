//! Integration tests for Mini Shop.
//!
//! Tests drive the storefront router in-process with
//! `tower::ServiceExt::oneshot`, so no server or network is needed. The joke
//! endpoint is pointed at a `mockito` server or an unreachable address.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p mini-shop-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `storefront_shop` - Products, cart, and checkout over HTTP
//! - `storefront_widgets` - Contact, to-do, quiz, and joke endpoints
//! - `cart_persistence` - Cart survival across shop instances on disk

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, StatusCode, header},
};
use mini_shop_core::{CurrencyCode, Price, Product, ProductId};
use mini_shop_storefront::blob::{BlobStore, MemoryBlobStore};
use mini_shop_storefront::catalog::Catalog;
use mini_shop_storefront::config::StorefrontConfig;
use mini_shop_storefront::quiz::{QuestionBank, Quiz};
use mini_shop_storefront::routes;
use mini_shop_storefront::services::JokeClient;
use mini_shop_storefront::shop::Shop;
use mini_shop_storefront::state::AppState;
use serde_json::Value;
use tower::ServiceExt;

/// An address nothing listens on; joke fetches against it fail fast.
pub const UNREACHABLE_JOKE_URL: &str = "http://127.0.0.1:9/joke";

/// A small fixed catalog: `p1` ₹5.00 mug, `p2` ₹12.00 lamp, `p3` ₹3.00 pencil.
#[must_use]
pub fn fixed_catalog() -> Catalog {
    let product = |id: &str, name: &str, minor: u64| Product {
        id: ProductId::parse(id).unwrap(),
        name: name.to_string(),
        price: Price::from_minor(minor),
        description: format!("A {} for testing", name.to_lowercase()),
        image_url: format!("https://example.test/{id}.jpg"),
    };
    Catalog::new(vec![
        product("p1", "Ceramic Mug", 500),
        product("p2", "Desk Lamp", 1200),
        product("p3", "Pencil", 300),
    ])
}

/// Router plus the device store behind its cart.
pub struct TestContext {
    pub app: Router,
    pub device: Arc<dyn BlobStore>,
}

impl TestContext {
    /// Fixed catalog, in-memory cart, built-in quiz, unreachable joke API.
    #[must_use]
    pub fn new() -> Self {
        Self::with_joke_url(UNREACHABLE_JOKE_URL)
    }

    #[must_use]
    pub fn with_joke_url(url: &str) -> Self {
        Self::with_device(Arc::new(MemoryBlobStore::new()), url)
    }

    #[must_use]
    pub fn with_device(device: Arc<dyn BlobStore>, joke_url: &str) -> Self {
        let shop = Shop::with_catalog(fixed_catalog(), Arc::clone(&device), CurrencyCode::INR);
        let state = AppState::from_parts(
            StorefrontConfig::default(),
            shop,
            Quiz::new(QuestionBank::builtin()),
            JokeClient::new(joke_url).unwrap(),
        );
        Self {
            app: routes::app(state),
            device,
        }
    }

    /// Send a GET and decode the JSON body (`Value::Null` for non-JSON).
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::get(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a POST with a JSON body.
    pub async fn post(&self, uri: &str, body: &Value) -> (StatusCode, Value) {
        self.send(
            Request::post(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    /// Send a POST with no body.
    pub async fn post_empty(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::post(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a DELETE.
    pub async fn delete(&self, uri: &str) -> (StatusCode, Value) {
        self.send(Request::delete(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Send a request and return status plus body text.
    pub async fn send_raw(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let (status, text) = self.send_raw(request).await;
        let body = serde_json::from_str(&text).unwrap_or(Value::Null);
        (status, body)
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}
