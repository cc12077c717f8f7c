//! HTTP route handlers for storefront.
//!
//! All bodies are JSON. Prices are returned both as minor units and as a
//! display string in the configured currency.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                 - Health check
//!
//! # Products
//! GET  /products?q=&sort=      - Filtered, sorted product listing
//! GET  /products/{id}          - Product detail
//!
//! # Cart
//! GET  /cart                   - Cart lines and totals
//! POST /cart/add               - Add to cart {id, quantity?}
//! POST /cart/remove            - Remove a line {id}
//! POST /cart/clear             - Empty the cart
//!
//! # Checkout
//! POST /checkout               - Review the cart (or report it empty)
//! POST /checkout/confirm       - Place the order and clear the cart
//! POST /checkout/cancel        - Back to browsing
//!
//! # Extras
//! POST /contact                - Validate a contact form
//! GET  /todos                  - List tasks
//! POST /todos                  - Add a task {text}
//! DELETE /todos/{id}           - Remove a task
//! GET  /quiz                   - Current quiz screen
//! POST /quiz/answer            - Select an answer {index}
//! POST /quiz/next              - Advance (or play again)
//! POST /quiz/restart           - Start over
//! GET  /joke                   - A joke, or the fallback line
//! ```

pub mod cart;
pub mod checkout;
pub mod contact;
pub mod joke;
pub mod products;
pub mod quiz;
pub mod todos;

use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::start))
        .route("/confirm", post(checkout::confirm))
        .route("/cancel", post(checkout::cancel))
}

/// Create the to-do routes router.
pub fn todo_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(todos::index).post(todos::create))
        .route("/{id}", delete(todos::destroy))
}

/// Create the quiz routes router.
pub fn quiz_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(quiz::show))
        .route("/answer", post(quiz::answer))
        .route("/next", post(quiz::next))
        .route("/restart", post(quiz::restart))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
        .route("/contact", post(contact::submit))
        .nest("/todos", todo_routes())
        .nest("/quiz", quiz_routes())
        .route("/joke", get(joke::show))
}

/// Build the full application with health check and middleware applied.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(
                    TraceLayer::new_for_http()
                        .make_span_with(|request: &axum::http::Request<_>| {
                            tracing::info_span!(
                                "http_request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = tracing::field::Empty,
                                status = tracing::field::Empty,
                                latency_ms = tracing::field::Empty,
                            )
                        })
                        .on_response(
                            |response: &axum::http::Response<_>,
                             latency: std::time::Duration,
                             span: &Span| {
                                span.record("status", response.status().as_u16());
                                span.record(
                                    "latency_ms",
                                    u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                                );
                                DefaultOnResponse::default().on_response(response, latency, span);
                            },
                        ),
                )
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
