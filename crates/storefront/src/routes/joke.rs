//! Joke route handler.

use axum::{Json, extract::State};
use serde::Serialize;
use tracing::instrument;

use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct JokeView {
    pub joke: String,
}

/// Fetch a joke. Always succeeds; failures produce the fallback line.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<JokeView> {
    Json(JokeView {
        joke: state.jokes().joke_or_fallback().await,
    })
}
