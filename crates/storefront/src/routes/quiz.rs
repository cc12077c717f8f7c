//! Quiz route handlers.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::quiz::{AnswerOutcome, QuizView};
use crate::state::AppState;

/// Answer selection request body.
#[derive(Debug, Deserialize)]
pub struct AnswerRequest {
    pub index: usize,
}

/// Feedback plus the refreshed screen.
#[derive(Debug, Serialize)]
pub struct AnswerResponse {
    pub outcome: AnswerOutcome,
    pub score: u32,
    pub view: QuizView,
}

/// Current quiz screen.
#[instrument(skip(state))]
pub async fn show(State(state): State<AppState>) -> Json<QuizView> {
    Json(state.quiz().lock().await.view())
}

/// Select an answer for the current question.
#[instrument(skip(state))]
pub async fn answer(
    State(state): State<AppState>,
    body: std::result::Result<Json<AnswerRequest>, JsonRejection>,
) -> Result<Json<AnswerResponse>> {
    let Json(body) = body?;
    let mut quiz = state.quiz().lock().await;
    let outcome = quiz.select_answer(body.index)?;
    Ok(Json(AnswerResponse {
        outcome,
        score: quiz.score(),
        view: quiz.view(),
    }))
}

/// Move to the next question, the score screen, or a new round.
#[instrument(skip(state))]
pub async fn next(State(state): State<AppState>) -> Result<Json<QuizView>> {
    let view = state.quiz().lock().await.next()?;
    Ok(Json(view))
}

/// Start over from the first question.
#[instrument(skip(state))]
pub async fn restart(State(state): State<AppState>) -> Json<QuizView> {
    let mut quiz = state.quiz().lock().await;
    quiz.restart();
    Json(quiz.view())
}
