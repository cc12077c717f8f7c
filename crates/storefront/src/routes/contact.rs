//! Contact form route handler.

use axum::{Json, extract::rejection::JsonRejection};
use serde::Serialize;
use tracing::instrument;

use crate::contact::{ContactForm, SUBMITTED_MESSAGE};
use crate::error::Result;

/// Acknowledgement returned for a valid form.
#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: &'static str,
}

/// Validate a contact form. Nothing is delivered.
#[instrument(skip(form))]
pub async fn submit(
    form: std::result::Result<Json<ContactForm>, JsonRejection>,
) -> Result<Json<ContactResponse>> {
    let Json(form) = form?;
    let submission = form.validate()?;
    tracing::info!(domain = submission.email.domain(), "Contact form submitted");
    Ok(Json(ContactResponse {
        message: SUBMITTED_MESSAGE,
    }))
}
