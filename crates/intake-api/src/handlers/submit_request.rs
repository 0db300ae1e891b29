//! The submission pipeline: parse → validate → upload → notify → respond.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use chrono::Utc;

use intake_core::models::{RawFile, SubmitResponse, Submission};
use intake_core::{validate, AppError};
use intake_notify::{dispatch, format_summary, EMAIL_SUBJECT};
use intake_storage::upload_batch;

use crate::error::HttpAppError;
use crate::state::AppState;

/// Handle `POST /api/submit-request`.
///
/// Linear pipeline with no retry and no rollback: any stage failure skips the
/// remaining stages and surfaces as a JSON error payload. Files that were
/// already uploaded when a later stage fails stay in storage.
#[tracing::instrument(skip(state, multipart), fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn submit_request(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let production = state.config.is_production();
    run_pipeline(state, multipart)
        .await
        .map_err(|err| err.in_production(production))
}

async fn run_pipeline(
    state: Arc<AppState>,
    multipart: Multipart,
) -> Result<Json<SubmitResponse>, HttpAppError> {
    let submission = parse_submission(multipart).await?;
    tracing::debug!(
        attachments = submission.attachments.len(),
        department = %submission.department,
        "Submission received"
    );

    validate(&submission, &state.config.upload)?;

    let submitted_at = Utc::now().timestamp_millis();
    let uploaded = upload_batch(
        state.storage.as_ref(),
        submitted_at,
        &submission.attachments,
    )
    .await?;

    let summary = format_summary(&submission, &uploaded);
    dispatch(
        state.chat.as_ref(),
        state.email.as_ref(),
        EMAIL_SUBJECT,
        &summary,
    )
    .await?;

    tracing::info!(files = uploaded.len(), "Submission processed");
    Ok(Json(SubmitResponse::success(&uploaded)))
}

/// Collect scalar fields and `files` parts into a [`Submission`].
///
/// Empty optional fields become `None`; unknown fields are ignored. A
/// non-numeric `quantity` is rejected here rather than silently dropped.
async fn parse_submission(mut multipart: Multipart) -> Result<Submission, HttpAppError> {
    let mut submission = Submission::default();

    while let Some(field) = multipart.next_field().await.map_err(malformed)? {
        let name = field.name().unwrap_or_default().to_string();
        if name == "files" {
            let original_name = field.file_name().unwrap_or("file").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(malformed)?;
            submission.attachments.push(RawFile {
                original_name,
                content_type,
                data,
            });
            continue;
        }

        let value = field.text().await.map_err(malformed)?;
        match name.as_str() {
            "fullName" => submission.full_name = value,
            "email" => submission.email = value,
            "phone" => submission.phone = non_empty(value),
            "department" => submission.department = value,
            "eventName" => submission.event_name = non_empty(value),
            "quantity" => {
                submission.quantity = match non_empty(value) {
                    Some(raw) => Some(raw.trim().parse().map_err(|_| {
                        AppError::Validation(format!("Invalid value for quantity: '{}'", raw))
                    })?),
                    None => None,
                }
            }
            "projectType" => submission.project_type = value,
            "projectDescription" => submission.project_description = non_empty(value),
            other => tracing::debug!(field = other, "Ignoring unknown form field"),
        }
    }

    Ok(submission)
}

fn non_empty(value: String) -> Option<String> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

/// A body cut off by the body-limit layers surfaces as a multipart read
/// error carrying a 413 status; everything else is a malformed form.
fn malformed(err: axum::extract::multipart::MultipartError) -> HttpAppError {
    if err.status() == axum::http::StatusCode::PAYLOAD_TOO_LARGE {
        return HttpAppError::from(AppError::PayloadTooLarge);
    }
    HttpAppError::from(AppError::Validation(format!(
        "Malformed multipart body: {}",
        err
    )))
}
