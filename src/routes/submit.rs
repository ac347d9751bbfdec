use axum::Json;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode, header};

use crate::error::SubmitError;
use crate::models::{ApiResponse, SubmissionInput};
use crate::notifier::{self, Delivery};
use crate::state::SharedState;
use crate::submission::{parser, pipeline};

pub const SUCCESS_MESSAGE: &str = "Report submitted successfully! Expect a reply on Discord.";

pub async fn submit(
    State(state): State<SharedState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<ApiResponse>, SubmitError> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok());

    let input = parser::parse_body(content_type, &body).map_err(|e| {
        tracing::debug!("Rejected submission body: {e}");
        SubmitError::MalformedRequest(e)
    })?;

    log_received(&input);

    let report = pipeline::run(&state, &headers, &input)?;

    match notifier::deliver(state.notifier.as_deref(), &report).await {
        Delivery::Delivered => tracing::info!("Discord notification sent"),
        Delivery::Skipped => tracing::warn!("Notification skipped: no webhook configured"),
        Delivery::Failed(e) => tracing::error!(error = ?e, "Failed to send notification: {e}"),
    }

    Ok(Json(ApiResponse::ok(SUCCESS_MESSAGE)))
}

/// Preflight. CORS headers are added by the router for every response.
pub async fn preflight() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed() -> SubmitError {
    SubmitError::MethodNotAllowed
}

fn log_received(input: &SubmissionInput) {
    let discord_id = input
        .discord_id()
        .map(mask_tail)
        .unwrap_or_else(|| "missing".to_string());
    let name = if input.name_static().is_some() {
        "present"
    } else {
        "missing"
    };

    tracing::info!(
        discord_id = %discord_id,
        name_static = name,
        department = input.department().unwrap_or("missing"),
        "Form data received"
    );
}

/// `***` followed by the last four characters.
fn mask_tail(value: &str) -> String {
    let tail: String = value
        .chars()
        .rev()
        .take(4)
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    format!("***{tail}")
}
