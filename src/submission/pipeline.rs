use axum::http::HeaderMap;
use chrono::{SecondsFormat, Utc};

use crate::error::SubmitError;
use crate::models::{SanitizedSubmission, SubmissionInput};
use crate::state::AppState;

use super::abuse;
use super::fields;
use super::metadata;
use super::sanitize::{sanitize, sanitize_str};

/// Screen a parsed report: rate limit, abuse heuristics, validation, then sanitization.
/// The first failing stage ends the request.
pub fn run(
    state: &AppState,
    headers: &HeaderMap,
    input: &SubmissionInput,
) -> Result<SanitizedSubmission, SubmitError> {
    let client_ip = metadata::client_ip(headers);
    let user_agent = metadata::user_agent(headers);

    if state.submission_limiter.is_rate_limited(&client_ip) {
        tracing::warn!(client_ip = %client_ip, "Submission rate limited");
        return Err(SubmitError::RateLimited {
            window: state.submission_limiter.window(),
        });
    }

    if abuse::is_suspicious(input, user_agent) {
        tracing::warn!(
            client_ip = %client_ip,
            user_agent = user_agent.unwrap_or("missing"),
            "Suspicious submission rejected"
        );
        return Err(SubmitError::SuspiciousActivity);
    }

    let validation = fields::validate(input);
    if !validation.is_valid() {
        let failed: Vec<&str> = validation.errors.iter().map(|e| e.field.as_str()).collect();
        tracing::info!(?failed, "Submission failed validation");
        return Err(SubmitError::ValidationFailed(validation.errors));
    }

    Ok(sanitize_submission(input, client_ip, user_agent))
}

pub fn sanitize_submission(
    input: &SubmissionInput,
    client_ip: String,
    user_agent: Option<&str>,
) -> SanitizedSubmission {
    SanitizedSubmission {
        discord_id: sanitize(&input.discord_id),
        name_static: sanitize(&input.name_static),
        rank: sanitize(&input.rank),
        department: sanitize(&input.department),
        tablet_screenshot: sanitize(&input.tablet_screenshot),
        inventory_screenshot: sanitize(&input.inventory_screenshot),
        reason: sanitize(&input.reason),
        client_ip: sanitize_str(&client_ip),
        user_agent: user_agent.unwrap_or("unknown").to_string(),
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        fill_time: input
            .fill_time_ms()
            .filter(|ms| *ms > 0.0)
            .map(|ms| ms as u64)
            .unwrap_or(0),
    }
}
