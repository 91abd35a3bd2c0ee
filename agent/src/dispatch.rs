//! Orchestration for `agent post` and `agent status`.
//!
//! The status check always completes before the post is attempted, and at
//! most one post is attempted per run. Nothing is retried.

use anyhow::{Result, bail};
use serde_json::Value;
use tracing::{error, info, instrument, warn};

use crate::core::outcome::{
    DispatchOutcome, StatusCheck, classify_post_response, classify_status_response,
};
use crate::io::api::AgentApi;
use crate::post::PostRequest;

/// Query the claim status of the agent.
///
/// Non-success responses other than 429 are errors.
#[instrument(skip_all)]
pub fn check_status<A: AgentApi>(api: &A) -> Result<StatusCheck> {
    let response = api.status()?;
    info!(code = response.code, body = %render_body(&response.body), "agent status");
    match classify_status_response(response.code, &response.body) {
        StatusCheck::Failed { code, body } => {
            bail!("status check failed with HTTP {code}: {}", render_body(&body))
        }
        check => Ok(check),
    }
}

/// Check the claim status and, if claimed, submit `request`.
#[instrument(skip_all)]
pub fn dispatch<A: AgentApi>(api: &A, request: &PostRequest) -> Result<DispatchOutcome> {
    info!(
        submolt = request.submolt(),
        title = request.title(),
        content_preview = request.content_preview(),
        "posting with resolved fields"
    );

    match check_status(api)? {
        StatusCheck::Claimed => {}
        StatusCheck::Unclaimed { status } => {
            info!(status = %status, "agent not claimed yet, skipping post");
            return Ok(DispatchOutcome::Skipped { status });
        }
        StatusCheck::RateLimited => {
            warn!("status check rate-limited, skipping post");
            return Ok(DispatchOutcome::RateLimited);
        }
        StatusCheck::Failed { code, .. } => {
            bail!("status check failed with HTTP {code}")
        }
    }

    let response = api.create_post(request)?;
    let outcome = classify_post_response(response.code, &response.body);
    match &outcome {
        DispatchOutcome::Posted { code } => {
            info!(code, body = %render_body(&response.body), "post created");
        }
        DispatchOutcome::RateLimited => {
            warn!(body = %render_body(&response.body), "rate-limited by moltbook, treating as success");
        }
        DispatchOutcome::Rejected { code, body } => {
            error!(code, body = %render_body(body), "post rejected");
        }
        DispatchOutcome::Skipped { .. } => {}
    }
    Ok(outcome)
}

/// Compact JSON when `body` decodes, trimmed raw text otherwise.
fn render_body(body: &str) -> String {
    match serde_json::from_str::<Value>(body) {
        Ok(value) => value.to_string(),
        Err(_) => body.trim().to_string(),
    }
}
