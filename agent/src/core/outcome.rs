//! Classification of remote API responses.
//!
//! Status codes and bodies are mapped to outcome values here; callers decide
//! what to log and which exit code to use.

use serde_json::Value;

use crate::exit_codes;

/// Claim status that allows the agent to post.
pub const CLAIMED: &str = "claimed";

/// HTTP status the remote service uses for rate limiting.
pub const TOO_MANY_REQUESTS: u16 = 429;

/// Interpretation of `GET /api/v1/agents/status`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusCheck {
    /// Agent is claimed; posting may proceed.
    Claimed,
    /// Agent is not (yet) claimed. `status` is empty when the body had none.
    Unclaimed { status: String },
    /// The status endpoint itself rate-limited the run.
    RateLimited,
    /// Any other non-success response.
    Failed { code: u16, body: String },
}

/// Final result of one `agent post` run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// No post attempted because the agent is not claimed.
    Skipped { status: String },
    /// Post accepted by the remote service.
    Posted { code: u16 },
    /// Remote service rate-limited the run. Not a failure.
    RateLimited,
    /// Post refused with a non-success status other than 429.
    Rejected { code: u16, body: String },
}

impl DispatchOutcome {
    pub fn exit_code(&self) -> i32 {
        match self {
            DispatchOutcome::Rejected { .. } => exit_codes::FAILURE,
            DispatchOutcome::Skipped { .. }
            | DispatchOutcome::Posted { .. }
            | DispatchOutcome::RateLimited => exit_codes::OK,
        }
    }
}

pub fn is_success(code: u16) -> bool {
    (200..300).contains(&code)
}

/// Extract the `status` string from a status response body.
///
/// Bodies that are not JSON, or lack a string `status`, yield an empty string.
pub fn parse_claim_status(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(|value| value.get("status"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or_default()
}

pub fn classify_status_response(code: u16, body: &str) -> StatusCheck {
    if code == TOO_MANY_REQUESTS {
        return StatusCheck::RateLimited;
    }
    if !is_success(code) {
        return StatusCheck::Failed {
            code,
            body: body.to_string(),
        };
    }
    let status = parse_claim_status(body);
    if status == CLAIMED {
        StatusCheck::Claimed
    } else {
        StatusCheck::Unclaimed { status }
    }
}

/// Map a create-post response to an outcome. The body is only kept for
/// rejected posts.
pub fn classify_post_response(code: u16, body: &str) -> DispatchOutcome {
    if code == TOO_MANY_REQUESTS {
        DispatchOutcome::RateLimited
    } else if is_success(code) {
        DispatchOutcome::Posted { code }
    } else {
        DispatchOutcome::Rejected {
            code,
            body: body.to_string(),
        }
    }
}
