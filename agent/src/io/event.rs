//! Reader for the triggering event's data file (`GITHUB_EVENT_PATH`).
//!
//! Only `client_payload` is of interest; it is present on
//! `repository_dispatch` events. Any problem reading or parsing the file is
//! logged and treated as an empty payload.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::debug;

/// Variable holding the path to the event data file.
pub const EVENT_PATH_VAR: &str = "GITHUB_EVENT_PATH";

/// The `client_payload` object of a dispatch event, if any.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EventPayload {
    client_payload: Option<Map<String, Value>>,
}

impl EventPayload {
    /// String value of `client_payload.<key>`. Non-string values are ignored.
    pub fn field(&self, key: &str) -> Option<&str> {
        self.client_payload.as_ref()?.get(key)?.as_str()
    }

    pub fn is_empty(&self) -> bool {
        self.client_payload.as_ref().is_none_or(Map::is_empty)
    }
}

/// Parse an event document. Fails only when `raw` is not JSON.
pub fn parse_event_payload(raw: &str) -> Result<EventPayload> {
    let value: Value = serde_json::from_str(raw).context("parse event json")?;
    let client_payload = value
        .get("client_payload")
        .and_then(Value::as_object)
        .cloned();
    Ok(EventPayload { client_payload })
}

/// Load the payload from `path`, falling back to an empty payload on any error.
pub fn load_event_payload(path: &Path) -> EventPayload {
    match read_event_payload(path) {
        Ok(payload) => {
            debug!(path = %path.display(), empty = payload.is_empty(), "event payload loaded");
            payload
        }
        Err(err) => {
            debug!(path = %path.display(), err = %format!("{err:#}"), "ignoring event payload");
            EventPayload::default()
        }
    }
}

fn read_event_payload(path: &Path) -> Result<EventPayload> {
    let raw = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    parse_event_payload(&raw).with_context(|| format!("parse {}", path.display()))
}
