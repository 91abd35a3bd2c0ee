//! Resolution of the post to submit from layered configuration.
//!
//! Each field is resolved independently by walking
//! [`PRECEDENCE`](crate::core::precedence::PRECEDENCE) and taking the first
//! non-blank value, falling back to the configured literal default.

use std::path::Path;

use anyhow::{Context, Result};
use tracing::debug;

use crate::core::precedence::{PRECEDENCE, Source, pick_first};
use crate::io::config::{AgentConfig, PostDefaults};
use crate::io::env::Env;
use crate::io::event::{EVENT_PATH_VAR, EventPayload, load_event_payload};
use crate::post::{Field, PostRequest};

/// Resolve the post using the process-provided event file and environment.
pub fn resolve_from_env<E: Env>(env: &E, config: &AgentConfig) -> Result<PostRequest> {
    let payload = match env.var(EVENT_PATH_VAR).filter(|p| !p.trim().is_empty()) {
        Some(path) => load_event_payload(Path::new(&path)),
        None => {
            debug!("{EVENT_PATH_VAR} not set, no event payload");
            EventPayload::default()
        }
    };
    resolve_post_request(env, &payload, &config.defaults)
}

/// Resolve all three fields against `payload`, `env` and `defaults`.
pub fn resolve_post_request<E: Env>(
    env: &E,
    payload: &EventPayload,
    defaults: &PostDefaults,
) -> Result<PostRequest> {
    let submolt = resolve_field(Field::Submolt, env, payload, &defaults.submolt);
    let title = resolve_field(Field::Title, env, payload, &defaults.title);
    let content = resolve_field(Field::Content, env, payload, &defaults.content);
    PostRequest::new(submolt, title, content).context("build post request")
}

/// Resolve one field. The literal default is used (trimmed) when no source
/// yields a non-blank value.
pub fn resolve_field<E: Env>(
    field: Field,
    env: &E,
    payload: &EventPayload,
    default: &str,
) -> String {
    let candidates = PRECEDENCE
        .iter()
        .map(|&source| (source, lookup(source, field, env, payload)));
    match pick_first(candidates) {
        Some((source, value)) => {
            debug!(field = field.key(), ?source, "field resolved");
            value
        }
        None => {
            debug!(field = field.key(), "field resolved from literal default");
            default.trim().to_string()
        }
    }
}

fn lookup<E: Env>(source: Source, field: Field, env: &E, payload: &EventPayload) -> Option<String> {
    match source.env_key(field) {
        Some(key) => env.var(&key),
        None => payload.field(field.key()).map(str::to_string),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::event::parse_event_payload;
    use crate::test_support::{MapEnv, event_file};

    fn payload_with(field: Field, value: &str) -> EventPayload {
        let mut client_payload = serde_json::Map::new();
        client_payload.insert(field.key().to_string(), value.into());
        let raw = serde_json::json!({ "client_payload": client_payload }).to_string();
        parse_event_payload(&raw).expect("payload")
    }

    /// Env populated at every env-backed precedence level for `field`.
    fn env_at_every_level(field: Field) -> MapEnv {
        let name = field.env_name();
        MapEnv::new()
            .with(&format!("PAYLOAD_{name}"), "payload-env")
            .with(&format!("INPUT_{name}"), "input")
            .with(name, "plain")
            .with(&format!("DEFAULT_{name}"), "schedule")
    }

    #[test]
    fn event_payload_wins_over_every_other_source() {
        for field in Field::ALL {
            let env = env_at_every_level(field);
            let payload = payload_with(field, "event");
            assert_eq!(
                resolve_field(field, &env, &payload, "literal"),
                "event",
                "{field:?}"
            );
        }
    }

    #[test]
    fn each_level_wins_when_higher_levels_absent() {
        let levels = ["PAYLOAD_", "INPUT_", "", "DEFAULT_"];
        for field in Field::ALL {
            let name = field.env_name();
            for (idx, prefix) in levels.iter().enumerate() {
                let mut env = MapEnv::new();
                for lower in &levels[idx..] {
                    let key = format!("{lower}{name}");
                    env = env.with(&key, &key);
                }
                let expected = format!("{prefix}{name}");
                assert_eq!(
                    resolve_field(field, &env, &EventPayload::default(), "literal"),
                    expected
                );
            }
        }
    }

    #[test]
    fn literal_default_used_when_nothing_set() {
        let defaults = PostDefaults::default();
        let request =
            resolve_post_request(&MapEnv::new(), &EventPayload::default(), &defaults)
                .expect("resolve");
        assert_eq!(request.submolt(), "general");
        assert_eq!(request.title(), defaults.title);
        assert_eq!(request.content(), defaults.content);
    }

    #[test]
    fn whitespace_payload_falls_through() {
        let env = MapEnv::new().with("INPUT_TITLE", "From input");
        let payload = payload_with(Field::Title, "   \n");
        assert_eq!(
            resolve_field(Field::Title, &env, &payload, "literal"),
            "From input"
        );
    }

    #[test]
    fn whitespace_env_values_fall_through() {
        let env = MapEnv::new()
            .with("INPUT_SUBMOLT", "  ")
            .with("SUBMOLT", "")
            .with("DEFAULT_SUBMOLT", " scheduled ");
        assert_eq!(
            resolve_field(Field::Submolt, &env, &EventPayload::default(), "general"),
            "scheduled"
        );
    }

    #[test]
    fn fields_resolve_independently() {
        let env = MapEnv::new()
            .with("INPUT_TITLE", "Manual title")
            .with("DEFAULT_CONTENT", "Scheduled body");
        let payload = payload_with(Field::Submolt, "rust");
        let request = resolve_post_request(&env, &payload, &PostDefaults::default())
            .expect("resolve");
        assert_eq!(request.submolt(), "rust");
        assert_eq!(request.title(), "Manual title");
        assert_eq!(request.content(), "Scheduled body");
    }

    #[test]
    fn resolve_from_env_reads_event_file() {
        let file = event_file(r#"{"client_payload":{"title":"Dispatched","content":"Hi"}}"#)
            .expect("event file");
        let env = MapEnv::new()
            .with(EVENT_PATH_VAR, &file.path().display().to_string())
            .with("INPUT_TITLE", "Manual");
        let request = resolve_from_env(&env, &AgentConfig::default()).expect("resolve");
        assert_eq!(request.title(), "Dispatched");
        assert_eq!(request.content(), "Hi");
        assert_eq!(request.submolt(), "general");
    }

    #[test]
    fn resolve_from_env_ignores_broken_event_file() {
        let file = event_file("{ definitely not json").expect("event file");
        let env = MapEnv::new()
            .with(EVENT_PATH_VAR, &file.path().display().to_string())
            .with("INPUT_TITLE", "Manual");
        let request = resolve_from_env(&env, &AgentConfig::default()).expect("resolve");
        assert_eq!(request.title(), "Manual");
    }

    #[test]
    fn resolve_from_env_ignores_missing_event_file() {
        let temp = tempfile::tempdir().expect("tempdir");
        let missing = temp.path().join("event.json");
        let env = MapEnv::new()
            .with(EVENT_PATH_VAR, &missing.display().to_string())
            .with("TITLE", "Plain");
        let request = resolve_from_env(&env, &AgentConfig::default()).expect("resolve");
        assert_eq!(request.title(), "Plain");
    }

    #[test]
    fn configured_defaults_apply() {
        let config = AgentConfig {
            defaults: PostDefaults {
                submolt: "announcements".to_string(),
                ..PostDefaults::default()
            },
            ..AgentConfig::default()
        };
        let request = resolve_from_env(&MapEnv::new(), &config).expect("resolve");
        assert_eq!(request.submolt(), "announcements");
    }
}
