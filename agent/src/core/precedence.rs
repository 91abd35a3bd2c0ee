//! Deterministic precedence rules for post fields.

use crate::post::Field;

/// A place a field value can come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// `client_payload.<field>` in the triggering event's data file.
    EventPayload,
    /// `PAYLOAD_<FIELD>`, set by workflows that forward the dispatch payload.
    PayloadEnv,
    /// `INPUT_<FIELD>` from a manual `workflow_dispatch`.
    WorkflowInput,
    /// Plain `<FIELD>`.
    PlainEnv,
    /// `DEFAULT_<FIELD>`, the schedule fallback.
    ScheduleDefault,
}

/// All sources, highest precedence first. The literal default is applied by
/// the caller when none of these yields a value.
pub const PRECEDENCE: [Source; 5] = [
    Source::EventPayload,
    Source::PayloadEnv,
    Source::WorkflowInput,
    Source::PlainEnv,
    Source::ScheduleDefault,
];

impl Source {
    /// Environment variable consulted for `field`, or `None` for the event payload.
    pub fn env_key(self, field: Field) -> Option<String> {
        let name = field.env_name();
        match self {
            Source::EventPayload => None,
            Source::PayloadEnv => Some(format!("PAYLOAD_{name}")),
            Source::WorkflowInput => Some(format!("INPUT_{name}")),
            Source::PlainEnv => Some(name.to_string()),
            Source::ScheduleDefault => Some(format!("DEFAULT_{name}")),
        }
    }
}

/// Trimmed `value`, or `None` when it is empty or whitespace only.
pub fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then_some(trimmed)
}

/// Select the first candidate with a non-blank value.
///
/// Candidates are consumed lazily, so lookups behind a winning candidate are
/// never evaluated. Returns the candidate's tag with its trimmed value.
pub fn pick_first<T, I>(candidates: I) -> Option<(T, String)>
where
    I: IntoIterator<Item = (T, Option<String>)>,
{
    candidates.into_iter().find_map(|(tag, value)| {
        let value = value?;
        non_blank(&value).map(|trimmed| (tag, trimmed.to_string()))
    })
}
