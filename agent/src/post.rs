//! The post submitted by a single run.

use anyhow::{Result, bail};
use serde::Serialize;

/// Number of characters of `content` shown in run logs.
pub const PREVIEW_CHARS: usize = 120;

/// A resolvable post field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Submolt,
    Title,
    Content,
}

impl Field {
    pub const ALL: [Field; 3] = [Field::Submolt, Field::Title, Field::Content];

    /// Key used in the dispatch payload and the request body.
    pub fn key(self) -> &'static str {
        match self {
            Field::Submolt => "submolt",
            Field::Title => "title",
            Field::Content => "content",
        }
    }

    /// Suffix used to build environment variable names (`INPUT_TITLE`, ...).
    pub fn env_name(self) -> &'static str {
        match self {
            Field::Submolt => "SUBMOLT",
            Field::Title => "TITLE",
            Field::Content => "CONTENT",
        }
    }
}

/// Post body sent to `POST /api/v1/posts`.
///
/// Built once per run and never mutated. `submolt` and `title` are
/// guaranteed non-blank; `content` may be empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PostRequest {
    submolt: String,
    title: String,
    content: String,
}

impl PostRequest {
    pub fn new(
        submolt: impl Into<String>,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Result<Self> {
        let submolt = submolt.into();
        let title = title.into();
        if submolt.trim().is_empty() {
            bail!("submolt must be non-empty");
        }
        if title.trim().is_empty() {
            bail!("title must be non-empty");
        }
        Ok(Self {
            submolt,
            title,
            content: content.into(),
        })
    }

    pub fn submolt(&self) -> &str {
        &self.submolt
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    /// First [`PREVIEW_CHARS`] characters of `content`.
    pub fn content_preview(&self) -> &str {
        match self.content.char_indices().nth(PREVIEW_CHARS) {
            Some((idx, _)) => &self.content[..idx],
            None => &self.content,
        }
    }
}
