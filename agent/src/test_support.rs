//! Test-only doubles for the environment and the remote API.

use std::cell::RefCell;
use std::collections::HashMap;
use std::io::Write;

use anyhow::{Context, Result, anyhow};
use tempfile::NamedTempFile;

use crate::io::api::{AgentApi, ApiResponse};
use crate::io::env::Env;
use crate::post::PostRequest;

/// Fixed environment backed by a map.
#[derive(Debug, Clone, Default)]
pub struct MapEnv {
    vars: HashMap<String, String>,
}

impl MapEnv {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.vars.insert(key.to_string(), value.to_string());
        self
    }
}

impl Env for MapEnv {
    fn var(&self, key: &str) -> Option<String> {
        self.vars.get(key).cloned()
    }
}

/// Build an [`ApiResponse`].
pub fn response(code: u16, body: &str) -> ApiResponse {
    ApiResponse {
        code,
        body: body.to_string(),
    }
}

/// A call observed by [`ScriptedApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    Status,
    CreatePost(PostRequest),
}

/// [`AgentApi`] returning predetermined responses and recording calls.
///
/// A missing scripted response behaves like a transport failure.
#[derive(Debug, Default)]
pub struct ScriptedApi {
    status: Option<ApiResponse>,
    post: Option<ApiResponse>,
    calls: RefCell<Vec<ApiCall>>,
}

impl ScriptedApi {
    pub fn new(status: ApiResponse) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// An API whose every call fails at the transport level.
    pub fn unreachable() -> Self {
        Self::default()
    }

    pub fn with_post(mut self, post: ApiResponse) -> Self {
        self.post = Some(post);
        self
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.borrow().clone()
    }
}

impl AgentApi for ScriptedApi {
    fn status(&self) -> Result<ApiResponse> {
        self.calls.borrow_mut().push(ApiCall::Status);
        self.status
            .clone()
            .ok_or_else(|| anyhow!("scripted status: connection refused"))
    }

    fn create_post(&self, request: &PostRequest) -> Result<ApiResponse> {
        self.calls
            .borrow_mut()
            .push(ApiCall::CreatePost(request.clone()));
        self.post
            .clone()
            .ok_or_else(|| anyhow!("scripted create_post: connection refused"))
    }
}

/// Write `contents` to a temporary event data file.
pub fn event_file(contents: &str) -> Result<NamedTempFile> {
    let mut file = NamedTempFile::new().context("create event file")?;
    file.write_all(contents.as_bytes())
        .context("write event file")?;
    file.flush().context("flush event file")?;
    Ok(file)
}
