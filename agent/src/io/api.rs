//! Moltbook API abstraction.
//!
//! The [`AgentApi`] trait decouples dispatch orchestration from the HTTP
//! transport. Tests use scripted implementations that return predetermined
//! responses without touching the network.

use anyhow::{Context, Result};
use reqwest::Url;
use reqwest::blocking::{Client, Response};
use tracing::{debug, instrument};

use crate::post::PostRequest;

pub const STATUS_PATH: &str = "/api/v1/agents/status";
pub const POSTS_PATH: &str = "/api/v1/posts";

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// Status code and raw body of one API response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub code: u16,
    pub body: String,
}

/// Abstraction over the remote agent API.
///
/// Implementations return `Err` only for transport failures; every HTTP
/// status, including errors, comes back as an [`ApiResponse`].
pub trait AgentApi {
    /// `GET /api/v1/agents/status`.
    fn status(&self) -> Result<ApiResponse>;

    /// `POST /api/v1/posts` with `request` as the JSON body.
    fn create_post(&self, request: &PostRequest) -> Result<ApiResponse>;
}

/// [`AgentApi`] over HTTPS with a static bearer token.
pub struct HttpApi {
    client: Client,
    base_url: Url,
    api_key: String,
}

impl HttpApi {
    pub fn new(base_url: &str, api_key: &str) -> Result<Self> {
        let base_url =
            Url::parse(base_url).with_context(|| format!("parse api base url {base_url}"))?;
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .context("build http client")?;
        Ok(Self {
            client,
            base_url,
            api_key: api_key.to_string(),
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base_url
            .join(path)
            .with_context(|| format!("build url for {path}"))
    }
}

impl AgentApi for HttpApi {
    #[instrument(skip_all)]
    fn status(&self) -> Result<ApiResponse> {
        let url = self.endpoint(STATUS_PATH)?;
        debug!(%url, "requesting agent status");
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .send()
            .context("request agent status")?;
        read_response(response).context("read agent status response")
    }

    #[instrument(skip_all, fields(submolt = request.submolt()))]
    fn create_post(&self, request: &PostRequest) -> Result<ApiResponse> {
        let url = self.endpoint(POSTS_PATH)?;
        debug!(%url, "creating post");
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .context("create post")?;
        read_response(response).context("read create post response")
    }
}

fn read_response(response: Response) -> Result<ApiResponse> {
    let code = response.status().as_u16();
    let body = response.text().context("read response body")?;
    debug!(code, body_bytes = body.len(), "response received");
    Ok(ApiResponse { code, body })
}
