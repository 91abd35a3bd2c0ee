//! Agent configuration stored in `.moltbook/agent.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow};
use reqwest::Url;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::io::env::Env;

/// Config path used when neither `--config` nor [`CONFIG_PATH_VAR`] is given.
pub const DEFAULT_CONFIG_PATH: &str = ".moltbook/agent.toml";
/// Variable naming an alternative config file.
pub const CONFIG_PATH_VAR: &str = "MOLTBOOK_CONFIG";
/// Variable overriding `api_base_url`.
pub const API_BASE_VAR: &str = "MOLTBOOK_API_BASE";

/// Agent configuration (TOML).
///
/// Every field is optional. A missing file is equivalent to an empty one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct AgentConfig {
    /// Scheme and host of the Moltbook API. Endpoint paths are appended.
    pub api_base_url: String,

    /// Environment variable holding the bearer token.
    pub credential_env: String,

    /// Literal defaults used when no source provides a field.
    pub defaults: PostDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct PostDefaults {
    pub submolt: String,
    pub title: String,
    pub content: String,
}

impl Default for PostDefaults {
    fn default() -> Self {
        Self {
            submolt: "general".to_string(),
            title: "Hello from LupitaAI 👋".to_string(),
            content: "Automated post from LupitaAI.".to_string(),
        }
    }
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://www.moltbook.com".to_string(),
            credential_env: "MOLTBOOK_API_KEY".to_string(),
            defaults: PostDefaults::default(),
        }
    }
}

impl AgentConfig {
    pub fn validate(&self) -> Result<()> {
        let url = Url::parse(&self.api_base_url)
            .with_context(|| format!("api_base_url is not a valid url: {}", self.api_base_url))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(anyhow!("api_base_url must use http or https"));
        }
        if self.credential_env.trim().is_empty() {
            return Err(anyhow!("credential_env must be non-empty"));
        }
        if self.defaults.submolt.trim().is_empty() {
            return Err(anyhow!("defaults.submolt must be non-empty"));
        }
        if self.defaults.title.trim().is_empty() {
            return Err(anyhow!("defaults.title must be non-empty"));
        }
        Ok(())
    }

    /// Apply environment overrides ([`API_BASE_VAR`]) and re-validate.
    pub fn with_env_overrides<E: Env>(mut self, env: &E) -> Result<Self> {
        if let Some(base) = env.var(API_BASE_VAR).filter(|v| !v.trim().is_empty()) {
            debug!(api_base_url = %base, "api base overridden from environment");
            self.api_base_url = base.trim().to_string();
        }
        self.validate()
            .with_context(|| format!("invalid config after applying {API_BASE_VAR}"))?;
        Ok(self)
    }
}

/// Pick the config path: explicit flag, then [`CONFIG_PATH_VAR`], then
/// [`DEFAULT_CONFIG_PATH`].
pub fn config_path<E: Env>(explicit: Option<&Path>, env: &E) -> PathBuf {
    if let Some(path) = explicit {
        return path.to_path_buf();
    }
    env.var(CONFIG_PATH_VAR)
        .filter(|v| !v.trim().is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH))
}

/// Load config from a TOML file.
///
/// If the file is missing, returns `AgentConfig::default()`.
pub fn load_config(path: &Path) -> Result<AgentConfig> {
    if !path.exists() {
        debug!(path = %path.display(), "config file missing, using defaults");
        let cfg = AgentConfig::default();
        cfg.validate()?;
        return Ok(cfg);
    }
    let contents = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: AgentConfig =
        toml::from_str(&contents).with_context(|| format!("parse {}", path.display()))?;
    cfg.validate()
        .with_context(|| format!("validate {}", path.display()))?;
    Ok(cfg)
}
