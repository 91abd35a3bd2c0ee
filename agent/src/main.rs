//! Moltbook poster for GitHub Actions.
//!
//! Resolves a post from the dispatch payload, workflow inputs, environment and
//! schedule defaults, then submits it if the agent account has been claimed.
//! The exit code is the job step's result.

use std::path::PathBuf;

use agent::core::outcome::StatusCheck;
use agent::dispatch::{check_status, dispatch};
use agent::exit_codes;
use agent::io::api::HttpApi;
use agent::io::config::{AgentConfig, config_path, load_config};
use agent::io::env::{Env, ProcessEnv, require_secret};
use agent::logging;
use agent::resolve::resolve_from_env;
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::debug;

#[derive(Parser)]
#[command(
    name = "agent",
    version,
    about = "Post to Moltbook from a GitHub Actions job"
)]
struct Cli {
    /// Config file (default: `$MOLTBOOK_CONFIG` or `.moltbook/agent.toml`).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check the claim status and submit one post if claimed.
    Post,
    /// Print the agent's claim status.
    Status,
    /// Print the resolved post as JSON without contacting the API.
    Resolve,
}

fn main() {
    logging::init();
    match run() {
        Ok(code) => std::process::exit(code),
        Err(err) => {
            eprintln!("{:#}", err);
            std::process::exit(exit_codes::FAILURE);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();
    let env = ProcessEnv;
    let path = config_path(cli.config.as_deref(), &env);
    debug!(path = %path.display(), "loading config");
    let config = load_config(&path)?.with_env_overrides(&env)?;
    match cli.command {
        Command::Post => cmd_post(&env, &config),
        Command::Status => cmd_status(&env, &config),
        Command::Resolve => cmd_resolve(&env, &config),
    }
}

fn cmd_post<E: Env>(env: &E, config: &AgentConfig) -> Result<i32> {
    let api = connect(env, config)?;
    let request = resolve_from_env(env, config)?;
    let outcome = dispatch(&api, &request)?;
    debug!(?outcome, "dispatch finished");
    Ok(outcome.exit_code())
}

fn cmd_status<E: Env>(env: &E, config: &AgentConfig) -> Result<i32> {
    let api = connect(env, config)?;
    match check_status(&api)? {
        StatusCheck::Claimed => println!("claimed"),
        StatusCheck::Unclaimed { status } => println!("{status}"),
        StatusCheck::RateLimited => println!("rate-limited"),
        StatusCheck::Failed { code, .. } => println!("failed: HTTP {code}"),
    }
    Ok(exit_codes::OK)
}

fn cmd_resolve<E: Env>(env: &E, config: &AgentConfig) -> Result<i32> {
    let request = resolve_from_env(env, config)?;
    let json = serde_json::to_string_pretty(&request).context("serialize post request")?;
    println!("{json}");
    Ok(exit_codes::OK)
}

/// Read the credential and build the HTTP client. Runs before any request.
fn connect<E: Env>(env: &E, config: &AgentConfig) -> Result<HttpApi> {
    let api_key = require_secret(env, &config.credential_env)?;
    HttpApi::new(&config.api_base_url, &api_key)
}
