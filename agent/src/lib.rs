//! Single-shot Moltbook poster for GitHub Actions jobs.
//!
//! One run resolves a post from layered configuration, checks that the agent
//! account has been claimed, and submits at most one post. The crate keeps the
//! same split as its binary's flow:
//!
//! - **[`core`]**: Pure, deterministic logic (field precedence, response
//!   classification). No I/O, fully testable in isolation.
//! - **[`io`]**: Side-effecting operations (environment, event file, config
//!   file, HTTP). Isolated behind traits so tests can script them.
//!
//! Orchestration modules ([`resolve`], [`dispatch`]) coordinate core logic with
//! I/O to implement CLI commands.

pub mod core;
pub mod dispatch;
pub mod exit_codes;
pub mod io;
pub mod logging;
pub mod post;
pub mod resolve;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;
