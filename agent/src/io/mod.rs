//! I/O helpers for agent commands.

pub mod api;
pub mod config;
pub mod env;
pub mod event;
