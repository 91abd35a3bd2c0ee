//! Pure, deterministic agent logic.
//!
//! These modules must not perform I/O (filesystem, environment, network).
//! They are exercised by orchestration in [`crate::resolve`] and
//! [`crate::dispatch`].

pub mod outcome;
pub mod precedence;
