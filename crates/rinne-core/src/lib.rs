//! Rinne core primitives.
//!
//! Minimal-dependency building blocks shared across the workspace:
//! calendar-aware date arithmetic, the core error type, configuration
//! loading, and shared constants. Everything here is pure and
//! synchronous; higher layers (`rinne-rfc`) build the recurrence
//! semantics on top.

pub mod arith;
pub mod config;
pub mod constants;
pub mod error;
