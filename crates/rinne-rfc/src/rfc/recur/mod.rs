//! Recurrence-rule model and expansion (RFC 5545 §3.3.10, §3.8.5).
//!
//! Layout mirrors the rest of the RFC layer:
//! - `core`: typed rule model (`RecurrenceRule`, `ExtendedRule`,
//!   `Occurrence`)
//! - `validate`: per-call rule/window normalization
//! - `expand`: per-frequency occurrence generation, BYSETPOS resolution,
//!   window clipping
//! - `parse` / `build`: the `DTSTART`/`DTEND`/`RRULE` wire format

pub mod build;
pub mod core;
pub mod expand;
pub mod parse;
pub mod validate;

#[cfg(test)]
mod tests;

pub use self::core::{ExtendedRule, Frequency, Occurrence, RecurrenceRule, RuleBuilder, Weekday};
pub use self::expand::{Expansion, expand, expand_with_duration};
