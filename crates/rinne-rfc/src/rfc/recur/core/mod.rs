//! Recurrence core models.
//!
//! These types are designed for:
//! - Per-call immutability: a [`RecurrenceRule`] is built once and never
//!   patched in place; derived state lives in [`ExtendedRule`]
//! - Type safety: frequencies and weekdays are closed enums, not strings
//! - Round-trip fidelity with the wire format in `parse`/`build`

mod extended;
mod occurrence;
mod rule;

pub use extended::ExtendedRule;
pub use occurrence::Occurrence;
pub use rule::{Frequency, RecurrenceRule, RuleBuilder, Weekday};
