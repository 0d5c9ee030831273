//! Window-annotated rule derived once per expansion call.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::RecurrenceRule;

/// A [`RecurrenceRule`] normalized against one query window.
///
/// Recomputed from scratch on every call and discarded afterwards;
/// nothing here is cached or shared. Rule/window inconsistencies are
/// reported through [`error_messages`](Self::error_messages) rather than
/// raised, so the caller decides presentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtendedRule {
    /// The input rule, with `dt_end` synthesized when it was absent.
    pub rule: RecurrenceRule,
    /// Later of `dt_start` and the query window start.
    pub start_range_period: DateTime<Utc>,
    /// Effective generation bound: the query window end, or `until`
    /// pulled back by the event duration when `until` is the tighter
    /// bound.
    pub end_range_period_or_until: DateTime<Utc>,
    /// Event duration in seconds.
    pub seconds_duration: i64,
    /// First candidate instant at or after `start_range_period`
    /// (possibly earlier for calendar frequencies; the window filter
    /// guards the boundary).
    pub first_event_in_range_period: DateTime<Utc>,
    /// Index of the last occurrence before the window; generation
    /// continues from here.
    pub start_index_count: u64,
    /// Reported (non-fatal) rule/window inconsistencies.
    pub error_messages: Vec<String>,
}

impl ExtendedRule {
    #[must_use]
    pub fn has_errors(&self) -> bool {
        !self.error_messages.is_empty()
    }

    pub(crate) fn report(&mut self, message: impl Into<String>) {
        self.error_messages.push(message.into());
    }
}
