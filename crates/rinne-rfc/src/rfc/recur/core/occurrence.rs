//! A single expanded instance of a recurrence rule.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One concrete instant of the series.
///
/// `index` is the 1-based position of this date within the entire
/// theoretical series anchored at the rule's `dt_start` - it does not
/// depend on which window was queried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Occurrence {
    pub date: DateTime<Utc>,
    pub index: u64,
}
