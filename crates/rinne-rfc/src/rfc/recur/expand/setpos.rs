//! "Nth weekday of a month" resolution for BYSETPOS rules.

use std::fmt;

use chrono::{DateTime, Datelike, Utc};

use rinne_core::arith;
use rinne_core::error::CoreError;

use crate::rfc::recur::core::{ExtendedRule, RecurrenceRule, Weekday};

/// An error that indicates malformed input reaching the resolver.
///
/// These are integration defects (domains the upstream schema validation
/// guarantees), not legitimate rules, so they fail loudly and carry a
/// snapshot of the offending rule for diagnosis.
#[derive(Debug)]
pub struct ExpandError {
    /// Error kind.
    pub kind: ExpandErrorKind,
    /// Wire name of the offending field.
    pub field: &'static str,
    /// Snapshot of the rule that reached the expander.
    pub rule: Box<RecurrenceRule>,
}

impl ExpandError {
    /// Creates a new expansion error.
    #[must_use]
    pub fn new(kind: ExpandErrorKind, field: &'static str, rule: &RecurrenceRule) -> Self {
        Self {
            kind,
            field,
            rule: Box::new(rule.clone()),
        }
    }

    /// Creates a set-position-out-of-domain error.
    #[must_use]
    pub fn set_pos_out_of_domain(rule: &RecurrenceRule) -> Self {
        Self::new(ExpandErrorKind::SetPosOutOfDomain, "BYSETPOS", rule)
    }

    /// Creates a missing-companion-field error.
    #[must_use]
    pub fn missing_field(field: &'static str, rule: &RecurrenceRule) -> Self {
        Self::new(ExpandErrorKind::MissingField, field, rule)
    }
}

impl fmt::Display for ExpandError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} (rule: {:?})", self.kind, self.field, self.rule)
    }
}

impl std::error::Error for ExpandError {}

/// Expansion error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpandErrorKind {
    /// Set position outside {-1, 1, 2, 3, 4}.
    SetPosOutOfDomain,
    /// A field the active frequency mode requires is unset.
    MissingField,
    /// Calendar arithmetic left the representable range.
    Arithmetic,
}

impl fmt::Display for ExpandErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetPosOutOfDomain => write!(f, "set position out of domain"),
            Self::MissingField => write!(f, "missing required field"),
            Self::Arithmetic => write!(f, "arithmetic out of range"),
        }
    }
}

/// Exhaustion counter shared across one expansion's resolver calls.
///
/// Purely defensive: the expansion loops terminate on window-end or
/// count checks, and the cap only bounds pathological rules.
#[derive(Debug)]
pub(crate) struct SetPosScan {
    attempts: u32,
    limit: u32,
}

impl SetPosScan {
    pub(crate) const fn new(limit: u32) -> Self {
        Self { attempts: 0, limit }
    }

    fn spent(&mut self) -> bool {
        if self.attempts >= self.limit {
            return true;
        }
        self.attempts += 1;
        false
    }
}

/// Resolves the rule's "nth target weekday" within the given month.
///
/// Returns `Ok(None)` when the month holds no accepted candidate: the
/// resolved date precedes `dt_start`, lies past the effective window
/// end, or the scan budget is already spent. Those are expected
/// outcomes, not errors.
///
/// ## Errors
/// Returns an [`ExpandError`] when the set position is outside its
/// domain or a required companion field is unset - malformed input that
/// should have been rejected upstream.
pub(crate) fn resolve_nth_weekday(
    ext: &ExtendedRule,
    year: i32,
    month: u32,
    scan: &mut SetPosScan,
) -> Result<Option<DateTime<Utc>>, ExpandError> {
    let target = target_weekday(&ext.rule)?;
    let position = set_position(&ext.rule)?;

    if scan.spent() {
        tracing::warn!(year, month, "BYSETPOS scan limit reached");
        return Ok(None);
    }

    let resolved = nth_weekday_of_month(year, month, target, position, ext.rule.dt_start.time())
        .map_err(|_e| ExpandError::new(ExpandErrorKind::Arithmetic, "BYSETPOS", &ext.rule))?;

    if resolved < ext.rule.dt_start || resolved > ext.end_range_period_or_until {
        return Ok(None);
    }
    Ok(Some(resolved))
}

fn target_weekday(rule: &RecurrenceRule) -> Result<Weekday, ExpandError> {
    rule.by_day
        .first()
        .copied()
        .ok_or_else(|| ExpandError::missing_field("BYDAY", rule))
}

fn set_position(rule: &RecurrenceRule) -> Result<i8, ExpandError> {
    match rule.by_set_pos {
        Some(position @ (-1 | 1..=4)) => Ok(position),
        Some(_) => Err(ExpandError::set_pos_out_of_domain(rule)),
        None => Err(ExpandError::missing_field("BYSETPOS", rule)),
    }
}

/// Walks the month's occurrences of `weekday` (4 or 5 of them) and picks
/// the one at `position`, where -1 selects the last.
fn nth_weekday_of_month(
    year: i32,
    month: u32,
    weekday: Weekday,
    position: i8,
    time: chrono::NaiveTime,
) -> Result<DateTime<Utc>, CoreError> {
    let first_of_month = arith::ymd_at_time(year, month, 1, time)?;
    let first_match = arith::weekday_on_or_after(first_of_month, weekday.to_chrono())?;
    let month_days = arith::days_in_month(year, month)?;

    let mut days: Vec<u32> = Vec::with_capacity(5);
    let mut day = first_match.day();
    while day <= month_days {
        days.push(day);
        day += 7;
    }

    let pick = if position == -1 {
        days.last().copied()
    } else {
        let index = usize::from(position.unsigned_abs()) - 1;
        days.get(index).copied()
    };
    // Every month holds at least four of each weekday, and positions are
    // domain-checked before this point.
    let pick = pick.ok_or(CoreError::InvariantViolation(
        "month exhausted before set position",
    ))?;
    arith::ymd_at_time(year, month, pick, time)
}
