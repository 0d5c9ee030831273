//! Per-frequency occurrence generation.
//!
//! Turns an error-free [`ExtendedRule`] into the ordered occurrence list
//! for its window. Generators emit tentative candidates with absolute
//! series indices; the window filter trims the boundary and applies any
//! count bound. All loops terminate on the effective window end or the
//! count bound; the BYSETPOS scan cap is defense only.

mod setpos;
mod window;

pub use setpos::{ExpandError, ExpandErrorKind};

use chrono::{DateTime, Datelike, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

use rinne_core::arith::{self, DateUnit};
use rinne_core::constants::{DEFAULT_MINIMAL_DURATION_SECS, DEFAULT_SETPOS_SCAN_LIMIT};

use crate::error::RfcResult;
use crate::rfc::recur::core::{ExtendedRule, Frequency, Occurrence, RecurrenceRule};
use crate::rfc::recur::validate::{matches_by_day, to_index, validate};

use setpos::SetPosScan;

/// Result of one expansion call: the window-annotated rule plus the
/// ordered occurrences inside the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expansion {
    pub extended_rule: ExtendedRule,
    pub occurrences: Vec<Occurrence>,
}

/// Expands `rule` over `[window_start, window_end]` with the default
/// minimal event duration.
///
/// ## Errors
/// Returns an error for malformed input reaching the resolver or for
/// calendar arithmetic leaving the representable range. Rule/window
/// inconsistencies are reported on the returned extended rule instead.
pub fn expand(
    rule: &RecurrenceRule,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> RfcResult<Expansion> {
    expand_with_duration(rule, window_start, window_end, DEFAULT_MINIMAL_DURATION_SECS)
}

/// Expands `rule` over the window, assuming `minimal_duration_seconds`
/// for rules without an end instant.
///
/// ## Errors
/// Returns an error for malformed input reaching the resolver or for
/// calendar arithmetic leaving the representable range.
#[tracing::instrument(skip(rule), fields(freq = %rule.freq))]
pub fn expand_with_duration(
    rule: &RecurrenceRule,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    minimal_duration_seconds: u32,
) -> RfcResult<Expansion> {
    let ext = validate(rule, window_start, window_end, minimal_duration_seconds)?;

    if ext.has_errors() {
        tracing::debug!(errors = ?ext.error_messages, "Rule rejected during validation");
        return Ok(Expansion {
            extended_rule: ext,
            occurrences: Vec::new(),
        });
    }
    if ext.end_range_period_or_until < ext.first_event_in_range_period {
        return Ok(Expansion {
            extended_rule: ext,
            occurrences: Vec::new(),
        });
    }

    let candidates = generate(&ext)?;
    let occurrences = window::clip(&ext, candidates);
    tracing::debug!(count = occurrences.len(), "Expansion complete");

    Ok(Expansion {
        extended_rule: ext,
        occurrences,
    })
}

fn generate(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    match ext.rule.freq {
        // SECONDLY is part of the grammar but has no generation logic.
        Frequency::Never | Frequency::Secondly => Ok(Vec::new()),
        Frequency::Minutely => fixed_step(ext, DateUnit::Minute),
        Frequency::Hourly => fixed_step(ext, DateUnit::Hour),
        Frequency::Daily => fixed_step(ext, DateUnit::Day),
        Frequency::Weekly if !ext.rule.by_day.is_empty() => weekly_by_day(ext),
        Frequency::Weekly => fixed_step(ext, DateUnit::Week),
        Frequency::Monthly if ext.rule.by_set_pos.is_some() => monthly_set_pos(ext),
        Frequency::Monthly => monthly(ext),
        Frequency::Yearly if ext.rule.by_set_pos.is_some() => yearly_set_pos(ext),
        Frequency::Yearly => yearly(ext),
    }
}

/// MINUTELY/HOURLY/DAILY, and WEEKLY without BYDAY at 7-day width.
///
/// Candidate `p` is `dt_start` advanced by `p * interval` units, so the
/// index is simply `p + 1` regardless of the queried window.
fn fixed_step(ext: &ExtendedRule, unit: DateUnit) -> RfcResult<Vec<Occurrence>> {
    let interval = i64::from(ext.rule.interval.max(1));
    let mut occurrences = Vec::new();
    let mut period = start_period(ext);

    loop {
        let candidate = arith::add_units(ext.rule.dt_start, period * interval, unit)?;
        if candidate > ext.end_range_period_or_until {
            break;
        }
        let index = to_index(period) + 1;
        if count_exceeded(ext, index) {
            break;
        }
        occurrences.push(Occurrence {
            date: candidate,
            index,
        });
        period += 1;
    }
    Ok(occurrences)
}

/// WEEKLY with BYDAY: walk the seven days of each visited week in order,
/// emitting the days whose weekday is in the BYDAY set. The index counts
/// emitted days, continuing from the validator's per-weekday offset.
fn weekly_by_day(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    let step_days = 7 * i64::from(ext.rule.interval.max(1));
    let first = ext.first_event_in_range_period;
    let mut week = arith::week_start_on_or_before(first, ext.rule.week_start.to_chrono())?;
    let mut index = ext.start_index_count;
    let mut occurrences = Vec::new();

    'weeks: loop {
        for offset in 0..7 {
            let day = arith::add_units(week, offset, DateUnit::Day)?;
            // Matching days before the resume point are already folded
            // into start_index_count by the validator.
            if day < first || !matches_by_day(&ext.rule, day) {
                continue;
            }
            if day > ext.end_range_period_or_until {
                break 'weeks;
            }
            index += 1;
            if count_exceeded(ext, index) {
                break 'weeks;
            }
            occurrences.push(Occurrence { date: day, index });
        }
        week = arith::add_units(week, step_days, DateUnit::Day)?;
        if week > ext.end_range_period_or_until {
            break;
        }
    }
    Ok(occurrences)
}

/// MONTHLY without BYSETPOS: one candidate per visited month, computed as
/// a single jump from `dt_start`; BYMONTHDAY pins the day-of-month with
/// short months clamping.
fn monthly(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    let interval = i64::from(ext.rule.interval.max(1));
    let mut occurrences = Vec::new();
    let mut period = start_period(ext);

    loop {
        let mut candidate = arith::add_months(ext.rule.dt_start, period * interval)?;
        if let Some(day) = ext.rule.by_month_day {
            candidate = arith::with_month_day(candidate, u32::from(day))?;
        }
        if candidate > ext.end_range_period_or_until {
            break;
        }
        let index = to_index(period) + 1;
        if count_exceeded(ext, index) {
            break;
        }
        occurrences.push(Occurrence {
            date: candidate,
            index,
        });
        period += 1;
    }
    Ok(occurrences)
}

/// YEARLY without BYSETPOS: one candidate per visited year; BYMONTH and
/// BYMONTHDAY pin month and day (clamped).
fn yearly(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    let interval = i64::from(ext.rule.interval.max(1));
    let mut occurrences = Vec::new();
    let mut period = start_period(ext);

    loop {
        let mut candidate = arith::add_years(ext.rule.dt_start, period * interval)?;
        if let Some(month) = ext.rule.by_month {
            candidate = pin_month(candidate, u32::from(month))?;
        }
        if let Some(day) = ext.rule.by_month_day {
            candidate = arith::with_month_day(candidate, u32::from(day))?;
        }
        if candidate > ext.end_range_period_or_until {
            break;
        }
        let index = to_index(period) + 1;
        if count_exceeded(ext, index) {
            break;
        }
        occurrences.push(Occurrence {
            date: candidate,
            index,
        });
        period += 1;
    }
    Ok(occurrences)
}

/// MONTHLY with BYDAY+BYSETPOS: delegate each visited month to the
/// resolver. The emitted index is a 1-based counter over accepted
/// results only, independent of the validator's offset; iteration always
/// starts at `dt_start`'s month so the numbering is window-stable.
fn monthly_set_pos(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    let interval = i64::from(ext.rule.interval.max(1));
    let mut scan = SetPosScan::new(DEFAULT_SETPOS_SCAN_LIMIT);
    let mut occurrences = Vec::new();
    let mut index: u64 = 0;

    for period in 0i64.. {
        let anchor = arith::add_months(ext.rule.dt_start, period * interval)?;
        let month_start =
            arith::ymd_at_time(anchor.year(), anchor.month(), 1, NaiveTime::MIN)?;
        if month_start > ext.end_range_period_or_until {
            break;
        }
        if let Some(date) =
            setpos::resolve_nth_weekday(ext, anchor.year(), anchor.month(), &mut scan)?
        {
            index += 1;
            if count_exceeded(ext, index) {
                break;
            }
            occurrences.push(Occurrence { date, index });
        }
    }
    Ok(occurrences)
}

/// YEARLY with BYDAY+BYMONTH+BYSETPOS: one resolver delegation per
/// visited year, anchored at (year, BYMONTH). Terminates when the anchor
/// passes the window end or the count bound is met.
fn yearly_set_pos(ext: &ExtendedRule) -> RfcResult<Vec<Occurrence>> {
    let Some(by_month) = ext.rule.by_month else {
        return Err(ExpandError::missing_field("BYMONTH", &ext.rule).into());
    };
    let interval = i64::from(ext.rule.interval.max(1));
    let mut scan = SetPosScan::new(DEFAULT_SETPOS_SCAN_LIMIT);
    let mut occurrences = Vec::new();
    let mut index: u64 = 0;

    for period in 0i64.. {
        let anchor = arith::add_years(ext.rule.dt_start, period * interval)?;
        let month_start =
            arith::ymd_at_time(anchor.year(), u32::from(by_month), 1, NaiveTime::MIN)?;
        if month_start > ext.end_range_period_or_until {
            break;
        }
        if let Some(date) =
            setpos::resolve_nth_weekday(ext, anchor.year(), u32::from(by_month), &mut scan)?
        {
            index += 1;
            if count_exceeded(ext, index) {
                break;
            }
            occurrences.push(Occurrence { date, index });
        }
    }
    Ok(occurrences)
}

fn pin_month(candidate: DateTime<Utc>, month: u32) -> RfcResult<DateTime<Utc>> {
    let day = candidate
        .day()
        .min(arith::days_in_month(candidate.year(), month)?);
    Ok(arith::ymd_at_time(
        candidate.year(),
        month,
        day,
        candidate.time(),
    )?)
}

fn start_period(ext: &ExtendedRule) -> i64 {
    i64::try_from(ext.start_index_count).unwrap_or(i64::MAX)
}

fn count_exceeded(ext: &ExtendedRule, index: u64) -> bool {
    ext.rule
        .count
        .is_some_and(|count| index > u64::from(count))
}
