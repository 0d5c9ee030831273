//! Rule/window normalization (the validation pass before expansion).
//!
//! Produces an [`ExtendedRule`]: the input rule annotated with the
//! effective generation range and the precomputed first-candidate /
//! index offset for the query window. Rule/window inconsistencies are
//! appended to the extended rule's `error_messages` and never raised;
//! only unrepresentable instants surface as a hard error.

use chrono::{DateTime, Datelike, Utc};

use rinne_core::arith::{self, DateUnit};
use rinne_core::error::CoreResult;

use crate::rfc::recur::core::{ExtendedRule, Frequency, RecurrenceRule};

/// Builds the [`ExtendedRule`] for one rule/window pairing.
///
/// `minimal_duration_seconds` stands in for the event duration when the
/// rule has no end instant.
///
/// ## Errors
/// Returns a [`rinne_core::error::CoreError`] only when calendar
/// arithmetic leaves the representable range. Inconsistent rules come
/// back as `Ok` with `error_messages` populated.
pub fn validate(
    rule: &RecurrenceRule,
    query_start: DateTime<Utc>,
    query_end: DateTime<Utc>,
    minimal_duration_seconds: u32,
) -> CoreResult<ExtendedRule> {
    let mut rule = rule.clone();

    let start_range_period = rule.dt_start.max(query_start);

    let seconds_duration = match rule.dt_end {
        Some(end) => end.signed_duration_since(rule.dt_start).num_seconds(),
        None => i64::from(minimal_duration_seconds),
    };
    if rule.dt_end.is_none() {
        rule.dt_end = Some(arith::add_units(
            rule.dt_start,
            seconds_duration,
            DateUnit::Second,
        )?);
    }

    // The window end, or UNTIL when UNTIL is the tighter bound. In the
    // latter case the bound moves back by the event duration so it caps
    // the *start* of the last occurrence, not its end.
    let until_bounds_window = rule.until.is_some_and(|until| until < query_end);
    let mut end_range_period_or_until = match rule.until {
        Some(until) if until_bounds_window => until,
        _ => query_end,
    };
    if until_bounds_window && seconds_duration > 0 {
        end_range_period_or_until = arith::add_units(
            end_range_period_or_until,
            -seconds_duration,
            DateUnit::Second,
        )?;
    }

    let mut ext = ExtendedRule {
        first_event_in_range_period: rule.dt_start,
        start_index_count: 0,
        rule,
        start_range_period,
        end_range_period_or_until,
        seconds_duration,
        error_messages: Vec::new(),
    };

    if ext
        .rule
        .dt_end
        .is_some_and(|dt_end| ext.rule.dt_start > dt_end)
    {
        ext.report("DTSTART is after DTEND");
    }
    if ext
        .rule
        .until
        .is_some_and(|until| until < ext.start_range_period)
    {
        ext.report("UNTIL precedes the start of the queried range");
    }
    if ext.has_errors() {
        return Ok(ext);
    }

    align_to_window(&mut ext)?;
    Ok(ext)
}

/// Advances the extended rule's first candidate and index offset up to
/// the window start, so generation does not replay the series head.
fn align_to_window(ext: &mut ExtendedRule) -> CoreResult<()> {
    match ext.rule.freq {
        Frequency::Weekly if !ext.rule.by_day.is_empty() => align_weekly_by_day(ext),
        Frequency::Minutely => align_fixed_step(ext, DateUnit::Minute),
        Frequency::Hourly => align_fixed_step(ext, DateUnit::Hour),
        Frequency::Daily => align_fixed_step(ext, DateUnit::Day),
        Frequency::Weekly => align_fixed_step(ext, DateUnit::Week),
        // BYSETPOS numbering restarts over accepted results, so those
        // rules always generate from the series head (see expand::setpos).
        Frequency::Monthly if ext.rule.by_set_pos.is_none() => {
            align_fixed_step(ext, DateUnit::Month)
        }
        Frequency::Yearly if ext.rule.by_set_pos.is_none() => {
            align_fixed_step(ext, DateUnit::Year)
        }
        _ => Ok(()),
    }
}

/// Whole elapsed units (calendar-aware for months and years), rounded up
/// to the next interval multiple.
fn align_fixed_step(ext: &mut ExtendedRule, unit: DateUnit) -> CoreResult<()> {
    if ext.rule.dt_start >= ext.start_range_period {
        return Ok(());
    }

    let elapsed = difference_at_least_zero(unit, ext.rule.dt_start, ext.start_range_period)?;
    let interval = i64::from(ext.rule.interval.max(1));
    // `i64::div_ceil` is unstable (int_roundings); elapsed >= 0 and interval >= 1
    // here, so this is the equivalent stable ceiling division.
    let periods = (elapsed + interval - 1) / interval;

    if count_exhausted(ext, periods) {
        ext.report("series is exhausted before the queried range");
        return Ok(());
    }

    ext.first_event_in_range_period =
        arith::add_units(ext.rule.dt_start, periods * interval, unit)?;
    ext.start_index_count = to_index(periods);
    Ok(())
}

/// WEEKLY with BYDAY counts in matching-weekday units, not weeks.
///
/// The series is anchored at the first week-start boundary on or after
/// `dt_start`; a partial leading week contributes no occurrences. Weeks
/// are visited in `interval` steps from that anchor, and matching days
/// before the window start are tallied into `start_index_count`.
fn align_weekly_by_day(ext: &mut ExtendedRule) -> CoreResult<()> {
    let week_start = ext.rule.week_start.to_chrono();
    let anchor = arith::weekday_on_or_after(ext.rule.dt_start, week_start)?;
    let step_days = 7 * i64::from(ext.rule.interval.max(1));

    let mut week = anchor;
    let mut counted: i64 = 0;
    loop {
        for offset in 0..7 {
            let day = arith::add_units(week, offset, DateUnit::Day)?;
            if !matches_by_day(&ext.rule, day) {
                continue;
            }
            if day >= ext.start_range_period {
                ext.first_event_in_range_period = day;
                ext.start_index_count = to_index(counted);
                return Ok(());
            }
            counted += 1;
            if count_exhausted(ext, counted) {
                ext.report("series is exhausted before the queried range");
                return Ok(());
            }
        }
        week = arith::add_units(week, step_days, DateUnit::Day)?;
    }
}

pub(crate) fn matches_by_day(rule: &RecurrenceRule, day: DateTime<Utc>) -> bool {
    let weekday = day.weekday();
    rule.by_day.iter().any(|entry| entry.to_chrono() == weekday)
}

fn difference_at_least_zero(
    unit: DateUnit,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> CoreResult<i64> {
    Ok(arith::difference_in(unit, from, to)?.max(0))
}

fn count_exhausted(ext: &ExtendedRule, periods: i64) -> bool {
    ext.rule
        .count
        .is_some_and(|count| periods > i64::from(count))
}

pub(crate) fn to_index(value: i64) -> u64 {
    u64::try_from(value.max(0)).unwrap_or(0)
}
