//! Calendar-aware date arithmetic over UTC-normalized instants.
//!
//! Every function here is deterministic and non-mutating: callers pass a
//! `DateTime<Utc>` by value and receive a new value back. Month and year
//! steps clamp to the last valid day of the target month (Jan 31 plus one
//! month is Feb 28, or Feb 29 in a leap year). Results that chrono cannot
//! represent surface as [`CoreError::InvalidInstant`], never as a silently
//! substituted default.

use chrono::{DateTime, Datelike, Duration, Months, NaiveDate, NaiveTime, Utc, Weekday};

use crate::error::{CoreError, CoreResult};

/// Calendar unit used by [`add_units`] and [`difference_in`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateUnit {
    Second,
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl DateUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }
}

impl std::fmt::Display for DateUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

fn out_of_range(context: &str) -> CoreError {
    CoreError::InvalidInstant(format!("instant out of range: {context}"))
}

/// Adds `amount` units to `date`, returning a new instant.
///
/// Month and year additions are computed as a single jump from `date`, so
/// day-of-month clamping never accumulates across repeated calls with
/// growing amounts.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the result is not representable.
pub fn add_units(date: DateTime<Utc>, amount: i64, unit: DateUnit) -> CoreResult<DateTime<Utc>> {
    match unit {
        DateUnit::Second => add_signed(date, Duration::try_seconds(amount), "seconds"),
        DateUnit::Minute => add_signed(date, Duration::try_minutes(amount), "minutes"),
        DateUnit::Hour => add_signed(date, Duration::try_hours(amount), "hours"),
        DateUnit::Day => add_signed(date, Duration::try_days(amount), "days"),
        DateUnit::Week => add_signed(date, Duration::try_weeks(amount), "weeks"),
        DateUnit::Month => add_months(date, amount),
        DateUnit::Year => {
            let months = amount
                .checked_mul(12)
                .ok_or_else(|| out_of_range("years to months"))?;
            add_months(date, months)
        }
    }
}

fn add_signed(
    date: DateTime<Utc>,
    delta: Option<Duration>,
    context: &str,
) -> CoreResult<DateTime<Utc>> {
    let delta = delta.ok_or_else(|| out_of_range(context))?;
    date.checked_add_signed(delta)
        .ok_or_else(|| out_of_range(context))
}

/// Adds `months` calendar months, clamping the day-of-month to the target
/// month's length.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the result is not representable.
pub fn add_months(date: DateTime<Utc>, months: i64) -> CoreResult<DateTime<Utc>> {
    let magnitude =
        u32::try_from(months.unsigned_abs()).map_err(|_e| out_of_range("month delta"))?;
    let stepped = if months >= 0 {
        date.checked_add_months(Months::new(magnitude))
    } else {
        date.checked_sub_months(Months::new(magnitude))
    };
    stepped.ok_or_else(|| out_of_range("months"))
}

/// Adds `years` calendar years; Feb 29 clamps to Feb 28 off leap years.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the result is not representable.
pub fn add_years(date: DateTime<Utc>, years: i64) -> CoreResult<DateTime<Utc>> {
    let months = years
        .checked_mul(12)
        .ok_or_else(|| out_of_range("years to months"))?;
    add_months(date, months)
}

/// Whole elapsed units from `from` to `to`.
///
/// Second through week are plain scaled divisions of the signed delta.
/// Month and year are calendar-aware: an elapsed unit counts only once it
/// is fully complete, independent of exact day-of-month alignment.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if an intermediate step overflows.
pub fn difference_in(unit: DateUnit, from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<i64> {
    let delta = to.signed_duration_since(from);
    match unit {
        DateUnit::Second => Ok(delta.num_seconds()),
        DateUnit::Minute => Ok(delta.num_minutes()),
        DateUnit::Hour => Ok(delta.num_hours()),
        DateUnit::Day => Ok(delta.num_days()),
        DateUnit::Week => Ok(delta.num_days() / 7),
        DateUnit::Month => whole_months_between(from, to),
        DateUnit::Year => {
            let months = whole_months_between(from, to)?;
            Ok(months / 12)
        }
    }
}

/// Whole calendar months from `from` to `to`, counting a month only once
/// fully elapsed.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if an intermediate step overflows.
pub fn whole_months_between(from: DateTime<Utc>, to: DateTime<Utc>) -> CoreResult<i64> {
    let mut months = i64::from(to.year() - from.year()) * 12 + i64::from(to.month())
        - i64::from(from.month());
    // The raw year/month delta overshoots by at most one when the
    // day-of-month (or time of day) has not come around yet.
    if months > 0 && add_months(from, months)? > to {
        months -= 1;
    } else if months < 0 && add_months(from, months)? < to {
        months += 1;
    }
    Ok(months)
}

/// Number of days in the given month.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] for a month outside 1..=12.
pub fn days_in_month(year: i32, month: u32) -> CoreResult<u32> {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => Ok(31),
        4 | 6 | 9 | 11 => Ok(30),
        2 => Ok(if is_leap_year(year) { 29 } else { 28 }),
        _ => Err(CoreError::InvalidInstant(format!(
            "month out of range: {month}"
        ))),
    }
}

/// Gregorian leap-year predicate.
#[must_use]
pub const fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Builds a UTC instant from calendar fields and a time of day.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the fields do not name a real
/// calendar date.
pub fn ymd_at_time(
    year: i32,
    month: u32,
    day: u32,
    time: NaiveTime,
) -> CoreResult<DateTime<Utc>> {
    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        CoreError::InvalidInstant(format!("no such date: {year:04}-{month:02}-{day:02}"))
    })?;
    Ok(date.and_time(time).and_utc())
}

/// Replaces the day-of-month, clamping to the month's length.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the instant cannot be rebuilt.
pub fn with_month_day(date: DateTime<Utc>, day: u32) -> CoreResult<DateTime<Utc>> {
    let clamped = day.min(days_in_month(date.year(), date.month())?).max(1);
    ymd_at_time(date.year(), date.month(), clamped, date.time())
}

/// First instant on or after `date` falling on `weekday`, preserving the
/// time of day. Returns `date` itself when it already matches.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the step overflows.
pub fn weekday_on_or_after(date: DateTime<Utc>, weekday: Weekday) -> CoreResult<DateTime<Utc>> {
    let current = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(weekday.num_days_from_monday());
    let ahead = (target - current).rem_euclid(7);
    add_units(date, ahead, DateUnit::Day)
}

/// Start of the calendar week containing `date`, where weeks begin on
/// `week_start`. The time of day is preserved.
///
/// ## Errors
/// Returns [`CoreError::InvalidInstant`] if the step overflows.
pub fn week_start_on_or_before(
    date: DateTime<Utc>,
    week_start: Weekday,
) -> CoreResult<DateTime<Utc>> {
    let current = i64::from(date.weekday().num_days_from_monday());
    let target = i64::from(week_start.num_days_from_monday());
    let behind = (current - target).rem_euclid(7);
    add_units(date, -behind, DateUnit::Day)
}
