//! Recurrence rule model (RFC 5545 §3.3.10).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Base repeat unit of a recurrence rule.
///
/// `Secondly` is part of the wire grammar but has no generation logic;
/// expanding a secondly rule yields an empty occurrence list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Never,
    Secondly,
    Minutely,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
}

impl Frequency {
    /// Parses a wire-format frequency token.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "NEVER" => Some(Self::Never),
            "SECONDLY" => Some(Self::Secondly),
            "MINUTELY" => Some(Self::Minutely),
            "HOURLY" => Some(Self::Hourly),
            "DAILY" => Some(Self::Daily),
            "WEEKLY" => Some(Self::Weekly),
            "MONTHLY" => Some(Self::Monthly),
            "YEARLY" => Some(Self::Yearly),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Never => "NEVER",
            Self::Secondly => "SECONDLY",
            Self::Minutely => "MINUTELY",
            Self::Hourly => "HOURLY",
            Self::Daily => "DAILY",
            Self::Weekly => "WEEKLY",
            Self::Monthly => "MONTHLY",
            Self::Yearly => "YEARLY",
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Weekday in the two-letter wire encoding (SU..SA).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Parses a two-letter weekday code.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "SU" => Some(Self::Sunday),
            "MO" => Some(Self::Monday),
            "TU" => Some(Self::Tuesday),
            "WE" => Some(Self::Wednesday),
            "TH" => Some(Self::Thursday),
            "FR" => Some(Self::Friday),
            "SA" => Some(Self::Saturday),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Sunday => "SU",
            Self::Monday => "MO",
            Self::Tuesday => "TU",
            Self::Wednesday => "WE",
            Self::Thursday => "TH",
            Self::Friday => "FR",
            Self::Saturday => "SA",
        }
    }

    #[must_use]
    pub const fn to_chrono(self) -> chrono::Weekday {
        match self {
            Self::Sunday => chrono::Weekday::Sun,
            Self::Monday => chrono::Weekday::Mon,
            Self::Tuesday => chrono::Weekday::Tue,
            Self::Wednesday => chrono::Weekday::Wed,
            Self::Thursday => chrono::Weekday::Thu,
            Self::Friday => chrono::Weekday::Fri,
            Self::Saturday => chrono::Weekday::Sat,
        }
    }
}

impl std::fmt::Display for Weekday {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A recurrence rule plus the anchoring event instants.
///
/// Caller-owned and immutable for the duration of an expansion call.
/// Unset optional modifiers are `None`/empty; the wire codec maps its
/// 0-sentinels onto these at the boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurrenceRule {
    /// First instant of the series; every index is anchored here.
    pub dt_start: DateTime<Utc>,
    /// Nominal end of the first event; defines the event duration.
    pub dt_end: Option<DateTime<Utc>>,
    pub freq: Frequency,
    /// Step width in frequency units, at least 1.
    pub interval: u32,
    /// Bound on the series length; `None` is unbounded.
    pub count: Option<u32>,
    /// Last admissible instant of the series, if bounded by time.
    pub until: Option<DateTime<Utc>>,
    /// Weekday filter for WEEKLY rules, target weekday for BYSETPOS
    /// resolution. Empty means unset.
    pub by_day: Vec<Weekday>,
    /// Month pin (1-12) for YEARLY rules.
    pub by_month: Option<u8>,
    /// Day-of-month pin (1-31), clamped to short months on expansion.
    pub by_month_day: Option<u8>,
    /// Set position for "nth weekday" selection: 1-4, or -1 for last.
    /// Kept raw so the resolver can reject out-of-domain values loudly.
    pub by_set_pos: Option<i8>,
    /// Weekday on which calendar weeks begin.
    pub week_start: Weekday,
}

impl RecurrenceRule {
    /// Starts a builder anchored at `dt_start`.
    #[must_use]
    pub fn builder(dt_start: DateTime<Utc>) -> RuleBuilder {
        RuleBuilder {
            rule: Self {
                dt_start,
                dt_end: None,
                freq: Frequency::Never,
                interval: 1,
                count: None,
                until: None,
                by_day: Vec::new(),
                by_month: None,
                by_month_day: None,
                by_set_pos: None,
                week_start: Weekday::Monday,
            },
        }
    }
}

/// Per-call rule builder.
///
/// Constructed fresh for every rule so no state leaks between parses or
/// expansions; `build` hands out the finished immutable rule.
#[derive(Debug, Clone)]
pub struct RuleBuilder {
    rule: RecurrenceRule,
}

impl RuleBuilder {
    #[must_use]
    pub fn freq(mut self, freq: Frequency) -> Self {
        self.rule.freq = freq;
        self
    }

    #[must_use]
    pub fn dt_end(mut self, dt_end: DateTime<Utc>) -> Self {
        self.rule.dt_end = Some(dt_end);
        self
    }

    /// Sets the step width; zero is lifted to 1.
    #[must_use]
    pub fn interval(mut self, interval: u32) -> Self {
        self.rule.interval = interval.max(1);
        self
    }

    /// Sets the series length bound; zero means unbounded.
    #[must_use]
    pub fn count(mut self, count: u32) -> Self {
        self.rule.count = (count > 0).then_some(count);
        self
    }

    #[must_use]
    pub fn until(mut self, until: DateTime<Utc>) -> Self {
        self.rule.until = Some(until);
        self
    }

    #[must_use]
    pub fn by_day(mut self, by_day: Vec<Weekday>) -> Self {
        self.rule.by_day = by_day;
        self
    }

    /// Sets the month pin; zero means unset.
    #[must_use]
    pub fn by_month(mut self, by_month: u8) -> Self {
        self.rule.by_month = (by_month > 0).then_some(by_month);
        self
    }

    /// Sets the day-of-month pin; zero means unset.
    #[must_use]
    pub fn by_month_day(mut self, by_month_day: u8) -> Self {
        self.rule.by_month_day = (by_month_day > 0).then_some(by_month_day);
        self
    }

    /// Sets the set position; zero means unset.
    #[must_use]
    pub fn by_set_pos(mut self, by_set_pos: i8) -> Self {
        self.rule.by_set_pos = (by_set_pos != 0).then_some(by_set_pos);
        self
    }

    #[must_use]
    pub fn week_start(mut self, week_start: Weekday) -> Self {
        self.rule.week_start = week_start;
        self
    }

    #[must_use]
    pub fn build(self) -> RecurrenceRule {
        self.rule
    }
}
