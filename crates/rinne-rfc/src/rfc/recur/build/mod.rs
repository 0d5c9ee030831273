//! Recurrence document serialization.
//!
//! Emits the canonical three-line wire form. Field order inside the
//! RRULE line is fixed so serialization is deterministic; unset optional
//! fields are omitted rather than written as 0-sentinels.

use chrono::{DateTime, Timelike, Utc};

use crate::rfc::recur::core::{RecurrenceRule, Weekday};

/// Serializes a rule into the canonical document form.
#[must_use]
pub fn serialize(rule: &RecurrenceRule) -> String {
    let mut out = String::new();
    out.push_str("DTSTART:");
    out.push_str(&format_utc_datetime(rule.dt_start));
    out.push_str("\r\n");

    if let Some(dt_end) = rule.dt_end {
        out.push_str("DTEND:");
        out.push_str(&format_utc_datetime(dt_end));
        out.push_str("\r\n");
    }

    out.push_str("RRULE:");
    out.push_str(&serialize_rule_value(rule));
    out.push_str("\r\n");
    out
}

/// Serializes only the RRULE value (the part after `RRULE:`).
#[must_use]
pub fn serialize_rule_value(rule: &RecurrenceRule) -> String {
    let mut parts = vec![
        format!("FREQ={}", rule.freq.as_str()),
        format!("INTERVAL={}", rule.interval),
    ];
    if let Some(count) = rule.count {
        parts.push(format!("COUNT={count}"));
    }
    if let Some(until) = rule.until {
        parts.push(format!("UNTIL={}", format_utc_datetime(until)));
    }
    if !rule.by_day.is_empty() {
        let days: Vec<&str> = rule.by_day.iter().copied().map(Weekday::as_str).collect();
        parts.push(format!("BYDAY={}", days.join(",")));
    }
    if let Some(by_month) = rule.by_month {
        parts.push(format!("BYMONTH={by_month}"));
    }
    if let Some(by_month_day) = rule.by_month_day {
        parts.push(format!("BYMONTHDAY={by_month_day}"));
    }
    if let Some(by_set_pos) = rule.by_set_pos {
        parts.push(format!("BYSETPOS={by_set_pos}"));
    }
    parts.push(format!("WKST={}", rule.week_start.as_str()));
    parts.join(";")
}

/// Formats an instant as `YYYYMMDDTHHMMSS[.fff]Z`; the fractional part
/// appears only when the instant carries sub-second precision.
#[must_use]
pub fn format_utc_datetime(datetime: DateTime<Utc>) -> String {
    let base = datetime.format("%Y%m%dT%H%M%S");
    let millis = datetime.nanosecond() / 1_000_000;
    if millis == 0 {
        format!("{base}Z")
    } else {
        format!("{base}.{millis:03}Z")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rfc::recur::core::{Frequency, Weekday};
    use chrono::TimeZone;

    #[test]
    fn serializes_canonical_order() {
        let dt_start = Utc.with_ymd_and_hms(2022, 12, 1, 3, 0, 0).unwrap();
        let rule = RecurrenceRule::builder(dt_start)
            .freq(Frequency::Weekly)
            .interval(2)
            .by_day(vec![Weekday::Monday, Weekday::Friday])
            .build();
        let doc = serialize(&rule);
        assert_eq!(
            doc,
            "DTSTART:20221201T030000Z\r\nRRULE:FREQ=WEEKLY;INTERVAL=2;BYDAY=MO,FR;WKST=MO\r\n"
        );
    }

    #[test]
    fn omits_unset_fields() {
        let dt_start = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let rule = RecurrenceRule::builder(dt_start)
            .freq(Frequency::Daily)
            .build();
        let doc = serialize(&rule);
        assert!(!doc.contains("COUNT"));
        assert!(!doc.contains("BYMONTH"));
        assert!(!doc.contains("BYSETPOS"));
        assert!(!doc.contains("DTEND"));
    }

    #[test]
    fn formats_millisecond_precision() {
        let instant = Utc
            .with_ymd_and_hms(2023, 6, 15, 12, 0, 0)
            .unwrap()
            .with_nanosecond(250_000_000)
            .unwrap();
        assert_eq!(format_utc_datetime(instant), "20230615T120000.250Z");
    }
}
