//! Recurrence document parser.
//!
//! Decodes the three-line wire form (`DTSTART`, `DTEND`, `RRULE`) into a
//! [`RecurrenceRule`]. RRULE parts dispatch through one canonical-key
//! match walked once per part; unknown properties and parts are ignored
//! with a warning, malformed tokens are hard errors.

mod error;
mod values;

pub use error::{ParseError, ParseErrorKind, ParseResult};
pub use values::{parse_set_pos, parse_utc_datetime, parse_weekday_list};

use chrono::{DateTime, Utc};

use crate::rfc::recur::core::{Frequency, RecurrenceRule, RuleBuilder, Weekday};

/// Parses a recurrence document into a rule.
///
/// ## Errors
/// Returns an error if a date token, frequency, weekday, or numeric
/// field is structurally invalid, if COUNT and UNTIL are both present,
/// or if the document has no DTSTART line.
#[tracing::instrument(skip(input), fields(input_len = input.len()))]
pub fn parse(input: &str) -> ParseResult<RecurrenceRule> {
    tracing::debug!("Parsing recurrence document");

    let mut dt_start: Option<DateTime<Utc>> = None;
    let mut dt_end: Option<DateTime<Utc>> = None;
    let mut rrule: Option<(usize, String)> = None;

    for (index, raw_line) in input.lines().enumerate() {
        let line_num = index + 1;
        let line = raw_line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }

        let colon = line
            .find(':')
            .ok_or_else(|| ParseError::new(ParseErrorKind::MalformedLine, line_num, 1))?;
        let name = &line[..colon];
        let value = &line[colon + 1..];
        let value_col = colon + 2;

        match name.to_ascii_uppercase().as_str() {
            "DTSTART" => {
                dt_start = Some(values::parse_utc_datetime(value, line_num, value_col)?);
            }
            "DTEND" => {
                dt_end = Some(values::parse_utc_datetime(value, line_num, value_col)?);
            }
            "RRULE" => rrule = Some((line_num, value.to_string())),
            other => {
                tracing::warn!(property = other, line = line_num, "Ignoring unknown property");
            }
        }
    }

    let Some(dt_start) = dt_start else {
        return Err(ParseError::new(ParseErrorKind::MissingDtStart, 1, 1));
    };

    let mut builder = RecurrenceRule::builder(dt_start);
    if let Some(end) = dt_end {
        builder = builder.dt_end(end);
    }
    if let Some((line_num, value)) = rrule {
        builder = apply_rrule(builder, &value, line_num)?;
    }

    tracing::debug!("Recurrence document parsed successfully");
    Ok(builder.build())
}

/// Splits an RRULE value into `KEY=value` parts and applies each through
/// the canonical-key dispatch.
fn apply_rrule(mut builder: RuleBuilder, value: &str, line: usize) -> ParseResult<RuleBuilder> {
    // COUNT and UNTIL are alternatives; reject the pair before applying
    // anything so no partial rule state survives the error.
    let has_part = |name: &str| {
        value
            .split(';')
            .any(|part| part.trim_start().to_ascii_uppercase().starts_with(name))
    };
    if has_part("COUNT=") && has_part("UNTIL=") {
        return Err(ParseError::new(ParseErrorKind::UntilCountConflict, line, 7));
    }

    // Column of the value text, past "RRULE:".
    let mut col = 7;
    for part in value.split(';') {
        let part_col = col;
        col += part.len() + 1;

        let trimmed = part.trim();
        if trimmed.is_empty() {
            continue;
        }
        let eq = trimmed
            .find('=')
            .ok_or_else(|| ParseError::new(ParseErrorKind::MalformedLine, line, part_col))?;
        let key = &trimmed[..eq];
        let part_value = &trimmed[eq + 1..];

        builder = apply_rrule_part(builder, key, part_value, line, part_col + eq + 1)?;
    }
    Ok(builder)
}

/// Applies a single `KEY=value` rule part.
fn apply_rrule_part(
    builder: RuleBuilder,
    key: &str,
    value: &str,
    line: usize,
    col: usize,
) -> ParseResult<RuleBuilder> {
    let builder = match key.to_ascii_uppercase().as_str() {
        "FREQ" => {
            let freq = Frequency::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidFrequency, line, col))?;
            builder.freq(freq)
        }
        "INTERVAL" => {
            let interval = values::parse_bounded_u32(value, u32::MAX, line, col)?;
            builder.interval(interval)
        }
        "COUNT" => {
            let count = values::parse_bounded_u32(value, u32::MAX, line, col)?;
            builder.count(count)
        }
        "UNTIL" => builder.until(values::parse_utc_datetime(value, line, col)?),
        "BYDAY" => builder.by_day(values::parse_weekday_list(value, line, col)?),
        "BYMONTH" => {
            let month = values::parse_bounded_u32(value, 12, line, col)?;
            builder.by_month(narrow_u8(month))
        }
        "BYMONTHDAY" => {
            let day = values::parse_bounded_u32(value, 31, line, col)?;
            builder.by_month_day(narrow_u8(day))
        }
        "BYSETPOS" => builder.by_set_pos(values::parse_set_pos(value, line, col)?),
        "WKST" => {
            let weekday = Weekday::parse(value)
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))?;
            builder.week_start(weekday)
        }
        other => {
            tracing::warn!(part = other, line, "Ignoring unknown rule part");
            builder
        }
    };
    Ok(builder)
}

fn narrow_u8(value: u32) -> u8 {
    u8::try_from(value).unwrap_or(0)
}
