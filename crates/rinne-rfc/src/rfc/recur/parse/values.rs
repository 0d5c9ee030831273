//! Value token parsers for the recurrence wire format.

use chrono::{DateTime, NaiveDate, Utc};

use super::error::{ParseError, ParseErrorKind, ParseResult};
use crate::rfc::recur::core::Weekday;

/// Parses a date token of exactly `YYYYMMDDTHHMMSS[.fff]Z`.
///
/// UTC only; anything else - a missing `Z`, a timezone offset, a date
/// without time - is rejected outright rather than coerced.
///
/// ## Errors
/// Returns an error if the token does not match the format or does not
/// name a real instant.
pub fn parse_utc_datetime(s: &str, line: usize, col: usize) -> ParseResult<DateTime<Utc>> {
    let invalid = || ParseError::new(ParseErrorKind::InvalidDateTime, line, col);

    let stripped = s.strip_suffix('Z').ok_or_else(invalid)?;
    let (base, millis) = match stripped.find('.') {
        Some(dot) => {
            let frac = &stripped[dot + 1..];
            if frac.len() != 3 || !frac.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let millis = frac.parse::<u32>().map_err(|_e| invalid())?;
            (&stripped[..dot], millis)
        }
        None => (stripped, 0),
    };

    if base.len() != 15 || base.as_bytes()[8] != b'T' {
        return Err(invalid());
    }
    let digits_ok = base[0..8]
        .bytes()
        .chain(base[9..15].bytes())
        .all(|b| b.is_ascii_digit());
    if !digits_ok {
        return Err(invalid());
    }

    let year = base[0..4].parse::<i32>().map_err(|_e| invalid())?;
    let month = base[4..6].parse::<u32>().map_err(|_e| invalid())?;
    let day = base[6..8].parse::<u32>().map_err(|_e| invalid())?;
    let hour = base[9..11].parse::<u32>().map_err(|_e| invalid())?;
    let minute = base[11..13].parse::<u32>().map_err(|_e| invalid())?;
    let second = base[13..15].parse::<u32>().map_err(|_e| invalid())?;

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    let datetime = date
        .and_hms_milli_opt(hour, minute, second, millis)
        .ok_or_else(invalid)?;
    Ok(datetime.and_utc())
}

/// Parses a comma-separated list of two-letter weekday codes.
///
/// Ordinal prefixes (`1MO`, `-1FR`) are rejected: ordinal selection is
/// carried by BYSETPOS in this grammar.
///
/// ## Errors
/// Returns an error if any entry is not a bare weekday code.
pub fn parse_weekday_list(s: &str, line: usize, col: usize) -> ParseResult<Vec<Weekday>> {
    s.split(',')
        .map(|entry| {
            Weekday::parse(entry.trim())
                .ok_or_else(|| ParseError::new(ParseErrorKind::InvalidWeekday, line, col))
        })
        .collect()
}

/// Parses an unsigned numeric field.
///
/// ## Errors
/// Returns an error if the value does not parse or exceeds `max`.
pub fn parse_bounded_u32(s: &str, max: u32, line: usize, col: usize) -> ParseResult<u32> {
    let value = s
        .trim()
        .parse::<u32>()
        .map_err(|_e| ParseError::new(ParseErrorKind::InvalidNumber, line, col))?;
    if value > max {
        return Err(ParseError::new(ParseErrorKind::InvalidNumber, line, col)
            .with_context(format!("{value} exceeds {max}")));
    }
    Ok(value)
}

/// Parses a set position: 0 (unset), -1, or 1..=4.
///
/// ## Errors
/// Returns an error for values outside that domain.
pub fn parse_set_pos(s: &str, line: usize, col: usize) -> ParseResult<i8> {
    let value = s
        .trim()
        .parse::<i8>()
        .map_err(|_e| ParseError::new(ParseErrorKind::InvalidNumber, line, col))?;
    match value {
        -1 | 0..=4 => Ok(value),
        _ => Err(ParseError::new(ParseErrorKind::InvalidNumber, line, col)
            .with_context(format!("set position {value} out of domain"))),
    }
}
