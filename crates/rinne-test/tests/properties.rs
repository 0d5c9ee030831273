//! Behavioral properties of the expansion engine: purity, index
//! stability under window slicing, and boundary inclusion.

use std::collections::BTreeMap;

use chrono::{DateTime, TimeZone, Utc};
use rinne_test::component::recur::core::{Frequency, RecurrenceRule, Weekday};
use rinne_test::component::recur::expand::expand;

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

fn index_map(rule: &RecurrenceRule, start: DateTime<Utc>, end: DateTime<Utc>) -> BTreeMap<DateTime<Utc>, u64> {
    expand(rule, start, end)
        .expect("expansion should succeed")
        .occurrences
        .into_iter()
        .map(|o| (o.date, o.index))
        .collect()
}

#[test_log::test]
fn count_bounded_series_yields_exactly_count() {
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 0))
        .freq(Frequency::Daily)
        .count(7)
        .build();
    let expansion = expand(&rule, utc(2023, 1, 1, 0), utc(2024, 1, 1, 0)).unwrap();
    assert_eq!(expansion.occurrences.len(), 7);
    let mut expected_index = 1u64;
    let mut previous: Option<DateTime<Utc>> = None;
    for occurrence in &expansion.occurrences {
        assert_eq!(occurrence.index, expected_index);
        expected_index += 1;
        if let Some(previous) = previous {
            assert!(previous < occurrence.date, "occurrences must ascend in date");
        }
        previous = Some(occurrence.date);
    }
}

#[test_log::test]
fn expansion_is_pure() {
    let rule = RecurrenceRule::builder(utc(2022, 12, 1, 3))
        .freq(Frequency::Weekly)
        .by_day(vec![Weekday::Monday, Weekday::Friday])
        .build();
    let first = expand(&rule, utc(2022, 12, 1, 0), utc(2023, 3, 1, 0)).unwrap();
    let second = expand(&rule, utc(2022, 12, 1, 0), utc(2023, 3, 1, 0)).unwrap();
    assert_eq!(first, second);
}

#[test_log::test]
fn indices_are_stable_under_window_splitting() {
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 0))
        .freq(Frequency::Daily)
        .interval(3)
        .build();
    let a = utc(2023, 1, 1, 0);
    let b = utc(2023, 2, 10, 0);
    let c = utc(2023, 4, 1, 0);

    let direct = index_map(&rule, a, c);
    let mut merged = index_map(&rule, a, b);
    merged.extend(index_map(&rule, b, c));

    assert_eq!(direct, merged);
}

#[test_log::test]
fn weekly_byday_indices_are_stable_under_window_splitting() {
    let rule = RecurrenceRule::builder(utc(2022, 12, 1, 3))
        .freq(Frequency::Weekly)
        .by_day(vec![Weekday::Monday, Weekday::Wednesday, Weekday::Friday])
        .build();
    let a = utc(2022, 12, 1, 0);
    let b = utc(2023, 1, 17, 0);
    let c = utc(2023, 3, 1, 0);

    let direct = index_map(&rule, a, c);
    let mut merged = index_map(&rule, a, b);
    merged.extend(index_map(&rule, b, c));

    assert_eq!(direct, merged);
}

#[test_log::test]
fn monthly_setpos_subwindow_matches_full_window() {
    // Second Wednesday of each month, queried over a year and then over
    // a six-month sub-window starting mid-series.
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 9))
        .freq(Frequency::Monthly)
        .by_day(vec![Weekday::Wednesday])
        .by_set_pos(2)
        .build();
    let full = index_map(&rule, utc(2023, 1, 1, 0), utc(2024, 1, 1, 0));
    let sub = index_map(&rule, utc(2023, 6, 1, 0), utc(2023, 12, 1, 0));

    assert!(!sub.is_empty());
    for (date, index) in &sub {
        assert_eq!(full.get(date), Some(index), "index drifted for {date}");
    }
}

#[test_log::test]
fn occurrence_at_window_start_is_included() {
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 0))
        .freq(Frequency::Daily)
        .build();
    let expansion = expand(&rule, utc(2023, 1, 5, 0), utc(2023, 1, 8, 0)).unwrap();
    assert_eq!(
        expansion.occurrences.first().map(|o| (o.date, o.index)),
        Some((utc(2023, 1, 5, 0), 5))
    );
}

#[test_log::test]
fn last_start_at_until_minus_duration_is_included() {
    // One-hour events until Jan 5 01:00: the Jan 5 00:00 start is the
    // last one whose end still fits inside the UNTIL bound.
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 0))
        .freq(Frequency::Daily)
        .dt_end(utc(2023, 1, 1, 1))
        .until(utc(2023, 1, 5, 1))
        .build();
    let expansion = expand(&rule, utc(2023, 1, 1, 0), utc(2023, 2, 1, 0)).unwrap();
    assert_eq!(
        expansion.occurrences.last().map(|o| o.date),
        Some(utc(2023, 1, 5, 0))
    );
    assert_eq!(expansion.occurrences.len(), 5);
}

#[test_log::test]
fn occurrences_serialize_for_transport() {
    let rule = RecurrenceRule::builder(utc(2023, 1, 1, 0))
        .freq(Frequency::Daily)
        .count(2)
        .build();
    let expansion = expand(&rule, utc(2023, 1, 1, 0), utc(2023, 2, 1, 0)).unwrap();
    let payload = serde_json::to_value(&expansion.occurrences).unwrap();
    assert_eq!(payload[0]["index"], 1);
    assert_eq!(payload[1]["date"], "2023-01-02T00:00:00Z");
}
