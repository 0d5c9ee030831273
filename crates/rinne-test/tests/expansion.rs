//! Scenario coverage for recurrence expansion.
//!
//! Cases are driven through the wire-format codec the way an upstream
//! caller would supply them, then asserted against hand-checked
//! calendars.

use chrono::{DateTime, TimeZone, Utc};
use rinne_test::component::recur::expand::expand;
use rinne_test::component::recur::parse::parse;

fn utc(year: i32, month: u32, day: u32, hour: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, 0, 0).unwrap()
}

struct Case {
    name: &'static str,
    document: &'static str,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
    expected: Vec<(DateTime<Utc>, u64)>,
}

fn assert_case(case: &Case) {
    let rule = parse(case.document)
        .unwrap_or_else(|e| panic!("{}: document should parse: {e}", case.name));
    let expansion = expand(&rule, case.window_start, case.window_end)
        .unwrap_or_else(|e| panic!("{}: expansion should succeed: {e}", case.name));
    assert!(
        !expansion.extended_rule.has_errors(),
        "{}: unexpected reported errors: {:?}",
        case.name,
        expansion.extended_rule.error_messages
    );
    let got: Vec<(DateTime<Utc>, u64)> = expansion
        .occurrences
        .iter()
        .map(|o| (o.date, o.index))
        .collect();
    assert_eq!(got, case.expected, "{}", case.name);
}

fn scenario_cases() -> Vec<Case> {
    vec![
        Case {
            name: "daily count three",
            document: "DTSTART:20200101T000000Z\r\nRRULE:FREQ=DAILY;INTERVAL=1;COUNT=3",
            window_start: utc(2020, 1, 1, 0),
            window_end: utc(2020, 2, 1, 0),
            expected: vec![
                (utc(2020, 1, 1, 0), 1),
                (utc(2020, 1, 2, 0), 2),
                (utc(2020, 1, 3, 0), 3),
            ],
        },
        Case {
            // Thursday start: the partial leading week contributes
            // nothing, so Friday 12-02 is skipped along with Thursday.
            name: "weekly byday from mid-week start",
            document: "DTSTART:20221201T030000Z\r\nRRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR",
            window_start: utc(2022, 12, 1, 0),
            window_end: utc(2022, 12, 10, 0),
            expected: vec![
                (utc(2022, 12, 5, 3), 1),
                (utc(2022, 12, 7, 3), 2),
                (utc(2022, 12, 9, 3), 3),
            ],
        },
        Case {
            name: "monthly day 31 clamps short months",
            document: "DTSTART:20221231T000000Z\r\nRRULE:FREQ=MONTHLY;BYMONTHDAY=31",
            window_start: utc(2022, 12, 31, 0),
            window_end: utc(2023, 5, 1, 0),
            expected: vec![
                (utc(2022, 12, 31, 0), 1),
                (utc(2023, 1, 31, 0), 2),
                (utc(2023, 2, 28, 0), 3),
                (utc(2023, 3, 31, 0), 4),
                (utc(2023, 4, 30, 0), 5),
            ],
        },
        Case {
            name: "monthly day 31 reaches leap february",
            document: "DTSTART:20240131T000000Z\r\nRRULE:FREQ=MONTHLY;BYMONTHDAY=31;COUNT=2",
            window_start: utc(2024, 1, 1, 0),
            window_end: utc(2024, 4, 1, 0),
            expected: vec![(utc(2024, 1, 31, 0), 1), (utc(2024, 2, 29, 0), 2)],
        },
        Case {
            name: "yearly last friday of march",
            document: "DTSTART:20230101T000000Z\r\nRRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=FR;BYSETPOS=-1",
            window_start: utc(2023, 1, 1, 0),
            window_end: utc(2025, 12, 31, 0),
            expected: vec![
                (utc(2023, 3, 31, 0), 1),
                (utc(2024, 3, 29, 0), 2),
                (utc(2025, 3, 28, 0), 3),
            ],
        },
        Case {
            name: "monthly second wednesday",
            document: "DTSTART:20230101T090000Z\r\nRRULE:FREQ=MONTHLY;BYDAY=WE;BYSETPOS=2",
            window_start: utc(2023, 1, 1, 0),
            window_end: utc(2023, 4, 1, 0),
            expected: vec![
                (utc(2023, 1, 11, 9), 1),
                (utc(2023, 2, 8, 9), 2),
                (utc(2023, 3, 8, 9), 3),
            ],
        },
        Case {
            name: "hourly with interval",
            document: "DTSTART:20230601T000000Z\r\nRRULE:FREQ=HOURLY;INTERVAL=6;COUNT=4",
            window_start: utc(2023, 6, 1, 0),
            window_end: utc(2023, 6, 2, 0),
            expected: vec![
                (utc(2023, 6, 1, 0), 1),
                (utc(2023, 6, 1, 6), 2),
                (utc(2023, 6, 1, 12), 3),
                (utc(2023, 6, 1, 18), 4),
            ],
        },
        Case {
            name: "weekly without byday steps whole weeks",
            document: "DTSTART:20230102T080000Z\r\nRRULE:FREQ=WEEKLY;INTERVAL=2;COUNT=3",
            window_start: utc(2023, 1, 1, 0),
            window_end: utc(2023, 3, 1, 0),
            expected: vec![
                (utc(2023, 1, 2, 8), 1),
                (utc(2023, 1, 16, 8), 2),
                (utc(2023, 1, 30, 8), 3),
            ],
        },
        Case {
            name: "yearly pins month and day",
            document: "DTSTART:20200215T120000Z\r\nRRULE:FREQ=YEARLY;BYMONTH=6;BYMONTHDAY=1;COUNT=2",
            window_start: utc(2020, 1, 1, 0),
            window_end: utc(2022, 1, 1, 0),
            expected: vec![(utc(2020, 6, 1, 12), 1), (utc(2021, 6, 1, 12), 2)],
        },
    ]
}

#[test_log::test]
fn scenario_cases_match_hand_checked_calendars() {
    for case in scenario_cases() {
        assert_case(&case);
    }
}

#[test_log::test]
fn secondly_expands_to_nothing() {
    let rule = parse("DTSTART:20230101T000000Z\r\nRRULE:FREQ=SECONDLY;COUNT=10").unwrap();
    let expansion = expand(&rule, utc(2023, 1, 1, 0), utc(2023, 1, 2, 0)).unwrap();
    assert!(expansion.occurrences.is_empty());
    assert!(!expansion.extended_rule.has_errors());
}

#[test_log::test]
fn until_before_window_is_reported_not_raised() {
    let rule =
        parse("DTSTART:20230101T000000Z\r\nRRULE:FREQ=DAILY;UNTIL=20230105T000000Z").unwrap();
    let expansion = expand(&rule, utc(2023, 2, 1, 0), utc(2023, 3, 1, 0)).unwrap();
    assert!(expansion.extended_rule.has_errors());
    assert!(expansion.occurrences.is_empty());
}

#[test_log::test]
fn count_exhausted_before_window_is_reported() {
    let rule = parse("DTSTART:20230101T000000Z\r\nRRULE:FREQ=DAILY;COUNT=3").unwrap();
    let expansion = expand(&rule, utc(2023, 1, 20, 0), utc(2023, 2, 1, 0)).unwrap();
    assert!(expansion.extended_rule.has_errors());
    assert!(expansion.occurrences.is_empty());
}
