//! Shared recurrence document fixtures.

pub const DAILY_COUNT: &str = "DTSTART:20200101T000000Z\r\n\
                               RRULE:FREQ=DAILY;INTERVAL=1;COUNT=3;WKST=MO\r\n";

pub const WEEKLY_BYDAY: &str = "DTSTART:20221201T030000Z\r\n\
                                DTEND:20221201T040000Z\r\n\
                                RRULE:FREQ=WEEKLY;INTERVAL=1;BYDAY=MO,WE,FR;WKST=MO\r\n";

pub const MONTHLY_SETPOS: &str = "DTSTART:20230101T090000Z\r\n\
                                  RRULE:FREQ=MONTHLY;INTERVAL=1;BYDAY=WE;BYSETPOS=2;WKST=MO\r\n";

pub const YEARLY_LAST_FRIDAY: &str = "DTSTART:20230101T000000Z\r\n\
                                      RRULE:FREQ=YEARLY;INTERVAL=1;BYDAY=FR;BYMONTH=3;BYSETPOS=-1;WKST=MO\r\n";

pub const UNTIL_BOUNDED: &str = "DTSTART:20230101T000000Z\r\n\
                                 DTEND:20230101T010000Z\r\n\
                                 RRULE:FREQ=DAILY;INTERVAL=1;UNTIL=20230110T000000Z;WKST=MO\r\n";
