//! RFC 5545 recurrence-rule expansion.
//!
//! Turns a typed recurrence rule (frequency, interval, count/until bounds,
//! BYDAY/BYMONTH/BYMONTHDAY/BYSETPOS modifiers) into the concrete
//! occurrence instants falling inside a caller-supplied query window, each
//! carrying its absolute sequence number in the rule's series. Also hosts
//! the wire-format codec for the `DTSTART`/`DTEND`/`RRULE` document form.

pub mod error;
pub mod rfc;
