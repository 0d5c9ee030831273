//! RFC 5545 recurrence semantics.

pub mod recur;
