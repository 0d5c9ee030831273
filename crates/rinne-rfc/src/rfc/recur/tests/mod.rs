//! Cross-module tests for the recurrence layer.

mod fixtures;
