//! Recurrence wire-format parse error types.

use std::fmt;

/// Result type for recurrence document parsing.
pub type ParseResult<T> = Result<T, ParseError>;

/// An error that occurred while decoding a recurrence document.
///
/// Structurally invalid tokens are a hard failure: they indicate an
/// integration defect upstream, not a legitimate rule, so no partial
/// rule is produced.
#[derive(Debug)]
pub struct ParseError {
    /// Error kind.
    pub kind: ParseErrorKind,
    /// 1-based line of the offending token.
    pub line: usize,
    /// 1-based column of the offending token.
    pub col: usize,
    /// Optional human context.
    pub context: Option<String>,
}

impl ParseError {
    /// Creates a new parse error.
    #[must_use]
    pub const fn new(kind: ParseErrorKind, line: usize, col: usize) -> Self {
        Self {
            kind,
            line,
            col,
            context: None,
        }
    }

    /// Attaches human context to the error.
    #[must_use]
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} at line {}, column {}",
            self.kind, self.line, self.col
        )?;
        if let Some(context) = &self.context {
            write!(f, " ({context})")?;
        }
        Ok(())
    }
}

impl std::error::Error for ParseError {}

/// Parse error kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Line is not `NAME:value`, or a rule part is not `KEY=value`.
    MalformedLine,
    /// Date token does not match `YYYYMMDDTHHMMSS[.fff]Z`.
    InvalidDateTime,
    /// Unknown frequency token.
    InvalidFrequency,
    /// Weekday code outside SU..SA.
    InvalidWeekday,
    /// Numeric field failed to parse or is outside its basic range.
    InvalidNumber,
    /// COUNT and UNTIL are mutually exclusive.
    UntilCountConflict,
    /// The document has no DTSTART line.
    MissingDtStart,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedLine => write!(f, "malformed line"),
            Self::InvalidDateTime => write!(f, "invalid date-time"),
            Self::InvalidFrequency => write!(f, "invalid frequency"),
            Self::InvalidWeekday => write!(f, "invalid weekday"),
            Self::InvalidNumber => write!(f, "invalid number"),
            Self::UntilCountConflict => write!(f, "COUNT conflicts with UNTIL"),
            Self::MissingDtStart => write!(f, "missing DTSTART"),
        }
    }
}
