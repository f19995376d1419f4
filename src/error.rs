use thiserror::Error;

/// Failure modes of [`parse`](crate::parse).
///
/// All variants are fatal: the parser is a pure one-shot function and never
/// returns partial results or retries internally.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A character run could not be classified by the lexer or resolved
    /// against any identifier table.
    #[error("unrecognized token `{0}`")]
    UnknownToken(String),

    /// No entry of the date-pattern catalogue matches the tokens left over
    /// after time and timezone extraction.
    #[error("no date pattern matches the remaining tokens")]
    NoMatchingPattern,

    /// A resolved numeric field violates its legal domain.
    #[error("{field} {value} is out of range")]
    FieldOutOfRange { field: &'static str, value: i64 },

    /// A numeric timezone offset whose digit grouping is neither 2 nor 4.
    #[error("malformed timezone offset (expected 2 or 4 digits)")]
    MalformedTimezone,
}
