mod api;
mod calendar;
mod error;
mod extract;
mod format;
mod lexer;
mod resolve;
mod tables;

pub use api::{ParseDetails, StageTrace, format, format_default, parse, parse_verbose};
pub use calendar::{DateTime, FieldFlags, from_seconds, is_leap_year, to_seconds};
pub use error::ParseError;
pub use format::DEFAULT_DIRECTIVE;

// --- Internal types ---------------------------------------------------------

/// Lexical category of one token.
///
/// `Hour`, `Minute`, `Second` and `Iso6` are re-tag kinds: the lexer never
/// emits them, but the time stage rewrites claimed `Number` tokens to them as
/// it consumes a time shape, so stage traces show what each number became.
/// `Iso7`/`Iso8` are likewise re-tags applied by the date stage (or by the
/// time stage when it splits a 14-digit timestamp).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum TokenKind {
    End,
    Month,
    Weekday,
    YearDay,
    MonthDay,
    Year,
    Week,
    Hour,
    Second,
    Minute,
    Meridian,
    TzStd,
    TzDst,
    Slash,
    Dash,
    Comma,
    Colon,
    Plus,
    Dot,
    Quote,
    Number,
    Iso6,
    Iso7,
    Iso8,
    Unknown,
}

/// One lexical unit.
///
/// `length` is the digit count of the originating numeric run and is
/// load-bearing: it is what distinguishes `dd` from `yyyy`, a compact
/// `HHMMSS` from a `YYYYMMDD`, and so on. `value` holds the numeric payload
/// for number-like kinds, the signed minutes-west offset for timezone kinds,
/// and the 0-based ordinal for month/weekday kinds.
#[derive(Debug, Clone)]
pub(crate) struct Token {
    pub kind: TokenKind,
    pub text: String,
    pub length: usize,
    pub value: i64,
    pub fraction: f64,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, length: usize, value: i64) -> Self {
        Token { kind, text: text.into(), length, value, fraction: 0.0 }
    }
}

// --- TokenSeq: ordered backbone shared by every extraction stage ------------

/// Ordered token collection with O(1) deletion of arbitrary elements.
///
/// Tokens live in an index-addressed vector; deletion sets a tombstone bit
/// instead of removing the slot, so indices stay stable and neighbors keep
/// their links. Iteration (`first`/`next`/`prev`) skips tombstones. Token
/// order is always the original lexical order; deletion never reorders the
/// survivors.
#[derive(Debug, Clone)]
pub(crate) struct TokenSeq {
    tokens: Vec<Token>,
    dead: Vec<bool>,
}

impl TokenSeq {
    pub fn new() -> Self {
        TokenSeq { tokens: Vec::new(), dead: Vec::new() }
    }

    pub fn push(&mut self, token: Token) {
        self.tokens.push(token);
        self.dead.push(false);
    }

    pub fn token(&self, idx: usize) -> &Token {
        &self.tokens[idx]
    }

    pub fn token_mut(&mut self, idx: usize) -> &mut Token {
        &mut self.tokens[idx]
    }

    /// Index of the first live token, if any.
    pub fn first(&self) -> Option<usize> {
        (0..self.tokens.len()).find(|&i| !self.dead[i])
    }

    /// Index of the last live token, if any.
    pub fn last(&self) -> Option<usize> {
        (0..self.tokens.len()).rev().find(|&i| !self.dead[i])
    }

    /// Next live token after `idx`.
    pub fn next(&self, idx: usize) -> Option<usize> {
        (idx + 1..self.tokens.len()).find(|&i| !self.dead[i])
    }

    /// Previous live token before `idx`.
    pub fn prev(&self, idx: usize) -> Option<usize> {
        (0..idx).rev().find(|&i| !self.dead[i])
    }

    pub fn delete(&mut self, idx: usize) {
        self.dead[idx] = true;
    }

    /// Tombstone every token in the positional range `from..=to`.
    pub fn delete_span(&mut self, from: usize, to: usize) {
        for i in from..=to.min(self.tokens.len().saturating_sub(1)) {
            self.dead[i] = true;
        }
    }

    /// Indices of live tokens, in lexical order.
    pub fn live(&self) -> impl Iterator<Item = usize> + '_ {
        (0..self.tokens.len()).filter(|&i| !self.dead[i])
    }

    pub fn live_count(&self) -> usize {
        self.dead.iter().filter(|d| !**d).count()
    }
}
