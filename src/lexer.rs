//! Lexer: raw string to terminated token sequence.
//!
//! Letters are case-folded to lowercase before scanning; punctuation and
//! digits pass through untouched. Rules are applied greedily left to right,
//! skipping whitespace:
//!
//! - single-character punctuation (`/ + ' : . , -`) becomes its own token;
//! - `w` followed by exactly two digits is the three-character week token;
//! - a maximal digit run becomes a `Number` whose `length` is the digit
//!   count (the count is semantically significant downstream, so leading
//!   zeros are preserved in it);
//! - a maximal letter run (dots inside the run are skipped, not counted) is
//!   handed to the identifier resolver;
//! - anything else aborts the parse.

use crate::error::ParseError;
use crate::resolve::resolve_word;
use crate::{Token, TokenKind, TokenSeq};

fn punctuation_kind(c: char) -> TokenKind {
    match c {
        '/' => TokenKind::Slash,
        '+' => TokenKind::Plus,
        '\'' => TokenKind::Quote,
        ':' => TokenKind::Colon,
        '.' => TokenKind::Dot,
        ',' => TokenKind::Comma,
        '-' => TokenKind::Dash,
        _ => TokenKind::Unknown,
    }
}

/// Scan `input` into a token sequence terminated by an `End` token.
pub(crate) fn scan(input: &str) -> Result<TokenSeq, ParseError> {
    let folded = input.to_ascii_lowercase();
    let bytes = folded.as_bytes();
    let mut seq = TokenSeq::new();
    let mut i = 0;

    while i < bytes.len() {
        let c = bytes[i] as char;

        if c.is_ascii_whitespace() {
            i += 1;
            continue;
        }

        // wNN: ISO week designator, only when exactly two digits follow.
        if c == 'w'
            && bytes.get(i + 1).is_some_and(|b| b.is_ascii_digit())
            && bytes.get(i + 2).is_some_and(|b| b.is_ascii_digit())
            && !bytes.get(i + 3).is_some_and(|b| b.is_ascii_digit())
        {
            let text = &folded[i..i + 3];
            let value = folded[i + 1..i + 3].parse::<i64>().unwrap_or(0);
            seq.push(Token::new(TokenKind::Week, text, 2, value));
            i += 3;
            continue;
        }

        if c.is_ascii_digit() {
            let start = i;
            while i < bytes.len() && bytes[i].is_ascii_digit() {
                i += 1;
            }
            let run = &folded[start..i];
            let value = run.parse::<i64>().unwrap_or(i64::MAX);
            seq.push(Token::new(TokenKind::Number, run, run.len(), value));
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut word = String::new();
            while i < bytes.len() {
                let b = bytes[i] as char;
                if b.is_ascii_alphabetic() {
                    word.push(b);
                    i += 1;
                } else if b == '.' {
                    // Dots inside abbreviated words ("a.m.", "e.s.t.") are
                    // skipped and not counted toward the word's length.
                    i += 1;
                } else {
                    break;
                }
            }
            let length = word.len();
            let (kind, value) = resolve_word(&word)?;
            seq.push(Token::new(kind, word, length, value));
            continue;
        }

        match punctuation_kind(c) {
            TokenKind::Unknown => return Err(ParseError::UnknownToken(c.to_string())),
            kind => {
                seq.push(Token::new(kind, c.to_string(), 0, 0));
                i += 1;
            }
        }
    }

    seq.push(Token::new(TokenKind::End, "", 0, 0));
    Ok(seq)
}
