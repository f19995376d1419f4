//! Date stage: match the leftover tokens against the shape catalogue.
//!
//! By the time this stage runs, time and timezone tokens are gone. The stage
//! first drops a decorative weekday name (`Thu, 01 Jan 04`), re-tags bare
//! numbers whose digit count pins their meaning (3 digits is an ordinal day,
//! 4 a year, 7 a `YYYYDDD`, 8 a `YYYYMMDD`), and then scans the catalogue in
//! table order for the first shape whose arity and token kinds line up.
//!
//! Matching is deliberately permissive for small numbers: a 1- or 2-digit
//! number may stand in for a weekday (1-7), month (up to 12) or day of month
//! (up to 31) slot, and year slots take any numeric token. Ambiguity between
//! shapes is resolved purely by catalogue order; see
//! [`DATE_PATTERNS`](crate::tables::DATE_PATTERNS).
//!
//! When only the terminator is left the whole stage is skipped: the input
//! was time-only and every date field keeps its epoch default.

use crate::calendar::{DateTime, FieldFlags, is_leap_year};
use crate::error::ParseError;
use crate::tables::DATE_PATTERNS;
use crate::{Token, TokenKind, TokenSeq};

pub(crate) fn run(seq: &mut TokenSeq, dt: &mut DateTime) -> Result<usize, ParseError> {
    if seq.live_count() <= 1 {
        super::trace("date", 0, seq);
        return Ok(0);
    }
    let before = seq.live_count();

    // A weekday name accompanying a date is decorative; drop the earliest.
    let weekday = seq.live().find(|&i| seq.token(i).kind == TokenKind::Weekday);
    if let Some(idx) = weekday {
        seq.delete(idx);
    }

    let live: Vec<usize> = seq.live().collect();
    for idx in live {
        let token = seq.token(idx);
        if token.kind == TokenKind::Number {
            let retag = match token.length {
                3 => Some(TokenKind::YearDay),
                4 => Some(TokenKind::Year),
                7 => Some(TokenKind::Iso7),
                8 => Some(TokenKind::Iso8),
                _ => None,
            };
            if let Some(kind) = retag {
                seq.token_mut(idx).kind = kind;
            }
        }
    }

    let remaining: Vec<usize> =
        seq.live().filter(|&i| seq.token(i).kind != TokenKind::End).collect();
    if remaining.is_empty() {
        super::trace("date", before - seq.live_count(), seq);
        return Ok(before - seq.live_count());
    }

    let pattern = DATE_PATTERNS
        .iter()
        .find(|p| {
            p.slots.len() == remaining.len()
                && remaining.iter().zip(p.slots).all(|(&i, &slot)| slot_matches(seq.token(i), slot))
        })
        .ok_or(ParseError::NoMatchingPattern)?;

    if super::trace_enabled() {
        eprintln!("[stage:date] matched shape `{}`", pattern.name);
    }

    for (&idx, &slot) in remaining.iter().zip(pattern.slots) {
        apply_slot(seq.token(idx), slot, dt);
    }
    if dt.flags.contains(FieldFlags::WEEK) {
        dt.iso_week_year = dt.year;
    }
    if dt.flags.contains(FieldFlags::YEAR) {
        dt.is_leap_year = is_leap_year(dt.year);
    }

    for idx in remaining {
        seq.delete(idx);
    }
    super::trace("date", before - seq.live_count(), seq);
    Ok(before - seq.live_count())
}

/// Does `token` satisfy a pattern slot expecting `slot`?
fn slot_matches(token: &Token, slot: TokenKind) -> bool {
    if token.kind == slot {
        return true;
    }
    if token.kind == TokenKind::Number {
        // Year slots take any numeric token, whatever its digit count.
        if slot == TokenKind::Year {
            return true;
        }
        if token.length <= 2 {
            return match slot {
                TokenKind::Weekday => (1..=7).contains(&token.value),
                TokenKind::Month => token.value <= 12,
                TokenKind::MonthDay => token.value <= 31,
                _ => false,
            };
        }
    }
    false
}

/// Write one matched token into the field record per its slot role.
fn apply_slot(token: &Token, slot: TokenKind, dt: &mut DateTime) {
    match slot {
        TokenKind::Year => {
            // Two-digit years are normalized into the 20th century.
            dt.year = if token.kind == TokenKind::Number && token.length <= 2 {
                token.value + 1900
            } else {
                token.value
            };
            dt.flags |= FieldFlags::YEAR;
        }
        TokenKind::Month => {
            dt.month = if token.kind == TokenKind::Month { token.value } else { token.value - 1 };
            dt.flags |= FieldFlags::MONTH;
        }
        TokenKind::MonthDay => {
            dt.day_of_month = token.value;
            dt.flags |= FieldFlags::MDAY;
        }
        TokenKind::Weekday => {
            // Numeric weekdays are ISO (1 = Monday .. 7 = Sunday).
            dt.day_of_week = if token.kind == TokenKind::Weekday { token.value } else { token.value % 7 };
            dt.flags |= FieldFlags::WDAY;
        }
        TokenKind::Week => {
            dt.iso_week = token.value;
            dt.flags |= FieldFlags::WEEK;
        }
        TokenKind::YearDay => {
            dt.day_of_year = token.value - 1;
            dt.flags |= FieldFlags::YDAY;
        }
        TokenKind::Iso7 => {
            dt.year = token.value / 1000;
            dt.day_of_year = token.value % 1000 - 1;
            dt.flags |= FieldFlags::YEAR | FieldFlags::YDAY;
        }
        TokenKind::Iso8 => {
            dt.year = token.value / 10_000;
            dt.month = token.value / 100 % 100 - 1;
            dt.day_of_month = token.value % 100;
            dt.flags |= FieldFlags::YEAR | FieldFlags::MONTH | FieldFlags::MDAY;
        }
        // Separator slots carry no fields.
        _ => {}
    }
}
