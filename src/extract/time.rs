//! Time stage: find and consume the earliest recognizable time-of-day shape.
//!
//! Three shapes are recognized, checked at each live number while scanning
//! left to right:
//!
//! - a 6-digit number is a compact `HHMMSS`;
//! - `NN:NN`, optionally `:NN` seconds, optionally `:NNN` milliseconds or a
//!   dot/comma fraction after the seconds;
//! - a 14-digit number is `YYYYMMDDHHMMSS`: the trailing six digits become
//!   the time and the leading eight are re-tagged as an `Iso8` date token
//!   and left for the date stage.
//!
//! After the numeric time an optional meridian shifts the hour, and an
//! optional timezone (named token, military letter, or a `+`/`-` digit
//! group) is consumed. Finding no time shape is not an error; the fields
//! simply keep their epoch defaults.

use crate::calendar::{DateTime, FieldFlags};
use crate::error::ParseError;
use crate::{TokenKind, TokenSeq};

pub(crate) fn run(seq: &mut TokenSeq, dt: &mut DateTime) -> Result<usize, ParseError> {
    let before = seq.live_count();
    let mut cursor = seq.first();
    while let Some(idx) = cursor {
        let token = seq.token(idx);
        if token.kind == TokenKind::Number {
            if token.length == 6 {
                compact_time(seq, dt, idx)?;
                break;
            }
            if token.length == 14 {
                stamp_time(seq, dt, idx)?;
                break;
            }
            if token.length <= 2 && colon_time(seq, dt, idx)? {
                break;
            }
        }
        cursor = seq.next(idx);
    }
    let consumed = before - seq.live_count();
    super::trace("time", consumed, seq);
    Ok(consumed)
}

fn set_time(dt: &mut DateTime, hour: i64, minute: i64, second: i64) {
    dt.hour = hour;
    dt.minute = minute;
    dt.second = second;
    dt.flags |= FieldFlags::HOUR | FieldFlags::MINUTE | FieldFlags::SECOND;
}

/// Compact `HHMMSS`, interpreted digit-pair-wise right to left.
fn compact_time(seq: &mut TokenSeq, dt: &mut DateTime, idx: usize) -> Result<(), ParseError> {
    let value = seq.token(idx).value;
    set_time(dt, value / 10_000, value / 100 % 100, value % 100);
    seq.token_mut(idx).kind = TokenKind::Iso6;
    trailer(seq, dt, idx)?;
    seq.delete(idx);
    Ok(())
}

/// 14-digit `YYYYMMDDHHMMSS`: keep the date half alive for the date stage.
fn stamp_time(seq: &mut TokenSeq, dt: &mut DateTime, idx: usize) -> Result<(), ParseError> {
    let value = seq.token(idx).value;
    let time = value % 1_000_000;
    set_time(dt, time / 10_000, time / 100 % 100, time % 100);

    let token = seq.token_mut(idx);
    token.kind = TokenKind::Iso8;
    token.value = value / 1_000_000;
    token.length = 8;
    token.text.truncate(8);

    trailer(seq, dt, idx)
}

/// `HH:MM`, with optional seconds and sub-second trailers. Returns false
/// without touching anything when the shape is not present at `idx`.
fn colon_time(seq: &mut TokenSeq, dt: &mut DateTime, idx: usize) -> Result<bool, ParseError> {
    let Some(colon) = seq.next(idx) else { return Ok(false) };
    if seq.token(colon).kind != TokenKind::Colon {
        return Ok(false);
    }
    let Some(minute) = seq.next(colon) else { return Ok(false) };
    if seq.token(minute).kind != TokenKind::Number || seq.token(minute).length > 2 {
        return Ok(false);
    }

    dt.hour = seq.token(idx).value;
    dt.minute = seq.token(minute).value;
    dt.flags |= FieldFlags::HOUR | FieldFlags::MINUTE;
    seq.token_mut(idx).kind = TokenKind::Hour;
    seq.token_mut(minute).kind = TokenKind::Minute;
    let mut last = minute;

    if let Some(second) = match_second(seq, minute) {
        dt.second = seq.token(second).value;
        dt.flags |= FieldFlags::SECOND;
        seq.token_mut(second).kind = TokenKind::Second;
        last = second;

        if let Some((frac_idx, frac)) = match_subsecond(seq, second) {
            dt.fraction = frac;
            dt.flags |= FieldFlags::FRACTION;
            seq.token_mut(second).fraction = frac;
            last = frac_idx;
        }
    }

    trailer(seq, dt, last)?;
    seq.delete_span(idx, last);
    Ok(true)
}

/// `:SS` after the minutes, if present.
fn match_second(seq: &TokenSeq, minute: usize) -> Option<usize> {
    let colon = seq.next(minute)?;
    if seq.token(colon).kind != TokenKind::Colon {
        return None;
    }
    let second = seq.next(colon)?;
    let token = seq.token(second);
    (token.kind == TokenKind::Number && token.length <= 2).then_some(second)
}

/// `:NNN` milliseconds or `.`/`,` fraction after the seconds, if present.
/// The fraction's magnitude is the value scaled by its digit count.
fn match_subsecond(seq: &TokenSeq, second: usize) -> Option<(usize, f64)> {
    let sep = seq.next(second)?;
    let frac_idx = seq.next(sep)?;
    let token = seq.token(frac_idx);
    if token.kind != TokenKind::Number {
        return None;
    }
    match seq.token(sep).kind {
        TokenKind::Colon if token.length == 3 => Some((frac_idx, token.value as f64 / 1000.0)),
        TokenKind::Dot | TokenKind::Comma => {
            Some((frac_idx, token.value as f64 / 10f64.powi(token.length as i32)))
        }
        _ => None,
    }
}

/// Optional meridian then optional timezone, directly after the time shape.
fn trailer(seq: &mut TokenSeq, dt: &mut DateTime, last: usize) -> Result<(), ParseError> {
    if let Some(idx) = seq.next(last) {
        if seq.token(idx).kind == TokenKind::Meridian {
            if seq.token(idx).value == 1 && dt.hour <= 12 {
                dt.hour += 12;
            }
            seq.delete(idx);
        }
    }
    let cursor = seq.next(last);
    get_timezone(seq, dt, cursor)
}

/// Timezone grammar shared with nothing else: a named or military zone
/// token, or a sign followed by a 2- or 4-digit group. Any other digit
/// grouping after a sign is malformed.
fn get_timezone(seq: &mut TokenSeq, dt: &mut DateTime, cursor: Option<usize>) -> Result<(), ParseError> {
    let Some(idx) = cursor else { return Ok(()) };
    match seq.token(idx).kind {
        TokenKind::TzStd | TokenKind::TzDst => {
            dt.tz_offset_minutes = seq.token(idx).value;
            if seq.token(idx).kind == TokenKind::TzDst {
                dt.is_dst = true;
            }
            dt.flags |= FieldFlags::ZONE;
            seq.delete(idx);
        }
        sign @ (TokenKind::Plus | TokenKind::Dash) => {
            let Some(digits) = seq.next(idx) else { return Ok(()) };
            let token = seq.token(digits);
            if token.kind != TokenKind::Number {
                return Ok(());
            }
            let minutes = match token.length {
                4 => token.value / 100 * 60 + token.value % 100,
                2 => token.value * 60,
                _ => return Err(ParseError::MalformedTimezone),
            };
            dt.tz_offset_minutes = if sign == TokenKind::Dash { -minutes } else { minutes };
            dt.flags |= FieldFlags::ZONE;
            seq.delete(idx);
            seq.delete(digits);
        }
        _ => {}
    }
    Ok(())
}
