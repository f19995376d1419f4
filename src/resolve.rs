//! Identifier resolver: classify a lowercase word against the name tables.

use crate::error::ParseError;
use crate::tables::{MERIDIANS, MONTHS, WEEKDAYS, ZONES, military_minutes_west};
use crate::TokenKind;

/// Resolve a lowercase word into a token kind and value.
///
/// Resolution order matters for overlapping names and is fixed:
///
/// 1. words of three or more letters are tried as month, then weekday,
///    prefixes (a match needs at least three letters and the full word must
///    be a prefix of the table entry, so `jan`, `janu` and `january` all
///    resolve but `ja` never reaches this step);
/// 2. the named-timezone table, exact match only;
/// 3. two-letter words are tried as meridians (`am`/`pm`);
/// 4. single letters fall through to the military timezone table.
///
/// The value is the 0-based ordinal for months and weekdays, 0/1 for am/pm,
/// and signed minutes west of UTC for timezone kinds.
pub(crate) fn resolve_word(word: &str) -> Result<(TokenKind, i64), ParseError> {
    let len = word.len();

    if len >= 3 {
        let first = word.as_bytes()[0];
        for (idx, name) in MONTHS.iter().enumerate() {
            if name.as_bytes()[0] == first && name.starts_with(word) {
                return Ok((TokenKind::Month, idx as i64));
            }
        }
        for (idx, name) in WEEKDAYS.iter().enumerate() {
            if name.as_bytes()[0] == first && name.starts_with(word) {
                return Ok((TokenKind::Weekday, idx as i64));
            }
        }
    }

    for entry in &ZONES {
        if entry.name == word {
            let kind = if entry.dst { TokenKind::TzDst } else { TokenKind::TzStd };
            return Ok((kind, entry.minutes_west));
        }
    }

    if len == 2 {
        for (idx, name) in MERIDIANS.iter().enumerate() {
            if *name == word {
                return Ok((TokenKind::Meridian, idx as i64));
            }
        }
    }

    if len == 1 {
        let letter = word.chars().next().unwrap_or('\0');
        if let Some(minutes) = military_minutes_west(letter) {
            return Ok((TokenKind::TzStd, minutes));
        }
    }

    Err(ParseError::UnknownToken(word.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_prefixes_need_three_letters() {
        assert_eq!(resolve_word("jan").unwrap(), (TokenKind::Month, 0));
        assert_eq!(resolve_word("january").unwrap(), (TokenKind::Month, 0));
        assert_eq!(resolve_word("janu").unwrap(), (TokenKind::Month, 0));
        assert_eq!(resolve_word("december").unwrap(), (TokenKind::Month, 11));
        assert!(resolve_word("ja").is_err());
    }

    #[test]
    fn weekdays_resolve_after_months() {
        assert_eq!(resolve_word("thu").unwrap(), (TokenKind::Weekday, 4));
        assert_eq!(resolve_word("sunday").unwrap(), (TokenKind::Weekday, 0));
        assert_eq!(resolve_word("sat").unwrap(), (TokenKind::Weekday, 6));
    }

    #[test]
    fn named_zones_match_exactly() {
        assert_eq!(resolve_word("est").unwrap(), (TokenKind::TzStd, 300));
        assert_eq!(resolve_word("edt").unwrap(), (TokenKind::TzDst, 300));
        assert_eq!(resolve_word("jst").unwrap(), (TokenKind::TzStd, -540));
        assert!(resolve_word("es").is_err());
    }

    #[test]
    fn meridians_and_military_letters() {
        assert_eq!(resolve_word("am").unwrap(), (TokenKind::Meridian, 0));
        assert_eq!(resolve_word("pm").unwrap(), (TokenKind::Meridian, 1));
        assert_eq!(resolve_word("z").unwrap(), (TokenKind::TzStd, 0));
        assert_eq!(resolve_word("t").unwrap(), (TokenKind::TzStd, -420));
        assert!(resolve_word("j").is_err());
    }

    #[test]
    fn longer_match_beats_military_letter() {
        // "ut" is a named zone, not the military "u" plus junk.
        assert_eq!(resolve_word("ut").unwrap(), (TokenKind::TzStd, 0));
    }
}
