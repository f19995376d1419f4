//! Static symbol tables.
//!
//! Everything here is immutable process-wide data: name tables consulted by
//! the identifier resolver, day-count tables used by the calendar arithmetic,
//! and the ordered date-pattern catalogue scanned by the date stage. Offsets
//! are stored as signed minutes *west* of UTC (EST is +300, JST is -540),
//! matching the convention the rest of the pipeline uses.

use crate::TokenKind;
use once_cell::sync::Lazy;

/// Full English month names, resolver order. Token value is the index.
pub(crate) const MONTHS: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// Full English weekday names, Sunday first. Token value is the index.
pub(crate) const WEEKDAYS: [&str; 7] =
    ["sunday", "monday", "tuesday", "wednesday", "thursday", "friday", "saturday"];

/// Meridian designators. Token value 0 = am, 1 = pm.
pub(crate) const MERIDIANS: [&str; 2] = ["am", "pm"];

/// One named-timezone entry: lowercase name, minutes west of UTC for the
/// standard offset, and whether the name designates a daylight-saving zone.
pub(crate) struct ZoneEntry {
    pub name: &'static str,
    pub minutes_west: i64,
    pub dst: bool,
}

const fn std(name: &'static str, minutes_west: i64) -> ZoneEntry {
    ZoneEntry { name, minutes_west, dst: false }
}

const fn dst(name: &'static str, minutes_west: i64) -> ZoneEntry {
    ZoneEntry { name, minutes_west, dst: true }
}

/// Named-timezone table. Full, exact, case-insensitive match only; no
/// abbreviation or prefixing. For daylight names the stored offset is the
/// zone's standard offset; the DST flag is applied separately during
/// calendar conversion.
pub(crate) const ZONES: [ZoneEntry; 68] = [
    std("gmt", 0),
    std("ut", 0),
    std("utc", 0),
    std("wet", 0),
    dst("bst", 0),
    std("wat", 60),
    std("at", 2 * 60),
    std("brt", 3 * 60),
    std("art", 3 * 60),
    std("nst", 3 * 60 + 30),
    dst("ndt", 3 * 60 + 30),
    std("ast", 4 * 60),
    dst("adt", 4 * 60),
    std("est", 5 * 60),
    dst("edt", 5 * 60),
    std("cst", 6 * 60),
    dst("cdt", 6 * 60),
    std("mst", 7 * 60),
    dst("mdt", 7 * 60),
    std("pst", 8 * 60),
    dst("pdt", 8 * 60),
    std("yst", 9 * 60),
    dst("ydt", 9 * 60),
    std("akst", 9 * 60),
    dst("akdt", 9 * 60),
    std("hst", 10 * 60),
    dst("hdt", 10 * 60),
    std("cat", 10 * 60),
    std("ahst", 10 * 60),
    std("nt", 11 * 60),
    std("idlw", 12 * 60),
    std("cet", -60),
    dst("cest", -60),
    std("met", -60),
    std("mewt", -60),
    dst("mest", -60),
    std("swt", -60),
    dst("sst", -60),
    std("fwt", -60),
    dst("fst", -60),
    std("eet", -2 * 60),
    dst("eest", -2 * 60),
    std("msk", -3 * 60),
    dst("msd", -3 * 60),
    std("bt", -3 * 60),
    std("it", -(3 * 60 + 30)),
    std("zp4", -4 * 60),
    std("zp5", -5 * 60),
    std("ist", -(5 * 60 + 30)),
    std("zp6", -6 * 60),
    std("wast", -7 * 60),
    dst("wadt", -7 * 60),
    std("ict", -7 * 60),
    std("cct", -8 * 60),
    std("sgt", -8 * 60),
    std("hkt", -8 * 60),
    std("awst", -8 * 60),
    std("jst", -9 * 60),
    std("kst", -9 * 60),
    std("acst", -(9 * 60 + 30)),
    std("aest", -10 * 60),
    dst("aedt", -10 * 60),
    std("east", -10 * 60),
    dst("eadt", -10 * 60),
    std("gst", -10 * 60),
    std("nzt", -12 * 60),
    std("nzst", -12 * 60),
    dst("nzdt", -12 * 60),
];

/// Single-letter military timezone offset, minutes west of UTC.
///
/// `a`–`i` and `k`–`m` run one through twelve hours west, `n`–`y` one through
/// twelve hours east, `z` is zero. `j` is not assigned.
pub(crate) fn military_minutes_west(letter: char) -> Option<i64> {
    match letter {
        'a'..='i' => Some((letter as i64 - 'a' as i64 + 1) * 60),
        'k'..='m' => Some((letter as i64 - 'k' as i64 + 10) * 60),
        'n'..='y' => Some(-(letter as i64 - 'n' as i64 + 1) * 60),
        'z' => Some(0),
        _ => None,
    }
}

/// Cumulative days before each month, non-leap and leap variants. The 13th
/// entry is the year length.
pub(crate) const CUMULATIVE_DAYS: [[i64; 13]; 2] = [
    [0, 31, 59, 90, 120, 151, 181, 212, 243, 273, 304, 334, 365],
    [0, 31, 60, 91, 121, 152, 182, 213, 244, 274, 305, 335, 366],
];

// --- Date-pattern catalogue --------------------------------------------------

/// One recognized date shape: a fixed sequence of expected token kinds.
pub(crate) struct DatePattern {
    pub name: &'static str,
    pub slots: &'static [TokenKind],
}

const fn shape(name: &'static str, slots: &'static [TokenKind]) -> DatePattern {
    DatePattern { name, slots }
}

/// The ordered catalogue of date shapes the date stage matches against.
///
/// Order is semantic, not cosmetic: for ambiguous inputs (two small numbers
/// that could each be a month or a day) the first matching shape wins, which
/// is what makes `12 13` resolve to December 13 rather than the 12th of some
/// month. US month-first shapes therefore precede day-first shapes
/// throughout. Do not re-sort.
pub(crate) static DATE_PATTERNS: Lazy<Vec<DatePattern>> = Lazy::new(|| {
    use TokenKind::{
        Comma, Dash, Dot, Iso7, Iso8, Month, MonthDay, Quote, Slash, Week, Weekday, Year, YearDay,
    };
    vec![
        shape("iso-basic", &[Iso8]),
        shape("iso-ordinal", &[Iso7]),
        shape("year", &[Year]),
        shape("month-name", &[Month]),
        shape("us-slash", &[Month, Slash, MonthDay]),
        shape("us-slash-year", &[Month, Slash, MonthDay, Slash, Year]),
        shape("day-slash-month", &[MonthDay, Slash, Month]),
        shape("day-slash-month-year", &[MonthDay, Slash, Month, Slash, Year]),
        shape("ymd-slash", &[Year, Slash, Month, Slash, MonthDay]),
        shape("us-dash", &[Month, Dash, MonthDay]),
        shape("us-dash-year", &[Month, Dash, MonthDay, Dash, Year]),
        shape("day-dash-month", &[MonthDay, Dash, Month]),
        shape("day-dash-month-year", &[MonthDay, Dash, Month, Dash, Year]),
        shape("iso-extended", &[Year, Dash, Month, Dash, MonthDay]),
        shape("year-dash-month", &[Year, Dash, Month]),
        shape("day-dot-month-year", &[MonthDay, Dot, Month, Dot, Year]),
        shape("ymd-dot", &[Year, Dot, Month, Dot, MonthDay]),
        shape("month-day", &[Month, MonthDay]),
        shape("month-day-year", &[Month, MonthDay, Year]),
        shape("month-day-comma-year", &[Month, MonthDay, Comma, Year]),
        shape("month-day-quote-year", &[Month, MonthDay, Quote, Year]),
        shape("day-month", &[MonthDay, Month]),
        shape("day-month-year", &[MonthDay, Month, Year]),
        shape("day-month-quote-year", &[MonthDay, Month, Quote, Year]),
        shape("rfc-comma", &[Comma, MonthDay, Month, Year]),
        shape("year-month-day", &[Year, Month, MonthDay]),
        shape("month-year", &[Month, Year]),
        shape("year-month", &[Year, Month]),
        shape("iso-week", &[Year, Week]),
        shape("iso-week-ext", &[Year, Dash, Week]),
        shape("iso-week-day", &[Year, Week, Weekday]),
        shape("iso-week-day-ext", &[Year, Dash, Week, Dash, Weekday]),
        shape("year-ordinal", &[Year, Dash, YearDay]),
        shape("ordinal-day", &[YearDay]),
    ]
});

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn military_letters_cover_the_alphabet_except_j() {
        assert_eq!(military_minutes_west('a'), Some(60));
        assert_eq!(military_minutes_west('i'), Some(9 * 60));
        assert_eq!(military_minutes_west('j'), None);
        assert_eq!(military_minutes_west('k'), Some(10 * 60));
        assert_eq!(military_minutes_west('m'), Some(12 * 60));
        assert_eq!(military_minutes_west('n'), Some(-60));
        assert_eq!(military_minutes_west('y'), Some(-12 * 60));
        assert_eq!(military_minutes_west('z'), Some(0));
    }

    #[test]
    fn zone_names_are_unique_and_lowercase() {
        let mut seen = std::collections::HashSet::new();
        for entry in &ZONES {
            assert!(seen.insert(entry.name), "duplicate zone {}", entry.name);
            assert_eq!(entry.name, entry.name.to_ascii_lowercase());
        }
    }

    #[test]
    fn catalogue_arities_stay_within_shape_bounds() {
        for pattern in DATE_PATTERNS.iter() {
            assert!((1..=6).contains(&pattern.slots.len()), "{}", pattern.name);
        }
    }
}
