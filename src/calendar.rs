//! Calendar arithmetic: the field record and its conversion to and from
//! scalar seconds since the epoch (1970-01-01 00:00:00, a Thursday).
//!
//! The conversions deliberately use linear year-by-year accumulation rather
//! than a closed-form civil-day formula; the ranges involved are tiny and the
//! loop keeps the leap-year handling in one obvious place.

use crate::error::ParseError;
use crate::tables::CUMULATIVE_DAYS;
use bitflags::bitflags;

bitflags! {
    /// Which fields of a [`DateTime`] are authoritative.
    ///
    /// Zero is a legal value for several fields (day-of-year 0 is January 1)
    /// as well as the unset sentinel, so presence is tracked here instead of
    /// being inferred from values. At most one of month+day-of-month,
    /// day-of-year, and ISO week governs the day within the year.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub struct FieldFlags: u32 {
        const YEAR = 1 << 0;
        const MONTH = 1 << 1;
        const MDAY = 1 << 2;
        const WDAY = 1 << 3;
        const YDAY = 1 << 4;
        const WEEK = 1 << 5;
        const HOUR = 1 << 6;
        const MINUTE = 1 << 7;
        const SECOND = 1 << 8;
        const FRACTION = 1 << 9;
        const ZONE = 1 << 10;
    }
}

/// The semantic field record a parse resolves into.
///
/// `month` is 0-based, `day_of_month` 1-based, `day_of_week` 0 = Sunday,
/// `day_of_year` 0-based. `tz_offset_minutes` is signed minutes west of UTC.
/// `second` ranges to 60 to tolerate leap seconds, `hour` to 24.
#[derive(Debug, Clone, PartialEq)]
pub struct DateTime {
    pub year: i64,
    pub month: i64,
    pub day_of_month: i64,
    pub day_of_week: i64,
    pub day_of_year: i64,
    pub iso_week: i64,
    pub iso_week_year: i64,
    pub hour: i64,
    pub minute: i64,
    pub second: i64,
    pub fraction: f64,
    pub tz_offset_minutes: i64,
    pub is_dst: bool,
    pub is_leap_year: bool,
    pub flags: FieldFlags,
}

impl Default for DateTime {
    /// The epoch start. Fields missing from an input keep these values, which
    /// is what makes parsing context-free: absent fields never mean "now".
    fn default() -> Self {
        DateTime {
            year: 1970,
            month: 0,
            day_of_month: 0,
            day_of_week: 0,
            day_of_year: 0,
            iso_week: 0,
            iso_week_year: 1970,
            hour: 0,
            minute: 0,
            second: 0,
            fraction: 0.0,
            tz_offset_minutes: 0,
            is_dst: false,
            is_leap_year: false,
            flags: FieldFlags::empty(),
        }
    }
}

/// Proleptic Gregorian leap-year predicate.
pub fn is_leap_year(year: i64) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

fn year_length(year: i64) -> i64 {
    CUMULATIVE_DAYS[is_leap_year(year) as usize][12]
}

fn days_in_month(year: i64, month: i64) -> i64 {
    let table = &CUMULATIVE_DAYS[is_leap_year(year) as usize];
    table[month as usize + 1] - table[month as usize]
}

/// Signed whole days from the epoch to January 1 of `year`.
fn days_to_year(year: i64) -> i64 {
    let mut days = 0;
    if year >= 1970 {
        for y in 1970..year {
            days += year_length(y);
        }
    } else {
        for y in year..1970 {
            days -= year_length(y);
        }
    }
    days
}

/// Weekday (0 = Sunday) for a signed day count from the epoch.
fn weekday_of(days_from_epoch: i64) -> i64 {
    // The epoch day was a Thursday.
    (days_from_epoch.rem_euclid(7) + 4) % 7
}

/// Weekday of 31 December, in the 0 = Sunday .. 4 = Thursday encoding the
/// ISO week-count congruence uses. Year, quadrennial, century and
/// quadricentennial terms, all modulo 7.
fn december_31_weekday(year: i64) -> i64 {
    (year + year.div_euclid(4) - year.div_euclid(100) + year.div_euclid(400)).rem_euclid(7)
}

/// Number of ISO weeks in `year`: 53 when the year ends (or the previous
/// year ended) in the right weekday, else 52.
fn iso_weeks_in_year(year: i64) -> i64 {
    let long = december_31_weekday(year) == 4 || december_31_weekday(year - 1) == 3;
    52 + long as i64
}

/// ISO week number and week-year for a date given as calendar year, 0-based
/// day-of-year, and weekday (0 = Sunday). The week-year can differ from the
/// calendar year at January/December boundaries.
fn iso_week_of(year: i64, day_of_year: i64, weekday_sun0: i64) -> (i64, i64) {
    let isodow = if weekday_sun0 == 0 { 7 } else { weekday_sun0 };
    let week = (day_of_year + 1 - isodow + 10) / 7;
    if week < 1 {
        (iso_weeks_in_year(year - 1), year - 1)
    } else if week > iso_weeks_in_year(year) {
        (1, year + 1)
    } else {
        (week, year)
    }
}

/// 0-based day-of-year offset (possibly negative, spilling into the previous
/// calendar year) of the given ISO week and weekday within `year`.
fn iso_week_day_offset(year: i64, week: i64, weekday_sun0: i64) -> i64 {
    // January 4 is always inside ISO week 1.
    let jan4_monday0 = (weekday_of(days_to_year(year) + 3) + 6) % 7;
    let week1_monday = 3 - jan4_monday0;
    week1_monday + (week - 1) * 7 + (weekday_sun0 + 6) % 7
}

fn validate(dt: &DateTime) -> Result<(), ParseError> {
    let range_err = |field: &'static str, value: i64| Err(ParseError::FieldOutOfRange { field, value });

    if dt.flags.contains(FieldFlags::YEAR) && !(0..=9999).contains(&dt.year) {
        return range_err("year", dt.year);
    }
    if dt.flags.contains(FieldFlags::MONTH) && !(0..=11).contains(&dt.month) {
        return range_err("month", dt.month);
    }
    if dt.flags.contains(FieldFlags::WEEK) && !(0..=53).contains(&dt.iso_week) {
        return range_err("week", dt.iso_week);
    }
    if dt.flags.contains(FieldFlags::MDAY) {
        let limit = if dt.flags.contains(FieldFlags::MONTH) { days_in_month(dt.year, dt.month) } else { 31 };
        if !(0..=limit).contains(&dt.day_of_month) {
            return range_err("day of month", dt.day_of_month);
        }
    }
    if dt.flags.contains(FieldFlags::YDAY) && !(0..year_length(dt.year)).contains(&dt.day_of_year) {
        return range_err("day of year", dt.day_of_year);
    }
    if dt.flags.contains(FieldFlags::WDAY) && !(0..=6).contains(&dt.day_of_week) {
        return range_err("day of week", dt.day_of_week);
    }
    if dt.flags.contains(FieldFlags::HOUR) && !(0..=24).contains(&dt.hour) {
        return range_err("hour", dt.hour);
    }
    if dt.flags.contains(FieldFlags::MINUTE) && !(0..=59).contains(&dt.minute) {
        return range_err("minute", dt.minute);
    }
    if dt.flags.contains(FieldFlags::SECOND) && !(0..=60).contains(&dt.second) {
        return range_err("second", dt.second);
    }
    Ok(())
}

/// Resolve a field record into seconds since the epoch.
///
/// Day-within-year resolution prefers month + day-of-month, then day-of-year,
/// then ISO week + weekday (defaulting to Monday when no weekday was given).
/// A month with no day contributes the first of the month.
///
/// When `is_dst` is set the hour is shifted forward by one before conversion.
/// `from_seconds` never reconstructs a DST flag, so the two directions are
/// asymmetric on that path; compatibility requires keeping it that way.
pub fn to_seconds(dt: &DateTime) -> Result<f64, ParseError> {
    validate(dt)?;

    let leap = is_leap_year(dt.year) as usize;
    let mut days = days_to_year(dt.year);

    if dt.flags.intersects(FieldFlags::MONTH | FieldFlags::MDAY) {
        let day = if dt.flags.contains(FieldFlags::MDAY) { dt.day_of_month } else { 1 };
        days += CUMULATIVE_DAYS[leap][dt.month as usize] + (day - 1);
    } else if dt.flags.contains(FieldFlags::YDAY) {
        days += dt.day_of_year;
    } else if dt.flags.contains(FieldFlags::WEEK) {
        let weekday = if dt.flags.contains(FieldFlags::WDAY) { dt.day_of_week } else { 1 };
        days += iso_week_day_offset(dt.year, dt.iso_week, weekday);
    }

    let hour = if dt.is_dst { dt.hour + 1 } else { dt.hour };
    let seconds = days * 86400 + dt.tz_offset_minutes * 60 + hour * 3600 + dt.minute * 60 + dt.second;
    Ok(seconds as f64 + dt.fraction)
}

/// Expand seconds since the epoch into a fully populated field record.
///
/// The inverse of [`to_seconds`] over the integer path: the timezone offset
/// comes back as zero and `is_dst` as false, so
/// `to_seconds(&from_seconds(s)) == s` exactly for any representable `s`.
pub fn from_seconds(seconds: f64) -> DateTime {
    let whole = seconds.floor();
    let fraction = seconds - whole;
    let total = whole as i64;
    let mut days = total.div_euclid(86400);
    let remainder = total.rem_euclid(86400);

    let mut dt = DateTime {
        hour: remainder / 3600,
        minute: remainder % 3600 / 60,
        second: remainder % 60,
        fraction,
        day_of_week: weekday_of(days),
        ..DateTime::default()
    };

    let mut year = 1970;
    if days >= 0 {
        while days >= year_length(year) {
            days -= year_length(year);
            year += 1;
        }
    } else {
        while days < 0 {
            year -= 1;
            days += year_length(year);
        }
    }
    dt.year = year;
    dt.is_leap_year = is_leap_year(year);
    dt.day_of_year = days;

    let table = &CUMULATIVE_DAYS[dt.is_leap_year as usize];
    let mut month = 0;
    while table[month + 1] <= days {
        month += 1;
    }
    dt.month = month as i64;
    dt.day_of_month = days - table[month] + 1;

    let (week, week_year) = iso_week_of(year, days, dt.day_of_week);
    dt.iso_week = week;
    dt.iso_week_year = week_year;

    dt.flags = FieldFlags::YEAR
        | FieldFlags::MONTH
        | FieldFlags::MDAY
        | FieldFlags::WDAY
        | FieldFlags::YDAY
        | FieldFlags::WEEK
        | FieldFlags::HOUR
        | FieldFlags::MINUTE
        | FieldFlags::SECOND;
    if dt.fraction != 0.0 {
        dt.flags |= FieldFlags::FRACTION;
    }
    dt
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn leap_year_predicate() {
        assert!(!is_leap_year(1900));
        assert!(is_leap_year(2000));
        assert!(is_leap_year(2012));
        assert!(!is_leap_year(2013));
    }

    #[test]
    fn round_trip_is_exact_over_a_wide_range() {
        let mut s: i64 = -5_000_000_000;
        while s <= 5_000_000_000 {
            let dt = from_seconds(s as f64);
            assert_eq!(to_seconds(&dt).unwrap(), s as f64, "at {s}");
            s += 12_345_677; // prime stride, hits varied times of day
        }
    }

    #[test]
    fn epoch_start_is_a_thursday() {
        let dt = from_seconds(0.0);
        assert_eq!(dt.year, 1970);
        assert_eq!(dt.month, 0);
        assert_eq!(dt.day_of_month, 1);
        assert_eq!(dt.day_of_week, 4);
        assert_eq!(dt.iso_week, 1);
        assert_eq!(dt.iso_week_year, 1970);
    }

    #[test]
    fn iso_week_crosses_the_year_boundary() {
        // 2012-01-01 was a Sunday, in ISO week 52 of 2011.
        let jan1 = DateTime {
            year: 2012,
            month: 0,
            day_of_month: 1,
            flags: FieldFlags::YEAR | FieldFlags::MONTH | FieldFlags::MDAY,
            ..DateTime::default()
        };
        let dt = from_seconds(to_seconds(&jan1).unwrap());
        assert_eq!(dt.day_of_week, 0);
        assert_eq!(dt.iso_week, 52);
        assert_eq!(dt.iso_week_year, 2011);
    }

    #[test]
    fn iso_week_dates_resolve_as_day_within_year() {
        // 2012-W01-1 is Monday, January 2, 2012.
        let dt = DateTime {
            year: 2012,
            iso_week: 1,
            day_of_week: 1,
            flags: FieldFlags::YEAR | FieldFlags::WEEK | FieldFlags::WDAY,
            ..DateTime::default()
        };
        let resolved = from_seconds(to_seconds(&dt).unwrap());
        assert_eq!((resolved.year, resolved.month, resolved.day_of_month), (2012, 0, 2));
    }

    #[test]
    fn dst_shifts_the_hour_forward_one_way() {
        let mut dt = from_seconds(0.0);
        dt.is_dst = true;
        assert_eq!(to_seconds(&dt).unwrap(), 3600.0);
        // from_seconds never reconstructs the flag.
        assert!(!from_seconds(3600.0).is_dst);
    }

    #[test]
    fn out_of_range_fields_are_rejected() {
        let mut dt = from_seconds(to_seconds(&DateTime {
            year: 2012,
            month: 1,
            day_of_month: 1,
            flags: FieldFlags::YEAR | FieldFlags::MONTH | FieldFlags::MDAY,
            ..DateTime::default()
        })
        .unwrap());
        dt.day_of_month = 30; // February 30
        assert_eq!(
            to_seconds(&dt).unwrap_err(),
            ParseError::FieldOutOfRange { field: "day of month", value: 30 }
        );

        let bad_month = DateTime {
            year: 2012,
            month: 12,
            flags: FieldFlags::YEAR | FieldFlags::MONTH,
            ..DateTime::default()
        };
        assert_eq!(to_seconds(&bad_month).unwrap_err(), ParseError::FieldOutOfRange { field: "month", value: 12 });

        let bad_hour = DateTime { hour: 25, flags: FieldFlags::HOUR, ..DateTime::default() };
        assert_eq!(to_seconds(&bad_hour).unwrap_err(), ParseError::FieldOutOfRange { field: "hour", value: 25 });
    }

    #[test]
    fn fields_agree_with_chrono() {
        let mut s: i64 = -5_000_000_000;
        while s <= 5_000_000_000 {
            let dt = from_seconds(s as f64);
            let oracle = chrono::DateTime::from_timestamp(s, 0).unwrap();
            assert_eq!(dt.year, oracle.year() as i64, "year at {s}");
            assert_eq!(dt.month + 1, oracle.month() as i64, "month at {s}");
            assert_eq!(dt.day_of_month, oracle.day() as i64, "day at {s}");
            assert_eq!(dt.day_of_year + 1, oracle.ordinal() as i64, "ordinal at {s}");
            assert_eq!(dt.hour, oracle.hour() as i64, "hour at {s}");
            assert_eq!(dt.minute, oracle.minute() as i64, "minute at {s}");
            assert_eq!(dt.second, oracle.second() as i64, "second at {s}");
            assert_eq!(dt.day_of_week, oracle.weekday().num_days_from_sunday() as i64, "weekday at {s}");
            assert_eq!(dt.iso_week, oracle.iso_week().week() as i64, "iso week at {s}");
            assert_eq!(dt.iso_week_year, oracle.iso_week().year() as i64, "iso week-year at {s}");
            s += 9_999_991;
        }
    }
}
