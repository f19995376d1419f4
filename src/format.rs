//! Formatter: render a field record through a `%`-directive string.
//!
//! Two-pass design. Pass one walks the directive string and sums each
//! directive's output width to pre-size the buffer exactly; pass two writes
//! the substitutions. Both passes go through the same [`Directive`] value,
//! whose `width`/`write` pair is kept adjacent per variant so the two passes
//! cannot drift apart. An unrecognized `%`-directive is silently dropped.

use crate::calendar::DateTime;
use crate::tables::{MONTHS, WEEKDAYS};

/// Directive string used when the caller supplies none.
pub const DEFAULT_DIRECTIVE: &str = "%a %b %d %H:%M:%S %z %Y";

// Composite directives expand to these sub-layouts.
const LAYOUT_DATE_TIME: &str = "%a %b %e %H:%M:%S %Y"; // %c
const LAYOUT_US_DATE: &str = "%m/%d/%y"; // %D, %x
const LAYOUT_ISO_DATE: &str = "%Y-%m-%d"; // %F
const LAYOUT_CLOCK_12: &str = "%I:%M:%S %p"; // %r
const LAYOUT_CLOCK_24: &str = "%H:%M:%S"; // %T

/// Everything a directive may draw on while rendering.
pub(crate) struct Render<'a> {
    pub dt: &'a DateTime,
    pub seconds: f64,
}

/// One recognized `%`-directive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    WeekdayAbbrev,  // %a
    WeekdayFull,    // %A
    MonthAbbrev,    // %b, %h
    MonthFull,      // %B
    DateAndTime,    // %c
    Century,        // %C
    DayZero,        // %d
    UsDate,         // %D, %x
    DaySpace,       // %e
    IsoDate,        // %F
    IsoWeekYear2,   // %g
    IsoWeekYear4,   // %G
    Hour24,         // %H
    Hour12,         // %I
    YearDay,        // %j
    Hour24Space,    // %k
    Hour12Space,    // %l
    Month,          // %m
    Minute,         // %M
    Nanoseconds,    // %N
    MeridianLower,  // %P
    MeridianUpper,  // %p
    Clock12,        // %r
    EpochSeconds,   // %s
    Second,         // %S
    Clock24,        // %T
    IsoWeekday,     // %u
    WeekSunday,     // %U
    WeekMonday,     // %W
    IsoWeek,        // %V
    WeekdayNumber,  // %w
    Year2,          // %y
    Year4,          // %Y
    ZoneOffset,     // %z
    Percent,        // %%
}

impl Directive {
    fn from_char(c: char) -> Option<Self> {
        use Directive::*;
        Some(match c {
            'a' => WeekdayAbbrev,
            'A' => WeekdayFull,
            'b' | 'h' => MonthAbbrev,
            'B' => MonthFull,
            'c' => DateAndTime,
            'C' => Century,
            'd' => DayZero,
            'D' | 'x' => UsDate,
            'e' => DaySpace,
            'F' => IsoDate,
            'g' => IsoWeekYear2,
            'G' => IsoWeekYear4,
            'H' => Hour24,
            'I' => Hour12,
            'j' => YearDay,
            'k' => Hour24Space,
            'l' => Hour12Space,
            'm' => Month,
            'M' => Minute,
            'N' => Nanoseconds,
            'P' => MeridianLower,
            'p' => MeridianUpper,
            'r' => Clock12,
            's' => EpochSeconds,
            'S' => Second,
            'T' => Clock24,
            'u' => IsoWeekday,
            'U' => WeekSunday,
            'W' => WeekMonday,
            'V' => IsoWeek,
            'w' => WeekdayNumber,
            'y' => Year2,
            'Y' => Year4,
            'z' => ZoneOffset,
            '%' => Percent,
            _ => return None,
        })
    }

    /// Exact output byte width of this directive.
    fn width(&self, ctx: &Render) -> usize {
        use Directive::*;
        match self {
            WeekdayAbbrev | MonthAbbrev => 3,
            WeekdayFull => WEEKDAYS[weekday_index(ctx.dt)].len(),
            MonthFull => MONTHS[month_index(ctx.dt)].len(),
            DateAndTime => layout_width(LAYOUT_DATE_TIME, ctx),
            UsDate => layout_width(LAYOUT_US_DATE, ctx),
            IsoDate => layout_width(LAYOUT_ISO_DATE, ctx),
            Clock12 => layout_width(LAYOUT_CLOCK_12, ctx),
            Clock24 => layout_width(LAYOUT_CLOCK_24, ctx),
            Century | DayZero | DaySpace | IsoWeekYear2 | Hour24 | Hour12 | Hour24Space
            | Hour12Space | Month | Minute | MeridianLower | MeridianUpper | Second | WeekSunday
            | WeekMonday | IsoWeek | Year2 => 2,
            IsoWeekYear4 => year_width(ctx.dt.iso_week_year),
            Year4 => year_width(ctx.dt.year),
            YearDay => 3,
            Nanoseconds => 9,
            EpochSeconds => epoch_string(ctx).len(),
            IsoWeekday | WeekdayNumber | Percent => 1,
            ZoneOffset => 5,
        }
    }

    /// Write this directive's substitution. Must emit exactly [`width`] bytes.
    fn write(&self, ctx: &Render, out: &mut String) {
        use Directive::*;
        let dt = ctx.dt;
        match self {
            WeekdayAbbrev => push_name(out, WEEKDAYS[weekday_index(dt)], Some(3)),
            WeekdayFull => push_name(out, WEEKDAYS[weekday_index(dt)], None),
            MonthAbbrev => push_name(out, MONTHS[month_index(dt)], Some(3)),
            MonthFull => push_name(out, MONTHS[month_index(dt)], None),
            DateAndTime => render_into(LAYOUT_DATE_TIME, ctx, out),
            UsDate => render_into(LAYOUT_US_DATE, ctx, out),
            IsoDate => render_into(LAYOUT_ISO_DATE, ctx, out),
            Clock12 => render_into(LAYOUT_CLOCK_12, ctx, out),
            Clock24 => render_into(LAYOUT_CLOCK_24, ctx, out),
            Century => push_padded(out, dt.year.div_euclid(100), 2, '0'),
            DayZero => push_padded(out, dt.day_of_month, 2, '0'),
            DaySpace => push_padded(out, dt.day_of_month, 2, ' '),
            IsoWeekYear2 => push_padded(out, dt.iso_week_year.rem_euclid(100), 2, '0'),
            IsoWeekYear4 => push_year(out, dt.iso_week_year),
            Hour24 => push_padded(out, dt.hour, 2, '0'),
            Hour12 => push_padded(out, hour_12(dt), 2, '0'),
            Hour24Space => push_padded(out, dt.hour, 2, ' '),
            Hour12Space => push_padded(out, hour_12(dt), 2, ' '),
            YearDay => push_padded(out, dt.day_of_year + 1, 3, '0'),
            Month => push_padded(out, dt.month + 1, 2, '0'),
            Minute => push_padded(out, dt.minute, 2, '0'),
            Nanoseconds => {
                let nanos = ((dt.fraction * 1e9).round() as i64).clamp(0, 999_999_999);
                push_padded(out, nanos, 9, '0');
            }
            MeridianLower => out.push_str(if dt.hour < 12 { "am" } else { "pm" }),
            MeridianUpper => out.push_str(if dt.hour < 12 { "AM" } else { "PM" }),
            EpochSeconds => out.push_str(&epoch_string(ctx)),
            Second => push_padded(out, dt.second, 2, '0'),
            IsoWeekday => push_padded(out, if dt.day_of_week == 0 { 7 } else { dt.day_of_week }, 1, '0'),
            WeekSunday => push_padded(out, (dt.day_of_year + 7 - dt.day_of_week) / 7, 2, '0'),
            WeekMonday => {
                let monday0 = (dt.day_of_week + 6) % 7;
                push_padded(out, (dt.day_of_year + 7 - monday0) / 7, 2, '0');
            }
            IsoWeek => push_padded(out, dt.iso_week, 2, '0'),
            WeekdayNumber => push_padded(out, dt.day_of_week, 1, '0'),
            Year2 => push_padded(out, dt.year.rem_euclid(100), 2, '0'),
            Year4 => push_year(out, dt.year),
            ZoneOffset => {
                // Displayed with the conventional east-positive sign.
                let east = -dt.tz_offset_minutes;
                out.push(if east < 0 { '-' } else { '+' });
                push_padded(out, east.abs() / 60, 2, '0');
                push_padded(out, east.abs() % 60, 2, '0');
            }
            Percent => out.push('%'),
        }
    }
}

fn weekday_index(dt: &DateTime) -> usize {
    dt.day_of_week.rem_euclid(7) as usize
}

fn month_index(dt: &DateTime) -> usize {
    dt.month.rem_euclid(12) as usize
}

fn hour_12(dt: &DateTime) -> i64 {
    (dt.hour + 11) % 12 + 1
}

fn year_width(year: i64) -> usize {
    if (0..=9999).contains(&year) { 4 } else { year.to_string().len() }
}

fn push_year(out: &mut String, year: i64) {
    if (0..=9999).contains(&year) {
        push_padded(out, year, 4, '0');
    } else {
        out.push_str(&year.to_string());
    }
}

fn epoch_string(ctx: &Render) -> String {
    (ctx.seconds.floor() as i64).to_string()
}

/// Push a table name with its first letter upper-cased, optionally truncated.
fn push_name(out: &mut String, name: &str, truncate: Option<usize>) {
    let take = truncate.unwrap_or(name.len());
    for (i, c) in name.chars().take(take).enumerate() {
        out.push(if i == 0 { c.to_ascii_uppercase() } else { c });
    }
}

fn push_padded(out: &mut String, value: i64, width: usize, pad: char) {
    let digits = value.to_string();
    for _ in digits.len()..width {
        out.push(pad);
    }
    out.push_str(&digits);
}

/// Pass one: exact output byte length of `directive` for this record.
fn layout_width(directive: &str, ctx: &Render) -> usize {
    let mut chars = directive.chars();
    let mut total = 0;
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(next) = chars.next() {
                if let Some(dir) = Directive::from_char(next) {
                    total += dir.width(ctx);
                }
                // Unrecognized directives contribute nothing.
            }
        } else {
            total += c.len_utf8();
        }
    }
    total
}

/// Pass two: write the substituted string.
fn render_into(directive: &str, ctx: &Render, out: &mut String) {
    let mut chars = directive.chars();
    while let Some(c) = chars.next() {
        if c == '%' {
            if let Some(next) = chars.next() {
                if let Some(dir) = Directive::from_char(next) {
                    dir.write(ctx, out);
                }
            }
        } else {
            out.push(c);
        }
    }
}

/// Render `directive` into an exactly pre-sized buffer.
pub(crate) fn render(directive: &str, ctx: &Render) -> String {
    let total = layout_width(directive, ctx);
    let mut out = String::with_capacity(total);
    render_into(directive, ctx, &mut out);
    debug_assert_eq!(out.len(), total, "width table out of sync for `{directive}`");
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::from_seconds;

    fn render_at(seconds: f64, directive: &str) -> String {
        let dt = from_seconds(seconds);
        render(directive, &Render { dt: &dt, seconds })
    }

    const JAN_31_2012: f64 = 1_327_968_000.0;

    #[test]
    fn iso_date_has_the_promised_width() {
        let out = render_at(JAN_31_2012, "%Y-%m-%d");
        assert_eq!(out, "2012-01-31");
        assert_eq!(out.len(), 10);
    }

    #[test]
    fn default_directive_at_the_epoch() {
        let dt = from_seconds(0.0);
        let out = render(DEFAULT_DIRECTIVE, &Render { dt: &dt, seconds: 0.0 });
        assert_eq!(out, "Thu Jan 01 00:00:00 +0000 1970");
    }

    #[test]
    fn names_and_paddings() {
        assert_eq!(render_at(0.0, "%A %B"), "Thursday January");
        assert_eq!(render_at(0.0, "%a %b %h"), "Thu Jan Jan");
        assert_eq!(render_at(0.0, "%e %j %C %y"), " 1 001 19 70");
        assert_eq!(render_at(JAN_31_2012, "%D"), "01/31/12");
        assert_eq!(render_at(JAN_31_2012, "%F"), "2012-01-31");
        assert_eq!(render_at(JAN_31_2012, "%c"), "Tue Jan 31 00:00:00 2012");
    }

    #[test]
    fn twelve_hour_clock_and_meridians() {
        assert_eq!(render_at(0.0, "%I %l %p %P"), "12 12 AM am");
        assert_eq!(render_at(13.0 * 3600.0, "%I %p %r"), "01 PM 01:00:00 PM");
        assert_eq!(render_at(0.0, "%T"), "00:00:00");
    }

    #[test]
    fn week_numbers() {
        // The epoch day was a Thursday: calendar week 0, ISO week 1.
        assert_eq!(render_at(0.0, "%U %W %V %u %w"), "00 00 01 4 4");
        // 2012-01-01, a Sunday, sits in ISO week 52 of 2011.
        let jan1_2012 = 1_325_376_000.0;
        assert_eq!(render_at(jan1_2012, "%V %G %g"), "52 2011 11");
        assert_eq!(render_at(jan1_2012, "%u %w"), "7 0");
    }

    #[test]
    fn epoch_seconds_and_fraction() {
        assert_eq!(render_at(JAN_31_2012, "%s"), "1327968000");
        assert_eq!(render_at(-1.0, "%s"), "-1");
        assert_eq!(render_at(0.25, "%N"), "250000000");
    }

    #[test]
    fn zone_offset_follows_the_display_convention() {
        let mut dt = from_seconds(0.0);
        dt.tz_offset_minutes = 300; // EST, minutes west
        assert_eq!(render("%z", &Render { dt: &dt, seconds: 0.0 }), "-0500");
        dt.tz_offset_minutes = -330;
        assert_eq!(render("%z", &Render { dt: &dt, seconds: 0.0 }), "+0530");
    }

    #[test]
    fn unrecognized_directives_are_dropped() {
        assert_eq!(render_at(0.0, "a%Qb"), "ab");
        assert_eq!(render_at(0.0, "%%"), "%");
        assert_eq!(render_at(0.0, "100%"), "100");
    }

    #[test]
    fn both_passes_agree_on_every_directive() {
        let battery = "%a %A %b %B %c %C %d %D %e %F %g %G %H %I %j %k %l %m %M %N %p %P %r %s %S %T %u %U %W %V %w %x %y %Y %z %%";
        for &s in &[0.0, -1.0, JAN_31_2012, 5_000_000_000.0, -5_000_000_000.0] {
            let dt = from_seconds(s);
            let ctx = Render { dt: &dt, seconds: s };
            assert_eq!(render(battery, &ctx).len(), layout_width(battery, &ctx), "at {s}");
        }
    }
}
