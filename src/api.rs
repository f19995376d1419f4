//! Public entry points tying the pipeline together.

use std::time::{Duration, Instant};

use crate::calendar::{self, DateTime};
use crate::error::ParseError;
use crate::extract::{date, separator, time, timezone};
use crate::format::{DEFAULT_DIRECTIVE, Render, render};
use crate::lexer;

/// What one extraction stage did to the token sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageTrace {
    pub stage: &'static str,
    pub consumed: usize,
    pub remaining: usize,
}

/// Everything [`parse_verbose`] learns along the way.
#[derive(Debug, Clone)]
pub struct ParseDetails {
    pub seconds: f64,
    pub fields: DateTime,
    pub elapsed: Duration,
    pub stages: Vec<StageTrace>,
}

/// Parse a free-form date/time string into seconds since the Unix epoch.
///
/// Fields the input does not mention keep their epoch defaults, so a bare
/// time of day counts from 1970-01-01 and a bare date means midnight UTC.
pub fn parse(input: &str) -> Result<f64, ParseError> {
    let mut seq = lexer::scan(input)?;
    let mut dt = DateTime::default();

    separator::run(&mut seq);
    time::run(&mut seq, &mut dt)?;
    timezone::run(&mut seq, &mut dt);
    date::run(&mut seq, &mut dt)?;

    calendar::to_seconds(&dt)
}

/// Like [`parse`], but also reports the extracted fields and a per-stage
/// account of how many tokens each stage consumed.
pub fn parse_verbose(input: &str) -> Result<ParseDetails, ParseError> {
    let start = Instant::now();
    let mut seq = lexer::scan(input)?;
    let mut dt = DateTime::default();
    let mut stages = Vec::with_capacity(4);

    let consumed = separator::run(&mut seq);
    stages.push(StageTrace { stage: "separator", consumed, remaining: seq.live_count() });
    let consumed = time::run(&mut seq, &mut dt)?;
    stages.push(StageTrace { stage: "time", consumed, remaining: seq.live_count() });
    let consumed = timezone::run(&mut seq, &mut dt);
    stages.push(StageTrace { stage: "timezone", consumed, remaining: seq.live_count() });
    let consumed = date::run(&mut seq, &mut dt)?;
    stages.push(StageTrace { stage: "date", consumed, remaining: seq.live_count() });

    let seconds = calendar::to_seconds(&dt)?;
    Ok(ParseDetails { seconds, fields: dt, elapsed: start.elapsed(), stages })
}

/// Render an epoch timestamp through a `%`-directive string.
///
/// `tz_offset_minutes` is minutes west of UTC and shifts the broken-down
/// fields before rendering; `%z` then shows the matching offset. `None`
/// means UTC, and a missing directive falls back to [`DEFAULT_DIRECTIVE`].
pub fn format(seconds: f64, directive: Option<&str>, tz_offset_minutes: Option<i64>) -> String {
    let offset = tz_offset_minutes.unwrap_or(0);
    let mut dt = calendar::from_seconds(seconds - (offset * 60) as f64);
    dt.tz_offset_minutes = offset;
    render(directive.unwrap_or(DEFAULT_DIRECTIVE), &Render { dt: &dt, seconds })
}

/// [`format`] with the default directive, in UTC.
pub fn format_default(seconds: f64) -> String {
    format(seconds, None, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendar::FieldFlags;

    #[test]
    fn parse_and_format_round_trip() {
        let seconds = parse("2012-01-31 10:30:45").unwrap();
        assert_eq!(seconds, 1_328_005_845.0);
        assert_eq!(format(seconds, Some("%F %T"), None), "2012-01-31 10:30:45");
    }

    #[test]
    fn verbose_reports_each_stage_once() {
        let details = parse_verbose("2012-01-31T10:30 EST").unwrap();
        assert_eq!(details.seconds, 1_328_023_800.0);
        let names: Vec<_> = details.stages.iter().map(|s| s.stage).collect();
        assert_eq!(names, ["separator", "time", "timezone", "date"]);
        assert_eq!(details.stages[0].consumed, 1);
        assert!(details.fields.flags.contains(FieldFlags::ZONE));
        assert_eq!(details.fields.tz_offset_minutes, 300);
    }

    #[test]
    fn verbose_only_the_terminator_remains() {
        let details = parse_verbose("10:30").unwrap();
        assert_eq!(details.stages.last().unwrap().remaining, 1);
    }

    #[test]
    fn format_applies_the_display_offset() {
        assert_eq!(format(0.0, Some("%H:%M %z"), Some(300)), "19:00 -0500");
        assert_eq!(format(0.0, Some("%H:%M %z"), Some(-330)), "05:30 +0530");
        assert_eq!(format_default(0.0), "Thu Jan 01 00:00:00 +0000 1970");
    }

    #[test]
    fn parse_errors_surface() {
        assert_eq!(parse("hello"), Err(ParseError::UnknownToken("hello".into())));
        assert_eq!(parse("13/45/2012"), Err(ParseError::NoMatchingPattern));
    }
}
