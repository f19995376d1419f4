use crate::error::ParseError;
use crate::parse;

#[test]
fn corpus() {
    let cases: Vec<(f64, &str)> = vec![
        // time of day only
        (37845.0, "10:30:45"),
        (37800.0, "10:30"),
        (82800.0, "11:00 pm"),
        (86400.0, "12:00 pm"),
        (37845.5, "10:30:45.5"),
        (37845.25, "10:30:45,25"),
        (37845.5, "10:30:45:500"),
        // compact and stamp forms
        (37845.0, "103045"),
        (946_684_799.0, "19991231235959"),
        // explicit offsets and zones
        (55800.0, "10:00 +0530"),
        (18000.0, "10:00 -0500"),
        (54000.0, "10:00 EST"),
        (39600.0, "10:00 a"),
        (32400.0, "10:00 n"),
        (36000.0, "10:00 z"),
        // bare dates
        (1_327_968_000.0, "2012-01-31"),
        (1_327_968_000.0, "2012/01/31"),
        (1_327_968_000.0, "01/31/2012"),
        (1_327_968_000.0, "31.01.2012"),
        (1_327_968_000.0, "20120131"),
        (1_327_968_000.0, "31/jan/2012"),
        (1_327_968_000.0, "jan/31/2012"),
        (1_327_968_000.0, "2012/jan/31"),
        (1_327_968_000.0, "jan 31 2012"),
        (1_327_968_000.0, "31 jan 2012"),
        (1_327_968_000.0, "january 31, 2012"),
        (1_325_376_000.0, "2012"),
        (1_325_376_000.0, "2012-01-01"),
        (1_325_376_000.0, "2012-001"),
        (2_678_400.0, "032"),
        (29_894_400.0, "12 13"),
        (30_758_400.0, "12/23"),
        // week forms
        (1_327_881_600.0, "2012w05"),
        (1_325_462_400.0, "2012-W01-1"),
        // two-digit years land in the 20th century
        (-2_082_844_800.0, "Thu, 01 Jan 04"),
        // date and time together
        (1_328_005_800.0, "2012-01-31T10:30"),
        (1_328_005_800.0, "2012-01-31 10:30"),
        (30_812_400.0, "12/23 10:00 EST"),
        (1_356_300_000.0, "december 23, 2012 10:00 pm"),
        (1_330_473_600.0, "feb 29 2012"),
    ];
    for (expected, input) in cases {
        assert_eq!(parse(input), Ok(expected), "input `{input}`");
    }
}

#[test]
fn decorative_weekday_is_dropped_before_matching() {
    assert_eq!(parse("thu 2012-01-31"), Ok(1_327_968_000.0));
    assert_eq!(parse("monday 12/23"), Ok(30_758_400.0));
}

#[test]
fn apostrophe_years_get_the_century_default() {
    // Jan 31 1912; quoted two-digit years normalize like bare ones.
    assert_eq!(parse("jan 31 '12"), Ok(-1_827_792_000.0));
    assert_eq!(parse("31 jan '12"), Ok(-1_827_792_000.0));
}

#[test]
fn daylight_names_shift_one_hour() {
    // EDT is EST with the DST flag, applied on the way to seconds only.
    assert_eq!(parse("10:00 EDT"), Ok(54000.0 + 3600.0));
}

#[test]
fn trailing_military_t_is_a_zone_not_a_separator() {
    assert_eq!(parse("10:00 t"), Ok(36000.0 - 7.0 * 3600.0));
}

#[test]
fn unknown_words_are_fatal() {
    assert_eq!(parse("hello"), Err(ParseError::UnknownToken("hello".into())));
    assert_eq!(parse("10:30 ~"), Err(ParseError::UnknownToken("~".into())));
}

#[test]
fn leftovers_without_a_shape_are_rejected() {
    assert_eq!(parse("13/45/2012"), Err(ParseError::NoMatchingPattern));
    assert_eq!(parse("1 2 3 4 5 6 7"), Err(ParseError::NoMatchingPattern));
}

#[test]
fn odd_digit_offsets_are_malformed() {
    assert_eq!(parse("10:00 +053"), Err(ParseError::MalformedTimezone));
}

#[test]
fn out_of_range_fields_are_rejected() {
    assert_eq!(
        parse("2012-02-30"),
        Err(ParseError::FieldOutOfRange { field: "day of month", value: 30 })
    );
    assert_eq!(parse("feb 29 2013"), Err(ParseError::FieldOutOfRange { field: "day of month", value: 29 }));
    assert_eq!(parse("25:00"), Err(ParseError::FieldOutOfRange { field: "hour", value: 25 }));
    assert_eq!(parse("2012-00-31"), Err(ParseError::FieldOutOfRange { field: "month", value: -1 }));
}
