#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
use super::*;
use proptest::prelude::*;
use yare::parameterized;

#[parameterized(
    zero = { Duration::ZERO, "0s" },
    nanos = { Duration::from_nanos(999), "999ns" },
    micros = { Duration::from_micros(1), "1µs" },
    fractional_micros = { Duration::from_nanos(1_500), "1.5µs" },
    one_milli = { Duration::from_millis(1), "1ms" },
    half_second = { Duration::from_millis(500), "500ms" },
    fractional_millis = { Duration::from_micros(2_250), "2.25ms" },
    one_second = { Duration::from_secs(1), "1s" },
    two_seconds = { Duration::from_secs(2), "2s" },
    fractional_seconds = { Duration::from_millis(1_500), "1.5s" },
    one_minute = { Duration::from_secs(60), "1m0s" },
    minute_and_half = { Duration::from_secs(90), "1m30s" },
    one_hour = { Duration::from_secs(3_600), "1h0m0s" },
    mixed = { Duration::from_millis(3_723_500), "1h2m3.5s" },
    day = { Duration::from_secs(86_400), "24h0m0s" },
)]
fn test_format(duration: Duration, expected: &str) {
    assert_eq!(format(duration), expected);
}

#[parameterized(
    zero = { "0", Duration::ZERO },
    zero_seconds = { "0s", Duration::ZERO },
    millis = { "500ms", Duration::from_millis(500) },
    seconds = { "2s", Duration::from_secs(2) },
    fraction = { "1.5s", Duration::from_millis(1_500) },
    leading_dot = { ".5s", Duration::from_millis(500) },
    compound = { "1h2m3.5s", Duration::from_millis(3_723_500) },
    micro_ascii = { "10us", Duration::from_micros(10) },
    micro_sign = { "10µs", Duration::from_micros(10) },
    nanos = { "7ns", Duration::from_nanos(7) },
    plus_sign = { "+3m", Duration::from_secs(180) },
    padded = { "  250ms ", Duration::from_millis(250) },
    sub_nano_fraction = { "1.0000000009s", Duration::from_secs(1) },
)]
fn test_parse(input: &str, expected: Duration) {
    assert_eq!(parse(input).unwrap(), expected);
}

#[test]
fn test_parse_empty() {
    assert_eq!(parse("   "), Err(DurationError::Empty));
}

#[test]
fn test_parse_missing_unit() {
    assert!(matches!(parse("15"), Err(DurationError::MissingUnit(_))));
}

#[test]
fn test_parse_unknown_unit() {
    let err = parse("3days").unwrap_err();
    assert_eq!(
        err,
        DurationError::UnknownUnit {
            unit: "days".to_string(),
            input: "3days".to_string(),
        }
    );
}

#[test]
fn test_parse_rejects_negative() {
    assert!(matches!(parse("-1s"), Err(DurationError::Invalid(_))));
}

#[test]
fn test_parse_rejects_lone_dot() {
    assert!(matches!(parse(".s"), Err(DurationError::Invalid(_))));
}

#[test]
fn test_parse_overflow() {
    let err = parse("99999999999999999999999999h").unwrap_err();
    assert!(matches!(err, DurationError::Overflow(_)));
}

#[test]
fn test_error_message() {
    let err = parse("3days").unwrap_err();
    assert_eq!(err.to_string(), "unknown unit 'days' in duration '3days'");
}

proptest! {
    #[test]
    fn parse_accepts_formatted_output(nanos in 0u64..10_000_000_000_000) {
        let duration = Duration::from_nanos(nanos);
        prop_assert_eq!(parse(&format(duration)).unwrap(), duration);
    }
}
