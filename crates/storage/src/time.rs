//! Conversion between race time strings and stored seconds.
//!
//! Times are kept as [`Decimal`] seconds with millisecond precision so that a
//! parsed `18:32.45` is stored as exactly `1112.45`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use thiserror::Error;

/// Number of fractional digits kept in storage.
pub const STORED_SCALE: u32 = 3;

/// Largest value a `NUMERIC(8,3)` column holds.
pub const MAX_SECONDS: Decimal = Decimal::from_parts(99_999_999, 0, 0, false, 3);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    #[error("empty time string")]
    Empty,

    #[error("negative time '{0}'")]
    Negative(String),

    #[error("malformed time '{0}'")]
    Malformed(String),

    #[error("seconds out of range in '{0}'")]
    SecondsOutOfRange(String),

    #[error("minutes out of range in '{0}'")]
    MinutesOutOfRange(String),

    #[error("time '{0}' exceeds {max} seconds", max = MAX_SECONDS)]
    TooLarge(String),
}

/// Parses `M:SS`, `MM:SS`, `MM:SS.cc`, `H:MM:SS[.cc]` or bare `SSS.cc` into seconds.
pub fn parse_time(text: &str) -> Result<Decimal, FormatError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(FormatError::Empty);
    }
    if trimmed.starts_with('-') {
        return Err(FormatError::Negative(trimmed.to_string()));
    }

    let malformed = || FormatError::Malformed(trimmed.to_string());

    let (head, seconds_part) = match trimmed.rsplit_once(':') {
        Some((head, seconds)) => (Some(head), seconds),
        None => (None, trimmed),
    };

    let (whole, fraction) = match seconds_part.split_once('.') {
        Some((whole, fraction)) => (whole, Some(fraction)),
        None => (seconds_part, None),
    };

    if !is_digits(whole) || fraction.is_some_and(|f| !is_digits(f)) {
        return Err(malformed());
    }

    let seconds: Decimal = seconds_part.parse().map_err(|_| malformed())?;

    let Some(head) = head else {
        // Bare seconds are only accepted with an explicit fraction.
        if fraction.is_none() {
            return Err(malformed());
        }
        return within_range(seconds.round_dp(STORED_SCALE), trimmed);
    };

    if whole.len() != 2 {
        return Err(malformed());
    }
    if seconds >= Decimal::from(60) {
        return Err(FormatError::SecondsOutOfRange(trimmed.to_string()));
    }

    let (hours, minutes) = match head.split_once(':') {
        Some((hours, minutes)) => {
            let hours = parse_segment(hours).ok_or_else(malformed)?;
            if minutes.len() != 2 {
                return Err(malformed());
            }
            let minutes = parse_segment(minutes).ok_or_else(malformed)?;
            if minutes >= 60 {
                return Err(FormatError::MinutesOutOfRange(trimmed.to_string()));
            }
            (hours, minutes)
        }
        None => (0, parse_segment(head).ok_or_else(malformed)?),
    };

    let too_large = || FormatError::TooLarge(trimmed.to_string());
    let whole_minutes = hours
        .checked_mul(60)
        .and_then(|m| m.checked_add(minutes))
        .ok_or_else(too_large)?;
    let total = whole_minutes
        .checked_mul(60)
        .map(Decimal::from)
        .and_then(|m| m.checked_add(seconds))
        .ok_or_else(too_large)?;

    within_range(total.round_dp(STORED_SCALE), trimmed)
}

fn within_range(total: Decimal, text: &str) -> Result<Decimal, FormatError> {
    if total > MAX_SECONDS {
        return Err(FormatError::TooLarge(text.to_string()));
    }
    Ok(total)
}

/// Renders seconds as `MM:SS.cc`, rounded half away from zero to the centisecond.
pub fn format_seconds(seconds: Decimal) -> String {
    let rounded = seconds
        .abs()
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let centis = (rounded * Decimal::ONE_HUNDRED)
        .trunc()
        .to_u64()
        .unwrap_or_default();

    let minutes = centis / 6000;
    let secs = (centis % 6000) / 100;
    let hundredths = centis % 100;

    format!("{minutes:02}:{secs:02}.{hundredths:02}")
}

/// Null-tolerant [`format_seconds`]; a missing time stays missing.
pub fn format_time(seconds: Option<Decimal>) -> Option<String> {
    seconds.map(format_seconds)
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

fn parse_segment(s: &str) -> Option<u64> {
    if is_digits(s) { s.parse().ok() } else { None }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    #[test]
    fn test_parse_minutes_seconds_hundredths() {
        assert_eq!(parse_time("18:32.45").unwrap(), dec("1112.45"));
        assert_eq!(parse_time("16:45.123").unwrap(), dec("1005.123"));
        assert_eq!(parse_time(" 5:07 ").unwrap(), dec("307"));
        assert_eq!(parse_time("09:59.9").unwrap(), dec("599.9"));
    }

    #[test]
    fn test_parse_hours_and_bare_seconds() {
        assert_eq!(parse_time("1:02:03.50").unwrap(), dec("3723.50"));
        assert_eq!(parse_time("754.20").unwrap(), dec("754.20"));
    }

    #[test]
    fn test_parse_rounds_to_milliseconds() {
        assert_eq!(parse_time("10:00.12345").unwrap(), dec("600.123"));
    }

    #[test]
    fn test_parse_rejects_malformed_input() {
        assert_eq!(parse_time(""), Err(FormatError::Empty));
        assert!(matches!(parse_time("-1:00"), Err(FormatError::Negative(_))));
        assert!(matches!(parse_time("18:75.00"), Err(FormatError::SecondsOutOfRange(_))));
        assert!(matches!(parse_time("1:75:00"), Err(FormatError::MinutesOutOfRange(_))));
        assert!(matches!(parse_time("ab:cd"), Err(FormatError::Malformed(_))));
        assert!(matches!(parse_time("18:3"), Err(FormatError::Malformed(_))));
        assert!(matches!(parse_time("18:32."), Err(FormatError::Malformed(_))));
        assert!(matches!(parse_time("DNF"), Err(FormatError::Malformed(_))));
        assert!(matches!(parse_time("12"), Err(FormatError::Malformed(_))));
    }

    #[test]
    fn test_parse_rejects_values_beyond_storage() {
        assert!(matches!(
            parse_time("999999999999999999:00"),
            Err(FormatError::TooLarge(_))
        ));
        assert!(matches!(
            parse_time("9999999999999999:00:00"),
            Err(FormatError::TooLarge(_))
        ));
        assert!(matches!(parse_time("2000:00.00"), Err(FormatError::TooLarge(_))));
        assert!(matches!(parse_time("100000.5"), Err(FormatError::TooLarge(_))));

        assert_eq!(parse_time("1666:39.999").unwrap(), MAX_SECONDS);
        assert_eq!(MAX_SECONDS, dec("99999.999"));
    }

    #[test]
    fn test_format_rounds_to_centiseconds() {
        assert_eq!(format_seconds(dec("1005.123")), "16:45.12");
        assert_eq!(format_seconds(dec("1005.125")), "16:45.13");
        assert_eq!(format_seconds(dec("1112.45")), "18:32.45");
        assert_eq!(format_seconds(dec("65")), "01:05.00");
    }

    #[test]
    fn test_format_carries_into_minutes() {
        assert_eq!(format_seconds(dec("59.996")), "01:00.00");
        assert_eq!(format_seconds(dec("6000")), "100:00.00");
    }

    #[test]
    fn test_format_time_missing_value() {
        assert_eq!(format_time(None), None);
        assert_eq!(format_time(Some(dec("0"))), Some("00:00.00".to_string()));
    }

    #[test]
    fn test_round_trip_within_a_centisecond() {
        for text in ["18:32.45", "05:00", "21:09.99", "16:45.12", "00:59.01"] {
            let seconds = parse_time(text).unwrap();
            let formatted = format_seconds(seconds);
            let back = parse_time(&formatted).unwrap();
            assert!((back - seconds).abs() <= dec("0.01"), "{text} -> {formatted}");
        }
        assert_eq!(format_seconds(parse_time("5:00").unwrap()), "05:00.00");
    }
}
