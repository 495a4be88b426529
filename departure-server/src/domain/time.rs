//! Departure board time handling.
//!
//! Rejseplanen reports a departure as two strings: a clock time `"HH:MM"` and
//! a date `"DD.MM.YY"`. Two-digit years are always read as `20YY`. Both are
//! Danish local time.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone};
use chrono_tz::{Europe::Copenhagen, Tz};

/// Time zone board times are given in.
pub const BOARD_TIMEZONE: Tz = Copenhagen;

/// Offset added to the two-digit year of a board date.
const YEAR_EPOCH: i32 = 2000;

/// Error returned when a board time or date cannot be parsed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid {kind} {input:?}: {reason}")]
pub struct TimeError {
    kind: &'static str,
    input: String,
    reason: &'static str,
}

impl TimeError {
    fn time(input: &str, reason: &'static str) -> Self {
        Self {
            kind: "time",
            input: input.to_string(),
            reason,
        }
    }

    fn date(input: &str, reason: &'static str) -> Self {
        Self {
            kind: "date",
            input: input.to_string(),
            reason,
        }
    }
}

/// Parse a clock time in `"HH:MM"` format.
///
/// # Examples
///
/// ```
/// use departure_server::domain::parse_clock;
///
/// let time = parse_clock("10:20").unwrap();
/// assert_eq!(time.to_string(), "10:20:00");
///
/// assert!(parse_clock("1020").is_err());
/// assert!(parse_clock("24:00").is_err());
/// ```
pub fn parse_clock(s: &str) -> Result<NaiveTime, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 5 {
        return Err(TimeError::time(s, "expected HH:MM format"));
    }
    if bytes[2] != b':' {
        return Err(TimeError::time(s, "expected colon at position 2"));
    }

    let hour = parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::time(s, "bad hour"))?;
    let minute =
        parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::time(s, "bad minute"))?;

    NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(|| TimeError::time(s, "out of range"))
}

/// Parse a board date in `"DD.MM.YY"` format.
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use departure_server::domain::parse_board_date;
///
/// let date = parse_board_date("08.07.15").unwrap();
/// assert_eq!(date, NaiveDate::from_ymd_opt(2015, 7, 8).unwrap());
/// ```
pub fn parse_board_date(s: &str) -> Result<NaiveDate, TimeError> {
    let bytes = s.as_bytes();
    if bytes.len() != 8 {
        return Err(TimeError::date(s, "expected DD.MM.YY format"));
    }
    if bytes[2] != b'.' || bytes[5] != b'.' {
        return Err(TimeError::date(s, "expected dots at positions 2 and 5"));
    }

    let day = parse_two_digits(&bytes[0..2]).ok_or_else(|| TimeError::date(s, "bad day"))?;
    let month = parse_two_digits(&bytes[3..5]).ok_or_else(|| TimeError::date(s, "bad month"))?;
    let year = parse_two_digits(&bytes[6..8]).ok_or_else(|| TimeError::date(s, "bad year"))?;

    NaiveDate::from_ymd_opt(YEAR_EPOCH + year as i32, month, day)
        .ok_or_else(|| TimeError::date(s, "no such day"))
}

/// Combine a board date and clock time into one timestamp.
pub fn parse_board_datetime(date: &str, time: &str) -> Result<NaiveDateTime, TimeError> {
    Ok(parse_board_date(date)?.and_time(parse_clock(time)?))
}

/// Unix seconds of a board time.
///
/// An ambiguous reading (the autumn fall-back hour) takes the earlier
/// instant. A reading skipped by the spring gap is taken as standard time.
pub fn board_timestamp(time: NaiveDateTime) -> i64 {
    BOARD_TIMEZONE
        .from_local_datetime(&time)
        .earliest()
        .map(|local| local.timestamp())
        .unwrap_or_else(|| (time - Duration::hours(1)).and_utc().timestamp())
}

fn parse_two_digits(bytes: &[u8]) -> Option<u32> {
    match bytes {
        [a, b] if a.is_ascii_digit() && b.is_ascii_digit() => {
            Some(u32::from(a - b'0') * 10 + u32::from(b - b'0'))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_board_timestamp() {
        let dt = parse_board_datetime("08.07.15", "10:20").unwrap();
        assert_eq!(
            dt,
            NaiveDate::from_ymd_opt(2015, 7, 8)
                .unwrap()
                .and_hms_opt(10, 20, 0)
                .unwrap()
        );
    }

    #[test]
    fn two_digit_year_is_offset_by_2000() {
        assert_eq!(
            parse_board_date("01.01.99").unwrap(),
            NaiveDate::from_ymd_opt(2099, 1, 1).unwrap()
        );
        assert_eq!(
            parse_board_date("31.12.00").unwrap(),
            NaiveDate::from_ymd_opt(2000, 12, 31).unwrap()
        );
    }

    #[test]
    fn rejects_malformed_clock() {
        assert!(parse_clock("").is_err());
        assert!(parse_clock("9:05").is_err());
        assert!(parse_clock("09-05").is_err());
        assert!(parse_clock("0a:05").is_err());
        assert!(parse_clock("12:60").is_err());
    }

    #[test]
    fn rejects_malformed_date() {
        assert!(parse_board_date("7.7.15").is_err());
        assert!(parse_board_date("07/07/15").is_err());
        assert!(parse_board_date("32.01.15").is_err());
        assert!(parse_board_date("29.02.15").is_err());
        assert!(parse_board_date("07.07.2015").is_err());
    }

    #[test]
    fn error_names_the_input() {
        let err = parse_board_date("07/07/15").unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid date \"07/07/15\": expected dots at positions 2 and 5"
        );
    }
}
