//! Fixed-format UTC timestamps.
//!
//! Log lines carry timestamps shaped exactly like `2016-04-18 00:03:38 UTC`.
//! Anything else, including a valid date in a non-UTC zone, is rejected.

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::error::{OverrustleError, Result};

/// chrono format of the date/time part (without the zone token).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Length of `YYYY-MM-DD HH:MM:SS`.
const DATETIME_LEN: usize = 19;

/// The only zone token log lines may carry.
pub const UTC_ZONE: &str = "UTC";

/// Returns `true` if `zone` is the literal `UTC` token.
///
/// Other spellings of UTC (`GMT`, `Z`, `+00:00`) are not part of the log
/// format and are rejected like any other zone.
///
/// ```
/// use overrustle::parsing::is_utc_zone;
///
/// assert!(is_utc_zone("UTC"));
/// assert!(!is_utc_zone("GMT"));
/// assert!(!is_utc_zone("+00:00"));
/// assert!(!is_utc_zone("EST"));
/// ```
pub fn is_utc_zone(zone: &str) -> bool {
    zone == UTC_ZONE
}

/// Parses `YYYY-MM-DD HH:MM:SS <ZONE>` into a UTC instant.
///
/// Digit counts are fixed (four-digit year, two digits for everything else)
/// and only ASCII digits are accepted. The zone token must be exactly `UTC`.
///
/// # Errors
///
/// Returns [`OverrustleError::MalformedTimestamp`] for a wrong shape, an
/// impossible calendar value, or a non-UTC zone.
///
/// # Example
///
/// ```
/// use overrustle::parsing::parse_timestamp;
/// use chrono::{TimeZone, Utc};
///
/// let ts = parse_timestamp("2016-04-18 00:03:38 UTC")?;
/// assert_eq!(ts, Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap());
///
/// assert!(parse_timestamp("2016-02-30 00:00:00 UTC").is_err());
/// assert!(parse_timestamp("2016-04-18 00:03:38 CEST").is_err());
/// # Ok::<(), overrustle::OverrustleError>(())
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let (Some(datetime), Some(rest)) = (input.get(..DATETIME_LEN), input.get(DATETIME_LEN..))
    else {
        return Err(OverrustleError::malformed_timestamp(input, "too short"));
    };

    if !has_fixed_shape(datetime) {
        return Err(OverrustleError::malformed_timestamp(
            input,
            "expected YYYY-MM-DD HH:MM:SS",
        ));
    }

    let Some(zone) = rest.strip_prefix(' ') else {
        return Err(OverrustleError::malformed_timestamp(
            input,
            "missing zone token",
        ));
    };

    let naive = NaiveDateTime::parse_from_str(datetime, TIMESTAMP_FORMAT)
        .map_err(|_| OverrustleError::malformed_timestamp(input, "impossible date or time"))?;

    if !is_utc_zone(zone) {
        return Err(OverrustleError::malformed_timestamp(
            input,
            "zone is not UTC",
        ));
    }

    Ok(naive.and_utc())
}

/// Checks digit positions and separators of `YYYY-MM-DD HH:MM:SS`.
fn has_fixed_shape(datetime: &str) -> bool {
    let bytes = datetime.as_bytes();
    bytes.len() == DATETIME_LEN
        && bytes.iter().enumerate().all(|(i, &b)| match i {
            4 | 7 => b == b'-',
            10 => b == b' ',
            13 | 16 => b == b':',
            _ => b.is_ascii_digit(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_utc() {
        let ts = parse_timestamp("2016-04-18 00:03:38 UTC").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2016, 4, 18, 0, 3, 38).unwrap());
    }

    #[test]
    fn test_rejects_other_utc_spellings() {
        for zone in ["GMT", "Z", "+0000", "-0000", "+00:00", "-00:00", "UTC+0"] {
            let input = format!("2020-01-02 03:04:05 {zone}");
            let err = parse_timestamp(&input).unwrap_err();
            assert!(err.is_malformed_timestamp(), "zone {zone}");
        }
    }

    #[test]
    fn test_rejects_non_utc_zones() {
        for zone in ["EST", "CEST", "+0100", "-05:00", "utc", ""] {
            let input = format!("2020-01-02 03:04:05 {zone}");
            let err = parse_timestamp(&input).unwrap_err();
            assert!(err.is_malformed_timestamp(), "zone {zone:?}");
        }
    }

    #[test]
    fn test_rejects_missing_zone() {
        assert!(parse_timestamp("2020-01-02 03:04:05").is_err());
        assert!(parse_timestamp("2020-01-02 03:04:05UTC").is_err());
    }

    #[test]
    fn test_rejects_wrong_digit_counts() {
        assert!(parse_timestamp("16-04-18 00:03:38 UTC").is_err());
        assert!(parse_timestamp("2016-4-18 00:03:38 UTC").is_err());
        assert!(parse_timestamp("2016-04-18 0:03:38 UTC").is_err());
        assert!(parse_timestamp("02016-04-18 00:03:38 UTC").is_err());
    }

    #[test]
    fn test_rejects_impossible_values() {
        assert!(parse_timestamp("2016-02-30 00:00:00 UTC").is_err());
        assert!(parse_timestamp("2016-13-01 00:00:00 UTC").is_err());
        assert!(parse_timestamp("2016-04-18 24:00:00 UTC").is_err());
        assert!(parse_timestamp("2016-04-18 00:60:00 UTC").is_err());
    }

    #[test]
    fn test_leap_day() {
        assert!(parse_timestamp("2016-02-29 12:00:00 UTC").is_ok());
        assert!(parse_timestamp("2015-02-29 12:00:00 UTC").is_err());
    }

    #[test]
    fn test_rejects_non_ascii_digits() {
        // Arabic-Indic digit in the year
        assert!(parse_timestamp("201\u{0666}-04-18 00:03:38 UTC").is_err());
    }

    #[test]
    fn test_rejects_short_input() {
        assert!(parse_timestamp("").is_err());
        assert!(parse_timestamp("2016-04-18").is_err());
    }
}
