//! Reference epoch and wall-clock to epoch-relative day conversions.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};

use crate::errors::{OrreryError, OrreryResult};

/// Seconds between the Unix epoch and J2000.0 (2000-01-01 12:00:00 UTC).
pub const J2000_UNIX_SECONDS: i64 = 946_728_000;

pub const SECONDS_PER_DAY: f64 = 86_400.0;
const NANOS_PER_DAY: f64 = SECONDS_PER_DAY * 1e9;
const MICROS_PER_DAY: f64 = SECONDS_PER_DAY * 1e6;

/// Smallest step `offset_days` can resolve: one microsecond, in days.
pub const MIN_STEP_DAYS: f64 = 1.0 / MICROS_PER_DAY;

const DATETIME_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];
const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%Y/%m/%d"];

/// The J2000.0 reference epoch every mean anomaly is measured from.
pub fn reference_epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH + Duration::seconds(J2000_UNIX_SECONDS)
}

/// Calculates the signed fractional days between a timestamp and J2000.0.
///
/// ### Argument
/// * 'timestamp' - UTC timestamp, any date chrono can represent.
///
/// ### Return
/// Days since the reference epoch, negative before it. Sub-second parts are kept
/// to the nanosecond before conversion.
///
pub fn elapsed_days(timestamp: &DateTime<Utc>) -> f64 {
    let delta = timestamp.signed_duration_since(reference_epoch());

    // num_seconds and subsec_nanos share the sign of the delta.
    delta.num_seconds() as f64 / SECONDS_PER_DAY + delta.subsec_nanos() as f64 / NANOS_PER_DAY
}

/// Shift a timestamp by a fractional number of days, rounded to the microsecond.
pub fn offset_days(timestamp: &DateTime<Utc>, days: f64) -> OrreryResult<DateTime<Utc>> {
    let micros = days * MICROS_PER_DAY;
    if !micros.is_finite() || micros.abs() >= i64::MAX as f64 {
        return Err(OrreryError::InvalidTimestamp(format!(
            "offset of {days} days is out of range"
        )));
    }

    timestamp
        .checked_add_signed(Duration::microseconds(micros.round() as i64))
        .ok_or_else(|| {
            OrreryError::InvalidTimestamp(format!("{timestamp} + {days} days is out of range"))
        })
}

/// Parse a user supplied date. Every form is read as UTC.
///
/// Accepted: RFC 3339, `YYYY-MM-DD HH:MM[:SS]` (space or `T`), `YYYY-MM-DD`, `YYYY/MM/DD`.
/// An empty string or `now` resolves to the current time.
///
pub fn parse_timestamp(input: &str) -> OrreryResult<DateTime<Utc>> {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("now") {
        return Ok(Utc::now());
    }

    if let Ok(datetime) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(datetime.with_timezone(&Utc));
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, fmt) {
            return Ok(naive.and_utc());
        }
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, fmt) {
            if let Some(naive) = date.and_hms_opt(0, 0, 0) {
                return Ok(naive.and_utc());
            }
        }
    }

    Err(OrreryError::InvalidTimestamp(trimmed.to_string()))
}
