use crate::MAX_TIMESTAMP_PRECISION;
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::{
    cmp::Ordering,
    fmt,
    hash::{Hash, Hasher},
};
use thiserror::Error as ThisError;

const NANOS_PER_SECOND: u32 = 1_000_000_000;

// Naive layouts accepted by `Timestamp::parse`, interpreted as UTC.
const NAIVE_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.fZ",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S%.f",
];

///
/// TimestampError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum TimestampError {
    #[error("timestamp precision {0} exceeds maximum of {MAX_TIMESTAMP_PRECISION}")]
    InvalidPrecision(u8),

    #[error("nanosecond component {0} is out of range")]
    InvalidNanos(u32),

    #[error("timestamp {seconds}s is outside the representable range")]
    OutOfRange { seconds: i64 },

    #[error("timestamp parse error: {0}")]
    Parse(String),
}

///
/// Timestamp
///
/// Instant as seconds since the Unix epoch plus sub-second nanoseconds,
/// carrying its declared fractional precision (0..=9 digits).
///
/// Invariant: `nanos` never has more significant digits than `precision`;
/// finer input is rounded down at construction.
///

#[derive(Clone, Copy, Debug)]
pub struct Timestamp {
    seconds: i64,
    nanos: u32,
    precision: u8,
}

impl Timestamp {
    /// `-6383-01-01T00:00:00Z`
    pub const MIN_SECONDS: i64 = -263_595_254_400;
    /// `9999-12-31T23:59:59Z`
    pub const MAX_SECONDS: i64 = 253_402_300_799;

    pub const EPOCH: Self = Self {
        seconds: 0,
        nanos: 0,
        precision: 0,
    };

    pub fn new(seconds: i64, nanos: u32, precision: u8) -> Result<Self, TimestampError> {
        if precision > MAX_TIMESTAMP_PRECISION {
            return Err(TimestampError::InvalidPrecision(precision));
        }
        if nanos >= NANOS_PER_SECOND {
            return Err(TimestampError::InvalidNanos(nanos));
        }
        if !(Self::MIN_SECONDS..=Self::MAX_SECONDS).contains(&seconds) {
            return Err(TimestampError::OutOfRange { seconds });
        }

        let unit = unit_nanos(precision);

        Ok(Self {
            seconds,
            nanos: nanos - nanos % unit,
            precision,
        })
    }

    /// Smallest representable instant at `precision`.
    pub fn min_value(precision: u8) -> Result<Self, TimestampError> {
        Self::new(Self::MIN_SECONDS, 0, precision)
    }

    /// Largest representable instant at `precision`.
    pub fn max_value(precision: u8) -> Result<Self, TimestampError> {
        Self::new(Self::MAX_SECONDS, NANOS_PER_SECOND - 1, precision)
    }

    pub fn from_millis(millis: i64, precision: u8) -> Result<Self, TimestampError> {
        let seconds = millis.div_euclid(1_000);
        let nanos = u32::try_from(millis.rem_euclid(1_000))
            .map_err(|_| TimestampError::InvalidNanos(0))?
            * 1_000_000;

        Self::new(seconds, nanos, precision)
    }

    /// Parse RFC 3339 text, or a naive date/date-time interpreted as UTC.
    pub fn parse(text: &str, precision: u8) -> Result<Self, TimestampError> {
        let text = text.trim();

        if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
            return Self::new(dt.timestamp(), dt.timestamp_subsec_nanos(), precision);
        }

        for format in NAIVE_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
                let utc = naive.and_utc();
                return Self::new(utc.timestamp(), utc.timestamp_subsec_nanos(), precision);
            }
        }

        if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
            let utc = date.and_hms_opt(0, 0, 0).map(|naive| naive.and_utc());
            if let Some(utc) = utc {
                return Self::new(utc.timestamp(), 0, precision);
            }
        }

        Err(TimestampError::Parse(text.to_string()))
    }

    #[must_use]
    pub const fn seconds(&self) -> i64 {
        self.seconds
    }

    #[must_use]
    pub const fn nanos(&self) -> u32 {
        self.nanos
    }

    #[must_use]
    pub const fn precision(&self) -> u8 {
        self.precision
    }

    /// Same instant re-expressed at another precision (rounded down).
    pub fn with_precision(&self, precision: u8) -> Result<Self, TimestampError> {
        Self::new(self.seconds, self.nanos, precision)
    }

    /// Fractional part in units of the declared precision.
    #[must_use]
    pub const fn fraction_units(&self) -> u32 {
        self.nanos / unit_nanos(self.precision)
    }

    /// Next instant one precision unit later; `None` past the maximum.
    #[must_use]
    pub fn next_unit(&self) -> Option<Self> {
        let unit = unit_nanos(self.precision);
        let nanos = self.nanos + unit;
        let (seconds, nanos) = if nanos >= NANOS_PER_SECOND {
            (self.seconds.checked_add(1)?, nanos - NANOS_PER_SECOND)
        } else {
            (self.seconds, nanos)
        };

        Self::new(seconds, nanos, self.precision).ok()
    }

    fn to_datetime(self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.seconds, self.nanos)
    }
}

// Nanoseconds per unit of the given precision.
const fn unit_nanos(precision: u8) -> u32 {
    let mut unit = 1u32;
    let mut digits = MAX_TIMESTAMP_PRECISION;
    while digits > precision {
        unit *= 10;
        digits -= 1;
    }
    unit
}

impl PartialEq for Timestamp {
    fn eq(&self, other: &Self) -> bool {
        self.seconds == other.seconds && self.nanos == other.nanos
    }
}

impl Eq for Timestamp {}

impl Hash for Timestamp {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.seconds.hash(state);
        self.nanos.hash(state);
    }
}

impl Ord for Timestamp {
    fn cmp(&self, other: &Self) -> Ordering {
        self.seconds
            .cmp(&other.seconds)
            .then(self.nanos.cmp(&other.nanos))
    }
}

impl PartialOrd for Timestamp {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some(dt) = self.to_datetime() else {
            return write!(f, "{}s", self.seconds);
        };
        write!(f, "{}", dt.format("%Y-%m-%dT%H:%M:%S"))?;

        if self.precision > 0 {
            let width = usize::from(self.precision);
            write!(f, ".{:0width$}", self.fraction_units())?;
        }

        f.write_str("Z")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_rounds_down_to_precision() {
        let ts = Timestamp::new(10, 123_456_789, 3).expect("valid timestamp");
        assert_eq!(ts.nanos(), 123_000_000);
        assert_eq!(ts.fraction_units(), 123);

        let ts = Timestamp::new(10, 999_999_999, 0).expect("valid timestamp");
        assert_eq!(ts.nanos(), 0);
    }

    #[test]
    fn construction_rejects_out_of_range() {
        assert!(Timestamp::new(Timestamp::MAX_SECONDS + 1, 0, 0).is_err());
        assert!(Timestamp::new(Timestamp::MIN_SECONDS - 1, 0, 0).is_err());
        assert!(Timestamp::new(0, 0, 10).is_err());
        assert!(Timestamp::new(0, NANOS_PER_SECOND, 9).is_err());
    }

    #[test]
    fn bounds_display_as_documented() {
        let min = Timestamp::min_value(0).expect("min");
        let max = Timestamp::max_value(9).expect("max");
        assert_eq!(min.to_string(), "-6383-01-01T00:00:00Z");
        assert_eq!(max.to_string(), "9999-12-31T23:59:59.999999999Z");
    }

    #[test]
    fn parse_and_display_round_trip() {
        for (text, precision) in [
            ("2024-02-29T12:30:45.123Z", 3),
            ("1969-12-31T23:59:59.5Z", 1),
            ("2000-01-01T00:00:00Z", 0),
        ] {
            let ts = Timestamp::parse(text, precision).expect("timestamp should parse");
            assert_eq!(ts.to_string(), text);
            assert_eq!(Timestamp::parse(&ts.to_string(), precision), Ok(ts));
        }
    }

    #[test]
    fn parse_accepts_naive_and_offset_forms() {
        let utc = Timestamp::parse("2020-05-01T10:00:00Z", 0).expect("utc");
        let offset = Timestamp::parse("2020-05-01T12:00:00+02:00", 0).expect("offset");
        let naive = Timestamp::parse("2020-05-01T10:00:00", 0).expect("naive");
        assert_eq!(utc, offset);
        assert_eq!(utc, naive);
        assert!(Timestamp::parse("yesterday", 0).is_err());
    }

    #[test]
    fn next_unit_carries_into_seconds() {
        let ts = Timestamp::new(5, 999_000_000, 3).expect("valid");
        let next = ts.next_unit().expect("next");
        assert_eq!((next.seconds(), next.nanos()), (6, 0));

        let max = Timestamp::max_value(3).expect("max");
        assert_eq!(max.next_unit(), None);
    }

    #[test]
    fn negative_instants_order_before_epoch() {
        let before = Timestamp::from_millis(-1, 3).expect("valid");
        assert_eq!((before.seconds(), before.nanos()), (-1, 999_000_000));
        assert!(before < Timestamp::EPOCH);
    }
}
