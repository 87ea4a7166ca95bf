//! Timestamp value object for immutable points in time.
//!
//! Provider payloads encode instants in several ways (RFC 3339 strings,
//! unix seconds, unix milliseconds, numeric strings). Everything is
//! normalized into [`Timestamp`] on the way in. The unix epoch doubles as
//! the "never / unknown" sentinel so comparisons stay total.

use chrono::{DateTime, Duration, Months, TimeZone, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Integers at or above this magnitude are read as unix milliseconds.
///
/// 10^11 seconds is roughly the year 5138, 10^11 milliseconds is 1973.
const MILLIS_THRESHOLD: i64 = 100_000_000_000;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Immutable point in time, always UTC.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// Creates a timestamp for the current moment.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// The 1970-01-01T00:00:00Z sentinel.
    pub fn epoch() -> Self {
        Self(DateTime::<Utc>::UNIX_EPOCH)
    }

    /// Returns true if this is the epoch sentinel.
    pub fn is_epoch(&self) -> bool {
        self.0 == DateTime::<Utc>::UNIX_EPOCH
    }

    /// Creates a timestamp from a DateTime<Utc>.
    pub fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Returns the inner DateTime.
    pub fn as_datetime(&self) -> &DateTime<Utc> {
        &self.0
    }

    /// Creates a timestamp from Unix seconds. Out-of-range values collapse to epoch.
    pub fn from_unix_secs(secs: i64) -> Self {
        Utc.timestamp_opt(secs, 0)
            .single()
            .map(Self)
            .unwrap_or_else(Self::epoch)
    }

    /// Creates a timestamp from Unix milliseconds. Out-of-range values collapse to epoch.
    pub fn from_unix_millis(millis: i64) -> Self {
        Utc.timestamp_millis_opt(millis)
            .single()
            .map(Self)
            .unwrap_or_else(Self::epoch)
    }

    /// Returns the timestamp as Unix seconds.
    pub fn as_unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// Parses an RFC 3339 string (any offset is converted to UTC).
    pub fn parse_rfc3339(value: &str) -> Option<Self> {
        DateTime::parse_from_rfc3339(value.trim())
            .ok()
            .map(|dt| Self(dt.with_timezone(&Utc)))
    }

    /// Reads an instant out of a JSON value of any supported encoding.
    ///
    /// Returns `None` for null, empty strings, zero, and anything unparseable.
    pub fn from_json(value: &Value) -> Option<Self> {
        let ts = match value {
            Value::Number(n) => {
                if let Some(int) = n.as_i64() {
                    Self::from_integer(int)
                } else {
                    Self::from_integer(n.as_f64()? as i64)
                }
            }
            Value::String(s) => {
                let s = s.trim();
                if s.is_empty() {
                    return None;
                }
                match s.parse::<i64>() {
                    Ok(int) => Self::from_integer(int),
                    Err(_) => Self::parse_rfc3339(s)?,
                }
            }
            _ => return None,
        };

        if ts.is_epoch() {
            None
        } else {
            Some(ts)
        }
    }

    fn from_integer(value: i64) -> Self {
        if value.unsigned_abs() >= MILLIS_THRESHOLD as u64 {
            Self::from_unix_millis(value)
        } else {
            Self::from_unix_secs(value)
        }
    }

    /// Checks if this timestamp is before another.
    pub fn is_before(&self, other: &Timestamp) -> bool {
        self.0 < other.0
    }

    /// Checks if this timestamp is after another.
    pub fn is_after(&self, other: &Timestamp) -> bool {
        self.0 > other.0
    }

    /// Returns the duration from another timestamp to this one.
    ///
    /// Returns negative duration if other is after self.
    pub fn duration_since(&self, other: &Timestamp) -> Duration {
        self.0.signed_duration_since(other.0)
    }

    /// Fractional days from `other` to `self` (negative if `other` is later).
    pub fn days_since(&self, other: &Timestamp) -> f64 {
        self.duration_since(other).num_seconds() as f64 / SECONDS_PER_DAY
    }

    /// Creates a new timestamp by adding the specified number of days.
    ///
    /// Negative values subtract days. Saturates at the representable range.
    pub fn add_days(&self, days: i64) -> Self {
        let shifted = Duration::try_days(days).and_then(|delta| self.0.checked_add_signed(delta));
        match shifted {
            Some(dt) => Self(dt),
            None if days < 0 => Self(DateTime::<Utc>::MIN_UTC),
            None => Self(DateTime::<Utc>::MAX_UTC),
        }
    }

    /// Adds calendar months, clamping the day to the end of shorter months.
    pub fn add_months(&self, months: u32) -> Self {
        Self(
            self.0
                .checked_add_months(Months::new(months))
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        )
    }

    /// Adds calendar years.
    pub fn add_years(&self, years: u32) -> Self {
        self.add_months(years.saturating_mul(12))
    }
}

impl Default for Timestamp {
    fn default() -> Self {
        Self::epoch()
    }
}

impl std::fmt::Display for Timestamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
    }
}

/// Serde helper for provider fields holding an instant in any encoding.
///
/// Use with `#[serde(default, deserialize_with = "lenient_timestamp")]`.
/// Unparseable input becomes `None` instead of failing the whole payload.
pub fn lenient_timestamp<'de, D>(deserializer: D) -> Result<Option<Timestamp>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(Timestamp::from_json))
}

/// Serde helper for monetary fields sent as numbers or decimal strings.
///
/// Missing or unparseable amounts read as zero.
pub fn lenient_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64().unwrap_or(0.0),
        Some(Value::String(s)) => s.trim().parse().unwrap_or(0.0),
        _ => 0.0,
    })
}
