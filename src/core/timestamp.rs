//! Timestamp formats and clocks for the message header

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt::{Display, Write};
use std::str::FromStr;

/// Local date and time with milliseconds: `2025-01-08 10:30:45.123`
pub const DEFAULT_TIME_PATTERN: &str = "%Y-%m-%d %H:%M:%S%.3f";

/// Timestamp format options for the header
///
/// # Examples
///
/// ```
/// use hiplog::core::TimestampFormat;
///
/// let format: TimestampFormat = "%H:%M:%S".parse().unwrap();
/// assert_eq!(format, TimestampFormat::Custom("%H:%M:%S".to_string()));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// `2025-01-08 10:30:45.123`
    #[default]
    Default,

    /// ISO 8601 with milliseconds and offset: `2025-01-08T10:30:45.123+00:00`
    Iso8601,

    /// RFC 3339: `2025-01-08T10:30:45+00:00`
    Rfc3339,

    /// Unix timestamp in seconds: `1736332245`
    Unix,

    /// Unix timestamp in milliseconds: `1736332245123`
    UnixMillis,

    /// Any strftime-compatible pattern
    Custom(String),
}

impl TimestampFormat {
    /// Format `datetime` according to this format.
    ///
    /// An invalid custom pattern is reported as a formatter error instead of
    /// panicking.
    pub fn format<Tz>(&self, datetime: &DateTime<Tz>) -> Result<String>
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            TimestampFormat::Default => strftime(datetime, DEFAULT_TIME_PATTERN),
            TimestampFormat::Iso8601 => strftime(datetime, "%Y-%m-%dT%H:%M:%S%.3f%:z"),
            TimestampFormat::Rfc3339 => Ok(datetime.to_rfc3339()),
            TimestampFormat::Unix => Ok(datetime.timestamp().to_string()),
            TimestampFormat::UnixMillis => Ok(datetime.timestamp_millis().to_string()),
            TimestampFormat::Custom(pattern) => strftime(datetime, pattern),
        }
    }

    /// Check that the pattern can be rendered
    pub fn validate(&self) -> Result<()> {
        if let TimestampFormat::Custom(pattern) = self {
            if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
                return Err(invalid_pattern(pattern));
            }
        }
        Ok(())
    }
}

impl FromStr for TimestampFormat {
    type Err = Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(match s.to_lowercase().as_str() {
            "default" => TimestampFormat::Default,
            "iso8601" | "iso-8601" => TimestampFormat::Iso8601,
            "rfc3339" | "rfc-3339" => TimestampFormat::Rfc3339,
            "unix" => TimestampFormat::Unix,
            "unix-millis" | "unix_millis" | "unixmillis" => TimestampFormat::UnixMillis,
            _ => TimestampFormat::Custom(s.to_string()),
        })
    }
}

fn strftime<Tz>(datetime: &DateTime<Tz>, pattern: &str) -> Result<String>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let mut out = String::new();
    write!(out, "{}", datetime.format(pattern)).map_err(|_| invalid_pattern(pattern))?;
    Ok(out)
}

fn invalid_pattern(pattern: &str) -> LoggerError {
    LoggerError::formatter("time", format!("invalid time pattern '{}'", pattern))
}

/// Source of the current time for the header
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<FixedOffset>;
}

/// Wall clock in the local time zone
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<FixedOffset> {
        let now = Local::now();
        now.with_timezone(now.offset())
    }
}

/// Clock frozen at one instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedClock(pub DateTime<FixedOffset>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<FixedOffset> {
        self.0
    }
}
