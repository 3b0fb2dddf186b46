//! Timestamp formatting utilities
//!
//! All timestamps are captured in UTC and rendered in the logger's configured
//! zone: either an IANA zone name resolved through `chrono-tz`, or the system
//! local zone when none is configured.

use super::error::{LoggerError, Result};
use chrono::{DateTime, Local, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;
use std::sync::Arc;

/// Console and file-block timestamp: `08 Jan 2025 10:30:45 AM`
pub const DISPLAY_FORMAT: &str = "%d %b %Y %I:%M:%S %p";

/// Daily log file stem: `08-01-2025`
pub const FILE_DATE_FORMAT: &str = "%d-%m-%Y";

/// Zone in which timestamps are rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// System local time
    #[default]
    Local,
    /// Named IANA zone
    Named(Tz),
}

impl Zone {
    /// Parse an IANA zone name such as `UTC` or `Europe/Paris`
    ///
    /// # Examples
    ///
    /// ```
    /// use errlog::core::Zone;
    ///
    /// assert!(Zone::parse("Asia/Kolkata").is_ok());
    /// assert!(Zone::parse("Mars/Olympus_Mons").is_err());
    /// ```
    pub fn parse(name: &str) -> Result<Self> {
        name.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|e| LoggerError::config("timezone", format!("'{}': {}", name, e)))
    }

    /// Resolve an optional zone name, defaulting to local time
    pub fn from_name(name: Option<&str>) -> Result<Self> {
        match name {
            Some(name) => Self::parse(name),
            None => Ok(Zone::Local),
        }
    }

    /// Format an instant in this zone with a strftime pattern
    #[must_use]
    pub fn format(&self, at: &DateTime<Utc>, pattern: &str) -> String {
        match self {
            Zone::Local => format_in(&Local, at, pattern),
            Zone::Named(tz) => format_in(tz, at, pattern),
        }
    }

    /// `[08 Jan 2025 10:30:45 AM]` style stamp, without brackets
    #[must_use]
    pub fn display(&self, at: &DateTime<Utc>) -> String {
        self.format(at, DISPLAY_FORMAT)
    }

    /// Date bucket used for daily file names
    #[must_use]
    pub fn file_date(&self, at: &DateTime<Utc>) -> String {
        self.format(at, FILE_DATE_FORMAT)
    }
}

fn format_in<T>(tz: &T, at: &DateTime<Utc>, pattern: &str) -> String
where
    T: TimeZone,
    T::Offset: fmt::Display,
{
    at.with_timezone(tz).format(pattern).to_string()
}

/// Source of the current instant
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub type SharedClock = Arc<dyn Clock>;

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed_datetime() -> DateTime<Utc> {
        // 2025-01-08 10:30:45 UTC
        Utc.with_ymd_and_hms(2025, 1, 8, 10, 30, 45)
            .single()
            .expect("valid datetime")
    }

    #[test]
    fn test_display_format_utc() {
        let zone = Zone::parse("UTC").expect("UTC is valid");
        assert_eq!(zone.display(&fixed_datetime()), "08 Jan 2025 10:30:45 AM");
    }

    #[test]
    fn test_display_format_afternoon() {
        let zone = Zone::parse("UTC").unwrap();
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 22, 5, 9).single().unwrap();
        assert_eq!(zone.display(&at), "08 Jan 2025 10:05:09 PM");
    }

    #[test]
    fn test_named_zone_shifts_time() {
        let zone = Zone::parse("Asia/Tokyo").unwrap();
        // UTC+9
        assert_eq!(zone.display(&fixed_datetime()), "08 Jan 2025 07:30:45 PM");
    }

    #[test]
    fn test_file_date_uses_zone() {
        let at = Utc.with_ymd_and_hms(2025, 1, 8, 23, 30, 0).single().unwrap();
        assert_eq!(Zone::parse("UTC").unwrap().file_date(&at), "08-01-2025");
        assert_eq!(Zone::parse("Asia/Tokyo").unwrap().file_date(&at), "09-01-2025");
    }

    #[test]
    fn test_invalid_zone_is_config_error() {
        let err = Zone::parse("Not/AZone").unwrap_err();
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("Not/AZone"));
    }

    #[test]
    fn test_from_name_defaults_to_local() {
        assert_eq!(Zone::from_name(None).unwrap(), Zone::Local);
        assert!(matches!(Zone::from_name(Some("UTC")).unwrap(), Zone::Named(_)));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(fixed_datetime());
        assert_eq!(clock.now(), fixed_datetime());
        assert_eq!(clock.now(), clock.now());
    }
}
