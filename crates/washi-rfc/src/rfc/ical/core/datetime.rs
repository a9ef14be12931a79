//! iCalendar DATE-TIME and TIME value types (RFC 5545 §3.3.5, §3.3.12).

use std::fmt;

/// UTC offset representation (e.g., +0530, -0800).
///
/// Stored as total seconds from UTC. Valid range is roughly ±14 hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UtcOffset {
    /// Total seconds from UTC (positive = east, negative = west).
    seconds: i32,
}

impl UtcOffset {
    /// UTC offset (zero).
    pub const UTC: Self = Self { seconds: 0 };

    /// Creates a UTC offset from hours and minutes.
    ///
    /// ## Panics
    ///
    /// Panics if the offset is out of valid range (±14:00).
    #[must_use]
    pub fn new(hours: i8, minutes: u8) -> Self {
        let sign = if hours < 0 { -1 } else { 1 };
        let seconds = i32::from(hours) * 3600 + sign * i32::from(minutes) * 60;
        assert!(
            (-14 * 3600..=14 * 3600).contains(&seconds),
            "UTC offset out of valid range"
        );
        Self { seconds }
    }

    /// Creates a UTC offset from total seconds.
    #[must_use]
    pub const fn from_seconds(seconds: i32) -> Self {
        Self { seconds }
    }

    /// Returns the offset as total seconds from UTC.
    #[must_use]
    pub const fn as_seconds(self) -> i32 {
        self.seconds
    }
}

impl fmt::Display for UtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.seconds >= 0 { '+' } else { '-' };
        let hours = self.seconds.abs() / 3600;
        let minutes = (self.seconds.abs() % 3600) / 60;
        let seconds = self.seconds.abs() % 60;
        write!(f, "{sign}{hours:02}{minutes:02}")?;
        if seconds != 0 {
            write!(f, "{seconds:02}")?;
        }
        Ok(())
    }
}

/// Time value (RFC 5545 §3.3.12).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Time {
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-60, allowing for leap seconds).
    pub second: u8,
    /// Whether this time is in UTC (indicated by 'Z' suffix).
    pub is_utc: bool,
}

impl Time {
    /// Creates a new time value.
    #[must_use]
    pub const fn new(hour: u8, minute: u8, second: u8, is_utc: bool) -> Self {
        Self {
            hour,
            minute,
            second,
            is_utc,
        }
    }
}

impl fmt::Display for Time {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}{:02}{:02}", self.hour, self.minute, self.second)?;
        if self.is_utc {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

/// Form of a DATE-TIME value (RFC 5545 §3.3.5).
///
/// The three forms are mutually exclusive: a value either floats (no fixed
/// zone, interpreted in whatever local zone the consumer supplies), is
/// pinned to UTC by a trailing `Z`, or references a named zone through the
/// `TZID` parameter of its property.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DateTimeForm {
    /// Floating time - same wall-clock time in any timezone.
    Floating,
    /// UTC time - absolute instant, indicated by 'Z' suffix.
    Utc,
    /// Local time qualified by a timezone identifier.
    Zoned {
        /// The timezone identifier from the TZID parameter.
        tzid: String,
    },
}

/// DATE-TIME value (RFC 5545 §3.3.5).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DateTime {
    /// Year (e.g., 2026).
    pub year: u16,
    /// Month (1-12).
    pub month: u8,
    /// Day of month (1-31).
    pub day: u8,
    /// Hour (0-23).
    pub hour: u8,
    /// Minute (0-59).
    pub minute: u8,
    /// Second (0-60, allowing for leap seconds).
    pub second: u8,
    /// The form of this DATE-TIME (floating, UTC, or zoned).
    pub form: DateTimeForm,
}

impl DateTime {
    /// Creates a floating DATE-TIME.
    #[must_use]
    pub fn floating(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            form: DateTimeForm::Floating,
        }
    }

    /// Creates a UTC DATE-TIME.
    #[must_use]
    pub fn utc(year: u16, month: u8, day: u8, hour: u8, minute: u8, second: u8) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            form: DateTimeForm::Utc,
        }
    }

    /// Creates a zoned DATE-TIME.
    #[must_use]
    pub fn zoned(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        minute: u8,
        second: u8,
        tzid: impl Into<String>,
    ) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
            form: DateTimeForm::Zoned { tzid: tzid.into() },
        }
    }

    /// Returns whether this is a UTC time.
    #[must_use]
    pub fn is_utc(&self) -> bool {
        matches!(self.form, DateTimeForm::Utc)
    }

    /// Returns whether this is a floating time.
    #[must_use]
    pub fn is_floating(&self) -> bool {
        matches!(self.form, DateTimeForm::Floating)
    }

    /// Returns the timezone ID if this is a zoned time.
    #[must_use]
    pub fn tzid(&self) -> Option<&str> {
        match &self.form {
            DateTimeForm::Zoned { tzid } => Some(tzid),
            _ => None,
        }
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}{:02}{:02}T{:02}{:02}{:02}",
            self.year, self.month, self.day, self.hour, self.minute, self.second
        )?;
        if self.is_utc() {
            write!(f, "Z")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn utc_offset_display() {
        assert_eq!(UtcOffset::new(5, 30).to_string(), "+0530");
        assert_eq!(UtcOffset::new(-8, 0).to_string(), "-0800");
        assert_eq!(UtcOffset::UTC.to_string(), "+0000");
    }

    #[test]
    fn utc_offset_negative_with_minutes() {
        assert_eq!(UtcOffset::new(-9, 30).as_seconds(), -(9 * 3600 + 30 * 60));
    }

    #[test]
    fn time_display() {
        assert_eq!(Time::new(13, 30, 0, true).to_string(), "133000Z");
        assert_eq!(Time::new(9, 15, 30, false).to_string(), "091530");
    }

    #[test]
    fn datetime_display() {
        assert_eq!(
            DateTime::utc(2011, 12, 23, 12, 0, 0).to_string(),
            "20111223T120000Z"
        );
        assert_eq!(
            DateTime::floating(2011, 12, 23, 12, 0, 0).to_string(),
            "20111223T120000"
        );
    }

    #[test]
    fn datetime_zoned_tzid() {
        let dt = DateTime::zoned(2026, 1, 23, 9, 0, 0, "America/New_York");
        assert_eq!(dt.tzid(), Some("America/New_York"));
        assert!(!dt.is_utc());
        assert!(!dt.is_floating());
    }
}
