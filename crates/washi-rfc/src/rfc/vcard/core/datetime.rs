//! vCard date and time values (RFC 6350 §4.3).
//!
//! Unlike iCalendar, vCard permits truncated and partial forms: a birthday
//! may omit the year (`--0415`) or carry only a year (`1953`).

use std::fmt;

/// A full or partial calendar date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VCardDate {
    /// Complete date.
    Full {
        year: u16,
        month: u8,
        day: u8,
    },
    /// Year and month only (`1996-10`).
    YearMonth { year: u16, month: u8 },
    /// Year only (`1953`).
    Year(u16),
    /// Month and day only (`--0415`).
    MonthDay { month: u8, day: u8 },
    /// Day only (`---15`).
    Day(u8),
}

impl fmt::Display for VCardDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full { year, month, day } => write!(f, "{year:04}{month:02}{day:02}"),
            Self::YearMonth { year, month } => write!(f, "{year:04}-{month:02}"),
            Self::Year(year) => write!(f, "{year:04}"),
            Self::MonthDay { month, day } => write!(f, "--{month:02}{day:02}"),
            Self::Day(day) => write!(f, "---{day:02}"),
        }
    }
}

/// A full or partial time of day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VCardTime {
    /// Complete time.
    Full {
        hour: u8,
        minute: u8,
        second: u8,
    },
    /// Hour and minute only.
    HourMinute { hour: u8, minute: u8 },
    /// Hour only.
    Hour(u8),
}

impl fmt::Display for VCardTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full {
                hour,
                minute,
                second,
            } => write!(f, "{hour:02}{minute:02}{second:02}"),
            Self::HourMinute { hour, minute } => write!(f, "{hour:02}{minute:02}"),
            Self::Hour(hour) => write!(f, "{hour:02}"),
        }
    }
}

/// UTC offset attached to a vCard time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VCardUtcOffset {
    /// Hours from UTC (signed).
    pub hours: i8,
    /// Minutes component (always positive).
    pub minutes: u8,
}

impl VCardUtcOffset {
    /// The zero offset, rendered as `Z`.
    pub const UTC: Self = Self {
        hours: 0,
        minutes: 0,
    };
}

impl fmt::Display for VCardUtcOffset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.hours == 0 && self.minutes == 0 {
            return write!(f, "Z");
        }
        let sign = if self.hours >= 0 { '+' } else { '-' };
        write!(
            f,
            "{sign}{:02}{:02}",
            self.hours.unsigned_abs(),
            self.minutes
        )
    }
}

/// A date, a time, or a combination (RFC 6350 §4.3.4).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateAndOrTime {
    /// Date only.
    Date(VCardDate),
    /// Date with time and optional offset.
    DateTime {
        date: VCardDate,
        time: VCardTime,
        offset: Option<VCardUtcOffset>,
    },
    /// Time only (leading `T` on the wire).
    Time {
        time: VCardTime,
        offset: Option<VCardUtcOffset>,
    },
}

impl fmt::Display for DateAndOrTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Date(date) => write!(f, "{date}"),
            Self::DateTime { date, time, offset } => {
                write!(f, "{date}T{time}")?;
                if let Some(off) = offset {
                    write!(f, "{off}")?;
                }
                Ok(())
            }
            Self::Time { time, offset } => {
                write!(f, "T{time}")?;
                if let Some(off) = offset {
                    write!(f, "{off}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn date_display_forms() {
        assert_eq!(
            VCardDate::Full {
                year: 1996,
                month: 4,
                day: 15
            }
            .to_string(),
            "19960415"
        );
        assert_eq!(
            VCardDate::YearMonth {
                year: 1996,
                month: 10
            }
            .to_string(),
            "1996-10"
        );
        assert_eq!(VCardDate::Year(1953).to_string(), "1953");
        assert_eq!(VCardDate::MonthDay { month: 4, day: 15 }.to_string(), "--0415");
        assert_eq!(VCardDate::Day(15).to_string(), "---15");
    }

    #[test]
    fn datetime_display() {
        let dt = DateAndOrTime::DateTime {
            date: VCardDate::Full {
                year: 1953,
                month: 10,
                day: 15,
            },
            time: VCardTime::Full {
                hour: 23,
                minute: 10,
                second: 0,
            },
            offset: Some(VCardUtcOffset::UTC),
        };
        assert_eq!(dt.to_string(), "19531015T231000Z");
    }

    #[test]
    fn time_only_display() {
        let t = DateAndOrTime::Time {
            time: VCardTime::HourMinute { hour: 10, minute: 30 },
            offset: None,
        };
        assert_eq!(t.to_string(), "T1030");
    }
}
