//! iCalendar core models (RFC 5545).
//!
//! These types are designed for:
//! - Round-trip fidelity: unknown properties and parameters are preserved
//! - Multi-value-per-name access: same-name properties keep their order
//! - Independent clones: no shared substructure, mutate copies freely

mod component;
mod datetime;
mod duration;
mod parameter;
mod property;
mod rrule;
mod value;

pub use component::{Component, ComponentKind, ICalendar};
pub use datetime::{DateTime, DateTimeForm, Time, UtcOffset};
pub use duration::Duration;
pub use parameter::Parameter;
pub use property::{ContentLine, Property};
pub use rrule::{Frequency, RRule, RRuleUntil, Weekday, WeekdayNum};
pub use value::{Date, Period, Value, ValueType};
