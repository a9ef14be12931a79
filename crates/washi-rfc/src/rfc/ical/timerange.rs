//! Time-range evaluation for scheduling components.
//!
//! Computes, for a single component instance, the *effective interval* it
//! occupies and whether that interval intersects a caller-supplied query
//! window `[start, end)`. An external recurrence expander asks this
//! question once per occurrence; no expansion happens here.
//!
//! The intersection test is deliberately asymmetric - strict on the query's
//! upper bound, non-strict on the lower:
//!
//! ```text
//! effective_start < query_end  AND  effective_end >= query_start
//! ```
//!
//! This boundary behavior is load-bearing for free-busy style queries and
//! must not be changed casually.

use chrono::{LocalResult, NaiveDate, NaiveDateTime, TimeZone as _, Utc};
use chrono_tz::Tz;

use crate::error::ValueError;
use crate::rfc::ical::core::{Component, Date, DateTime, DateTimeForm, Property, Value};

/// An absolute point in time.
pub type Instant = chrono::DateTime<Utc>;

/// Capability for resolving named timezones.
///
/// The core ships no timezone database of its own; the evaluator accepts
/// anything that can map a zone identifier plus a naive local timestamp to
/// an absolute instant. [`IanaResolver`] provides an IANA-backed default.
pub trait TzResolver {
    /// Resolves a local timestamp in the named zone to an absolute instant.
    ///
    /// Returns `None` when the zone is unknown or the local time does not
    /// exist (DST gap).
    fn resolve(&self, tzid: &str, local: NaiveDateTime) -> Option<Instant>;

    /// Anchors a floating timestamp to an absolute instant.
    ///
    /// Floating times have no fixed zone; the default interpretation is
    /// UTC. Override to supply an ambient local zone.
    fn resolve_floating(&self, local: NaiveDateTime) -> Instant {
        Utc.from_utc_datetime(&local)
    }
}

/// Timezone resolver backed by the IANA database.
///
/// Ambiguous local times (DST fold) resolve to the earlier instant.
#[derive(Debug, Clone, Copy, Default)]
pub struct IanaResolver;

impl TzResolver for IanaResolver {
    fn resolve(&self, tzid: &str, local: NaiveDateTime) -> Option<Instant> {
        let tz: Tz = tzid.parse().ok()?;
        match tz.from_local_datetime(&local) {
            LocalResult::Single(dt) => Some(dt.with_timezone(&Utc)),
            LocalResult::Ambiguous(earlier, _) => Some(earlier.with_timezone(&Utc)),
            LocalResult::None => None,
        }
    }
}

/// Upper bound of an effective interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum IntervalEnd {
    At(Instant),
    /// No upper bound (a created-but-never-finished task).
    Unbounded,
}

/// The interval a component is considered to occupy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct EffectiveInterval {
    start: Instant,
    end: IntervalEnd,
}

impl EffectiveInterval {
    fn point(at: Instant) -> Self {
        Self {
            start: at,
            end: IntervalEnd::At(at),
        }
    }

    fn intersects(self, query_start: Instant, query_end: Instant) -> bool {
        if self.start >= query_end {
            return false;
        }
        match self.end {
            IntervalEnd::At(end) => end >= query_start,
            IntervalEnd::Unbounded => true,
        }
    }
}

/// Which edge of an interval a date-valued property contributes to.
///
/// A DATE without a time component spans its full day, so it means
/// midnight when used as a start and next-midnight when used as an end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

/// Reports whether a VTODO's effective interval intersects `[start, end)`.
///
/// The effective interval falls back through `DTSTART` (+ `DURATION` /
/// `DUE`), then `DUE`, then `COMPLETED`, then `CREATED` (open-ended), and
/// an entirely undated task is *always* in range - a time filter never
/// excludes it.
///
/// ## Errors
///
/// Returns a [`ValueError`] naming the offending property when a date value
/// required by the fallback chain failed to parse or cannot be resolved to
/// an instant.
#[tracing::instrument(skip(todo, tz), fields(uid = todo.uid().unwrap_or("")))]
pub fn todo_in_time_range(
    todo: &Component,
    start: Instant,
    end: Instant,
    tz: &dyn TzResolver,
) -> Result<bool, ValueError> {
    let Some(interval) = todo_effective_interval(todo, tz)? else {
        tracing::trace!("undated task is always in range");
        return Ok(true);
    };

    Ok(interval.intersects(start, end))
}

/// Computes a VTODO's effective interval, or `None` for an undated task.
fn todo_effective_interval(
    todo: &Component,
    tz: &dyn TzResolver,
) -> Result<Option<EffectiveInterval>, ValueError> {
    if let Some(dtstart) = todo.get_property("DTSTART") {
        let effective_start = property_instant(dtstart, Edge::Start, tz)?;

        let end = if let Some(duration) = todo.get_property("DURATION") {
            IntervalEnd::At(effective_start + duration_of(duration)?)
        } else if let Some(due) = todo.get_property("DUE") {
            IntervalEnd::At(property_instant(due, Edge::End, tz)?)
        } else {
            IntervalEnd::At(effective_start)
        };

        return Ok(Some(EffectiveInterval {
            start: effective_start,
            end,
        }));
    }

    if let Some(due) = todo.get_property("DUE") {
        return Ok(Some(EffectiveInterval {
            start: property_instant(due, Edge::Start, tz)?,
            end: IntervalEnd::At(property_instant(due, Edge::End, tz)?),
        }));
    }

    if let Some(completed) = todo.get_property("COMPLETED") {
        return Ok(Some(EffectiveInterval {
            start: property_instant(completed, Edge::Start, tz)?,
            end: IntervalEnd::At(property_instant(completed, Edge::End, tz)?),
        }));
    }

    if let Some(created) = todo.get_property("CREATED") {
        return Ok(Some(EffectiveInterval {
            start: property_instant(created, Edge::Start, tz)?,
            end: IntervalEnd::Unbounded,
        }));
    }

    Ok(None)
}

/// Reports whether a VEVENT's effective interval intersects `[start, end)`.
///
/// The effective end falls back through `DURATION`, then `DTEND`, then a
/// full day for date-valued starts, then the start instant itself.
///
/// ## Errors
///
/// Returns a [`ValueError`] if `DTSTART` is missing or any required date
/// value failed to parse.
#[tracing::instrument(skip(event, tz), fields(uid = event.uid().unwrap_or("")))]
pub fn event_in_time_range(
    event: &Component,
    start: Instant,
    end: Instant,
    tz: &dyn TzResolver,
) -> Result<bool, ValueError> {
    let Some(dtstart) = event.get_property("DTSTART") else {
        return Err(ValueError::new("DTSTART", "event has no DTSTART property"));
    };

    let effective_start = property_instant(dtstart, Edge::Start, tz)?;

    let effective_end = if let Some(duration) = event.get_property("DURATION") {
        effective_start + duration_of(duration)?
    } else if let Some(dtend) = event.get_property("DTEND") {
        property_instant(dtend, Edge::End, tz)?
    } else if matches!(dtstart.value, Value::Date(_)) {
        // An all-day event with no end occupies its whole day.
        property_instant(dtstart, Edge::End, tz)?
    } else {
        effective_start
    };

    Ok(EffectiveInterval {
        start: effective_start,
        end: IntervalEnd::At(effective_end),
    }
    .intersects(start, end))
}

/// Resolves a date-valued property to an absolute instant.
fn property_instant(
    prop: &Property,
    edge: Edge,
    tz: &dyn TzResolver,
) -> Result<Instant, ValueError> {
    match &prop.value {
        Value::DateTime(dt) => datetime_instant(&prop.name, dt, tz),
        Value::Date(d) => date_instant(&prop.name, *d, edge),
        _ => Err(ValueError::new(
            &prop.name,
            format!("'{}' is not a valid DATE or DATE-TIME value", prop.raw_value),
        )),
    }
}

fn datetime_instant(
    property: &str,
    dt: &DateTime,
    tz: &dyn TzResolver,
) -> Result<Instant, ValueError> {
    let local = naive(property, dt)?;
    match &dt.form {
        DateTimeForm::Utc => Ok(Utc.from_utc_datetime(&local)),
        DateTimeForm::Floating => Ok(tz.resolve_floating(local)),
        DateTimeForm::Zoned { tzid } => tz.resolve(tzid, local).ok_or_else(|| {
            ValueError::new(
                property,
                format!("timezone '{tzid}' could not be resolved"),
            )
        }),
    }
}

fn naive(property: &str, dt: &DateTime) -> Result<NaiveDateTime, ValueError> {
    NaiveDate::from_ymd_opt(i32::from(dt.year), u32::from(dt.month), u32::from(dt.day))
        .and_then(|date| {
            date.and_hms_opt(
                u32::from(dt.hour),
                u32::from(dt.minute),
                // Clamp leap seconds; chrono has no second 60.
                u32::from(dt.second.min(59)),
            )
        })
        .ok_or_else(|| ValueError::new(property, format!("'{dt}' is not a real calendar time")))
}

/// A DATE spans its whole day: midnight at the start edge, next midnight at
/// the end edge.
fn date_instant(property: &str, d: Date, edge: Edge) -> Result<Instant, ValueError> {
    let date = NaiveDate::from_ymd_opt(i32::from(d.year), u32::from(d.month), u32::from(d.day))
        .ok_or_else(|| ValueError::new(property, format!("'{d}' is not a real calendar date")))?;

    let date = match edge {
        Edge::Start => date,
        Edge::End => date
            .succ_opt()
            .ok_or_else(|| ValueError::new(property, "date overflows the calendar"))?,
    };

    Ok(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0).unwrap_or_default()))
}

fn duration_of(prop: &Property) -> Result<chrono::Duration, ValueError> {
    match &prop.value {
        Value::Duration(d) => Ok(chrono::Duration::seconds(d.as_seconds())),
        _ => Err(ValueError::new(
            &prop.name,
            format!("'{}' is not a valid DURATION value", prop.raw_value),
        )),
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone as _;

    use super::*;
    use crate::rfc::ical::core::{Date, DateTime, Duration, Property};

    fn instant(y: i32, m: u32, d: u32) -> Instant {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).single().unwrap()
    }

    /// The two query windows used throughout: the full year 2011, and
    /// January through October 2011.
    fn queries() -> [(Instant, Instant); 2] {
        [
            (instant(2011, 1, 1), instant(2012, 1, 1)),
            (instant(2011, 1, 1), instant(2011, 11, 1)),
        ]
    }

    fn check(todo: &Component, expected: [bool; 2]) {
        let [(s1, e1), (s2, e2)] = queries();
        assert_eq!(
            todo_in_time_range(todo, s1, e1, &IanaResolver).unwrap(),
            expected[0],
            "full-year query"
        );
        assert_eq!(
            todo_in_time_range(todo, s2, e2, &IanaResolver).unwrap(),
            expected[1],
            "january-october query"
        );
    }

    #[test]
    fn dtstart_only() {
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2011, 12, 23, 12, 0, 0),
        ));
        check(&todo, [true, false]);
    }

    #[test]
    fn dtstart_with_duration() {
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2011, 12, 23, 12, 0, 0),
        ));
        todo.add_property(Property::duration("DURATION", Duration::days(1)));
        check(&todo, [true, false]);
    }

    #[test]
    fn dtstart_with_due() {
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2011, 12, 23, 12, 0, 0),
        ));
        todo.add_property(Property::date("DUE", Date::new(2011, 12, 25)));
        check(&todo, [true, false]);
    }

    #[test]
    fn due_only() {
        let mut todo = Component::todo();
        todo.add_property(Property::date("DUE", Date::new(2011, 12, 25)));
        check(&todo, [true, false]);
    }

    #[test]
    fn completed_only() {
        let mut todo = Component::todo();
        todo.add_property(Property::date("COMPLETED", Date::new(2011, 12, 25)));
        check(&todo, [true, false]);
    }

    #[test]
    fn created_only_is_open_ended() {
        let mut todo = Component::todo();
        todo.add_property(Property::date("CREATED", Date::new(2011, 12, 25)));
        check(&todo, [true, false]);
    }

    #[test]
    fn completed_takes_precedence_over_created() {
        let mut todo = Component::todo();
        todo.add_property(Property::date("CREATED", Date::new(2011, 12, 25)));
        todo.add_property(Property::date("COMPLETED", Date::new(2011, 12, 26)));
        check(&todo, [true, false]);
    }

    #[test]
    fn undated_task_is_always_in_range() {
        let todo = Component::todo();
        check(&todo, [true, true]);
    }

    #[test]
    fn boundary_is_strict_at_query_end() {
        // A task starting exactly at the query end is out of range...
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2012, 1, 1, 0, 0, 0),
        ));
        let in_range =
            todo_in_time_range(&todo, instant(2011, 1, 1), instant(2012, 1, 1), &IanaResolver)
                .unwrap();
        assert!(!in_range);
    }

    #[test]
    fn boundary_is_inclusive_at_query_start() {
        // ...but one ending exactly at the query start is in range.
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2010, 12, 31, 0, 0, 0),
        ));
        todo.add_property(Property::datetime(
            "DUE",
            DateTime::utc(2011, 1, 1, 0, 0, 0),
        ));
        let in_range =
            todo_in_time_range(&todo, instant(2011, 1, 1), instant(2012, 1, 1), &IanaResolver)
                .unwrap();
        assert!(in_range);
    }

    #[test]
    fn unparseable_dtstart_is_an_error_not_out_of_range() {
        let mut todo = Component::todo();
        let mut prop = Property::text("DTSTART", "garbage");
        prop.value_type = crate::rfc::ical::core::ValueType::DateTime;
        prop.value = Value::Unknown("garbage".to_string());
        todo.add_property(prop);

        let err = todo_in_time_range(
            &todo,
            instant(2011, 1, 1),
            instant(2012, 1, 1),
            &IanaResolver,
        )
        .unwrap_err();
        assert_eq!(err.property, "DTSTART");
    }

    #[test]
    fn zoned_datetime_resolves_through_iana() {
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::zoned(2011, 12, 31, 23, 0, 0, "America/New_York"),
        ));
        // 23:00 New York on Dec 31 is 04:00 UTC on Jan 1 - outside 2011.
        let in_range = todo_in_time_range(
            &todo,
            instant(2011, 1, 1),
            instant(2012, 1, 1),
            &IanaResolver,
        )
        .unwrap();
        assert!(!in_range);
    }

    #[test]
    fn unknown_tzid_is_an_error() {
        let mut todo = Component::todo();
        todo.add_property(Property::datetime(
            "DTSTART",
            DateTime::zoned(2011, 12, 23, 12, 0, 0, "Nowhere/Invalid"),
        ));
        let err = todo_in_time_range(
            &todo,
            instant(2011, 1, 1),
            instant(2012, 1, 1),
            &IanaResolver,
        )
        .unwrap_err();
        assert_eq!(err.property, "DTSTART");
    }

    #[test]
    fn parsed_todo_with_bare_date_due() {
        let todo = crate::rfc::ical::parse::parse_component_source(
            "\
BEGIN:VTODO\r\n\
UID:parsed@example.com\r\n\
DTSTAMP:20111201T000000Z\r\n\
DUE:20111225\r\n\
END:VTODO\r\n",
        )
        .unwrap();

        check(&todo, [true, false]);
    }

    #[test]
    fn event_with_dtend() {
        let mut event = Component::event();
        event.add_property(Property::datetime(
            "DTSTART",
            DateTime::utc(2011, 12, 23, 12, 0, 0),
        ));
        event.add_property(Property::datetime(
            "DTEND",
            DateTime::utc(2011, 12, 23, 13, 0, 0),
        ));
        let [(s1, e1), (s2, e2)] = queries();
        assert!(event_in_time_range(&event, s1, e1, &IanaResolver).unwrap());
        assert!(!event_in_time_range(&event, s2, e2, &IanaResolver).unwrap());
    }

    #[test]
    fn all_day_event_spans_its_day() {
        let mut event = Component::event();
        event.add_property(Property::date("DTSTART", Date::new(2011, 10, 31)));
        // Query window covering only the late evening of that day.
        let in_range = event_in_time_range(
            &event,
            Utc.with_ymd_and_hms(2011, 10, 31, 22, 0, 0).single().unwrap(),
            Utc.with_ymd_and_hms(2011, 10, 31, 23, 0, 0).single().unwrap(),
            &IanaResolver,
        )
        .unwrap();
        assert!(in_range);
    }

    #[test]
    fn event_without_dtstart_is_an_error() {
        let event = Component::event();
        let err = event_in_time_range(
            &event,
            instant(2011, 1, 1),
            instant(2012, 1, 1),
            &IanaResolver,
        )
        .unwrap_err();
        assert_eq!(err.property, "DTSTART");
    }
}
