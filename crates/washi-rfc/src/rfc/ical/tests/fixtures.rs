//! Shared iCalendar test fixtures.

pub const ICAL_EVENT: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:event-1@example.com\r\n\
DTSTAMP:20260123T120000Z\r\n\
DTSTART;TZID=America/New_York:20260123T090000\r\n\
DTEND;TZID=America/New_York:20260123T100000\r\n\
SUMMARY:Weekly sync\\, with notes\r\n\
DESCRIPTION:Agenda:\\n- item one\\n- item two\r\n\
LOCATION:Room 4;A\r\n\
ORGANIZER;CN=\"Doe, Jane\":mailto:jane@example.com\r\n\
ATTENDEE;ROLE=REQ-PARTICIPANT:mailto:jon@example.com\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const ICAL_TODO: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Tasks 1.0//EN\r\n\
BEGIN:VTODO\r\n\
UID:todo-1@example.com\r\n\
DTSTAMP:20111201T120000Z\r\n\
DTSTART:20111223T120000Z\r\n\
DUE:20111225T120000Z\r\n\
SUMMARY:Wrap presents\r\n\
PERCENT-COMPLETE:40\r\n\
CATEGORIES:HOLIDAYS,FAMILY\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

pub const ICAL_RECURRING: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VEVENT\r\n\
UID:recurring-1@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260105T090000Z\r\n\
RRULE:FREQ=WEEKLY;BYDAY=MO,WE,FR;COUNT=10\r\n\
EXDATE:20260112T090000Z,20260119T090000Z\r\n\
SUMMARY:Standup\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const ICAL_TIMEZONE: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VTIMEZONE\r\n\
TZID:Europe/Berlin\r\n\
BEGIN:DAYLIGHT\r\n\
DTSTART:19810329T020000\r\n\
TZOFFSETFROM:+0100\r\n\
TZOFFSETTO:+0200\r\n\
RRULE:FREQ=YEARLY;BYMONTH=3;BYDAY=-1SU\r\n\
TZNAME:CEST\r\n\
END:DAYLIGHT\r\n\
BEGIN:STANDARD\r\n\
DTSTART:19961027T030000\r\n\
TZOFFSETFROM:+0200\r\n\
TZOFFSETTO:+0100\r\n\
RRULE:FREQ=YEARLY;BYMONTH=10;BYDAY=-1SU\r\n\
TZNAME:CET\r\n\
END:STANDARD\r\n\
END:VTIMEZONE\r\n\
BEGIN:VEVENT\r\n\
UID:zoned-1@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART;TZID=Europe/Berlin:20260601T100000\r\n\
SUMMARY:Sommerfest\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";

pub const ICAL_ALARM: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
BEGIN:VTODO\r\n\
UID:alarmed-todo@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DUE:20260301\r\n\
SUMMARY:File taxes\r\n\
BEGIN:VALARM\r\n\
ACTION:DISPLAY\r\n\
TRIGGER:-P1D\r\n\
DESCRIPTION:Taxes due tomorrow\r\n\
END:VALARM\r\n\
END:VTODO\r\n\
END:VCALENDAR\r\n";

pub const ICAL_EXTENSIONS: &str = "\
BEGIN:VCALENDAR\r\n\
VERSION:2.0\r\n\
PRODID:-//Example Corp//Calendar 1.0//EN\r\n\
X-WR-CALNAME:Team calendar\r\n\
BEGIN:X-OFFICE-HOURS\r\n\
X-DAY:MONDAY\r\n\
X-OPEN;X-SOURCE=manual:09:00\r\n\
END:X-OFFICE-HOURS\r\n\
BEGIN:VEVENT\r\n\
UID:ext-1@example.com\r\n\
DTSTAMP:20260101T000000Z\r\n\
DTSTART:20260105T090000Z\r\n\
X-APPLE-STRUCTURED-LOCATION;X-TITLE=HQ:geo:37.7749,-122.4194\r\n\
SUMMARY:With extensions\r\n\
END:VEVENT\r\n\
END:VCALENDAR\r\n";
