use chrono::{NaiveDateTime, Utc};
use ics::{
    escape_text,
    properties::{Class, Description, DtEnd, DtStart, Location, Summary},
    Event, ICalendar,
};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::event::generate_event_id;
use crate::info::Semester;
use crate::timetable::models::Timetable;
use crate::utils::lesson_time_range;

/// Build the calendar of a week, one event per lesson
pub fn build(
    timetable: &Timetable,
    group: &str,
    week: i64,
    semester: &Semester,
) -> Result<ICalendar<'static>> {
    let mut calendar = ICalendar::new("2.0", format!("-//uniweek//{group}//EN"));
    let stamp = format!("{}Z", Utc::now().format("%Y%m%dT%H%M%S"));

    for (day, lessons) in timetable {
        for lesson in lessons {
            // Without its position we can't tell when the lesson happens
            let Some(ordinal) = lesson.cours_nr else {
                warn!(day, name = lesson.name(), "lesson without number skipped");
                continue;
            };

            let (start, end) = semester.lesson_datetime(week, *day, ordinal)?;

            let mut event = Event::new(
                generate_event_id(group, week, *day, ordinal, lesson.name(), lesson.kind()),
                stamp.clone(),
            );
            event.push(DtStart::new(dt_ical(start)));
            event.push(DtEnd::new(dt_ical(end)));

            let summary = if lesson.kind().is_empty() {
                lesson.name().to_owned()
            } else {
                format!("{} ({})", lesson.name(), lesson.kind())
            };
            event.push(Summary::new(escape_text(summary)));
            event.push(Class::public());

            if let Some(office) = lesson.cours_office.as_deref().filter(|o| !o.is_empty()) {
                event.push(Location::new(escape_text(office.to_owned())));
            }
            let mut description = format!("Lesson {ordinal} ({})", lesson_time_range(ordinal));
            if !lesson.teacher().is_empty() {
                description = format!("{description}\n{}", lesson.teacher());
            }
            event.push(Description::new(escape_text(description)));

            calendar.add_event(event);
        }
    }

    Ok(calendar)
}

/// Export the week to an `.ics` file, returns the name actually written
pub fn export(
    timetable: &Timetable,
    group: &str,
    week: i64,
    semester: &Semester,
    filename: &str,
) -> Result<String> {
    let calendar = build(timetable, group, week, semester)?;

    // Add the extension if needed
    let filename = if filename.ends_with(".ics") {
        filename.to_owned()
    } else {
        format!("{filename}.ics")
    };

    calendar.save_file(&filename).map_err(|source| Error::Io {
        path: filename.clone().into(),
        source,
    })?;
    info!(file = %filename, "calendar exported");

    Ok(filename)
}

/// Floating local time, the schedule carries no timezone
fn dt_ical(dt: NaiveDateTime) -> String {
    dt.format("%Y%m%dT%H%M%S").to_string()
}
