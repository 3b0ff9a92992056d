use std::borrow::Cow;

/// First lesson of the day starts at 08:00
const DAY_START: i64 = 8 * 60;

/// Lesson length, in minutes
const LESSON_LENGTH: i64 = 90;

/// From a lesson start to the next one: the lesson plus a 15 minutes break
const LESSON_STEP: i64 = LESSON_LENGTH + 15;

/// Start and end of a lesson, in minutes since midnight.
///
/// Ordinals start at 1, anything lower gives a slot before 08:00. Absurd
/// ordinals saturate instead of overflowing.
pub fn lesson_window(ordinal: i64) -> (i64, i64) {
    let start = ordinal
        .saturating_sub(1)
        .saturating_mul(LESSON_STEP)
        .saturating_add(DAY_START);
    (start, start.saturating_add(LESSON_LENGTH))
}

/// Time slot of a lesson, i.e. `09:45 - 11:15`
pub fn lesson_time_range(ordinal: i64) -> String {
    let (start, end) = lesson_window(ordinal);

    format!("{} - {}", clock(start), clock(end))
}

fn clock(minutes: i64) -> String {
    format!("{:02}:{:02}", minutes.div_euclid(60), minutes.rem_euclid(60))
}

/// Name showed for a day code, 1 being monday
pub fn weekday_name(day: i64) -> Cow<'static, str> {
    match day {
        1 => "Monday".into(),
        2 => "Tuesday".into(),
        3 => "Wednesday".into(),
        4 => "Thursday".into(),
        5 => "Friday".into(),
        6 => "Saturday".into(),
        7 => "Sunday".into(),
        other => format!("Day {other}").into(),
    }
}
