use chrono::{Duration, Local, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::LazyLock;

use crate::error::{Error, Result};
use crate::utils::lesson_window;

/// Monday of the first week of the university year
pub const WEEK_ONE_START: NaiveDate = match NaiveDate::from_ymd_opt(2025, 9, 1) {
    Some(date) => date,
    None => panic!("invalid week one start"),
};

/// Format used everywhere a user types a date
const DATE_FORMAT: &str = "%d.%m.%Y";

static DATE_SHAPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{2}\.\d{2}\.\d{4}$").expect("static regex"));

/// Anchor of the week numbering
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Semester {
    /// First day of week 1
    pub start: NaiveDate,
}

impl Default for Semester {
    fn default() -> Self {
        Self {
            start: WEEK_ONE_START,
        }
    }
}

impl Semester {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    /// University week of a date, never below 1
    pub fn week_from_date(&self, date: NaiveDate) -> i64 {
        let days = (date - self.start).num_days();
        (days.div_euclid(7) + 1).max(1)
    }

    /// Calendar date of a day in a week, `day` being 1 for monday up to 7 for sunday.
    ///
    /// The day is not checked, a `day` of 9 simply lands on the next week's tuesday.
    /// Only dates chrono can't represent are errors.
    pub fn date_from_week_and_day(&self, week: i64, day: i64) -> Result<NaiveDate> {
        week
            .checked_sub(1)
            .and_then(|weeks| weeks.checked_mul(7))
            .and_then(|days| days.checked_add(day.checked_sub(1)?))
            .and_then(Duration::try_days)
            .and_then(|offset| self.start.checked_add_signed(offset))
            .ok_or(Error::DateOutOfRange { week, day })
    }

    /// Start and end of a lesson on its calendar date
    pub fn lesson_datetime(
        &self,
        week: i64,
        day: i64,
        ordinal: i64,
    ) -> Result<(NaiveDateTime, NaiveDateTime)> {
        let date = self.date_from_week_and_day(week, day)?;
        let (start, end) = lesson_window(ordinal);

        let at = |minutes: i64| {
            let hour = u32::try_from(minutes.div_euclid(60)).ok()?;
            let minute = u32::try_from(minutes.rem_euclid(60)).ok()?;
            date.and_hms_opt(hour, minute, 0)
        };

        match (at(start), at(end)) {
            (Some(start), Some(end)) => Ok((start, end)),
            _ => Err(Error::LessonOutOfDay { ordinal }),
        }
    }
}

/// Turn a `dd.mm.yyyy` string to a date
pub fn parse_date(input: &str) -> Result<NaiveDate> {
    if !DATE_SHAPE.is_match(input) {
        return Err(Error::DateFormat {
            input: input.to_owned(),
        });
    }

    NaiveDate::parse_from_str(input, DATE_FORMAT).map_err(|source| Error::InvalidDate {
        input: input.to_owned(),
        source,
    })
}

/// Today's date as the user would type it
pub fn today() -> String {
    Local::now().date_naive().format(DATE_FORMAT).to_string()
}

/// Replace the `today` keyword by the actual date, leave anything else alone
pub fn resolve_keyword(input: &str) -> String {
    if input.eq_ignore_ascii_case("today") {
        today()
    } else {
        input.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn epoch_is_week_one() {
        let semester = Semester::default();
        assert_eq!(semester.week_from_date(WEEK_ONE_START), 1);
        assert_eq!(semester.week_from_date(WEEK_ONE_START + Duration::days(6)), 1);
        assert_eq!(semester.week_from_date(WEEK_ONE_START + Duration::days(7)), 2);
    }

    #[test]
    fn dates_before_epoch_clamp_to_week_one() {
        let semester = Semester::default();
        assert_eq!(semester.week_from_date(date(2025, 8, 31)), 1);
        assert_eq!(semester.week_from_date(date(2020, 1, 1)), 1);
    }

    #[test]
    fn week_is_monotonic() {
        let semester = Semester::default();
        let mut previous = 1;
        for offset in 0..400 {
            let week = semester.week_from_date(WEEK_ONE_START + Duration::days(offset));
            assert!(week >= previous);
            previous = week;
        }
        assert_eq!(previous, 400 / 7 + 1);
    }

    #[test]
    fn first_day_of_first_week_is_epoch() {
        assert_eq!(
            Semester::default().date_from_week_and_day(1, 1).unwrap(),
            WEEK_ONE_START
        );
    }

    #[test]
    fn week_and_day_round_trip() {
        let semester = Semester::default();
        for week in 1..=30 {
            for day in 1..=7 {
                let d = semester.date_from_week_and_day(week, day).unwrap();
                assert_eq!(semester.week_from_date(d), week);
            }
        }
    }

    #[test]
    fn out_of_range_day_still_computes() {
        let semester = Semester::default();
        assert_eq!(semester.date_from_week_and_day(1, 9).unwrap(), date(2025, 9, 9));
        assert_eq!(semester.date_from_week_and_day(1, 0).unwrap(), date(2025, 8, 31));
    }

    #[test]
    fn custom_start() {
        let semester = Semester::new(date(2024, 9, 2));
        assert_eq!(semester.week_from_date(date(2024, 9, 16)), 3);
        assert_eq!(semester.date_from_week_and_day(2, 5).unwrap(), date(2024, 9, 13));
    }

    #[test]
    fn lesson_datetime_on_calendar_date() {
        let (start, end) = Semester::default().lesson_datetime(2, 3, 2).unwrap();
        assert_eq!(start, date(2025, 9, 10).and_hms_opt(9, 45, 0).unwrap());
        assert_eq!(end, date(2025, 9, 10).and_hms_opt(11, 15, 0).unwrap());
    }

    #[test]
    fn lesson_datetime_past_midnight_fails() {
        let result = Semester::default().lesson_datetime(1, 1, 10);
        assert!(matches!(result, Err(Error::LessonOutOfDay { ordinal: 10 })));
    }

    #[test]
    fn dates_beyond_the_calendar_are_errors() {
        let semester = Semester::default();
        assert!(matches!(
            semester.date_from_week_and_day(200_000_000, 1),
            Err(Error::DateOutOfRange { week: 200_000_000, day: 1 })
        ));
        assert!(matches!(
            semester.date_from_week_and_day(i64::MAX, 7),
            Err(Error::DateOutOfRange { .. })
        ));
        assert!(matches!(
            semester.date_from_week_and_day(1, i64::MIN),
            Err(Error::DateOutOfRange { .. })
        ));
        assert!(matches!(
            semester.date_from_week_and_day(i64::MIN, 1),
            Err(Error::DateOutOfRange { .. })
        ));
        assert!(matches!(
            semester.lesson_datetime(-200_000_000, 1, 1),
            Err(Error::DateOutOfRange { .. })
        ));
    }

    #[test]
    fn huge_ordinal_is_out_of_day() {
        let result = Semester::default().lesson_datetime(1, 1, i64::MAX);
        assert!(matches!(result, Err(Error::LessonOutOfDay { .. })));
    }

    #[test]
    fn parse_strict_format() {
        assert_eq!(parse_date("15.09.2025").unwrap(), date(2025, 9, 15));
        assert!(matches!(
            parse_date("1.9.2025"),
            Err(Error::DateFormat { .. })
        ));
        assert!(matches!(
            parse_date("2025-09-15"),
            Err(Error::DateFormat { .. })
        ));
        assert!(matches!(
            parse_date(" 15.09.2025"),
            Err(Error::DateFormat { .. })
        ));
    }

    #[test]
    fn parse_rejects_impossible_dates() {
        assert!(matches!(
            parse_date("31.02.2025"),
            Err(Error::InvalidDate { .. })
        ));
    }

    #[test]
    fn today_keyword() {
        assert_eq!(resolve_keyword("TODAY"), today());
        assert_eq!(resolve_keyword("01.10.2025"), "01.10.2025");
        assert!(parse_date(&resolve_keyword("today")).is_ok());
    }
}
