use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One lesson as sent by the schedule server, every field may be missing
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Eq)]
pub struct Lesson {
    /// Day of the week, 1 for monday
    #[serde(default)]
    pub day_number: Option<i64>,

    /// Position of the lesson in the day, starting at 1
    #[serde(default)]
    pub cours_nr: Option<i64>,

    /// Course's name
    #[serde(default, deserialize_with = "text")]
    pub cours_name: Option<String>,

    /// Kind of lesson (lecture, lab, seminar...)
    #[serde(default, deserialize_with = "text")]
    pub cours_type: Option<String>,

    /// Room where the lesson takes place
    #[serde(default, deserialize_with = "text")]
    pub cours_office: Option<String>,

    /// Professor's name
    #[serde(default, deserialize_with = "text")]
    pub teacher_name: Option<String>,
}

/// Text field that may be sent as a number (rooms often are), null meaning missing
fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

impl Lesson {
    /// Day code, 0 when unknown
    pub fn day(&self) -> i64 {
        self.day_number.unwrap_or_default()
    }

    /// Ordinal used for sorting, 0 when unknown
    pub fn ordinal(&self) -> i64 {
        self.cours_nr.unwrap_or_default()
    }

    pub fn name(&self) -> &str {
        self.cours_name.as_deref().unwrap_or_default()
    }

    pub fn kind(&self) -> &str {
        self.cours_type.as_deref().unwrap_or_default()
    }

    /// Room, `Unknown` when missing or empty
    pub fn office(&self) -> &str {
        match self.cours_office.as_deref() {
            Some(office) if !office.is_empty() => office,
            _ => "Unknown",
        }
    }

    pub fn teacher(&self) -> &str {
        self.teacher_name.as_deref().unwrap_or_default()
    }
}

/// Raw payload of the schedule server
#[derive(Debug, Default, Deserialize)]
pub struct RawSchedule {
    /// Every lesson of the requested week, in no particular order
    #[serde(default)]
    pub week: Option<Vec<Lesson>>,
}

impl RawSchedule {
    pub fn lessons(self) -> Vec<Lesson> {
        self.week.unwrap_or_default()
    }
}

/// Lessons per day code
pub type Timetable = BTreeMap<i64, Vec<Lesson>>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let lesson: Lesson = serde_json::from_str(r#"{"day_number": 2}"#).unwrap();
        assert_eq!(lesson.day(), 2);
        assert_eq!(lesson.ordinal(), 0);
        assert_eq!(lesson.name(), "");
        assert_eq!(lesson.kind(), "");
        assert_eq!(lesson.office(), "Unknown");
        assert_eq!(lesson.teacher(), "");
    }

    #[test]
    fn null_is_missing() {
        let lesson: Lesson = serde_json::from_str(
            r#"{"day_number": null, "cours_nr": null, "cours_name": null, "cours_office": ""}"#,
        )
        .unwrap();
        assert_eq!(lesson.day(), 0);
        assert_eq!(lesson.cours_nr, None);
        assert_eq!(lesson.office(), "Unknown");
    }

    #[test]
    fn numeric_text_fields() {
        let raw: RawSchedule = serde_json::from_str(
            r#"{"week": [{"day_number": 1, "cours_nr": 1, "cours_name": "Math", "cours_office": 312}]}"#,
        )
        .unwrap();
        let lessons = raw.lessons();
        assert_eq!(lessons[0].office(), "312");

        let output = crate::timetable::format(&crate::timetable::group(lessons));
        assert!(output.contains("Lesson 1 | Math |  | 312 | "));

        let lesson: Lesson =
            serde_json::from_str(r#"{"cours_name": 7, "cours_type": 1.5, "teacher_name": true}"#)
                .unwrap();
        assert_eq!(lesson.name(), "7");
        assert_eq!(lesson.kind(), "1.5");
        assert_eq!(lesson.teacher(), "true");
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let raw: RawSchedule = serde_json::from_str(
            r#"{"group": "IT11Z", "week": [{"day_number": 1, "cours_nr": 3, "extra": true}]}"#,
        )
        .unwrap();
        let lessons = raw.lessons();
        assert_eq!(lessons.len(), 1);
        assert_eq!(lessons[0].ordinal(), 3);
    }

    #[test]
    fn absent_or_null_week_is_empty() {
        let raw: RawSchedule = serde_json::from_str("{}").unwrap();
        assert!(raw.lessons().is_empty());
        let raw: RawSchedule = serde_json::from_str(r#"{"week": null}"#).unwrap();
        assert!(raw.lessons().is_empty());
    }
}
