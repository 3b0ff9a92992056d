use std::{path::PathBuf, time::Duration};

use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::info::{parse_date, Semester};
use crate::utils::weekday_name;

use self::models::{Lesson, RawSchedule, Timetable};

pub mod models;

/// Where the raw schedule of a group comes from
#[allow(async_fn_in_trait)]
pub trait ScheduleSource {
    /// Raw schedule of `group` for the university `week`
    async fn fetch(&self, group: &str, week: i64, debug: bool) -> Result<RawSchedule>;
}

/// Schedule server reachable over HTTP
pub struct HttpSource {
    client: reqwest::Client,
    /// URL with `{group}`, `{week}` and `{debug}` placeholders
    template: String,
}

impl HttpSource {
    pub fn new(template: impl Into<String>, user_agent: &str) -> Result<Self> {
        // Use custom User-Agent
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .timeout(Duration::from_secs(5))
            .build()?;

        Ok(Self {
            client,
            template: template.into(),
        })
    }

    fn url(&self, group: &str, week: i64, debug: bool) -> String {
        self.template
            .replace("{group}", group)
            .replace("{week}", &week.to_string())
            .replace("{debug}", if debug { "1" } else { "0" })
    }
}

impl ScheduleSource for HttpSource {
    async fn fetch(&self, group: &str, week: i64, debug: bool) -> Result<RawSchedule> {
        let url = self.url(group, week, debug);
        info!(%url, "fetching schedule");

        let body = self
            .client
            .get(&url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "schedule received");

        Ok(serde_json::from_str(&body)?)
    }
}

/// Schedule payload saved on disk
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl ScheduleSource for FileSource {
    async fn fetch(&self, group: &str, week: i64, _debug: bool) -> Result<RawSchedule> {
        info!(path = %self.path.display(), group, week, "reading schedule");

        let body = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| Error::Io {
                path: self.path.clone(),
                source,
            })?;

        Ok(serde_json::from_str(&body)?)
    }
}

/// Source picked from the command line
pub enum Source {
    Http(HttpSource),
    File(FileSource),
}

impl ScheduleSource for Source {
    async fn fetch(&self, group: &str, week: i64, debug: bool) -> Result<RawSchedule> {
        match self {
            Self::Http(source) => source.fetch(group, week, debug).await,
            Self::File(source) => source.fetch(group, week, debug).await,
        }
    }
}

/// Week asked by the user: the date wins over the week, week 1 when none is given
pub fn resolve_week(semester: &Semester, week: Option<i64>, date: Option<&str>) -> Result<i64> {
    match date {
        Some(date) => Ok(semester.week_from_date(parse_date(date)?)),
        None => Ok(week.unwrap_or(1)),
    }
}

/// Sort lessons by day, keeping their order of arrival
pub fn group(lessons: Vec<Lesson>) -> Timetable {
    let mut timetable = Timetable::new();
    for lesson in lessons {
        timetable.entry(lesson.day()).or_default().push(lesson);
    }

    timetable
}

/// Fetch the timetable of a group for a week
pub async fn timetable<S: ScheduleSource>(
    source: &S,
    group_name: &str,
    week: i64,
    debug: bool,
) -> Result<Timetable> {
    let raw = source.fetch(group_name, week, debug).await?;
    let lessons = raw.lessons();
    info!(group = group_name, week, lessons = lessons.len(), "schedule fetched");

    Ok(group(lessons))
}

/// Render the timetable as text, one line per lesson
pub fn format(timetable: &Timetable) -> String {
    let mut lines = vec!["Day of the week:".to_owned()];

    for (day, lessons) in timetable {
        let mut lessons: Vec<&Lesson> = lessons.iter().collect();
        lessons.sort_by_key(|lesson| lesson.ordinal());

        lines.push(String::new());
        lines.push(format!("{}:", weekday_name(*day)));
        for lesson in lessons {
            let ordinal = lesson
                .cours_nr
                .map_or_else(|| "?".to_owned(), |nr| nr.to_string());
            lines.push(format!(
                "Lesson {ordinal} | {} | {} | {} | {}",
                lesson.name(),
                lesson.kind(),
                lesson.office(),
                lesson.teacher()
            ));
        }
    }

    lines.join("\n")
}

/// Fetch and render the timetable of a group
pub async fn render<S: ScheduleSource>(
    source: &S,
    semester: &Semester,
    group_name: &str,
    week: Option<i64>,
    date: Option<&str>,
    debug: bool,
) -> Result<String> {
    let week = resolve_week(semester, week, date)?;
    let output = format(&timetable(source, group_name, week, debug).await?);

    if debug {
        debug!("rendered timetable:\n{output}");
    }

    Ok(output)
}
