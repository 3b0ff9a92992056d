use std::{path::PathBuf, process};

use anyhow::{Context, Result};
use clap::Parser;
use dialoguer::Input;
use tracing::{info, warn};

mod error;
mod event;
mod ics;
mod info;
mod logging;
mod timetable;
mod utils;

use crate::info::Semester;
use crate::timetable::{FileSource, HttpSource, Source};

#[derive(Parser)]
#[clap(version, about, long_about = None)]
struct Args {
    /// The group you want to get the timetable, i.e.: IT11Z
    #[clap(short, long, env = "UNIWEEK_GROUP", default_value = "IT11Z")]
    group: String,

    /// The university week, default to the first one
    #[clap(short, long, value_name = "WEEK NUMBER", allow_negative_numbers = true)]
    week: Option<i64>,

    /// Date (dd.mm.yyyy or "today") whose week you want, wins over --week
    #[clap(short = 'D', long, value_name = "DATE")]
    date: Option<String>,

    /// First day of the university year (dd.mm.yyyy)
    #[clap(short, long, value_name = "DATE")]
    first_day: Option<String>,

    /// Schedule server URL, {group}, {week} and {debug} are replaced
    #[clap(short, long, env = "UNIWEEK_SOURCE", value_name = "URL")]
    source: Option<String>,

    /// Read the raw schedule from a JSON file instead of the server
    #[clap(short, long, value_name = "FILE", conflicts_with = "source")]
    input: Option<PathBuf>,

    /// Export to iCalendar format (.ics)
    #[clap(short, long, value_name = "FILE NAME")]
    export: Option<String>,

    /// Ask the schedule server for debug data
    #[clap(short, long)]
    debug: bool,

    /// Increase verbosity (-v info, -vv debug, -vvv trace)
    #[clap(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args).await {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

async fn run(args: Args) -> Result<()> {
    let semester = match &args.first_day {
        Some(day) => Semester::new(info::parse_date(day).context("invalid first day")?),
        None => Semester::default(),
    };

    let source = match (args.input, args.source) {
        (Some(path), _) => Source::File(FileSource::new(path)),
        (None, Some(url)) => {
            let user_agent = format!("uniweek/{}", env!("CARGO_PKG_VERSION"));
            Source::Http(HttpSource::new(url, &user_agent)?)
        }
        (None, None) => return Err(error::Error::NoSource.into()),
    };

    let (week, date) = match (args.week, args.date) {
        (_, Some(date)) => (None, Some(info::resolve_keyword(&date))),
        (Some(week), None) => (Some(week), None),
        (None, None) => (None, ask_date()),
    };

    if let Some(filename) = args.export {
        // Export the calendar
        let week = timetable::resolve_week(&semester, week, date.as_deref())?;
        let timetable = timetable::timetable(&source, &args.group, week, args.debug).await?;
        let filename = ics::export(&timetable, &args.group, week, &semester, &filename)?;

        println!("Calendar exported => {filename}");
    } else {
        // Show the calendar
        let output = timetable::render(
            &source,
            &semester,
            &args.group,
            week,
            date.as_deref(),
            args.debug,
        )
        .await?;

        println!("{output}");
    }

    Ok(())
}

/// Ask which date to show, `None` meaning the first week
fn ask_date() -> Option<String> {
    let today = info::today();
    let answer: String = match Input::new()
        .with_prompt(format!(
            "Enter date (dd.mm.yyyy), type 'today' for {today}, or leave empty to use week=1"
        ))
        .allow_empty(true)
        .interact_text()
    {
        Ok(answer) => answer,
        // No terminal to ask, same as an empty answer
        Err(e) => {
            warn!("can't read the date: {e}");
            String::new()
        }
    };

    let answer = answer.trim();
    info!(answer, "date entered");

    if answer.is_empty() {
        None
    } else {
        Some(info::resolve_keyword(answer))
    }
}
