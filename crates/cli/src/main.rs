#![warn(clippy::pedantic)]

mod config;
mod source;

use std::{
	fs,
	io::{self, Write},
	path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use chrono::Local;
use clap::{ArgAction, Parser};
use env_logger::Env;
use log::{info, warn};
use tpfilter_core::{classify, extract, filter_calendar, unfold, CourseRule, FilterSettings};

use crate::{config::Config, source::Source};

/// Filter a timetable calendar feed down to the courses and groups you attend.
#[derive(Parser, Debug)]
#[command(version)]
struct Args {
	/// iCalendar subscription URL, overriding `url` in the config file
	#[arg(long, env = "TPFILTER_URL", value_hint = clap::ValueHint::Url)]
	url: Option<String>,
	/// Read the calendar from a file instead of the URL (`-` for stdin)
	#[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
	input: Option<PathBuf>,
	/// Where to write the filtered calendar (`-` for stdout) [default: filtered.ics]
	#[arg(short, long, value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
	output: Option<PathBuf>,
	/// Config file [default: ~/.config/tpfilter/config.toml]
	#[arg(short, long, value_name = "FILE", env = "TPFILTER_CONFIG", value_hint = clap::ValueHint::FilePath)]
	config: Option<PathBuf>,
	/// Take a course, keeping only group sessions that match one of the patterns
	#[arg(long = "course", value_name = "CODE[=PATTERN,...]")]
	courses: Vec<CourseRule>,
	/// Print what would happen to each event instead of writing the calendar
	#[arg(long)]
	explain: bool,
	/// More logging (repeatable)
	#[arg(short, long, action = ArgAction::Count)]
	verbose: u8,
	/// Less logging (repeatable)
	#[arg(short, long, action = ArgAction::Count, conflicts_with = "verbose")]
	quiet: u8,
}

fn init_logging(verbose: u8, quiet: u8) {
	let level = match i16::from(verbose) - i16::from(quiet) {
		..=-2 => "error",
		-1 => "warn",
		0 => "info",
		1 => "debug",
		_ => "trace",
	};

	env_logger::Builder::from_env(Env::default().default_filter_or(level))
		.format(|buf, record| {
			writeln!(
				buf,
				"{} [{}] {}",
				Local::now().format("%Y-%m-%d %H:%M:%S"),
				record.level(),
				record.args()
			)
		})
		.init();
}

fn write_output(path: &Path, calendar: &str) -> Result<()> {
	if path.as_os_str() == "-" {
		return io::stdout()
			.lock()
			.write_all(calendar.as_bytes())
			.context("Failed to write calendar to stdout");
	}

	fs::write(path, calendar).with_context(|| format!("Failed to write {}", path.display()))?;
	info!("Wrote {}", path.display());

	Ok(())
}

fn explain(text: &str, settings: &FilterSettings, out: &mut impl Write) -> Result<()> {
	let unfolded = unfold(text);

	for event in extract(&unfolded) {
		let verdict = classify(&event, &settings.courses, &settings.vocabulary);
		let code = event
			.course_code()
			.map_or_else(|| "-".to_string(), |code| code.to_string());

		writeln!(
			out,
			"{} {:<18} {:<6} {}",
			if verdict.is_keep() { "keep" } else { "drop" },
			verdict.to_string(),
			code,
			event.summary()
		)?;
	}

	Ok(())
}

fn run(args: Args) -> Result<()> {
	let mut config = Config::load(args.config.as_deref())?;

	config.filter.courses.extend(args.courses);

	for code in config.filter.courses.unrecognized() {
		warn!("Course '{code}' is not a course code like INF102 and will never match");
	}

	if config.filter.courses.is_empty() {
		warn!("No courses configured; every event with a course code will be dropped");
	}

	let source = Source::resolve(args.input, args.url.as_deref().or(config.url.as_deref()))?;
	let output = args
		.output
		.or(config.output)
		.unwrap_or_else(|| PathBuf::from(config::DEFAULT_OUTPUT));

	info!("Reading calendar from {source}");

	let text = source.read()?;

	if args.explain {
		return explain(&text, &config.filter, &mut io::stdout().lock());
	}

	let filtered = filter_calendar(&text, &config.filter);

	write_output(&output, &filtered.calendar)?;
	info!("Done: {}", filtered.report);

	Ok(())
}

fn main() -> Result<()> {
	let args = Args::parse();

	init_logging(args.verbose, args.quiet);
	run(args)
}
