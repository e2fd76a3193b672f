#![warn(clippy::pedantic)]

//! Reduces a timetable iCalendar feed to the sessions a student attends:
//! every lecture-type session of the courses they take, plus only the group
//! sessions they are enrolled in.
//!
//! Events are selected as whole blocks of the original text and never
//! rewritten. The only additions are the end markers a truncated feed left
//! out.

use log::info;

pub mod error;
pub mod event;
pub mod filter;
pub mod ics;
pub mod normalize;
pub mod settings;

pub use error::{Error, Result};
pub use event::{extract, CourseCode, Event};
pub use filter::{classify, filter, Report, Verdict};
pub use ics::{rebuild, unfold};
pub use settings::{CourseRule, FilterSettings, KeepRules, Vocabulary, WordList};

#[derive(Debug, Clone)]
pub struct Filtered {
	pub calendar: String,
	pub report: Report,
}

/// Unfolds, filters and reassembles `text` in one go.
#[must_use]
pub fn filter_calendar(text: &str, settings: &FilterSettings) -> Filtered {
	let unfolded = unfold(text);
	let events = extract(&unfolded);

	info!("Found {} events", events.len());

	let (kept, report) = filter(events, &settings.courses, &settings.vocabulary);

	info!("Keeping {} events", kept.len());

	Filtered {
		calendar: rebuild(text, &kept),
		report,
	}
}
