use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::{ics::BEGIN_EVENT, normalize::normalize, settings::Vocabulary};

static COURSE_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[A-Z]{3}[0-9]{3}").unwrap());

/// Whether the whole of `s` is a course code such as `INF102`.
#[must_use]
pub fn is_course_code(s: &str) -> bool {
	COURSE_CODE.find(s).is_some_and(|m| m.range() == (0..s.len()))
}

/// A course code found in an event summary, e.g. `INF102`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CourseCode<'a>(&'a str);

impl<'a> CourseCode<'a> {
	/// The first course code in `text`, if any.
	#[must_use]
	pub fn find(text: &'a str) -> Option<Self> {
		COURSE_CODE.find(text).map(|m| Self(m.as_str()))
	}

	#[must_use]
	pub fn as_str(&self) -> &'a str {
		self.0
	}
}

impl fmt::Display for CourseCode<'_> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.0)
	}
}

/// One `VEVENT` block of an unfolded calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event<'a> {
	raw: &'a str,
	summary: &'a str,
	description: &'a str,
}

impl<'a> Event<'a> {
	#[must_use]
	pub fn from_block(raw: &'a str) -> Self {
		Self {
			raw,
			summary: property(raw, "SUMMARY"),
			description: property(raw, "DESCRIPTION"),
		}
	}

	/// The block as it appeared in the source, possibly followed by whatever
	/// came before the next event.
	#[must_use]
	pub fn raw(&self) -> &'a str {
		self.raw
	}

	#[must_use]
	pub fn summary(&self) -> &'a str {
		self.summary
	}

	#[must_use]
	pub fn description(&self) -> &'a str {
		self.description
	}

	#[must_use]
	pub fn course_code(&self) -> Option<CourseCode<'a>> {
		CourseCode::find(self.summary)
	}

	#[must_use]
	pub fn normalized_summary(&self) -> String {
		normalize(self.summary)
	}

	#[must_use]
	pub fn is_group_like(&self, vocabulary: &Vocabulary) -> bool {
		vocabulary.group.matches(&self.normalized_summary())
	}

	#[must_use]
	pub fn is_always_keep(&self, vocabulary: &Vocabulary) -> bool {
		vocabulary.always_keep.matches(&self.normalized_summary())
	}
}

/// Value of the first line of the form `NAME:value` or `NAME;params:value`,
/// trimmed. Empty when no line matches.
fn property<'a>(block: &'a str, name: &str) -> &'a str {
	block
		.lines()
		.find_map(|line| {
			let rest = line.strip_prefix(name)?;

			if !rest.starts_with([':', ';']) {
				return None;
			}

			rest.split_once(':').map(|(_, value)| value.trim())
		})
		.unwrap_or_default()
}

/// Splits unfolded calendar text into events, one per `BEGIN:VEVENT` marker,
/// in source order. Each event runs up to the next marker or the end of the
/// text; anything before the first marker is not part of any event.
#[must_use]
pub fn extract(unfolded: &str) -> Vec<Event<'_>> {
	let starts = unfolded
		.match_indices(BEGIN_EVENT)
		.map(|(at, _)| at)
		.collect::<Vec<_>>();

	starts
		.iter()
		.enumerate()
		.map(|(i, &start)| {
			let end = starts.get(i + 1).copied().unwrap_or(unfolded.len());

			Event::from_block(&unfolded[start..end])
		})
		.collect()
}
