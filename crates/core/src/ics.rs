//! Line-level handling of iCalendar text: unfolding and reassembling a
//! calendar from a subset of its events.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::event::Event;

pub const BEGIN_CALENDAR: &str = "BEGIN:VCALENDAR";
pub const END_CALENDAR: &str = "END:VCALENDAR";
pub const BEGIN_EVENT: &str = "BEGIN:VEVENT";
pub const END_EVENT: &str = "END:VEVENT";

static FOLD: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n[ \t]").unwrap());

/// Joins folded content lines (RFC 5545 section 3.1): every line break
/// followed by a single space or tab is removed.
#[must_use]
pub fn unfold(text: &str) -> String {
	let mut unfolded = FOLD.replace_all(text, "").into_owned();

	// removing a fold can expose another one, e.g. "\n\n  x"
	while FOLD.is_match(&unfolded) {
		unfolded = FOLD.replace_all(&unfolded, "").into_owned();
	}

	unfolded
}

/// `\r\n` if the text uses it anywhere, `\n` otherwise.
fn line_break(text: &str) -> &'static str {
	if text.contains("\r\n") {
		"\r\n"
	} else {
		"\n"
	}
}

fn strip_line_break(text: &str) -> &str {
	text.strip_prefix("\r\n")
		.or_else(|| text.strip_prefix('\n'))
		.unwrap_or(text)
}

/// The event's own `BEGIN:VEVENT` .. `END:VEVENT` span, trimmed. A block
/// that never closes is cut before any `END:VCALENDAR` it swallowed and
/// returned without an end marker.
fn isolate(raw: &str) -> &str {
	let block = raw.trim();

	if block.ends_with(END_EVENT) {
		return block;
	}

	let span = block.find(BEGIN_EVENT).and_then(|start| {
		block[start..]
			.find(END_EVENT)
			.map(|len| &block[start..start + len + END_EVENT.len()])
	});

	span.unwrap_or_else(|| {
		block
			.find(END_CALENDAR)
			.map_or(block, |at| block[..at].trim_end())
	})
}

/// What follows the last `END:VEVENT`, minus any trailing event that never
/// closes: that event belongs to the body, kept or not.
fn trailer(after_last_end: &str) -> Cow<'_, str> {
	let trailer = strip_line_break(after_last_end);

	let Some(open) = trailer.find(BEGIN_EVENT) else {
		return Cow::Borrowed(trailer);
	};

	let before = &trailer[..open];

	match trailer[open..].find(END_CALENDAR) {
		Some(at) if before.trim().is_empty() => Cow::Borrowed(&trailer[open + at..]),
		Some(at) => Cow::Owned(format!("{before}{}", &trailer[open + at..])),
		None => Cow::Borrowed(before),
	}
}

/// Rebuilds `original` with only the `kept` events, which must come from the
/// unfolded `original`.
///
/// The header (everything before the first event) and footer (everything
/// after the last `END:VEVENT`) are taken from the unfolded original. Kept
/// events that never close get an `END:VEVENT`; dropped ones leave nothing
/// behind, not even in the footer. Text without any event is returned
/// untouched.
#[must_use]
pub fn rebuild(original: &str, kept: &[Event<'_>]) -> String {
	let unfolded = unfold(original);

	let Some(first) = unfolded.find(BEGIN_EVENT) else {
		return original.to_string();
	};

	let newline = line_break(&unfolded);
	let header = &unfolded[..first];
	let footer = unfolded
		.rfind(END_EVENT)
		.map(|at| at + END_EVENT.len())
		.filter(|&end| end > first)
		.map(|end| trailer(&unfolded[end..]));

	let mut calendar = String::with_capacity(unfolded.len());

	if !header.contains(BEGIN_CALENDAR) {
		calendar.push_str(BEGIN_CALENDAR);
		calendar.push_str(newline);
	}

	calendar.push_str(header);

	for event in kept {
		let block = isolate(event.raw());

		calendar.push_str(block);
		calendar.push_str(newline);

		if !block.ends_with(END_EVENT) {
			calendar.push_str(END_EVENT);
			calendar.push_str(newline);
		}
	}

	match footer.as_deref() {
		Some(footer) if footer.contains(END_CALENDAR) => calendar.push_str(footer),
		Some(footer) if !footer.trim().is_empty() => {
			calendar.push_str(footer.trim_end());
			calendar.push_str(newline);
			calendar.push_str(END_CALENDAR);
			calendar.push_str(newline);
		}
		_ => {
			calendar.push_str(END_CALENDAR);
			calendar.push_str(newline);
		}
	}

	calendar
}
