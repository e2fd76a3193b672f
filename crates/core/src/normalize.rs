//! Text normalization used for every summary, vocabulary word and keep-pattern
//! before they are compared.
//!
//! The rules are heuristics tuned to how timetable summaries drift in practice
//! ("Aktiv time 07" vs "aktiv time 7", "Drop in" vs "drop-in"):
//!
//! 1. lowercase
//! 2. unify dash variants to `-`
//! 3. collapse whitespace runs to a single space and trim
//! 4. spell every "drop in" variant as `drop-in`
//! 5. strip leading zeros from standalone numbers (`07` -> `7`, `00` -> `0`)
//!
//! Rule 5 also rewrites numbers that are not group numbers (room numbers,
//! times such as `10:05`), which can make unrelated tokens compare equal.

use once_cell::sync::Lazy;
use regex::Regex;

static DROP_IN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\bdrop[ -]?in\b").unwrap());

static LEADING_ZEROS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\b0+([0-9]+)\b").unwrap());

fn unify_dash(c: char) -> char {
	match c {
		'\u{2010}'..='\u{2015}' | '\u{2212}' | '\u{fe58}' | '\u{fe63}' | '\u{ff0d}' => '-',
		c => c,
	}
}

#[must_use]
pub fn normalize(text: &str) -> String {
	let lowered = text.to_lowercase().chars().map(unify_dash).collect::<String>();
	let collapsed = lowered.split_whitespace().collect::<Vec<_>>().join(" ");
	let collapsed = DROP_IN.replace_all(&collapsed, "drop-in");

	LEADING_ZEROS.replace_all(&collapsed, "${1}").into_owned()
}
