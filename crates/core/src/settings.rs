//! Filter configuration: which courses the student takes, which group sessions
//! to keep per course, and the vocabulary used to classify session types.

use std::{collections::BTreeMap, str::FromStr};

use serde::Deserialize;

use crate::{event::is_course_code, normalize::normalize, Error, Result};

pub const DEFAULT_GROUP_WORDS: &[&str] = &[
	"gruppe",
	"group",
	"aktiv time",
	"lab",
	"øving",
	"övning",
	"exercise class",
	"class group",
	"seminargruppe",
	"workshopgruppe",
	"drop-in",
];

pub const DEFAULT_ALWAYS_KEEP_WORDS: &[&str] = &[
	"forelesning",
	"seminar",
	"regneverksted",
	"oppgavesesjon",
	"review",
	"lecture",
	"workshop",
];

/// A list of normalized words or patterns. Blank entries are discarded on
/// construction, so they can never match.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "Vec<String>")]
pub struct WordList(Vec<String>);

impl WordList {
	/// Whether any word is a substring of `normalized`, which must already have
	/// gone through [`normalize`].
	#[must_use]
	pub fn matches(&self, normalized: &str) -> bool {
		self.0.iter().any(|word| normalized.contains(word.as_str()))
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.0.iter().map(String::as_str)
	}
}

impl<S: AsRef<str>> FromIterator<S> for WordList {
	fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
		Self(
			iter.into_iter()
				.map(|word| normalize(word.as_ref()))
				.filter(|word| !word.is_empty())
				.collect(),
		)
	}
}

impl From<Vec<String>> for WordList {
	fn from(words: Vec<String>) -> Self {
		words.into_iter().collect()
	}
}

/// Words that classify a session as group-like or always-keep.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Vocabulary {
	pub group: WordList,
	pub always_keep: WordList,
}

impl Default for Vocabulary {
	fn default() -> Self {
		Self {
			group: DEFAULT_GROUP_WORDS.iter().collect(),
			always_keep: DEFAULT_ALWAYS_KEEP_WORDS.iter().collect(),
		}
	}
}

/// One course the student takes, with the group sessions to keep for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseRule {
	pub code: String,
	pub patterns: WordList,
}

impl FromStr for CourseRule {
	type Err = Error;

	/// Parses `CODE` or `CODE=pattern,pattern`.
	fn from_str(s: &str) -> Result<Self> {
		let (code, patterns) = s.split_once('=').unwrap_or((s, ""));
		let code = code.trim();

		if !is_course_code(code) {
			return Err(Error::InvalidCourseCode(code.to_string()));
		}

		Ok(Self {
			code: code.to_string(),
			patterns: patterns.split(',').collect(),
		})
	}
}

/// Course code -> keep-patterns for that course's group sessions.
///
/// A course missing from the table is not taken at all. A course with no
/// patterns keeps its lectures but none of its group sessions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct KeepRules(BTreeMap<String, WordList>);

impl KeepRules {
	#[must_use]
	pub fn new() -> Self {
		Self::default()
	}

	/// Adds a course, replacing any patterns it already had.
	pub fn insert(&mut self, rule: CourseRule) {
		self.0.insert(rule.code, rule.patterns);
	}

	#[must_use]
	pub fn patterns(&self, code: &str) -> Option<&WordList> {
		self.0.get(code)
	}

	#[must_use]
	pub fn is_enrolled(&self, code: &str) -> bool {
		self.0.contains_key(code)
	}

	#[must_use]
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}

	#[must_use]
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Keys that can never match a detected course code.
	pub fn unrecognized(&self) -> impl Iterator<Item = &str> {
		self.0.keys().map(String::as_str).filter(|code| !is_course_code(code))
	}
}

impl FromIterator<CourseRule> for KeepRules {
	fn from_iter<I: IntoIterator<Item = CourseRule>>(iter: I) -> Self {
		let mut rules = Self::new();
		rules.extend(iter);
		rules
	}
}

impl Extend<CourseRule> for KeepRules {
	fn extend<I: IntoIterator<Item = CourseRule>>(&mut self, iter: I) {
		for rule in iter {
			self.insert(rule);
		}
	}
}

/// Everything the filter needs besides the calendar itself.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct FilterSettings {
	#[serde(default)]
	pub courses: KeepRules,
	#[serde(default)]
	pub vocabulary: Vocabulary,
}

impl FilterSettings {
	/// Reads the `[courses]` and `[vocabulary]` tables of a TOML document.
	/// Other keys are ignored.
	pub fn from_toml(s: &str) -> Result<Self> {
		Ok(toml::from_str(s)?)
	}
}
