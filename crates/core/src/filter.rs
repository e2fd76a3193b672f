use std::{collections::BTreeMap, fmt};

use log::debug;

use crate::{
	event::Event,
	settings::{KeepRules, Vocabulary},
};

/// Why an event was kept or dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Verdict {
	/// The summary has no course code, so the event cannot be classified.
	NoCourseCode,
	/// The course is not one the student takes.
	NotEnrolled,
	/// A lecture-type session of an enrolled course.
	AlwaysKeep,
	/// A group session matching one of the course's keep-patterns.
	GroupMatched,
	/// A group session of a course with no keep-patterns.
	NoGroupChosen,
	/// A group session matching none of the course's keep-patterns.
	GroupNotMatched,
	/// Neither a group nor a lecture-type session of an enrolled course.
	Unclassified,
}

impl Verdict {
	pub const ALL: [Self; 7] = [
		Self::NoCourseCode,
		Self::NotEnrolled,
		Self::AlwaysKeep,
		Self::GroupMatched,
		Self::NoGroupChosen,
		Self::GroupNotMatched,
		Self::Unclassified,
	];

	#[must_use]
	pub fn is_keep(self) -> bool {
		matches!(
			self,
			Self::NoCourseCode | Self::AlwaysKeep | Self::GroupMatched | Self::Unclassified
		)
	}
}

impl fmt::Display for Verdict {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{}", match self {
			Self::NoCourseCode => "no-course-code",
			Self::NotEnrolled => "not-enrolled",
			Self::AlwaysKeep => "always-keep",
			Self::GroupMatched => "group-matched",
			Self::NoGroupChosen => "no-group-chosen",
			Self::GroupNotMatched => "group-not-matched",
			Self::Unclassified => "unclassified",
		})
	}
}

#[must_use]
pub fn classify(event: &Event<'_>, rules: &KeepRules, vocabulary: &Vocabulary) -> Verdict {
	let Some(code) = event.course_code() else {
		return Verdict::NoCourseCode;
	};

	let Some(patterns) = rules.patterns(code.as_str()) else {
		return Verdict::NotEnrolled;
	};

	let summary = event.normalized_summary();

	if vocabulary.always_keep.matches(&summary) {
		Verdict::AlwaysKeep
	} else if !vocabulary.group.matches(&summary) {
		Verdict::Unclassified
	} else if patterns.is_empty() {
		Verdict::NoGroupChosen
	} else if patterns.matches(&summary) {
		Verdict::GroupMatched
	} else {
		Verdict::GroupNotMatched
	}
}

/// How many events were found, and what happened to them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Report {
	verdicts: BTreeMap<Verdict, usize>,
}

impl Report {
	pub fn record(&mut self, verdict: Verdict) {
		*self.verdicts.entry(verdict).or_default() += 1;
	}

	#[must_use]
	pub fn count(&self, verdict: Verdict) -> usize {
		self.verdicts.get(&verdict).copied().unwrap_or_default()
	}

	#[must_use]
	pub fn found(&self) -> usize {
		self.verdicts.values().sum()
	}

	#[must_use]
	pub fn kept(&self) -> usize {
		self.verdicts
			.iter()
			.filter(|(verdict, _)| verdict.is_keep())
			.map(|(_, count)| count)
			.sum()
	}
}

impl fmt::Display for Report {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "kept {} of {} events", self.kept(), self.found())?;

		if self.verdicts.is_empty() {
			return Ok(());
		}

		let counts = self
			.verdicts
			.iter()
			.map(|(verdict, count)| format!("{verdict}: {count}"))
			.collect::<Vec<_>>();

		write!(f, " ({})", counts.join(", "))
	}
}

/// The events to keep, in their original order, and the verdict reached for
/// every event.
#[must_use]
pub fn filter<'a>(
	events: Vec<Event<'a>>,
	rules: &KeepRules,
	vocabulary: &Vocabulary,
) -> (Vec<Event<'a>>, Report) {
	let mut report = Report::default();

	let kept = events
		.into_iter()
		.filter(|event| {
			let verdict = classify(event, rules, vocabulary);

			debug!("{verdict}: {:?}", event.summary());
			report.record(verdict);

			verdict.is_keep()
		})
		.collect();

	(kept, report)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;
	use test_case::test_case;

	use super::*;
	use crate::settings::CourseRule;

	fn rules() -> KeepRules {
		["INF102=Aktiv time 7", "INF113=Gruppe 4", "MAT111=Gruppe 02", "MAT221"]
			.iter()
			.map(|rule| rule.parse::<CourseRule>().unwrap())
			.collect()
	}

	fn verdict(summary: &str) -> Verdict {
		let block = format!("BEGIN:VEVENT\nSUMMARY:{summary}\nEND:VEVENT\n");

		classify(&Event::from_block(&block), &rules(), &Vocabulary::default())
	}

	#[test_case("INF102 Forelesning", Verdict::AlwaysKeep)]
	#[test_case("INF113 Gruppe 7", Verdict::GroupNotMatched)]
	#[test_case("INF113 Gruppe 4", Verdict::GroupMatched)]
	#[test_case("INF113 gruppe  04", Verdict::GroupMatched; "group number drift")]
	#[test_case("INF102 Aktiv time 07", Verdict::GroupMatched; "active hour drift")]
	#[test_case("MAT111 Gruppe 2", Verdict::GroupMatched; "zero padded pattern")]
	#[test_case("MAT221 Gruppe 2", Verdict::NoGroupChosen)]
	#[test_case("MAT221 Forelesning", Verdict::AlwaysKeep)]
	#[test_case("MAT221 Seminargruppe 1", Verdict::AlwaysKeep; "seminar wins over group")]
	#[test_case("MAT221 Eksamen", Verdict::Unclassified)]
	#[test_case("INF214 Forelesning", Verdict::NotEnrolled)]
	#[test_case("CHEM101 Lab 1", Verdict::NotEnrolled; "longer prefix")]
	#[test_case("Felles informasjonsmøte", Verdict::NoCourseCode)]
	#[test_case("", Verdict::NoCourseCode)]
	fn classifies(summary: &str, expected: Verdict) {
		assert_eq!(verdict(summary), expected);
	}

	#[test]
	fn substring_patterns_match_every_group() {
		let rules: KeepRules = ["MAT221=gruppe".parse::<CourseRule>().unwrap()].into_iter().collect();
		let event = Event::from_block("BEGIN:VEVENT\nSUMMARY:MAT221 Gruppe 2\nEND:VEVENT");

		assert_eq!(classify(&event, &rules, &Vocabulary::default()), Verdict::GroupMatched);
	}

	#[test]
	fn filter_preserves_order() {
		let blocks = [
			"BEGIN:VEVENT\nSUMMARY:INF113 Gruppe 4\nEND:VEVENT\n",
			"BEGIN:VEVENT\nSUMMARY:INF113 Gruppe 5\nEND:VEVENT\n",
			"BEGIN:VEVENT\nSUMMARY:INF102 Forelesning\nEND:VEVENT\n",
			"BEGIN:VEVENT\nUID:no-summary\nEND:VEVENT\n",
		];
		let events = blocks.iter().map(|block| Event::from_block(block)).collect();

		let (kept, report) = filter(events, &rules(), &Vocabulary::default());

		assert_eq!(
			kept.iter().map(Event::summary).collect::<Vec<_>>(),
			["INF113 Gruppe 4", "INF102 Forelesning", ""]
		);
		assert_eq!(report.found(), 4);
		assert_eq!(report.kept(), kept.len());
		assert_eq!(report.count(Verdict::GroupNotMatched), 1);
	}

	#[test]
	fn keep_verdicts() {
		let kept = Verdict::ALL.into_iter().filter(|v| v.is_keep()).collect::<Vec<_>>();

		assert_eq!(kept, [
			Verdict::NoCourseCode,
			Verdict::AlwaysKeep,
			Verdict::GroupMatched,
			Verdict::Unclassified,
		]);
	}

	#[test]
	fn custom_vocabulary_replaces_default() {
		let vocabulary = Vocabulary {
			group: ["tutorial"].into_iter().collect(),
			always_keep: ["lecture"].into_iter().collect(),
		};
		let tutorial = Event::from_block("BEGIN:VEVENT\nSUMMARY:MAT221 Tutorial B\nEND:VEVENT");
		let group = Event::from_block("BEGIN:VEVENT\nSUMMARY:MAT221 Gruppe 2\nEND:VEVENT");

		assert_eq!(classify(&tutorial, &rules(), &vocabulary), Verdict::NoGroupChosen);
		assert_eq!(classify(&group, &rules(), &vocabulary), Verdict::Unclassified);
	}

	#[test]
	fn report_counts_verdicts() {
		let mut report = Report::default();

		report.record(Verdict::AlwaysKeep);
		report.record(Verdict::NotEnrolled);
		report.record(Verdict::NotEnrolled);

		assert_eq!(report.found(), 3);
		assert_eq!(report.kept(), 1);
		assert_eq!(report.count(Verdict::NotEnrolled), 2);
		assert_eq!(report.count(Verdict::GroupMatched), 0);
		assert_eq!(
			report.to_string(),
			"kept 1 of 3 events (not-enrolled: 2, always-keep: 1)"
		);
	}

	#[test]
	fn empty_report() {
		assert_eq!(Report::default().to_string(), "kept 0 of 0 events");
	}
}
