#![warn(clippy::pedantic)]

use tpfilter_core::{filter_calendar, FilterSettings};
use wasm_bindgen::prelude::{wasm_bindgen, JsError};

fn filter(ics: &str, settings: &str) -> tpfilter_core::Result<String> {
	let settings = FilterSettings::from_toml(settings)?;

	Ok(filter_calendar(ics, &settings).calendar)
}

/// Filters `ics` with the `[courses]` and `[vocabulary]` tables of the TOML
/// document `settings`.
///
/// # Errors
///
/// Fails when `settings` is not valid TOML or has the wrong shape.
#[wasm_bindgen(js_name = filterIcs)]
pub fn filter_ics(ics: &str, settings: &str) -> Result<String, JsError> {
	Ok(filter(ics, settings)?)
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::filter;

	#[test]
	fn filters_with_toml_settings() {
		let ics = "BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:INF113 Gruppe 7\nEND:VEVENT\nBEGIN:VEVENT\nSUMMARY:INF113 Forelesning\nEND:VEVENT\nEND:VCALENDAR\n";

		assert_eq!(
			filter(ics, "[courses]\nINF113 = [\"Gruppe 4\"]").unwrap(),
			"BEGIN:VCALENDAR\nBEGIN:VEVENT\nSUMMARY:INF113 Forelesning\nEND:VEVENT\nEND:VCALENDAR\n"
		);
	}

	#[test]
	fn rejects_malformed_settings() {
		assert!(filter("", "[courses").is_err());
	}
}
