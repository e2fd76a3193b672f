//! Where the timetable comes from, and how it is read.

use std::{
	fmt, fs,
	io::{self, Read},
	path::PathBuf,
};

use anyhow::{bail, Context, Result};
use log::info;
use url::Url;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
	Url(Url),
	File(PathBuf),
	Stdin,
}

impl Source {
	/// Picks the input: a local file when given, the subscription URL otherwise.
	///
	/// Fails when there is nothing to read, before anything is fetched or
	/// written.
	pub fn resolve(input: Option<PathBuf>, url: Option<&str>) -> Result<Self> {
		if let Some(input) = input {
			return Ok(if input.as_os_str() == "-" {
				Self::Stdin
			} else {
				Self::File(input)
			});
		}

		let url = url.map(str::trim).filter(|url| !url.is_empty() && !url.starts_with("PASTE_"));

		let Some(url) = url else {
			bail!(
				"No calendar URL configured\n\n\
				Pass --url, set TPFILTER_URL, or add it to your config file:\n\n\
				url = \"https://tp.educloud.no/uib/timeplan/ical.php?...\""
			);
		};

		parse_url(url).map(Self::Url)
	}

	/// Reads the whole calendar. Invalid UTF-8 is replaced rather than
	/// rejected.
	pub fn read(&self) -> Result<String> {
		let bytes = match self {
			Self::Url(url) => fetch(url)?,
			Self::File(path) => {
				fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?
			}
			Self::Stdin => {
				let mut bytes = Vec::new();
				io::stdin()
					.read_to_end(&mut bytes)
					.context("Failed to read calendar from stdin")?;
				bytes
			}
		};

		Ok(String::from_utf8_lossy(&bytes).into_owned())
	}
}

impl fmt::Display for Source {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Url(url) => write!(f, "{}", url.host_str().unwrap_or(url.as_str())),
			Self::File(path) => write!(f, "{}", path.display()),
			Self::Stdin => f.write_str("stdin"),
		}
	}
}

/// Parses an http(s) URL. `webcal://` subscription links are fetched over
/// https.
fn parse_url(url: &str) -> Result<Url> {
	let url = match url.strip_prefix("webcal://") {
		Some(rest) => Url::parse(&format!("https://{rest}")),
		None => Url::parse(url),
	}
	.with_context(|| format!("Invalid calendar URL {url:?}"))?;

	if !matches!(url.scheme(), "http" | "https") {
		bail!("Unsupported URL scheme '{}': expected http, https or webcal", url.scheme());
	}

	Ok(url)
}

fn fetch(url: &Url) -> Result<Vec<u8>> {
	info!("Fetching calendar from {}", url.host_str().unwrap_or("?"));

	let client = reqwest::blocking::Client::builder()
		.user_agent(USER_AGENT)
		.build()
		.context("Failed to create HTTP client")?;

	let response = client
		.get(url.clone())
		.send()
		.context("Failed to fetch calendar")?;

	let status = response.status();

	if !status.is_success() {
		bail!("Failed to fetch calendar (status {status})");
	}

	let body = response.bytes().context("Failed to read response body")?;

	Ok(body.to_vec())
}
