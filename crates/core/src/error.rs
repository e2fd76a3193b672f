use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
	#[error("invalid course code '{0}': expected three uppercase letters followed by three digits")]
	InvalidCourseCode(String),

	#[error("invalid filter settings: {0}")]
	Settings(#[from] toml::de::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
