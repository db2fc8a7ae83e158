use bidwell_domain::search::FilterError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	InvalidRequest { message: String },
	#[error("Invalid filter at {path}: {message}")]
	InvalidFilter { path: String, message: String },
	#[error("Not found: {message}")]
	NotFound { message: String },
	#[error("Conflict: {message}")]
	Conflict { message: String },
	#[error("Storage error: {message}")]
	Storage { message: String },
	#[error("Timed out: {message}")]
	Timeout { message: String },
}
impl From<bidwell_storage::Error> for Error {
	fn from(err: bidwell_storage::Error) -> Self {
		match err {
			bidwell_storage::Error::Sqlx(inner) => Self::Storage { message: inner.to_string() },
			bidwell_storage::Error::InvalidArgument(message) => Self::InvalidRequest { message },
			bidwell_storage::Error::NotFound(message) => Self::NotFound { message },
			bidwell_storage::Error::Conflict(message) => Self::Conflict { message },
		}
	}
}

impl From<FilterError> for Error {
	fn from(err: FilterError) -> Self {
		Self::InvalidFilter { path: err.path, message: err.message }
	}
}
