use std::path::PathBuf;

use songdata_core::BuildError;
use thiserror::Error;

/// Why a catalog could not be produced.
#[derive(Error, Debug)]
pub enum FetchError {
	/// The request never produced a response.
	#[error("network error: {0}")]
	Network(String),
	/// The server answered with a non-success status.
	#[error("unexpected status {status}: {body}")]
	Status { status: u16, body: String },
	/// Reading or writing a local file failed.
	#[error("I/O error at {path}: {source}")]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},
	/// The payload is not a valid dataset.
	#[error("invalid dataset: {0}")]
	Decode(#[from] serde_json::Error),
	/// The configuration could not be read.
	#[error("invalid configuration: {0}")]
	Config(String),
	/// The decoded records violate a catalog invariant.
	#[error(transparent)]
	Build(#[from] BuildError),
	/// The background build task ended without a result.
	#[error("catalog task failed: {0}")]
	TaskFailed(String),
}

impl FetchError {
	/// HTTP status carried by the error, if any.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
		Self::Io {
			path: path.into(),
			source,
		}
	}
}

/// Result type for provider operations.
pub type FetchResult<T> = Result<T, FetchError>;
