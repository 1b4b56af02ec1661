use thiserror::Error;

use crate::characteristic::Characteristic;

/// Errors that stop a catalog from being built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
	/// A song was submitted without a hash.
	#[error("song with key {key:?} has an empty hash")]
	EmptyHash { key: String },
	/// Two songs share a hash under [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
	#[error("duplicate song hash: {hash}")]
	DuplicateHash { hash: String },
	/// Two difficulties of one song share a characteristic and label under
	/// [`DuplicatePolicy::Reject`](crate::DuplicatePolicy::Reject).
	#[error("duplicate difficulty in song {hash}: {characteristic}/{label}")]
	DuplicateDifficulty {
		hash: String,
		characteristic: Characteristic,
		label: String,
	},
	/// A song has more difficulties than the index can address.
	#[error("song {hash} has {count} difficulties")]
	TooManyDifficulties { hash: String, count: usize },
	/// The catalog holds more songs than positions can address.
	#[error("catalog has {count} songs")]
	TooManySongs { count: usize },
}
