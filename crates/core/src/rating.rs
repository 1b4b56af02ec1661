//! Song rating models.
//!
//! A rating is a pure function of one song. Which function applies is a
//! catalog setting, and a catalog may either evaluate it on demand or cache
//! the result per song at construction ([`RatingMode`]).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::access::IndexedSeq;
use crate::view::SongView;

/// Scores a song.
pub trait RatingModel: Send + Sync {
	/// Short identifier used in logs.
	fn name(&self) -> &'static str;

	fn rate(&self, song: SongView<'_>) -> f32;
}

/// Vote confidence rating.
///
/// Starts from the upvote share `p` and pulls it toward `0.5` by a factor that
/// shrinks as votes accumulate: `p - (p - 0.5) * 2^-log10(total + 1)`.
/// Songs without votes rate exactly `0.5`.
#[derive(Debug, Clone, Copy, Default)]
pub struct VoteRating;

impl VoteRating {
	pub fn score(upvotes: u32, downvotes: u32) -> f32 {
		let total = f64::from(upvotes) + f64::from(downvotes);
		if total == 0.0 {
			return 0.5;
		}
		let share = f64::from(upvotes) / total;
		let pull = 2f64.powf(-(total + 1.0).log10());
		(share - (share - 0.5) * pull) as f32
	}
}

impl RatingModel for VoteRating {
	fn name(&self) -> &'static str {
		"votes"
	}

	fn rate(&self, song: SongView<'_>) -> f32 {
		Self::score(song.upvotes(), song.downvotes())
	}
}

/// Highest star value among the song's difficulties; `0.0` when it has none.
#[derive(Debug, Clone, Copy, Default)]
pub struct PeakStars;

impl RatingModel for PeakStars {
	fn name(&self) -> &'static str {
		"peak-stars"
	}

	fn rate(&self, song: SongView<'_>) -> f32 {
		song.difficulties()
			.iter()
			.map(|diff| diff.stars())
			.fold(0.0, f32::max)
	}
}

/// Uses the rating published with the record, falling back to another model
/// for records whose generation predates it.
#[derive(Debug, Clone, Copy, Default)]
pub struct StoredRating<M = VoteRating> {
	fallback: M,
}

impl<M: RatingModel> StoredRating<M> {
	pub fn with_fallback(fallback: M) -> Self {
		Self { fallback }
	}
}

impl<M: RatingModel> RatingModel for StoredRating<M> {
	fn name(&self) -> &'static str {
		"stored"
	}

	fn rate(&self, song: SongView<'_>) -> f32 {
		match song.score() {
			Some(score) => score.rating,
			None => self.fallback.rate(song),
		}
	}
}

/// Configurable choice of built-in model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingKind {
	#[default]
	Votes,
	PeakStars,
	Stored,
}

impl RatingKind {
	pub fn model(self) -> Arc<dyn RatingModel> {
		match self {
			Self::Votes => Arc::new(VoteRating),
			Self::PeakStars => Arc::new(PeakStars),
			Self::Stored => Arc::new(StoredRating::<VoteRating>::default()),
		}
	}
}

/// When ratings are evaluated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RatingMode {
	/// Evaluate the model on every call.
	#[default]
	OnDemand,
	/// Evaluate once per song while building and cache the result.
	Precompute,
}
