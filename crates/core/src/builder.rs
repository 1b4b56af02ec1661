//! Catalog construction.
//!
//! ```rust,ignore
//! let catalog = CatalogBuilder::new()
//!     .duplicate_policy(DuplicatePolicy::Reject)
//!     .rating(RatingKind::Votes.model(), RatingMode::Precompute)
//!     .extend(drafts)
//!     .build()?;
//! ```

use std::sync::Arc;

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::catalog::Catalog;
use crate::characteristic::Characteristic;
use crate::error::BuildError;
use crate::rating::{RatingMode, RatingModel, VoteRating};
use crate::schema::{
	CharacteristicSlot, Difficulty, SchemaGeneration, Song, SongScore, Timestamp,
};
use crate::text::Text;

/// Policy for handling duplicate keys during construction.
///
/// Applies both to song hashes and to (characteristic, label) pairs within
/// one song. A losing record is dropped entirely, so it is reachable through
/// neither the flat list nor the index.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Fail the build.
	Reject,
	/// Keep the first record seen for a key.
	FirstWins,
	/// Replace with the last record seen, keeping the first one's position.
	#[default]
	LastWins,
}

/// Owned input for one difficulty.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DifficultyDraft {
	pub label: String,
	pub characteristic: Characteristic,
	pub stars: f32,
	pub ranked: bool,
	pub notes: u32,
	pub obstacles: u32,
	pub bombs: u32,
	pub njs: f32,
	pub njs_offset: Option<f32>,
	pub pp: Option<f32>,
	pub scores: Option<i64>,
	pub requirements: Vec<String>,
	pub ranked_update: Option<Timestamp>,
}

impl DifficultyDraft {
	pub fn new(characteristic: Characteristic, label: impl Into<String>, stars: f32) -> Self {
		Self {
			label: label.into(),
			characteristic,
			stars,
			..Self::default()
		}
	}

	fn into_record(self) -> Difficulty {
		Difficulty {
			label: self.label.into(),
			characteristic: self.characteristic,
			stars: self.stars,
			ranked: self.ranked,
			notes: self.notes,
			obstacles: self.obstacles,
			bombs: self.bombs,
			njs: self.njs,
			njs_offset: self.njs_offset,
			pp: self.pp,
			scores: self.scores,
			requirements: self.requirements.into_iter().map(Text::from).collect(),
			ranked_update: self.ranked_update,
		}
	}
}

/// Owned input for one song.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SongDraft {
	pub hash: String,
	pub key: String,
	pub generation: SchemaGeneration,
	pub name: Option<String>,
	pub sub_name: Option<String>,
	pub author: Option<String>,
	pub mapper: Option<String>,
	pub bpm: f32,
	pub duration_secs: Option<u32>,
	pub uploaded: Option<Timestamp>,
	pub upvotes: u32,
	pub downvotes: u32,
	pub downloads: Option<u32>,
	pub plays: Option<u32>,
	pub score: Option<SongScore>,
	pub difficulties: Vec<DifficultyDraft>,
}

impl SongDraft {
	pub fn new(hash: impl Into<String>) -> Self {
		Self {
			hash: hash.into(),
			..Self::default()
		}
	}

	/// Adds a difficulty, builder style.
	pub fn with_difficulty(mut self, difficulty: DifficultyDraft) -> Self {
		self.difficulties.push(difficulty);
		self
	}

	fn into_record(self, policy: DuplicatePolicy) -> Result<Song, BuildError> {
		if self.hash.is_empty() {
			return Err(BuildError::EmptyHash { key: self.key });
		}

		let mut difficulties: Vec<Difficulty> = Vec::with_capacity(self.difficulties.len());
		let mut slots: Vec<CharacteristicSlot> = Vec::new();

		for draft in self.difficulties {
			let existing = slots
				.iter()
				.find(|slot| slot.characteristic == draft.characteristic)
				.and_then(|slot| {
					slot.members
						.iter()
						.map(|&m| usize::from(m))
						.find(|&m| difficulties[m].label == *draft.label)
				});

			if let Some(position) = existing {
				match policy {
					DuplicatePolicy::Reject => {
						return Err(BuildError::DuplicateDifficulty {
							hash: self.hash,
							characteristic: draft.characteristic,
							label: draft.label,
						});
					}
					DuplicatePolicy::FirstWins => {
						debug!(hash = %self.hash, characteristic = %draft.characteristic, label = %draft.label, "catalog.duplicate_difficulty.skipped");
					}
					DuplicatePolicy::LastWins => {
						debug!(hash = %self.hash, characteristic = %draft.characteristic, label = %draft.label, "catalog.duplicate_difficulty.replaced");
						difficulties[position] = draft.into_record();
					}
				}
				continue;
			}

			let position = u16::try_from(difficulties.len()).map_err(|_| BuildError::TooManyDifficulties {
				hash: self.hash.clone(),
				count: difficulties.len() + 1,
			})?;

			match slots.iter_mut().find(|slot| slot.characteristic == draft.characteristic) {
				Some(slot) => slot.members.push(position),
				None => slots.push(CharacteristicSlot {
					characteristic: draft.characteristic,
					members: SmallVec::from_elem(position, 1),
				}),
			}
			difficulties.push(draft.into_record());
		}

		Ok(Song {
			hash: self.hash.into(),
			key: self.key.into(),
			generation: self.generation,
			name: self.name.map(Text::from),
			sub_name: self.sub_name.map(Text::from),
			author: self.author.map(Text::from),
			mapper: self.mapper.map(Text::from),
			bpm: self.bpm,
			duration_secs: self.duration_secs,
			uploaded: self.uploaded,
			upvotes: self.upvotes,
			downvotes: self.downvotes,
			downloads: self.downloads,
			plays: self.plays,
			score: self.score,
			difficulties: difficulties.into_boxed_slice(),
			characteristics: slots.into_boxed_slice(),
			cached_rating: None,
		})
	}
}

/// Builder for a [`Catalog`].
///
/// Collects drafts, resolves duplicates according to the policy, builds the
/// hash index and the per-song characteristic index, and optionally caches
/// ratings. The result is immutable.
pub struct CatalogBuilder {
	drafts: Vec<SongDraft>,
	policy: DuplicatePolicy,
	rating: Arc<dyn RatingModel>,
	rating_mode: RatingMode,
}

impl Default for CatalogBuilder {
	fn default() -> Self {
		Self::new()
	}
}

impl CatalogBuilder {
	/// Creates a builder.
	///
	/// Defaults:
	/// - `policy`: [`DuplicatePolicy::LastWins`]
	/// - rating: [`VoteRating`], [`RatingMode::OnDemand`]
	pub fn new() -> Self {
		Self {
			drafts: Vec::new(),
			policy: DuplicatePolicy::default(),
			rating: Arc::new(VoteRating),
			rating_mode: RatingMode::default(),
		}
	}

	/// Reserves room for `capacity` songs.
	pub fn with_capacity(capacity: usize) -> Self {
		let mut builder = Self::new();
		builder.drafts.reserve(capacity);
		builder
	}

	/// Sets the duplicate key handling policy.
	pub fn duplicate_policy(mut self, policy: DuplicatePolicy) -> Self {
		self.policy = policy;
		self
	}

	/// Sets the rating model and when it is evaluated.
	pub fn rating(mut self, model: Arc<dyn RatingModel>, mode: RatingMode) -> Self {
		self.rating = model;
		self.rating_mode = mode;
		self
	}

	/// Adds a single song.
	pub fn push(mut self, draft: SongDraft) -> Self {
		self.drafts.push(draft);
		self
	}

	/// Adds multiple songs.
	pub fn extend<I: IntoIterator<Item = SongDraft>>(mut self, drafts: I) -> Self {
		self.drafts.extend(drafts);
		self
	}

	/// Builds the catalog.
	pub fn build(self) -> Result<Catalog, BuildError> {
		let submitted = self.drafts.len();
		let mut songs: Vec<Song> = Vec::with_capacity(submitted);
		let mut by_hash: FxHashMap<Text, u32> = FxHashMap::default();
		by_hash.reserve(submitted);

		for draft in self.drafts {
			let song = draft.into_record(self.policy)?;

			if let Some(&existing) = by_hash.get(&song.hash) {
				match self.policy {
					DuplicatePolicy::Reject => {
						return Err(BuildError::DuplicateHash {
							hash: song.hash.to_string(),
						});
					}
					DuplicatePolicy::FirstWins => {
						warn!(hash = %song.hash, "catalog.duplicate_hash.skipped");
					}
					DuplicatePolicy::LastWins => {
						warn!(hash = %song.hash, "catalog.duplicate_hash.replaced");
						songs[existing as usize] = song;
					}
				}
				continue;
			}

			let position = u32::try_from(songs.len()).map_err(|_| BuildError::TooManySongs {
				count: songs.len() + 1,
			})?;
			by_hash.insert(song.hash.clone(), position);
			songs.push(song);
		}

		let mut catalog = Catalog {
			songs: songs.into_boxed_slice(),
			by_hash,
			rating: self.rating,
		};

		if self.rating_mode == RatingMode::Precompute {
			let ratings: Vec<f32> = (0..catalog.songs.len())
				.map(|i| catalog.view(&catalog.songs[i]).rating())
				.collect();
			for (song, rating) in catalog.songs.iter_mut().zip(ratings) {
				song.cached_rating = Some(rating);
			}
		}

		debug!(
			submitted,
			songs = catalog.len(),
			rating = catalog.rating.name(),
			precomputed = self.rating_mode == RatingMode::Precompute,
			"catalog.built"
		);

		Ok(catalog)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;
	use crate::access::{IndexedSeq, KeyedMap};

	fn song(hash: &str, bpm: f32) -> SongDraft {
		SongDraft {
			bpm,
			..SongDraft::new(hash)
		}
	}

	#[test]
	fn empty_hash_is_rejected() {
		let err = CatalogBuilder::new().push(SongDraft::new("")).build().unwrap_err();
		assert!(matches!(err, BuildError::EmptyHash { .. }));
	}

	#[test]
	fn duplicate_hash_reject() {
		let err = CatalogBuilder::new()
			.duplicate_policy(DuplicatePolicy::Reject)
			.push(song("AA", 100.0))
			.push(song("AA", 120.0))
			.build()
			.unwrap_err();
		assert_eq!(err, BuildError::DuplicateHash { hash: "AA".into() });
	}

	#[test]
	fn duplicate_hash_first_wins() {
		let catalog = CatalogBuilder::new()
			.duplicate_policy(DuplicatePolicy::FirstWins)
			.push(song("AA", 100.0))
			.push(song("BB", 90.0))
			.push(song("AA", 120.0))
			.build()
			.unwrap();
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.resolve_song("AA").unwrap().bpm(), 100.0);
	}

	#[test]
	fn duplicate_hash_last_wins_keeps_position() {
		let catalog = CatalogBuilder::new()
			.push(song("AA", 100.0))
			.push(song("BB", 90.0))
			.push(song("AA", 120.0))
			.build()
			.unwrap();
		assert_eq!(catalog.len(), 2);
		assert_eq!(catalog.songs().key_at(0), "AA");
		assert_eq!(catalog.resolve_song("AA").unwrap().bpm(), 120.0);
	}

	#[test]
	fn duplicate_difficulty_reject() {
		let draft = song("AA", 100.0)
			.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 3.0))
			.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 4.0));
		let err = CatalogBuilder::new()
			.duplicate_policy(DuplicatePolicy::Reject)
			.push(draft)
			.build()
			.unwrap_err();
		assert_eq!(
			err,
			BuildError::DuplicateDifficulty {
				hash: "AA".into(),
				characteristic: Characteristic::Standard,
				label: "Hard".into(),
			}
		);
	}

	#[test]
	fn duplicate_difficulty_is_dropped_from_both_paths() {
		let draft = song("AA", 100.0)
			.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 3.0))
			.with_difficulty(DifficultyDraft::new(Characteristic::OneSaber, "Hard", 2.0))
			.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 4.0));
		let catalog = CatalogBuilder::new().push(draft).build().unwrap();
		let song = catalog.resolve_song("AA").unwrap();

		assert_eq!(song.difficulties().len(), 2);
		assert_eq!(song.difficulties().at(0).stars(), 4.0);
		assert_eq!(song.difficulties_len(Characteristic::Standard), 1);
		assert_eq!(
			song.difficulty_by_label(Characteristic::Standard, "Hard").map(|d| d.stars()),
			Some(4.0)
		);
	}

	#[test]
	fn same_label_under_different_characteristics_is_kept() {
		let draft = song("AA", 100.0)
			.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Expert", 5.0))
			.with_difficulty(DifficultyDraft::new(Characteristic::Lawless, "Expert", 6.0));
		let catalog = CatalogBuilder::new().push(draft).build().unwrap();
		let song = catalog.resolve_song("AA").unwrap();
		assert_eq!(song.characteristics().len(), 2);
		assert_eq!(
			song.characteristics().keys().collect::<Vec<_>>(),
			vec![Characteristic::Standard, Characteristic::Lawless]
		);
	}

	#[test]
	fn precompute_caches_rating() {
		let draft = SongDraft {
			upvotes: 40,
			downvotes: 10,
			..song("AA", 100.0)
		};
		let catalog = CatalogBuilder::new()
			.rating(Arc::new(VoteRating), RatingMode::Precompute)
			.push(draft)
			.build()
			.unwrap();
		let song = catalog.resolve_song("AA").unwrap();
		assert_eq!(song.cached_rating(), Some(VoteRating::score(40, 10)));
		assert_eq!(song.rating(), VoteRating::score(40, 10));
	}

	#[test]
	fn on_demand_leaves_cache_empty() {
		let catalog = CatalogBuilder::new().push(song("AA", 100.0)).build().unwrap();
		let song = catalog.resolve_song("AA").unwrap();
		assert_eq!(song.cached_rating(), None);
		assert_eq!(song.rating(), 0.5);
	}
}
