//! Views over songs and their two-level difficulty index.

use std::ops::Deref;

use crate::access::{KeyedMap, Seq, expect_index};
use crate::catalog::Catalog;
use crate::characteristic::Characteristic;
use crate::schema::{CharacteristicSlot, Difficulty, Song};

impl Song {
	/// Every difficulty of the song, regardless of characteristic.
	pub fn difficulties(&self) -> Seq<'_, Difficulty> {
		Seq::new(&self.difficulties)
	}

	/// Characteristic → label → difficulty map over the same records as
	/// [`difficulties`](Self::difficulties).
	pub fn characteristics(&self) -> CharacteristicMap<'_> {
		CharacteristicMap { song: self }
	}

	/// Number of difficulties under `characteristic`; zero when absent.
	pub fn difficulties_len(&self, characteristic: Characteristic) -> usize {
		self.slot(characteristic).map_or(0, |slot| slot.members.len())
	}

	/// Resolves one difficulty by characteristic and exact label.
	pub fn difficulty_by_label(&self, characteristic: Characteristic, label: &str) -> Option<&Difficulty> {
		self.characteristics().get(&characteristic)?.get(label)
	}

	fn slot(&self, characteristic: Characteristic) -> Option<&CharacteristicSlot> {
		self.characteristics.iter().find(|slot| slot.characteristic == characteristic)
	}
}

/// Song bound to its owning catalog.
///
/// Derefs to [`Song`]; adds what needs catalog context, such as the rating
/// model.
#[derive(Clone, Copy)]
pub struct SongView<'c> {
	catalog: &'c Catalog,
	song: &'c Song,
}

impl<'c> SongView<'c> {
	pub(crate) fn new(catalog: &'c Catalog, song: &'c Song) -> Self {
		Self { catalog, song }
	}

	/// The underlying record, with the catalog's lifetime.
	pub fn record(&self) -> &'c Song {
		self.song
	}

	/// The catalog this song belongs to.
	pub fn catalog(&self) -> &'c Catalog {
		self.catalog
	}

	/// Rating of the song: the value cached at construction if there is one,
	/// otherwise the catalog's rating model applied now.
	pub fn rating(&self) -> f32 {
		self.song
			.cached_rating
			.unwrap_or_else(|| self.catalog.rating_model().rate(*self))
	}

	pub fn difficulties(&self) -> Seq<'c, Difficulty> {
		self.song.difficulties()
	}

	pub fn characteristics(&self) -> CharacteristicMap<'c> {
		self.song.characteristics()
	}

	pub fn difficulty_by_label(&self, characteristic: Characteristic, label: &str) -> Option<&'c Difficulty> {
		self.song.difficulty_by_label(characteristic, label)
	}
}

impl Deref for SongView<'_> {
	type Target = Song;

	fn deref(&self) -> &Song {
		self.song
	}
}

impl std::fmt::Debug for SongView<'_> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_tuple("SongView").field(&self.song.hash).finish()
	}
}

/// Outer level of the difficulty index: characteristics present on a song.
///
/// Holds at most one entry per [`Characteristic`], in first-seen order.
#[derive(Clone, Copy)]
pub struct CharacteristicMap<'c> {
	song: &'c Song,
}

impl<'c> KeyedMap for CharacteristicMap<'c> {
	type Key = Characteristic;
	type KeyView = Characteristic;
	type Value = DifficultyMap<'c>;

	fn len(&self) -> usize {
		self.song.characteristics.len()
	}

	#[track_caller]
	fn key_at(&self, index: usize) -> Characteristic {
		expect_index(index, self.len(), "characteristic");
		self.song.characteristics[index].characteristic
	}

	#[track_caller]
	fn value_at(&self, index: usize) -> DifficultyMap<'c> {
		expect_index(index, self.len(), "characteristic");
		DifficultyMap {
			song: self.song,
			slot: &self.song.characteristics[index],
		}
	}

	fn get(&self, key: &Characteristic) -> Option<DifficultyMap<'c>> {
		self.song.slot(*key).map(|slot| DifficultyMap { song: self.song, slot })
	}
}

/// Inner level of the difficulty index: label → difficulty for one
/// characteristic.
///
/// Labels are compared as exact strings; no case folding or validation.
#[derive(Clone, Copy)]
pub struct DifficultyMap<'c> {
	song: &'c Song,
	slot: &'c CharacteristicSlot,
}

impl<'c> DifficultyMap<'c> {
	/// The characteristic this map is scoped to.
	pub fn characteristic(&self) -> Characteristic {
		self.slot.characteristic
	}

	fn record(&self, member: u16) -> &'c Difficulty {
		&self.song.difficulties[usize::from(member)]
	}
}

impl<'c> KeyedMap for DifficultyMap<'c> {
	type Key = str;
	type KeyView = &'c str;
	type Value = &'c Difficulty;

	fn len(&self) -> usize {
		self.slot.members.len()
	}

	#[track_caller]
	fn key_at(&self, index: usize) -> &'c str {
		self.value_at(index).label.as_str()
	}

	#[track_caller]
	fn value_at(&self, index: usize) -> &'c Difficulty {
		expect_index(index, self.len(), "difficulty label");
		self.record(self.slot.members[index])
	}

	fn get(&self, label: &str) -> Option<&'c Difficulty> {
		self.slot
			.members
			.iter()
			.map(|&member| self.record(member))
			.find(|diff| diff.label == *label)
	}
}
