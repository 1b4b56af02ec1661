//! The catalog: song hash → song record.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::access::{KeyedMap, expect_index};
use crate::rating::RatingModel;
use crate::schema::Song;
use crate::text::Text;
use crate::view::SongView;

/// Immutable store of songs keyed by content hash.
///
/// The catalog owns every record beneath it. Views borrow from it and cannot
/// outlive it. Nothing is mutated after [`CatalogBuilder::build`] returns, so
/// a catalog can be shared across threads and read without locking.
///
/// [`CatalogBuilder::build`]: crate::CatalogBuilder::build
pub struct Catalog {
	pub(crate) songs: Box<[Song]>,
	pub(crate) by_hash: FxHashMap<Text, u32>,
	pub(crate) rating: Arc<dyn RatingModel>,
}

impl Catalog {
	/// Number of songs.
	#[inline]
	pub fn len(&self) -> usize {
		self.songs.len()
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.songs.is_empty()
	}

	/// Resolves a song by exact hash content. Unknown hashes yield `None`.
	pub fn resolve_song(&self, hash: &str) -> Option<SongView<'_>> {
		let &index = self.by_hash.get(hash)?;
		Some(SongView::new(self, &self.songs[index as usize]))
	}

	/// The song map as a [`KeyedMap`].
	pub fn songs(&self) -> SongMap<'_> {
		SongMap { catalog: self }
	}

	/// Binds a record of this catalog to it.
	///
	/// Used by callers that hold a bare [`Song`] reference (e.g. across the C
	/// boundary) and need catalog context such as the rating model.
	pub fn view<'c>(&'c self, song: &'c Song) -> SongView<'c> {
		debug_assert!(
			self.songs.as_ptr_range().contains(&(song as *const Song)),
			"song does not belong to this catalog"
		);
		SongView::new(self, song)
	}

	/// The model used for on-demand ratings.
	pub fn rating_model(&self) -> &dyn RatingModel {
		&*self.rating
	}
}

impl std::fmt::Debug for Catalog {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Catalog")
			.field("songs", &self.songs.len())
			.field("rating", &self.rating.name())
			.finish()
	}
}

/// Song map of a catalog, addressed by hash or by position.
#[derive(Clone, Copy)]
pub struct SongMap<'c> {
	catalog: &'c Catalog,
}

impl<'c> KeyedMap for SongMap<'c> {
	type Key = str;
	type KeyView = &'c str;
	type Value = SongView<'c>;

	fn len(&self) -> usize {
		self.catalog.len()
	}

	#[track_caller]
	fn key_at(&self, index: usize) -> &'c str {
		self.value_at(index).record().hash.as_str()
	}

	#[track_caller]
	fn value_at(&self, index: usize) -> SongView<'c> {
		expect_index(index, self.catalog.len(), "song");
		SongView::new(self.catalog, &self.catalog.songs[index])
	}

	fn get(&self, hash: &str) -> Option<SongView<'c>> {
		self.catalog.resolve_song(hash)
	}
}
