//! Integration tests for the public catalog surface.
//!
//! These tests walk a catalog the way a consumer does: resolve a song by hash,
//! then read its difficulties through the flat sequence and through the
//! characteristic index.

use std::sync::Arc;

use songdata_core::{
	CatalogBuilder, Characteristic, DifficultyDraft, IndexedSeq, KeyedMap, RatingMode, RatingModel,
	SongDraft, SongView,
};

fn catalog() -> songdata_core::Catalog {
	CatalogBuilder::new()
		.push(
			SongDraft::new("AA")
				.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 4.2))
				.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Expert", 6.0))
				.with_difficulty(DifficultyDraft::new(Characteristic::OneSaber, "Expert", 5.5)),
		)
		.push(SongDraft::new("BB"))
		.build()
		.expect("catalog builds")
}

#[test]
fn test_linear_and_characteristic_reports_agree() {
	let catalog = catalog();
	let song = catalog.resolve_song("AA").expect("AA should resolve");

	let linear: Vec<(Characteristic, String, f32)> = song
		.difficulties()
		.iter()
		.map(|d| (d.characteristic(), d.label().to_string(), d.stars()))
		.collect();

	let mut nested = Vec::new();
	for (characteristic, labels) in song.characteristics().entries() {
		for (label, diff) in labels.entries() {
			nested.push((characteristic, label.to_string(), diff.stars()));
		}
	}

	assert_eq!(linear, nested, "both paths should list the same difficulties");
	assert_eq!(
		song.characteristics().keys().collect::<Vec<_>>(),
		vec![Characteristic::Standard, Characteristic::OneSaber]
	);
}

#[test]
fn test_song_without_difficulties() {
	let catalog = catalog();
	let song = catalog.resolve_song("BB").expect("BB should resolve");
	assert!(song.difficulties().is_empty());
	assert!(song.characteristics().is_empty());
	for ch in Characteristic::ALL {
		assert_eq!(song.difficulties_len(ch), 0, "{ch} should be empty");
		assert!(song.difficulty_by_label(ch, "Hard").is_none());
	}
}

#[test]
fn test_positional_enumeration_discovers_every_key() {
	let catalog = catalog();
	let songs = catalog.songs();
	let keys: Vec<&str> = (0..songs.len()).map(|i| songs.key_at(i)).collect();
	assert_eq!(keys, vec!["AA", "BB"]);
	for key in keys {
		assert!(songs.contains_key(key));
	}
	assert!(!songs.contains_key("CC"));
}

struct DifficultyCount;

impl RatingModel for DifficultyCount {
	fn name(&self) -> &'static str {
		"difficulty-count"
	}

	fn rate(&self, song: SongView<'_>) -> f32 {
		song.difficulties().len() as f32
	}
}

#[test]
fn test_custom_rating_model() {
	let catalog = CatalogBuilder::new()
		.rating(Arc::new(DifficultyCount), RatingMode::OnDemand)
		.push(
			SongDraft::new("AA")
				.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 4.2))
				.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Expert", 6.0)),
		)
		.build()
		.expect("catalog builds");
	assert_eq!(catalog.rating_model().name(), "difficulty-count");
	assert_eq!(catalog.resolve_song("AA").map(|s| s.rating()), Some(2.0));
}
