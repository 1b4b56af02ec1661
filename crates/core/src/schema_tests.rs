use std::sync::Arc;

use crate::{
	CatalogBuilder, Characteristic, DifficultyDraft, IndexedSeq, PeakStars, RatingMode,
	SchemaGeneration, SongDraft, SongScore, StoredRating, Timestamp, VoteRating,
};

#[test]
fn timestamp_from_text_derives_epoch() {
	let ts = Timestamp::from_text("2019-05-12T20:41:25.231Z");
	assert_eq!(ts.text(), "2019-05-12T20:41:25.231Z");
	assert_eq!(ts.unix(), Some(1_557_693_685));
	assert!(ts.datetime().is_some());
}

#[test]
fn timestamp_keeps_unparseable_text() {
	let ts = Timestamp::from_text("last tuesday");
	assert_eq!(ts.text(), "last tuesday");
	assert_eq!(ts.unix(), None);
	assert_eq!(ts.datetime(), None);
}

#[test]
fn timestamp_from_unix_renders_text() {
	let ts = Timestamp::from_unix(0);
	assert_eq!(ts.unix(), Some(0));
	assert!(ts.text().starts_with("1970-01-01T00:00:00"));
}

#[test]
fn generations_are_ordered() {
	assert!(SchemaGeneration::V1 < SchemaGeneration::V2);
	assert!(SchemaGeneration::V2 < SchemaGeneration::V3);
	assert_eq!(SchemaGeneration::default(), SchemaGeneration::V3);
	assert_eq!(SchemaGeneration::V2.as_u8(), 2);
}

#[test]
fn older_generation_leaves_fields_empty() {
	let draft = SongDraft {
		generation: SchemaGeneration::V1,
		plays: Some(12),
		..SongDraft::new("AA")
	}
	.with_difficulty(DifficultyDraft {
		scores: Some(340),
		..DifficultyDraft::new(Characteristic::Standard, "Expert", 7.25)
	});
	let catalog = CatalogBuilder::new().push(draft).build().unwrap();
	let song = catalog.resolve_song("AA").unwrap();

	assert_eq!(song.generation(), SchemaGeneration::V1);
	assert_eq!(song.name(), None);
	assert_eq!(song.downloads(), None);
	assert_eq!(song.plays(), Some(12));
	assert_eq!(song.score(), None);

	let diff = song.difficulties().at(0);
	assert_eq!(diff.scores(), Some(340));
	assert_eq!(diff.pp(), None);
	assert_eq!(diff.njs_offset(), None);
	assert!(diff.requirements().is_empty());
	assert!(diff.ranked_update().is_none());
}

#[test]
fn requirements_are_a_sequence() {
	let draft = SongDraft::new("AA").with_difficulty(DifficultyDraft {
		requirements: vec!["Noodle Extensions".into(), "Chroma".into()],
		..DifficultyDraft::new(Characteristic::Standard, "Expert", 7.0)
	});
	let catalog = CatalogBuilder::new().push(draft).build().unwrap();
	let song = catalog.resolve_song("AA").unwrap();
	let reqs = song.difficulties().at(0).requirements();

	assert_eq!(reqs.len(), 2);
	assert_eq!(reqs.at(0), "Noodle Extensions");
	assert_eq!(reqs.at(1), "Chroma");
}

#[test]
fn peak_stars_model() {
	let draft = SongDraft::new("AA")
		.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Hard", 4.5))
		.with_difficulty(DifficultyDraft::new(Characteristic::Standard, "Expert", 8.25))
		.with_difficulty(DifficultyDraft::new(Characteristic::OneSaber, "Expert", 6.0));
	let catalog = CatalogBuilder::new()
		.rating(Arc::new(PeakStars), RatingMode::OnDemand)
		.push(draft)
		.push(SongDraft::new("BB"))
		.build()
		.unwrap();

	assert_eq!(catalog.resolve_song("AA").unwrap().rating(), 8.25);
	assert_eq!(catalog.resolve_song("BB").unwrap().rating(), 0.0);
}

#[test]
fn stored_model_prefers_published_rating() {
	let published = SongDraft {
		score: Some(SongScore {
			heat: 12.0,
			rating: 0.91,
		}),
		upvotes: 1,
		downvotes: 1,
		..SongDraft::new("AA")
	};
	let older = SongDraft {
		generation: SchemaGeneration::V2,
		upvotes: 1,
		downvotes: 1,
		..SongDraft::new("BB")
	};
	let catalog = CatalogBuilder::new()
		.rating(Arc::new(StoredRating::with_fallback(VoteRating)), RatingMode::Precompute)
		.push(published)
		.push(older)
		.build()
		.unwrap();

	assert_eq!(catalog.resolve_song("AA").unwrap().rating(), 0.91);
	assert_eq!(catalog.resolve_song("BB").unwrap().rating(), VoteRating::score(1, 1));
	assert_eq!(catalog.rating_model().name(), "stored");
}
