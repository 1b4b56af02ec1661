//! The process-wide catalog. Kept in its own test binary so no other test
//! populates the store first.

use pretty_assertions::assert_eq;
use songdata_source::{SourceConfig, shared};

const DATASET: &str = r#"[
	{ "Hash": "AA", "Key": "1", "Diffs": [ { "Diff": "Hard", "Char": "Standard", "Stars": 4.2 } ] },
	{ "Hash": "BB", "Key": "2", "Diffs": [] }
]"#;

#[tokio::test]
async fn first_load_populates_and_later_paths_are_ignored() {
	let dir = tempfile::tempdir().unwrap();
	let path = dir.path().join("songs.json");
	std::fs::write(&path, DATASET).unwrap();
	let config = SourceConfig::default();

	assert!(shared::get().is_none());
	let first = shared::retrieve_local(&path, &config).await.unwrap();
	assert_eq!(first.len(), 2);
	assert!(shared::get().is_some_and(|c| std::ptr::eq(c, first)));

	let missing = dir.path().join("absent.json");
	let again = shared::retrieve_local(&missing, &config).await.unwrap();
	assert!(std::ptr::eq(first, again));

	let song = shared::get_song(&config, "AA").await.unwrap();
	assert_eq!(song.map(|s| s.record().key().as_str()), Some("1"));
	assert!(shared::get_song(&config, "CC").await.unwrap().is_none());
}
