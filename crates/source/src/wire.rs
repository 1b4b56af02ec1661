//! Dataset wire format.
//!
//! The published file is one JSON array of songs with PascalCase keys. Every
//! generation shares the same top-level shape; later generations only add
//! keys, so a single permissive record type decodes all of them and the
//! generation is inferred from which keys were present.

use serde::Deserialize;
use songdata_core::{
	Characteristic, DifficultyDraft, SchemaGeneration, SongDraft, SongScore, Timestamp,
};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireSong {
	pub hash: String,
	pub key: String,
	pub bpm: f32,
	pub upvotes: u32,
	pub downvotes: u32,
	pub uploaded: Option<String>,
	pub diffs: Vec<WireDifficulty>,

	// V1
	pub played_count: Option<u32>,

	// V2
	pub song_name: Option<String>,
	pub song_sub_name: Option<String>,
	pub song_author_name: Option<String>,
	pub level_author_name: Option<String>,
	pub downloads: Option<u32>,
	#[serde(alias = "Duration")]
	pub duration_secs: Option<u32>,

	// V3
	pub uploaded_epoch: Option<i64>,
	pub heat: Option<f32>,
	pub rating: Option<f32>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "PascalCase", default)]
pub(crate) struct WireDifficulty {
	pub diff: String,
	#[serde(rename = "Char")]
	pub characteristic: String,
	pub stars: f64,
	pub ranked: bool,
	pub njs: f32,
	pub bombs: u32,
	pub notes: u32,
	pub obstacles: u32,

	// V1
	pub scores: Option<i64>,

	// V2
	#[serde(alias = "Pp")]
	pub approximate_pp_value: Option<f32>,
	pub njs_offset: Option<f32>,
	pub requirements: Option<Vec<String>>,

	// V3
	pub ranked_update_time: Option<String>,
	pub ranked_update_epoch: Option<i64>,
}

impl WireDifficulty {
	fn generation(&self) -> SchemaGeneration {
		if self.ranked_update_time.is_some() || self.ranked_update_epoch.is_some() {
			SchemaGeneration::V3
		} else if self.approximate_pp_value.is_some()
			|| self.njs_offset.is_some()
			|| self.requirements.is_some()
		{
			SchemaGeneration::V2
		} else {
			SchemaGeneration::V1
		}
	}

	fn into_draft(self) -> DifficultyDraft {
		let ranked_update = timestamp(self.ranked_update_time, self.ranked_update_epoch);
		DifficultyDraft {
			label: self.diff,
			characteristic: Characteristic::parse_lenient(&self.characteristic),
			stars: self.stars as f32,
			ranked: self.ranked,
			notes: self.notes,
			obstacles: self.obstacles,
			bombs: self.bombs,
			njs: self.njs,
			njs_offset: self.njs_offset,
			pp: self.approximate_pp_value,
			scores: self.scores,
			requirements: self.requirements.unwrap_or_default(),
			ranked_update,
		}
	}
}

impl WireSong {
	/// Infers the generation from the richest key present on the song or any
	/// of its difficulties.
	pub fn generation(&self) -> SchemaGeneration {
		let song = if self.uploaded_epoch.is_some() || self.heat.is_some() || self.rating.is_some() {
			SchemaGeneration::V3
		} else if self.song_name.is_some()
			|| self.song_sub_name.is_some()
			|| self.song_author_name.is_some()
			|| self.level_author_name.is_some()
			|| self.downloads.is_some()
			|| self.duration_secs.is_some()
		{
			SchemaGeneration::V2
		} else {
			SchemaGeneration::V1
		};
		self.diffs
			.iter()
			.map(WireDifficulty::generation)
			.fold(song, SchemaGeneration::max)
	}

	pub fn into_draft(self) -> SongDraft {
		let generation = self.generation();
		let score = match (self.heat, self.rating) {
			(None, None) => None,
			(heat, rating) => Some(SongScore {
				heat: heat.unwrap_or_default(),
				rating: rating.unwrap_or_default(),
			}),
		};
		SongDraft {
			hash: self.hash,
			key: self.key,
			generation,
			name: self.song_name,
			sub_name: self.song_sub_name,
			author: self.song_author_name,
			mapper: self.level_author_name,
			bpm: self.bpm,
			duration_secs: self.duration_secs,
			uploaded: timestamp(self.uploaded, self.uploaded_epoch),
			upvotes: self.upvotes,
			downvotes: self.downvotes,
			downloads: self.downloads,
			plays: self.played_count,
			score,
			difficulties: self.diffs.into_iter().map(WireDifficulty::into_draft).collect(),
		}
	}
}

fn timestamp(text: Option<String>, unix: Option<i64>) -> Option<Timestamp> {
	match (text, unix) {
		(Some(text), Some(unix)) => Some(Timestamp::new(text, Some(unix))),
		(Some(text), None) => Some(Timestamp::from_text(text)),
		(None, Some(unix)) => Some(Timestamp::from_unix(unix)),
		(None, None) => None,
	}
}

/// Decodes the dataset into song drafts.
pub(crate) fn decode_drafts(bytes: &[u8]) -> serde_json::Result<Vec<SongDraft>> {
	let songs: Vec<WireSong> = serde_json::from_slice(bytes)?;
	Ok(songs.into_iter().map(WireSong::into_draft).collect())
}
