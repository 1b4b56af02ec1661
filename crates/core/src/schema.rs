//! Catalog entity schema.
//!
//! The dataset has gone through several shapes. [`SchemaGeneration::V3`] is the
//! canonical one; records decoded from older generations carry the same types
//! with the fields their generation never had left as `None` (or empty).
//!
//! | field | V1 | V2 | V3 |
//! |---|---|---|---|
//! | difficulty `scores` | yes | - | - |
//! | difficulty `pp`, `njs_offset`, `requirements` | - | yes | yes |
//! | difficulty `ranked_update` | - | - | yes |
//! | song names, `downloads`, `duration_secs` | - | yes | yes |
//! | song `plays` | yes | - | - |
//! | song `score` (heat/rating), upload epoch | - | - | yes |

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::access::Seq;
use crate::characteristic::Characteristic;
use crate::text::Text;

/// Which dataset shape a record was decoded from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum SchemaGeneration {
	/// String keyed difficulties, `f64` stars, score counts.
	V1 = 1,
	/// Adds names, requirement tags, pp values, `f32` stars.
	V2 = 2,
	/// Adds timestamp pairs and the precomputed heat/rating pair.
	#[default]
	V3 = 3,
}

impl SchemaGeneration {
	/// Returns the numeric generation.
	#[inline]
	pub fn as_u8(self) -> u8 {
		self as u8
	}
}

/// A point in time carried as both the dataset's text and a unix epoch.
///
/// The epoch is `None` when the text could not be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Timestamp {
	text: Text,
	unix: Option<i64>,
}

impl Timestamp {
	/// Creates a timestamp from both forms.
	pub fn new(text: impl Into<Text>, unix: Option<i64>) -> Self {
		Self {
			text: text.into(),
			unix,
		}
	}

	/// Creates a timestamp from RFC 3339 text, deriving the epoch.
	pub fn from_text(text: impl Into<Text>) -> Self {
		let text = text.into();
		let unix = DateTime::parse_from_rfc3339(&text).ok().map(|dt| dt.timestamp());
		Self { text, unix }
	}

	/// Creates a timestamp from an epoch, rendering the text as RFC 3339.
	pub fn from_unix(unix: i64) -> Self {
		let text = DateTime::<Utc>::from_timestamp(unix, 0)
			.map(|dt| dt.to_rfc3339())
			.unwrap_or_default();
		Self {
			text: text.into(),
			unix: Some(unix),
		}
	}

	/// The human readable form, as published.
	pub fn text(&self) -> &Text {
		&self.text
	}

	/// Seconds since the unix epoch.
	pub fn unix(&self) -> Option<i64> {
		self.unix
	}

	/// The epoch as a UTC date time.
	pub fn datetime(&self) -> Option<DateTime<Utc>> {
		self.unix.and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0))
	}
}

/// Precomputed popularity pair published with V3 records.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[repr(C)]
pub struct SongScore {
	pub heat: f32,
	pub rating: f32,
}

/// Statistics of one named difficulty under one characteristic.
#[derive(Debug, Clone, PartialEq)]
pub struct Difficulty {
	pub(crate) label: Text,
	pub(crate) characteristic: Characteristic,
	pub(crate) stars: f32,
	pub(crate) ranked: bool,
	pub(crate) notes: u32,
	pub(crate) obstacles: u32,
	pub(crate) bombs: u32,
	pub(crate) njs: f32,
	pub(crate) njs_offset: Option<f32>,
	pub(crate) pp: Option<f32>,
	pub(crate) scores: Option<i64>,
	pub(crate) requirements: Box<[Text]>,
	pub(crate) ranked_update: Option<Timestamp>,
}

impl Difficulty {
	/// Difficulty label, conventionally `Easy` through `ExpertPlus`.
	pub fn label(&self) -> &Text {
		&self.label
	}

	/// The characteristic this difficulty belongs to.
	pub fn characteristic(&self) -> Characteristic {
		self.characteristic
	}

	pub fn stars(&self) -> f32 {
		self.stars
	}

	pub fn ranked(&self) -> bool {
		self.ranked
	}

	pub fn notes(&self) -> u32 {
		self.notes
	}

	pub fn obstacles(&self) -> u32 {
		self.obstacles
	}

	pub fn bombs(&self) -> u32 {
		self.bombs
	}

	/// Note jump speed.
	pub fn njs(&self) -> f32 {
		self.njs
	}

	pub fn njs_offset(&self) -> Option<f32> {
		self.njs_offset
	}

	/// Approximate performance-point value of a full combo.
	pub fn pp(&self) -> Option<f32> {
		self.pp
	}

	/// Leaderboard score count (V1 only).
	pub fn scores(&self) -> Option<i64> {
		self.scores
	}

	/// Mod tags the map requires to be played.
	pub fn requirements(&self) -> Seq<'_, Text> {
		Seq::new(&self.requirements)
	}

	/// When the ranked status last changed.
	pub fn ranked_update(&self) -> Option<&Timestamp> {
		self.ranked_update.as_ref()
	}
}

/// Secondary index entry: one characteristic and the positions, within the
/// song's difficulty list, of the difficulties under it.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct CharacteristicSlot {
	pub(crate) characteristic: Characteristic,
	pub(crate) members: SmallVec<[u16; 5]>,
}

/// One song and its difficulties.
///
/// The difficulty list is the only storage for difficulty records. The
/// characteristic/label map is an index into that list built once at
/// construction, so both paths always see the same records.
#[derive(Debug, Clone, PartialEq)]
pub struct Song {
	pub(crate) hash: Text,
	pub(crate) key: Text,
	pub(crate) generation: SchemaGeneration,
	pub(crate) name: Option<Text>,
	pub(crate) sub_name: Option<Text>,
	pub(crate) author: Option<Text>,
	pub(crate) mapper: Option<Text>,
	pub(crate) bpm: f32,
	pub(crate) duration_secs: Option<u32>,
	pub(crate) uploaded: Option<Timestamp>,
	pub(crate) upvotes: u32,
	pub(crate) downvotes: u32,
	pub(crate) downloads: Option<u32>,
	pub(crate) plays: Option<u32>,
	pub(crate) score: Option<SongScore>,
	pub(crate) difficulties: Box<[Difficulty]>,
	pub(crate) characteristics: Box<[CharacteristicSlot]>,
	pub(crate) cached_rating: Option<f32>,
}

impl Song {
	/// Content hash; also the catalog key.
	pub fn hash(&self) -> &Text {
		&self.hash
	}

	/// Short publication key.
	pub fn key(&self) -> &Text {
		&self.key
	}

	pub fn generation(&self) -> SchemaGeneration {
		self.generation
	}

	pub fn name(&self) -> Option<&Text> {
		self.name.as_ref()
	}

	pub fn sub_name(&self) -> Option<&Text> {
		self.sub_name.as_ref()
	}

	/// Artist of the song.
	pub fn author(&self) -> Option<&Text> {
		self.author.as_ref()
	}

	/// Author of the beatmap.
	pub fn mapper(&self) -> Option<&Text> {
		self.mapper.as_ref()
	}

	pub fn bpm(&self) -> f32 {
		self.bpm
	}

	pub fn duration_secs(&self) -> Option<u32> {
		self.duration_secs
	}

	pub fn uploaded(&self) -> Option<&Timestamp> {
		self.uploaded.as_ref()
	}

	pub fn upvotes(&self) -> u32 {
		self.upvotes
	}

	pub fn downvotes(&self) -> u32 {
		self.downvotes
	}

	pub fn downloads(&self) -> Option<u32> {
		self.downloads
	}

	/// Play count (V1 only).
	pub fn plays(&self) -> Option<u32> {
		self.plays
	}

	/// Published heat/rating pair (V3 only).
	pub fn score(&self) -> Option<SongScore> {
		self.score
	}

	/// Rating cached at construction, if the catalog precomputed one.
	pub fn cached_rating(&self) -> Option<f32> {
		self.cached_rating
	}
}
