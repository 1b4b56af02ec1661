//! Song accessors.
//!
//! A song's difficulties are reachable two ways, both backed by the same
//! records:
//! - the flat sequence: `songdata_song_difficulties_len` / `songdata_song_difficulty_at`
//! - the characteristic index: `songdata_song_characteristics_len` /
//!   `songdata_song_characteristic_key_at`, then per characteristic
//!   `songdata_song_difficulty_len` / `songdata_song_difficulty_key_at` /
//!   `songdata_song_difficulty_get`
//!
//! Fields that only some dataset generations carry are read through an out
//! pointer and report presence as the return value.

use std::ptr;

use songdata_core::{Characteristic, DifficultyMap, IndexedSeq, KeyedMap, Song};

use crate::types::{Handle, SdCharacteristic, SdDifficulty, SdScore, SdSong, SdStr, arg_str, check_index};

unsafe fn resolve_song<'a>(song: *const SdSong) -> Option<&'a Song> {
	unsafe { SdSong::resolve(song) }
}

/// Label map of one characteristic. Tags outside `SdCharacteristic` read as
/// absent.
unsafe fn resolve_labels<'a>(song: *const SdSong, tag: u8) -> Option<DifficultyMap<'a>> {
	let song = unsafe { resolve_song(song) }?;
	let Some(characteristic) = Characteristic::from_repr(tag) else {
		tracing::warn!(tag, "abi.unknown_characteristic_tag");
		return None;
	};
	song.characteristics().get(&characteristic)
}

/// # Safety
/// `out` must be null or valid for a write of `T`.
pub(crate) unsafe fn write_optional<T>(out: *mut T, value: Option<T>) -> bool {
	match value {
		Some(value) if !out.is_null() => {
			unsafe { *out = value };
			true
		}
		Some(_) => true,
		None => false,
	}
}

/// Content hash; also the catalog key.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_hash(song: *const SdSong) -> SdStr {
	(unsafe { resolve_song(song) }).map_or(SdStr::ABSENT, |s| SdStr::borrowed(s.hash()))
}

/// Short publication key.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_key(song: *const SdSong) -> SdStr {
	(unsafe { resolve_song(song) }).map_or(SdStr::ABSENT, |s| SdStr::borrowed(s.key()))
}

/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_name(song: *const SdSong) -> SdStr {
	SdStr::optional(unsafe { resolve_song(song) }.and_then(|s| s.name()).map(|t| t.as_str()))
}

/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_sub_name(song: *const SdSong) -> SdStr {
	SdStr::optional(unsafe { resolve_song(song) }.and_then(|s| s.sub_name()).map(|t| t.as_str()))
}

/// Artist of the song.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_author(song: *const SdSong) -> SdStr {
	SdStr::optional(unsafe { resolve_song(song) }.and_then(|s| s.author()).map(|t| t.as_str()))
}

/// Author of the beatmap.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_mapper(song: *const SdSong) -> SdStr {
	SdStr::optional(unsafe { resolve_song(song) }.and_then(|s| s.mapper()).map(|t| t.as_str()))
}

/// Upload time as published.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_uploaded(song: *const SdSong) -> SdStr {
	SdStr::optional(unsafe { resolve_song(song) }.and_then(|s| s.uploaded()).map(|t| t.text().as_str()))
}

/// Upload time as seconds since the unix epoch.
///
/// # Safety
/// `song` must be null or a live song handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_uploaded_unix(song: *const SdSong, out: *mut i64) -> bool {
	let value = unsafe { resolve_song(song) }.and_then(|s| s.uploaded()).and_then(|t| t.unix());
	unsafe { write_optional(out, value) }
}

/// Dataset generation the record was decoded from (`1`, `2` or `3`); `0`
/// for a null handle.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_generation(song: *const SdSong) -> u8 {
	(unsafe { resolve_song(song) }).map_or(0, |s| s.generation().as_u8())
}

/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_bpm(song: *const SdSong) -> f32 {
	(unsafe { resolve_song(song) }).map_or(0.0, Song::bpm)
}

/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_upvotes(song: *const SdSong) -> u32 {
	(unsafe { resolve_song(song) }).map_or(0, Song::upvotes)
}

/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_downvotes(song: *const SdSong) -> u32 {
	(unsafe { resolve_song(song) }).map_or(0, Song::downvotes)
}

/// # Safety
/// `song` must be null or a live song handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_downloads(song: *const SdSong, out: *mut u32) -> bool {
	let value = unsafe { resolve_song(song) }.and_then(Song::downloads);
	unsafe { write_optional(out, value) }
}

/// # Safety
/// `song` must be null or a live song handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_duration_secs(song: *const SdSong, out: *mut u32) -> bool {
	let value = unsafe { resolve_song(song) }.and_then(Song::duration_secs);
	unsafe { write_optional(out, value) }
}

/// # Safety
/// `song` must be null or a live song handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_plays(song: *const SdSong, out: *mut u32) -> bool {
	let value = unsafe { resolve_song(song) }.and_then(Song::plays);
	unsafe { write_optional(out, value) }
}

/// Published heat/rating pair.
///
/// # Safety
/// `song` must be null or a live song handle; `out` must be null or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_score(song: *const SdSong, out: *mut SdScore) -> bool {
	let value = unsafe { resolve_song(song) }.and_then(Song::score).map(SdScore::from);
	unsafe { write_optional(out, value) }
}

/// Length of the flat difficulty sequence.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_difficulties_len(song: *const SdSong) -> usize {
	(unsafe { resolve_song(song) }).map_or(0, |s| s.difficulties().len())
}

/// Difficulty at `index` of the flat sequence.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_difficulty_at(song: *const SdSong, index: usize) -> *const SdDifficulty {
	let Some(song) = (unsafe { resolve_song(song) }) else {
		return ptr::null();
	};
	let difficulties = song.difficulties();
	check_index(index, difficulties.len(), "difficulty");
	SdDifficulty::from_ref(difficulties.at(index))
}

/// Number of characteristics the song has difficulties under.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_characteristics_len(song: *const SdSong) -> usize {
	(unsafe { resolve_song(song) }).map_or(0, |s| s.characteristics().len())
}

/// Characteristic at `index` of the characteristic index.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_characteristic_key_at(song: *const SdSong, index: usize) -> SdCharacteristic {
	let Some(song) = (unsafe { resolve_song(song) }) else {
		return SdCharacteristic::Unknown;
	};
	let characteristics = song.characteristics();
	check_index(index, characteristics.len(), "characteristic");
	characteristics.key_at(index).into()
}

/// Number of difficulties under `characteristic`, an `SdCharacteristic`
/// tag; `0` when it has none or the tag is not a known variant.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_difficulty_len(song: *const SdSong, characteristic: u8) -> usize {
	(unsafe { resolve_labels(song, characteristic) }).map_or(0, |labels| labels.len())
}

/// Label of the difficulty at `index` under the `characteristic` tag.
///
/// # Safety
/// `song` must be null or a live song handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_difficulty_key_at(
	song: *const SdSong,
	characteristic: u8,
	index: usize,
) -> SdStr {
	if song.is_null() {
		return SdStr::ABSENT;
	}
	let labels = unsafe { resolve_labels(song, characteristic) };
	check_index(index, labels.map_or(0, |labels| labels.len()), "difficulty label");
	labels.map_or(SdStr::ABSENT, |labels| SdStr::borrowed(labels.key_at(index)))
}

/// Difficulty labelled exactly `label` under the `characteristic` tag, or
/// null.
///
/// # Safety
/// `song` must be null or a live song handle; `label` must reference `len`
/// readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_difficulty_get(
	song: *const SdSong,
	characteristic: u8,
	label: SdStr,
) -> *const SdDifficulty {
	let Some(labels) = (unsafe { resolve_labels(song, characteristic) }) else {
		return ptr::null();
	};
	let Some(label) = (unsafe { arg_str(label, "label") }) else {
		return ptr::null();
	};
	labels.get(label).map_or(ptr::null(), SdDifficulty::from_ref)
}
