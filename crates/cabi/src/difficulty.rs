//! Difficulty accessors.

use songdata_core::{Difficulty, IndexedSeq};

use crate::song::write_optional;
use crate::types::{Handle, SdCharacteristic, SdDifficulty, SdStr, check_index};

unsafe fn resolve_difficulty<'a>(difficulty: *const SdDifficulty) -> Option<&'a Difficulty> {
	unsafe { SdDifficulty::resolve(difficulty) }
}

/// Difficulty label, conventionally `Easy` through `ExpertPlus`.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_label(difficulty: *const SdDifficulty) -> SdStr {
	(unsafe { resolve_difficulty(difficulty) }).map_or(SdStr::ABSENT, |d| SdStr::borrowed(d.label()))
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_characteristic(difficulty: *const SdDifficulty) -> SdCharacteristic {
	(unsafe { resolve_difficulty(difficulty) }).map_or(SdCharacteristic::Unknown, |d| d.characteristic().into())
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_stars(difficulty: *const SdDifficulty) -> f32 {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0.0, Difficulty::stars)
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_ranked(difficulty: *const SdDifficulty) -> bool {
	(unsafe { resolve_difficulty(difficulty) }).is_some_and(Difficulty::ranked)
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_notes(difficulty: *const SdDifficulty) -> u32 {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0, Difficulty::notes)
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_obstacles(difficulty: *const SdDifficulty) -> u32 {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0, Difficulty::obstacles)
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_bombs(difficulty: *const SdDifficulty) -> u32 {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0, Difficulty::bombs)
}

/// Note jump speed.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_njs(difficulty: *const SdDifficulty) -> f32 {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0.0, Difficulty::njs)
}

/// # Safety
/// `difficulty` must be null or a live difficulty handle; `out` must be null
/// or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_njs_offset(difficulty: *const SdDifficulty, out: *mut f32) -> bool {
	let value = unsafe { resolve_difficulty(difficulty) }.and_then(Difficulty::njs_offset);
	unsafe { write_optional(out, value) }
}

/// Approximate performance-point value.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle; `out` must be null
/// or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_pp(difficulty: *const SdDifficulty, out: *mut f32) -> bool {
	let value = unsafe { resolve_difficulty(difficulty) }.and_then(Difficulty::pp);
	unsafe { write_optional(out, value) }
}

/// Leaderboard score count.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle; `out` must be null
/// or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_scores(difficulty: *const SdDifficulty, out: *mut i64) -> bool {
	let value = unsafe { resolve_difficulty(difficulty) }.and_then(Difficulty::scores);
	unsafe { write_optional(out, value) }
}

/// When the ranked status last changed, as published.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_ranked_update(difficulty: *const SdDifficulty) -> SdStr {
	let text = unsafe { resolve_difficulty(difficulty) }
		.and_then(Difficulty::ranked_update)
		.map(|t| t.text().as_str());
	SdStr::optional(text)
}

/// When the ranked status last changed, as seconds since the unix epoch.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle; `out` must be null
/// or writable.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_ranked_update_unix(difficulty: *const SdDifficulty, out: *mut i64) -> bool {
	let value = unsafe { resolve_difficulty(difficulty) }
		.and_then(Difficulty::ranked_update)
		.and_then(|t| t.unix());
	unsafe { write_optional(out, value) }
}

/// Number of mod tags the map requires.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_requirements_len(difficulty: *const SdDifficulty) -> usize {
	(unsafe { resolve_difficulty(difficulty) }).map_or(0, |d| d.requirements().len())
}

/// Required mod tag at `index`.
///
/// # Safety
/// `difficulty` must be null or a live difficulty handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_difficulty_requirement_at(difficulty: *const SdDifficulty, index: usize) -> SdStr {
	let Some(difficulty) = (unsafe { resolve_difficulty(difficulty) }) else {
		return SdStr::ABSENT;
	};
	let requirements = difficulty.requirements();
	check_index(index, requirements.len(), "requirement");
	SdStr::borrowed(requirements.at(index))
}
