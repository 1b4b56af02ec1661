//! Catalog accessors: song hash to song.
//!
//! Positions run from `0` to `songdata_catalog_len() - 1` and are stable for
//! the life of the catalog. An index at or past the length aborts the process.

use std::ptr;

use songdata_core::KeyedMap;

use crate::types::{Handle, SdCatalog, SdSong, SdStr, arg_str, check_index};

/// Number of songs; `0` for a null handle.
///
/// # Safety
/// `catalog` must be null or a live catalog handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_len(catalog: *const SdCatalog) -> usize {
	(unsafe { SdCatalog::resolve(catalog) }).map_or(0, |c| c.len())
}

/// Hash of the song at `index`.
///
/// # Safety
/// `catalog` must be null or a live catalog handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_key_at(catalog: *const SdCatalog, index: usize) -> SdStr {
	let Some(catalog) = (unsafe { SdCatalog::resolve(catalog) }) else {
		return SdStr::ABSENT;
	};
	check_index(index, catalog.len(), "song");
	SdStr::borrowed(catalog.songs().key_at(index))
}

/// Song at `index`.
///
/// # Safety
/// `catalog` must be null or a live catalog handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_value_at(catalog: *const SdCatalog, index: usize) -> *const SdSong {
	let Some(catalog) = (unsafe { SdCatalog::resolve(catalog) }) else {
		return ptr::null();
	};
	check_index(index, catalog.len(), "song");
	SdSong::from_ref(catalog.songs().value_at(index).record())
}

/// Song whose hash equals `hash` byte for byte, or null.
///
/// # Safety
/// `catalog` must be null or a live catalog handle; `hash` must reference
/// `len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_get(catalog: *const SdCatalog, hash: SdStr) -> *const SdSong {
	let Some(catalog) = (unsafe { SdCatalog::resolve(catalog) }) else {
		return ptr::null();
	};
	let Some(hash) = (unsafe { arg_str(hash, "hash") }) else {
		return ptr::null();
	};
	catalog
		.resolve_song(hash)
		.map_or(ptr::null(), |song| SdSong::from_ref(song.record()))
}

/// Rating of `song` under the catalog's rating model.
///
/// Returns `0.0` for null handles.
///
/// # Safety
/// Both handles must be null or live, and `song` must come from `catalog`.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_song_rating(catalog: *const SdCatalog, song: *const SdSong) -> f32 {
	match unsafe { (SdCatalog::resolve(catalog), SdSong::resolve(song)) } {
		(Some(catalog), Some(song)) => catalog.view(song).rating(),
		_ => 0.0,
	}
}
