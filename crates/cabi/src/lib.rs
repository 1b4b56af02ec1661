//! C ABI over the song catalog.
//!
//! Every collection is exposed as a length plus positional accessors, and maps
//! add a keyed `get`. Records are reached through opaque handles that borrow
//! from their catalog:
//!
//! ```c
//! SdCatalog *catalog = NULL;
//! if (songdata_catalog_fetch(&catalog) != SD_STATUS_OK) return;
//! const SdSong *song = songdata_catalog_get(catalog, hash);
//! for (size_t i = 0; i < songdata_song_difficulties_len(song); i++) {
//!     const SdDifficulty *diff = songdata_song_difficulty_at(song, i);
//!     printf("%f\n", songdata_difficulty_stars(diff));
//! }
//! songdata_catalog_free(catalog);
//! ```
//!
//! Null handles read as absent: lengths are `0`, lookups return null and
//! strings come back with a null `ptr`. An index at or past a length aborts
//! the process.

mod catalog;
mod difficulty;
mod lifecycle;
mod song;
mod types;

pub use catalog::*;
pub use difficulty::*;
pub use lifecycle::*;
pub use song::*;
pub use types::{SdCatalog, SdCharacteristic, SdDifficulty, SdScore, SdSong, SdStatus, SdStr};

/// Installs a stderr log subscriber filtered by `RUST_LOG`.
///
/// Calling it again, or after the host installed its own subscriber, does
/// nothing.
#[unsafe(no_mangle)]
pub extern "C" fn songdata_init_logging() {
	let _ = tracing_subscriber::fmt()
		.with_writer(std::io::stderr)
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.try_init();
}

/// Whether two strings hold the same bytes. Two absent strings are equal.
///
/// # Safety
/// Each string must be absent or reference `len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_str_eq(a: SdStr, b: SdStr) -> bool {
	if a.is_absent() || b.is_absent() {
		return a.is_absent() && b.is_absent();
	}
	let (a, b) = unsafe {
		(
			std::slice::from_raw_parts(a.ptr, a.len),
			std::slice::from_raw_parts(b.ptr, b.len),
		)
	};
	a == b
}
