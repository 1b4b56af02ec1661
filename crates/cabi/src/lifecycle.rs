//! Producing and releasing catalog handles.
//!
//! Ownership:
//! - handles written by [`songdata_catalog_fetch`], [`songdata_catalog_load_local`]
//!   and [`songdata_pending_wait`] belong to the caller and are released with
//!   [`songdata_catalog_free`]
//! - the handle written by [`songdata_shared_catalog`] belongs to the library
//!   and lives until the process exits; it must not be freed
//! - song and difficulty handles borrow from their catalog and are never freed

use std::path::Path;
use std::ptr;

use songdata_core::Catalog;
use songdata_source::{FetchError, FetchResult, PendingCatalog, SourceConfig, shared};

use crate::types::{Handle, SdCatalog, SdSong, SdStatus, SdStr, arg_str};

/// A catalog being built in the background.
pub struct SdPending {
	_private: [u8; 0],
}

/// Hands ownership of `catalog` to a foreign caller.
///
/// The result must eventually be passed to [`songdata_catalog_free`].
pub fn into_handle(catalog: Catalog) -> *mut SdCatalog {
	Box::into_raw(Box::new(catalog)).cast()
}

fn config() -> FetchResult<SourceConfig> {
	SourceConfig::default().with_env()
}

fn report(op: &'static str, err: &FetchError) -> SdStatus {
	tracing::error!(op, error = %err, "abi.lifecycle_failed");
	SdStatus::from(err)
}

/// The shared catalog, reading the configuration only when it still has to
/// be fetched.
fn shared_or_fetch() -> FetchResult<&'static Catalog> {
	match shared::get() {
		Some(catalog) => Ok(catalog),
		None => config().and_then(|config| songdata_source::retrieve_blocking(&config)),
	}
}

/// # Safety
/// `out` must be null or valid for a pointer write.
unsafe fn write_owned(op: &'static str, out: *mut *mut SdCatalog, result: FetchResult<Catalog>) -> SdStatus {
	match result {
		Ok(catalog) => {
			unsafe { *out = into_handle(catalog) };
			SdStatus::Ok
		}
		Err(err) => report(op, &err),
	}
}

/// Downloads the dataset and builds a new catalog owned by the caller.
///
/// The source URL and timeout come from `SONGDATA_URL` and
/// `SONGDATA_TIMEOUT_SECS` when set.
///
/// # Safety
/// `out` must be valid for a pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_fetch(out: *mut *mut SdCatalog) -> SdStatus {
	if out.is_null() {
		return SdStatus::InvalidArgument;
	}
	let result = config().and_then(|config| songdata_source::fetch_blocking(&config));
	unsafe { write_owned("fetch", out, result) }
}

/// Builds a new catalog owned by the caller from a dataset file.
///
/// # Safety
/// `path` must reference `len` readable bytes; `out` must be valid for a
/// pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_load_local(path: SdStr, out: *mut *mut SdCatalog) -> SdStatus {
	if out.is_null() {
		return SdStatus::InvalidArgument;
	}
	let Some(path) = (unsafe { arg_str(path, "path") }) else {
		return SdStatus::InvalidArgument;
	};
	let result = config().and_then(|config| songdata_source::retrieve_local_blocking(Path::new(path), &config));
	unsafe { write_owned("load_local", out, result) }
}

/// Starts fetching a catalog in the background.
///
/// Returns null only if the configuration is invalid. The pending handle is
/// released by [`songdata_pending_wait`] or [`songdata_pending_free`].
#[unsafe(no_mangle)]
pub extern "C" fn songdata_catalog_fetch_async() -> *mut SdPending {
	match config() {
		Ok(config) => Box::into_raw(Box::new(songdata_source::spawn_fetch(config))).cast(),
		Err(err) => {
			report("fetch_async", &err);
			ptr::null_mut()
		}
	}
}

/// Whether [`songdata_pending_wait`] would return without blocking.
///
/// # Safety
/// `pending` must be null or a live pending handle.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_pending_is_finished(pending: *const SdPending) -> bool {
	let pending = unsafe { pending.cast::<PendingCatalog>().as_ref() };
	pending.is_some_and(PendingCatalog::is_finished)
}

/// Blocks until the background build finishes and releases `pending`.
///
/// On success `*out` receives a catalog owned by the caller.
///
/// # Safety
/// `pending` must be a live pending handle, not used again afterwards; `out`
/// must be valid for a pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_pending_wait(pending: *mut SdPending, out: *mut *mut SdCatalog) -> SdStatus {
	if pending.is_null() || out.is_null() {
		return SdStatus::InvalidArgument;
	}
	let pending = unsafe { Box::from_raw(pending.cast::<PendingCatalog>()) };
	unsafe { write_owned("pending_wait", out, pending.wait()) }
}

/// Releases `pending` without waiting; the build finishes in the background
/// and its result is discarded.
///
/// # Safety
/// `pending` must be null or a live pending handle, not used again afterwards.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_pending_free(pending: *mut SdPending) {
	if pending.is_null() {
		return;
	}
	drop(unsafe { Box::from_raw(pending.cast::<PendingCatalog>()) });
}

/// Returns the process-wide catalog, fetching it on first use.
///
/// The handle is owned by the library.
///
/// # Safety
/// `out` must be valid for a pointer write.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_shared_catalog(out: *mut *const SdCatalog) -> SdStatus {
	if out.is_null() {
		return SdStatus::InvalidArgument;
	}
	match shared_or_fetch() {
		Ok(catalog) => {
			unsafe { *out = SdCatalog::from_ref(catalog) };
			SdStatus::Ok
		}
		Err(err) => report("shared_catalog", &err),
	}
}

/// Resolves `hash` in the process-wide catalog, fetching it on first use.
///
/// Returns null when the song is absent or the catalog cannot be produced.
///
/// # Safety
/// `hash` must reference `len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_get_song(hash: SdStr) -> *const SdSong {
	let Some(hash) = (unsafe { arg_str(hash, "hash") }) else {
		return ptr::null();
	};
	match shared_or_fetch() {
		Ok(catalog) => catalog
			.resolve_song(hash)
			.map_or(ptr::null(), |song| SdSong::from_ref(song.record())),
		Err(err) => {
			report("get_song", &err);
			ptr::null()
		}
	}
}

/// Writes the dataset to `path`.
///
/// # Safety
/// `path` must reference `len` readable bytes.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_download_to_file(path: SdStr) -> bool {
	let Some(path) = (unsafe { arg_str(path, "path") }) else {
		return false;
	};
	match config().and_then(|config| songdata_source::download_blocking(&config, Path::new(path))) {
		Ok(_) => true,
		Err(err) => {
			report("download_to_file", &err);
			false
		}
	}
}

/// Releases a caller owned catalog and everything borrowed from it.
///
/// Passing the shared catalog is ignored.
///
/// # Safety
/// `catalog` must be null or a caller owned handle not already freed.
#[unsafe(no_mangle)]
pub unsafe extern "C" fn songdata_catalog_free(catalog: *mut SdCatalog) {
	if catalog.is_null() {
		return;
	}
	if shared::get().is_some_and(|shared| ptr::eq(SdCatalog::from_ref(shared), catalog)) {
		tracing::error!("abi.free_shared_catalog");
		return;
	}
	drop(unsafe { Box::from_raw(catalog.cast::<Catalog>()) });
}
