//! The process-wide catalog.
//!
//! Fetched on first use and kept for the life of the process. Concurrent first
//! callers share one fetch; a failed fetch leaves the store empty so a later
//! call tries again.

use std::path::Path;

use songdata_core::{Catalog, SongView};
use tokio::sync::OnceCell;

use crate::config::SourceConfig;
use crate::error::FetchResult;
use crate::fetch;

static SHARED: OnceCell<Catalog> = OnceCell::const_new();

/// The shared catalog, if it has been populated.
pub fn get() -> Option<&'static Catalog> {
	SHARED.get()
}

/// Returns the shared catalog, fetching it with `config` on first use.
pub async fn retrieve(config: &SourceConfig) -> FetchResult<&'static Catalog> {
	SHARED
		.get_or_try_init(|| async {
			tracing::info!(url = %config.url, "source.shared.fetch");
			fetch::fetch_catalog(config).await
		})
		.await
}

/// Returns the shared catalog, loading it from `path` on first use.
///
/// Once the store is populated, by this or by [`retrieve`], `path` is not
/// read and the existing catalog is returned.
pub async fn retrieve_local(path: &Path, config: &SourceConfig) -> FetchResult<&'static Catalog> {
	if let Some(catalog) = SHARED.get() {
		tracing::debug!(path = %path.display(), "source.shared.load_skipped");
		return Ok(catalog);
	}
	SHARED
		.get_or_try_init(|| async {
			tracing::info!(path = %path.display(), "source.shared.load");
			fetch::load_catalog_file(path, config).await
		})
		.await
}

/// Resolves a song in the shared catalog, fetching it on first use.
pub async fn get_song(config: &SourceConfig, hash: &str) -> FetchResult<Option<SongView<'static>>> {
	Ok(retrieve(config).await?.resolve_song(hash))
}
