//! Background builds and blocking entry points.
//!
//! Callers without an async runtime of their own (the C ABI, the CLI) go
//! through a lazily created process-wide runtime.

use std::future::Future;
use std::path::Path;
use std::pin::Pin;
use std::sync::OnceLock;
use std::task::{Context, Poll};

use songdata_core::Catalog;
use tokio::task::JoinHandle;

use crate::config::SourceConfig;
use crate::error::{FetchError, FetchResult};
use crate::{fetch, shared};

fn runtime() -> &'static tokio::runtime::Runtime {
	static GLOBAL_RT: OnceLock<tokio::runtime::Runtime> = OnceLock::new();
	GLOBAL_RT.get_or_init(|| {
		tokio::runtime::Builder::new_multi_thread()
			.enable_all()
			.worker_threads(2)
			.thread_name("songdata-global")
			.build()
			.expect("failed to build songdata global tokio runtime")
	})
}

fn runtime_handle() -> tokio::runtime::Handle {
	if let Ok(handle) = tokio::runtime::Handle::try_current() {
		return handle;
	}
	runtime().handle().clone()
}

/// Drives `fut` to completion on the global runtime.
///
/// # Panics
///
/// Panics when called from inside an async context.
pub fn block_on<F: Future>(fut: F) -> F::Output {
	runtime().block_on(fut)
}

/// A catalog being built in the background.
///
/// Resolves exactly once. Dropping it detaches the task; it is never
/// cancelled or retried.
#[derive(Debug)]
pub struct PendingCatalog {
	handle: JoinHandle<FetchResult<Catalog>>,
}

impl PendingCatalog {
	/// Whether the result is ready, so [`wait`](Self::wait) will not block.
	pub fn is_finished(&self) -> bool {
		self.handle.is_finished()
	}

	/// Blocks the calling thread until the build finishes.
	///
	/// # Panics
	///
	/// Panics when called from inside an async context; `.await` it there.
	pub fn wait(self) -> FetchResult<Catalog> {
		block_on(self)
	}
}

impl Future for PendingCatalog {
	type Output = FetchResult<Catalog>;

	fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
		Pin::new(&mut self.handle).poll(cx).map(|joined| {
			joined.unwrap_or_else(|e| Err(FetchError::TaskFailed(e.to_string())))
		})
	}
}

/// Starts fetching and building a catalog in the background.
pub fn spawn_fetch(config: SourceConfig) -> PendingCatalog {
	tracing::trace!(url = %config.url, "source.spawn_fetch");
	let handle = runtime_handle().spawn(async move { fetch::fetch_catalog(&config).await });
	PendingCatalog { handle }
}

/// Blocking [`fetch::fetch_catalog`].
pub fn fetch_blocking(config: &SourceConfig) -> FetchResult<Catalog> {
	block_on(fetch::fetch_catalog(config))
}

/// Blocking [`shared::retrieve`].
pub fn retrieve_blocking(config: &SourceConfig) -> FetchResult<&'static Catalog> {
	block_on(shared::retrieve(config))
}

/// Blocking [`fetch::load_catalog_file`].
pub fn retrieve_local_blocking(path: &Path, config: &SourceConfig) -> FetchResult<Catalog> {
	block_on(fetch::load_catalog_file(path, config))
}

/// Blocking [`fetch::download_to_file`].
pub fn download_blocking(config: &SourceConfig, path: &Path) -> FetchResult<u64> {
	block_on(fetch::download_to_file(config, path))
}
