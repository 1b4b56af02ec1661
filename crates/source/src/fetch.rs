//! Producing catalogs from the network or the filesystem.

use std::path::{Path, PathBuf};
use std::time::Instant;

use reqwest::{Client, Response};
use songdata_core::Catalog;
use tokio::io::AsyncWriteExt;
use tracing::{debug, info, warn};

use crate::config::SourceConfig;
use crate::error::{FetchError, FetchResult};
use crate::wire;

fn client(config: &SourceConfig) -> FetchResult<Client> {
	Client::builder()
		.user_agent(config.user_agent.as_str())
		.timeout(config.timeout())
		.build()
		.map_err(|e| FetchError::Network(e.to_string()))
}

async fn request(config: &SourceConfig) -> FetchResult<Response> {
	let started = Instant::now();
	let response = client(config)?
		.get(&config.url)
		.send()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;

	let status = response.status();
	info!(url = %config.url, status = status.as_u16(), elapsed_ms = started.elapsed().as_millis() as u64, "source.response");

	if !status.is_success() {
		let body = response.text().await.unwrap_or_default();
		return Err(FetchError::Status {
			status: status.as_u16(),
			body,
		});
	}
	Ok(response)
}

/// Decodes a dataset and builds a catalog from it.
pub fn decode_catalog(bytes: &[u8], config: &SourceConfig) -> FetchResult<Catalog> {
	let started = Instant::now();
	let drafts = wire::decode_drafts(bytes)?;
	info!(songs = drafts.len(), bytes = bytes.len(), elapsed_ms = started.elapsed().as_millis() as u64, "source.decoded");

	let started = Instant::now();
	let catalog = config.builder().extend(drafts).build()?;
	info!(songs = catalog.len(), elapsed_ms = started.elapsed().as_millis() as u64, "source.built");
	Ok(catalog)
}

/// Decodes on the blocking pool; a full dataset takes long enough to stall a
/// reactor thread.
async fn decode_off_thread(bytes: Vec<u8>, config: &SourceConfig) -> FetchResult<Catalog> {
	let config = config.clone();
	tokio::task::spawn_blocking(move || decode_catalog(&bytes, &config))
		.await
		.map_err(|e| FetchError::TaskFailed(e.to_string()))?
}

/// Downloads the dataset from `config.url` and builds a catalog.
pub async fn fetch_catalog(config: &SourceConfig) -> FetchResult<Catalog> {
	let started = Instant::now();
	let bytes = request(config)
		.await?
		.bytes()
		.await
		.map_err(|e| FetchError::Network(e.to_string()))?;
	debug!(bytes = bytes.len(), elapsed_ms = started.elapsed().as_millis() as u64, "source.body");

	let catalog = decode_off_thread(bytes.to_vec(), config).await?;
	info!(songs = catalog.len(), elapsed_ms = started.elapsed().as_millis() as u64, "source.fetched");
	Ok(catalog)
}

/// Builds a catalog from a dataset file previously written by
/// [`download_to_file`] (or any file in the same format).
pub async fn load_catalog_file(path: &Path, config: &SourceConfig) -> FetchResult<Catalog> {
	let started = Instant::now();
	let bytes = tokio::fs::read(path).await.map_err(|e| FetchError::io(path, e))?;
	debug!(path = %path.display(), bytes = bytes.len(), "source.read");

	let catalog = decode_off_thread(bytes, config).await?;
	info!(path = %path.display(), songs = catalog.len(), elapsed_ms = started.elapsed().as_millis() as u64, "source.loaded");
	Ok(catalog)
}

/// Streams the dataset to `path` and returns the number of bytes written.
///
/// The body goes to a sibling `.part` file first and is renamed into place
/// once complete, so `path` never holds a truncated dataset.
pub async fn download_to_file(config: &SourceConfig, path: &Path) -> FetchResult<u64> {
	let started = Instant::now();
	let mut response = request(config).await?;

	let partial = partial_path(path);
	let mut file = tokio::fs::File::create(&partial)
		.await
		.map_err(|e| FetchError::io(&partial, e))?;

	let mut written = 0u64;
	let streamed: FetchResult<()> = async {
		while let Some(chunk) = response
			.chunk()
			.await
			.map_err(|e| FetchError::Network(e.to_string()))?
		{
			file.write_all(&chunk).await.map_err(|e| FetchError::io(&partial, e))?;
			written += chunk.len() as u64;
		}
		file.flush().await.map_err(|e| FetchError::io(&partial, e))
	}
	.await;
	drop(file);

	if let Err(err) = streamed {
		if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
			warn!(path = %partial.display(), error = %cleanup, "source.download.cleanup_failed");
		}
		return Err(err);
	}

	tokio::fs::rename(&partial, path)
		.await
		.map_err(|e| FetchError::io(path, e))?;
	info!(path = %path.display(), bytes = written, elapsed_ms = started.elapsed().as_millis() as u64, "source.downloaded");
	Ok(written)
}

fn partial_path(path: &Path) -> PathBuf {
	let mut name = path.file_name().unwrap_or_default().to_os_string();
	name.push(".part");
	path.with_file_name(name)
}
