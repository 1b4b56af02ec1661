//! Catalog lifecycle provider.
//!
//! Produces [`Catalog`](songdata_core::Catalog)s from the published dataset:
//! - [`fetch_catalog`]: download and build
//! - [`load_catalog_file`]: build from a local copy
//! - [`download_to_file`]: save a local copy
//! - [`spawn_fetch`]: build in the background, resolving a [`PendingCatalog`]
//! - [`shared`]: the process-wide catalog, fetched once
//!
//! Every generation of the dataset decodes into the same schema; see
//! [`songdata_core::SchemaGeneration`].

pub mod config;
pub mod error;
mod fetch;
mod runtime;
pub mod shared;
mod wire;

pub use config::SourceConfig;
pub use error::{FetchError, FetchResult};
pub use fetch::{decode_catalog, download_to_file, fetch_catalog, load_catalog_file};
pub use runtime::{
	PendingCatalog, block_on, download_blocking, fetch_blocking, retrieve_blocking,
	retrieve_local_blocking, spawn_fetch,
};
