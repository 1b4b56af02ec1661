//! Provider configuration.
//!
//! ```toml
//! url = "https://example.org/songs.json"
//! timeout_secs = 30
//! duplicate_policy = "first-wins"
//! rating = "stored"
//! rating_mode = "precompute"
//! ```
//!
//! Environment overrides, applied by [`SourceConfig::with_env`]:
//! - `SONGDATA_URL`
//! - `SONGDATA_TIMEOUT_SECS`

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;
use songdata_core::{CatalogBuilder, DuplicatePolicy, RatingKind, RatingMode};

use crate::error::{FetchError, FetchResult};

/// Published scrape of the song dataset.
pub const DEFAULT_URL: &str =
	"https://raw.githubusercontent.com/andruzzzhka/BeatSaberScrappedData/master/combinedScrappedData.json";

pub const ENV_URL: &str = "SONGDATA_URL";
pub const ENV_TIMEOUT: &str = "SONGDATA_TIMEOUT_SECS";

/// Where the dataset comes from and how the catalog is built from it.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceConfig {
	pub url: String,
	pub timeout_secs: u64,
	pub user_agent: String,
	pub duplicate_policy: DuplicatePolicy,
	pub rating: RatingKind,
	pub rating_mode: RatingMode,
}

impl Default for SourceConfig {
	fn default() -> Self {
		Self {
			url: DEFAULT_URL.to_string(),
			timeout_secs: 60,
			user_agent: concat!("songdata/", env!("CARGO_PKG_VERSION")).to_string(),
			duplicate_policy: DuplicatePolicy::default(),
			rating: RatingKind::default(),
			rating_mode: RatingMode::default(),
		}
	}
}

impl SourceConfig {
	/// Parses a TOML document; missing keys take their defaults.
	pub fn from_toml_str(text: &str) -> FetchResult<Self> {
		toml::from_str(text).map_err(|e| FetchError::Config(e.to_string()))
	}

	/// Reads and parses a TOML file.
	pub fn load(path: &Path) -> FetchResult<Self> {
		let text = std::fs::read_to_string(path).map_err(|e| FetchError::io(path, e))?;
		Self::from_toml_str(&text)
	}

	/// Applies environment overrides from the process environment.
	pub fn with_env(self) -> FetchResult<Self> {
		self.with_overrides(|key| std::env::var(key).ok())
	}

	/// Applies overrides from an arbitrary variable source.
	pub fn with_overrides(mut self, var: impl Fn(&str) -> Option<String>) -> FetchResult<Self> {
		if let Some(url) = var(ENV_URL).filter(|u| !u.is_empty()) {
			self.url = url;
		}
		if let Some(raw) = var(ENV_TIMEOUT) {
			self.timeout_secs = raw
				.trim()
				.parse()
				.map_err(|_| FetchError::Config(format!("{ENV_TIMEOUT}={raw:?} is not a number of seconds")))?;
		}
		Ok(self)
	}

	pub fn timeout(&self) -> Duration {
		Duration::from_secs(self.timeout_secs)
	}

	/// A catalog builder configured with this config's policies.
	pub fn builder(&self) -> CatalogBuilder {
		CatalogBuilder::new()
			.duplicate_policy(self.duplicate_policy)
			.rating(self.rating.model(), self.rating_mode)
	}
}

#[cfg(test)]
mod tests {
	use pretty_assertions::assert_eq;

	use super::*;

	#[test]
	fn empty_document_is_default() {
		assert_eq!(SourceConfig::from_toml_str("").unwrap(), SourceConfig::default());
	}

	#[test]
	fn parses_all_keys() {
		let config = SourceConfig::from_toml_str(
			r#"
			url = "http://localhost:8080/songs.json"
			timeout_secs = 5
			duplicate_policy = "reject"
			rating = "peak-stars"
			rating_mode = "precompute"
			"#,
		)
		.unwrap();
		assert_eq!(config.url, "http://localhost:8080/songs.json");
		assert_eq!(config.timeout(), Duration::from_secs(5));
		assert_eq!(config.duplicate_policy, DuplicatePolicy::Reject);
		assert_eq!(config.rating, RatingKind::PeakStars);
		assert_eq!(config.rating_mode, RatingMode::Precompute);
	}

	#[test]
	fn unknown_key_is_an_error() {
		let err = SourceConfig::from_toml_str("mirror = true").unwrap_err();
		assert!(matches!(err, FetchError::Config(_)));
	}

	#[test]
	fn overrides_apply() {
		let config = SourceConfig::default()
			.with_overrides(|key| match key {
				ENV_URL => Some("http://mirror/songs.json".into()),
				ENV_TIMEOUT => Some(" 12 ".into()),
				_ => None,
			})
			.unwrap();
		assert_eq!(config.url, "http://mirror/songs.json");
		assert_eq!(config.timeout_secs, 12);
	}

	#[test]
	fn bad_timeout_override_is_an_error() {
		let err = SourceConfig::default()
			.with_overrides(|key| (key == ENV_TIMEOUT).then(|| "soon".to_string()))
			.unwrap_err();
		assert!(matches!(err, FetchError::Config(_)));
	}
}
