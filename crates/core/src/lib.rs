//! Immutable in-memory catalog of rhythm-game song metadata.
//!
//! This crate provides:
//! - [`Text`]: owned text compared by content
//! - [`Song`] / [`Difficulty`]: the entity schema across its generations
//! - [`Catalog`]: song hash → song store, built once by [`CatalogBuilder`]
//! - [`IndexedSeq`] / [`KeyedMap`]: the index and key addressed access protocol
//! - [`RatingModel`]: pluggable song rating
//!
//! Every view borrows from the catalog. Positional access past a collection's
//! length panics; keyed lookups report absence with `None`.

pub mod access;
pub mod builder;
pub mod catalog;
pub mod characteristic;
pub mod error;
pub mod rating;
pub mod schema;
pub mod text;
pub mod view;

pub use access::{IndexedSeq, KeyedMap, Seq};
pub use builder::{CatalogBuilder, DifficultyDraft, DuplicatePolicy, SongDraft};
pub use catalog::{Catalog, SongMap};
pub use characteristic::Characteristic;
pub use error::BuildError;
pub use rating::{PeakStars, RatingKind, RatingMode, RatingModel, StoredRating, VoteRating};
pub use schema::{Difficulty, SchemaGeneration, Song, SongScore, Timestamp};
pub use text::Text;
pub use view::{CharacteristicMap, DifficultyMap, SongView};

#[cfg(test)]
mod schema_tests;
