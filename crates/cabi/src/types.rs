//! Types that cross the boundary.

use songdata_core::{Catalog, Characteristic, Difficulty, Song, SongScore};
use songdata_source::FetchError;

/// Borrowed UTF-8 text, not NUL terminated.
///
/// A null `ptr` means the field is absent; a non-null `ptr` with `len == 0`
/// is present but empty. Valid for as long as the catalog it came from.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct SdStr {
	pub ptr: *const u8,
	pub len: usize,
}

impl SdStr {
	pub const ABSENT: Self = Self {
		ptr: std::ptr::null(),
		len: 0,
	};

	pub fn borrowed(s: &str) -> Self {
		Self {
			ptr: s.as_ptr(),
			len: s.len(),
		}
	}

	pub fn optional(s: Option<&str>) -> Self {
		s.map_or(Self::ABSENT, Self::borrowed)
	}

	pub fn is_absent(&self) -> bool {
		self.ptr.is_null()
	}

	/// # Safety
	/// `ptr` must be null or point to `len` readable bytes that outlive `'a`.
	pub unsafe fn as_str<'a>(&self) -> Option<&'a str> {
		if self.ptr.is_null() {
			return None;
		}
		let bytes = unsafe { std::slice::from_raw_parts(self.ptr, self.len) };
		std::str::from_utf8(bytes).ok()
	}
}

/// Outcome of a lifecycle call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdStatus {
	Ok = 0,
	/// A required pointer argument was null or a string was not UTF-8.
	InvalidArgument,
	/// The request never produced a response.
	Network,
	/// The server answered with a non-success status.
	HttpStatus,
	Io,
	/// The payload was not a valid dataset.
	Decode,
	Config,
	/// The decoded records violate a catalog invariant.
	Build,
	TaskFailed,
}

impl From<&FetchError> for SdStatus {
	fn from(err: &FetchError) -> Self {
		match err {
			FetchError::Network(_) => Self::Network,
			FetchError::Status { .. } => Self::HttpStatus,
			FetchError::Io { .. } => Self::Io,
			FetchError::Decode(_) => Self::Decode,
			FetchError::Config(_) => Self::Config,
			FetchError::Build(_) => Self::Build,
			FetchError::TaskFailed(_) => Self::TaskFailed,
		}
	}
}

/// Characteristic variant tag.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdCharacteristic {
	Unknown = 0,
	Standard,
	OneSaber,
	NoArrows,
	Lightshow,
	Degree90,
	Degree360,
	Lawless,
}

impl From<Characteristic> for SdCharacteristic {
	fn from(ch: Characteristic) -> Self {
		match ch {
			Characteristic::Unknown => Self::Unknown,
			Characteristic::Standard => Self::Standard,
			Characteristic::OneSaber => Self::OneSaber,
			Characteristic::NoArrows => Self::NoArrows,
			Characteristic::Lightshow => Self::Lightshow,
			Characteristic::Degree90 => Self::Degree90,
			Characteristic::Degree360 => Self::Degree360,
			Characteristic::Lawless => Self::Lawless,
		}
	}
}

impl From<SdCharacteristic> for Characteristic {
	fn from(ch: SdCharacteristic) -> Self {
		match ch {
			SdCharacteristic::Unknown => Self::Unknown,
			SdCharacteristic::Standard => Self::Standard,
			SdCharacteristic::OneSaber => Self::OneSaber,
			SdCharacteristic::NoArrows => Self::NoArrows,
			SdCharacteristic::Lightshow => Self::Lightshow,
			SdCharacteristic::Degree90 => Self::Degree90,
			SdCharacteristic::Degree360 => Self::Degree360,
			SdCharacteristic::Lawless => Self::Lawless,
		}
	}
}

/// Published heat/rating pair.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SdScore {
	pub heat: f32,
	pub rating: f32,
}

impl From<SongScore> for SdScore {
	fn from(score: SongScore) -> Self {
		Self {
			heat: score.heat,
			rating: score.rating,
		}
	}
}

/// A catalog. Caller owned or library owned depending on where it came from.
pub struct SdCatalog {
	_private: [u8; 0],
}

/// A song borrowed from a catalog.
pub struct SdSong {
	_private: [u8; 0],
}

/// A difficulty borrowed from a song.
pub struct SdDifficulty {
	_private: [u8; 0],
}

/// Maps an opaque handle type to the record it stands for.
pub(crate) trait Handle: Sized {
	type Target;

	fn from_ref(target: &Self::Target) -> *const Self {
		(target as *const Self::Target).cast()
	}

	/// # Safety
	/// `ptr` must be null or a live handle of this kind.
	unsafe fn resolve<'a>(ptr: *const Self) -> Option<&'a Self::Target> {
		unsafe { ptr.cast::<Self::Target>().as_ref() }
	}
}

impl Handle for SdCatalog {
	type Target = Catalog;
}

impl Handle for SdSong {
	type Target = Song;
}

impl Handle for SdDifficulty {
	type Target = Difficulty;
}

/// Aborts the process when a caller indexes past a collection's end.
#[track_caller]
pub(crate) fn check_index(index: usize, len: usize, what: &'static str) {
	if index >= len {
		let location = std::panic::Location::caller();
		tracing::error!(what, index, len, %location, "abi.index_out_of_range");
		eprintln!("songdata: {what} index out of range: index={index} len={len} at {location}");
		std::process::abort();
	}
}

/// Reads a boundary string argument.
///
/// # Safety
/// `s` must satisfy [`SdStr::as_str`].
pub(crate) unsafe fn arg_str<'a>(s: SdStr, what: &'static str) -> Option<&'a str> {
	let text = unsafe { s.as_str() };
	if text.is_none() {
		tracing::warn!(what, absent = s.is_absent(), "abi.invalid_string_argument");
	}
	text
}
