//! Owned catalog text.

use std::borrow::Borrow;
use std::fmt;
use std::ops::Deref;

/// Owned, immutable text value held by catalog records.
///
/// Every textual field and every string key in the catalog is a `Text`.
/// Equality, ordering and hashing follow the decoded content, never the
/// address of the buffer, so a `Text` built from a caller's probe string
/// matches the stored key it spells.
///
/// The buffer is never reallocated after construction, which keeps pointers
/// handed across the C boundary valid for as long as the owning record lives.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Text(Box<str>);

impl Text {
	/// Creates a text value from anything convertible into a boxed string.
	pub fn new(s: impl Into<Box<str>>) -> Self {
		Self(s.into())
	}

	/// Returns the content as a string slice.
	#[inline]
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// Returns the UTF-8 bytes of the content.
	#[inline]
	pub fn as_bytes(&self) -> &[u8] {
		self.0.as_bytes()
	}
}

impl Deref for Text {
	type Target = str;

	fn deref(&self) -> &str {
		&self.0
	}
}

impl AsRef<str> for Text {
	fn as_ref(&self) -> &str {
		&self.0
	}
}

impl Borrow<str> for Text {
	fn borrow(&self) -> &str {
		&self.0
	}
}

impl From<&str> for Text {
	fn from(s: &str) -> Self {
		Self(s.into())
	}
}

impl From<String> for Text {
	fn from(s: String) -> Self {
		Self(s.into_boxed_str())
	}
}

impl PartialEq<str> for Text {
	fn eq(&self, other: &str) -> bool {
		&*self.0 == other
	}
}

impl PartialEq<&str> for Text {
	fn eq(&self, other: &&str) -> bool {
		&*self.0 == *other
	}
}

impl fmt::Display for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.pad(&self.0)
	}
}

impl fmt::Debug for Text {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		fmt::Debug::fmt(&*self.0, f)
	}
}

#[cfg(test)]
mod tests {
	use std::collections::HashMap;

	use super::*;

	#[test]
	fn equality_is_by_content() {
		let a = Text::from("4B2DA842");
		let b = Text::from(String::from("4B2DA842"));
		assert_ne!(a.as_ptr(), b.as_ptr());
		assert_eq!(a, b);
		assert_eq!(a, "4B2DA842");
	}

	#[test]
	fn hash_lookup_with_borrowed_probe() {
		let mut map = HashMap::new();
		map.insert(Text::from("Hard"), 3);
		assert_eq!(map.get("Hard"), Some(&3));
		assert_eq!(map.get("hard"), None);
	}

	#[test]
	fn empty_default() {
		let t = Text::default();
		assert!(t.is_empty());
		assert_eq!(t.to_string(), "");
	}
}
