//! Index and key addressed read access.
//!
//! Collections owned by the catalog are exposed through two small protocols
//! instead of native iterators:
//!
//! - [`IndexedSeq`]: `len` plus `at(index)`.
//! - [`KeyedMap`]: `len`, positional `key_at`/`value_at`, and `get(key)`.
//!
//! Positional access requires `index < len()`. Breaking that is a caller bug
//! and panics; there is no checked variant. Keyed lookup is the only operation
//! that reports absence, as `None`.
//!
//! Both protocols map one-to-one onto the C entry points, where a caller can
//! only query a length and then address elements by position.

/// Read view over a sequence of elements addressed by position.
pub trait IndexedSeq {
	/// Non-owning view of one element.
	type Item;

	/// Number of elements.
	fn len(&self) -> usize;

	/// Returns the element at `index`.
	///
	/// # Panics
	///
	/// Panics if `index >= self.len()`.
	fn at(&self, index: usize) -> Self::Item;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Visits every element in position order.
	fn iter(&self) -> impl Iterator<Item = Self::Item> + '_
	where
		Self: Sized,
	{
		(0..self.len()).map(move |i| self.at(i))
	}
}

/// Read view over key/value pairs addressed by key or by position.
///
/// Positions are stable for the lifetime of the owning catalog, so
/// `key_at(i)` and `value_at(i)` always describe the same pair.
pub trait KeyedMap {
	/// Probe type accepted by [`get`](Self::get).
	type Key: ?Sized;
	/// View of a stored key.
	type KeyView;
	/// View of a stored value.
	type Value;

	/// Number of pairs.
	fn len(&self) -> usize;

	/// Returns the key stored at `index`.
	///
	/// # Panics
	///
	/// Panics if `index >= self.len()`.
	fn key_at(&self, index: usize) -> Self::KeyView;

	/// Returns the value stored at `index`.
	///
	/// # Panics
	///
	/// Panics if `index >= self.len()`.
	fn value_at(&self, index: usize) -> Self::Value;

	/// Looks up a value by key content. Absent keys yield `None`.
	fn get(&self, key: &Self::Key) -> Option<Self::Value>;

	fn is_empty(&self) -> bool {
		self.len() == 0
	}

	fn contains_key(&self, key: &Self::Key) -> bool {
		self.get(key).is_some()
	}

	/// Visits every key in position order.
	fn keys(&self) -> impl Iterator<Item = Self::KeyView> + '_
	where
		Self: Sized,
	{
		(0..self.len()).map(move |i| self.key_at(i))
	}

	/// Visits every pair in position order.
	fn entries(&self) -> impl Iterator<Item = (Self::KeyView, Self::Value)> + '_
	where
		Self: Sized,
	{
		(0..self.len()).map(move |i| (self.key_at(i), self.value_at(i)))
	}
}

#[track_caller]
pub(crate) fn expect_index(index: usize, len: usize, what: &'static str) {
	if index >= len {
		panic!("{what} index out of range: index={index} len={len}");
	}
}

/// Borrowed run of records owned by the catalog.
pub struct Seq<'c, T> {
	items: &'c [T],
}

impl<T> Clone for Seq<'_, T> {
	fn clone(&self) -> Self {
		*self
	}
}

impl<T> Copy for Seq<'_, T> {}

impl<'c, T> Seq<'c, T> {
	pub(crate) fn new(items: &'c [T]) -> Self {
		Self { items }
	}

	/// Returns the underlying slice.
	pub fn as_slice(&self) -> &'c [T] {
		self.items
	}
}

impl<'c, T> IndexedSeq for Seq<'c, T> {
	type Item = &'c T;

	#[inline]
	fn len(&self) -> usize {
		self.items.len()
	}

	#[track_caller]
	fn at(&self, index: usize) -> &'c T {
		expect_index(index, self.items.len(), "sequence");
		&self.items[index]
	}
}

impl<T: std::fmt::Debug> std::fmt::Debug for Seq<'_, T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_list().entries(self.items).finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn seq_len_and_at() {
		let data = [10, 20, 30];
		let seq = Seq::new(&data);
		assert_eq!(seq.len(), 3);
		assert_eq!(*seq.at(1), 20);
		assert_eq!(seq.iter().copied().collect::<Vec<_>>(), vec![10, 20, 30]);
	}

	#[test]
	fn empty_seq() {
		let seq: Seq<'_, u8> = Seq::new(&[]);
		assert!(seq.is_empty());
		assert_eq!(seq.iter().count(), 0);
	}

	#[test]
	#[should_panic(expected = "sequence index out of range: index=3 len=3")]
	fn at_past_end_panics() {
		let data = [1, 2, 3];
		Seq::new(&data).at(3);
	}
}
