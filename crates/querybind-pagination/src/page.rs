//! The pagination request/result value shapes.

use serde::{Deserialize, Serialize};

use crate::sort::SortKey;

/// One pagination state: where the page starts, how large it is, and how
/// the listing is sorted.
///
/// `S` is the sorting entry type, [`SortKey`] by default; a host with a
/// known column set can substitute its own string-convertible type.
///
/// # Examples
///
/// ```
/// use querybind_pagination::{Pagination, SortKey};
///
/// let pagination: Pagination = Pagination::default();
/// assert_eq!(pagination.offset, 0);
/// assert_eq!(pagination.limit, 25);
/// assert!(pagination.sorting.is_empty());
///
/// let sorted = Pagination::new(50, 10).with_sorting(vec![SortKey::desc("year")]);
/// assert_eq!(sorted.next_offset(), 60);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination<S = SortKey> {
	pub offset: u64,
	pub limit: u64,
	#[serde(default = "Vec::new")]
	pub sorting: Vec<S>,
}

impl<S> Pagination<S> {
	pub fn new(offset: u64, limit: u64) -> Self {
		Self {
			offset,
			limit,
			sorting: Vec::new(),
		}
	}

	pub fn with_sorting(mut self, sorting: Vec<S>) -> Self {
		self.sorting = sorting;
		self
	}

	/// The offset of the page after this one.
	pub fn next_offset(&self) -> u64 {
		self.offset.saturating_add(self.limit)
	}
}

impl<S> Default for Pagination<S> {
	fn default() -> Self {
		Self::new(0, 25)
	}
}

/// One page of a listing, as returned by a paged data source.
///
/// `count` is the size of the whole collection, not of this page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page<T> {
	pub count: u64,
	pub items: Vec<T>,
	pub limit: u64,
	pub offset: u64,
}

impl<T> Page<T> {
	/// Number of items on this page.
	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn has_next(&self) -> bool {
		self.offset.saturating_add(self.limit) < self.count
	}

	pub fn has_previous(&self) -> bool {
		self.offset > 0
	}

	/// Offset of the next page, if one exists.
	pub fn next(&self) -> Option<u64> {
		self.has_next().then(|| self.offset.saturating_add(self.limit))
	}

	/// Offset of the previous page, if one exists.
	pub fn previous(&self) -> Option<u64> {
		self.has_previous()
			.then(|| self.offset.saturating_sub(self.limit))
	}
}

/// Slice a full in-memory collection down to one page.
///
/// An offset past the end of the collection yields an empty page whose
/// `count` still reports the full collection size, so consumers can render
/// "page N of M" and recover.
///
/// # Examples
///
/// ```
/// use querybind_pagination::{paginate, Pagination};
///
/// let items: Vec<u32> = (0..100).collect();
/// let page = paginate(&items, &Pagination::new(95, 10));
/// assert_eq!(page.items, vec![95, 96, 97, 98, 99]);
/// assert_eq!(page.count, 100);
/// assert!(!page.has_next());
/// ```
pub fn paginate<T: Clone, S>(items: &[T], pagination: &Pagination<S>) -> Page<T> {
	let count = items.len() as u64;
	let start = pagination.offset.min(count) as usize;
	let end = pagination.offset.saturating_add(pagination.limit).min(count) as usize;
	Page {
		count,
		items: items[start..end].to_vec(),
		limit: pagination.limit,
		offset: pagination.offset,
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_default_pagination() {
		let pagination: Pagination = Pagination::default();
		assert_eq!(pagination.offset, 0);
		assert_eq!(pagination.limit, 25);
	}

	#[test]
	fn test_paginate_middle_page() {
		let items: Vec<u32> = (0..100).collect();
		let page = paginate(&items, &Pagination::<SortKey>::new(10, 10));
		assert_eq!(page.items, (10..20).collect::<Vec<u32>>());
		assert_eq!(page.count, 100);
		assert!(page.has_next());
		assert!(page.has_previous());
		assert_eq!(page.next(), Some(20));
		assert_eq!(page.previous(), Some(0));
	}

	#[test]
	fn test_paginate_offset_past_the_end() {
		let items: Vec<u32> = (0..10).collect();
		let page = paginate(&items, &Pagination::<SortKey>::new(50, 10));
		assert!(page.is_empty());
		assert_eq!(page.count, 10);
		assert!(!page.has_next());
	}

	#[test]
	fn test_paginate_empty_collection() {
		let items: Vec<u32> = Vec::new();
		let page = paginate(&items, &Pagination::<SortKey>::default());
		assert!(page.is_empty());
		assert_eq!(page.count, 0);
		assert!(!page.has_next());
		assert!(!page.has_previous());
	}

	#[test]
	fn test_previous_clamps_at_zero() {
		let items: Vec<u32> = (0..30).collect();
		let page = paginate(&items, &Pagination::<SortKey>::new(5, 10));
		assert_eq!(page.previous(), Some(0));
	}

	#[test]
	fn test_pagination_serde_round_trip() {
		let pagination = Pagination::new(10, 25).with_sorting(vec![SortKey::desc("title")]);
		let json = serde_json::to_string(&pagination).unwrap();
		let parsed: Pagination = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, pagination);
	}

	#[test]
	fn test_pagination_deserialize_without_sorting() {
		let parsed: Pagination = serde_json::from_str(r#"{"offset":5,"limit":10}"#).unwrap();
		assert_eq!(parsed, Pagination::new(5, 10));
	}
}
