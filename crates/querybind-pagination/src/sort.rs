//! Sort keys with the `-` descending-marker convention.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Sort direction for one column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SortDirection {
	Ascending,
	Descending,
}

/// One sorting entry: a column key, optionally prefixed with `-` for
/// descending order.
///
/// The newtype wraps the raw query-string form, so `"title"` sorts ascending
/// and `"-title"` sorts descending on the `title` column. Conversion from a
/// string is a cast without validation - a URL may name a column that does
/// not exist, and callers validate against their own column set.
///
/// # Examples
///
/// ```
/// use querybind_pagination::{SortDirection, SortKey};
///
/// let key = SortKey::desc("title");
/// assert_eq!(key.as_str(), "-title");
/// assert_eq!(key.column(), "title");
/// assert_eq!(key.direction(), SortDirection::Descending);
/// assert_eq!(key.reversed(), SortKey::asc("title"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SortKey(String);

impl SortKey {
	/// Ascending sort on `column`.
	pub fn asc(column: impl Into<String>) -> Self {
		Self(column.into())
	}

	/// Descending sort on `column`.
	pub fn desc(column: impl Into<String>) -> Self {
		Self(format!("-{}", column.into()))
	}

	/// The column key without the direction marker.
	pub fn column(&self) -> &str {
		self.0.strip_prefix('-').unwrap_or(&self.0)
	}

	pub fn is_descending(&self) -> bool {
		self.0.starts_with('-')
	}

	pub fn direction(&self) -> SortDirection {
		if self.is_descending() {
			SortDirection::Descending
		} else {
			SortDirection::Ascending
		}
	}

	/// The same column with the direction flipped.
	pub fn reversed(&self) -> Self {
		match self.0.strip_prefix('-') {
			Some(column) => Self(column.to_string()),
			None => Self(format!("-{}", self.0)),
		}
	}

	/// The raw query-string form (`column` or `-column`).
	pub fn as_str(&self) -> &str {
		&self.0
	}
}

impl From<String> for SortKey {
	fn from(raw: String) -> Self {
		Self(raw)
	}
}

impl From<&str> for SortKey {
	fn from(raw: &str) -> Self {
		Self(raw.to_string())
	}
}

impl fmt::Display for SortKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.0)
	}
}
