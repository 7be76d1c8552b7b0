//! Pagination binding configuration.

/// Parameter names, defaults, and limits for a [`PaginationBinding`].
///
/// The defaults match the common listing URL shape:
/// `?offset=0&limit=25&sorting=-title`.
///
/// # Examples
///
/// ```
/// use querybind_pagination::PaginationConfig;
///
/// let config = PaginationConfig::new()
///     .limit_param("page_size")
///     .default_limit(50)
///     .max_limit(100);
/// assert_eq!(config.clamp_limit(500), 100);
/// ```
///
/// [`PaginationBinding`]: crate::PaginationBinding
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationConfig {
	/// Query-parameter key for the page offset
	pub offset_param: String,
	/// Query-parameter key for the page size
	pub limit_param: String,
	/// Query-parameter key for the sorting entries
	pub sorting_param: String,
	/// Page size when the URL carries none
	pub default_limit: u64,
	/// Upper clamp applied to any decoded or defaulted limit
	pub max_limit: Option<u64>,
}

impl Default for PaginationConfig {
	fn default() -> Self {
		Self {
			offset_param: "offset".to_string(),
			limit_param: "limit".to_string(),
			sorting_param: "sorting".to_string(),
			default_limit: 25,
			max_limit: None,
		}
	}
}

impl PaginationConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn offset_param(mut self, name: impl Into<String>) -> Self {
		self.offset_param = name.into();
		self
	}

	pub fn limit_param(mut self, name: impl Into<String>) -> Self {
		self.limit_param = name.into();
		self
	}

	pub fn sorting_param(mut self, name: impl Into<String>) -> Self {
		self.sorting_param = name.into();
		self
	}

	pub fn default_limit(mut self, limit: u64) -> Self {
		self.default_limit = limit;
		self
	}

	pub fn max_limit(mut self, limit: u64) -> Self {
		self.max_limit = Some(limit);
		self
	}

	/// Apply the max-limit clamp to a candidate page size.
	pub fn clamp_limit(&self, limit: u64) -> u64 {
		match self.max_limit {
			Some(max) => limit.min(max),
			None => limit,
		}
	}
}
