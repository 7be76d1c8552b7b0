//! Query-string snapshot parsing.

use std::collections::BTreeMap;

use percent_encoding::percent_decode_str;
use url::Url;

/// An immutable view of one URL's query parameters.
///
/// Keys map to the ordered list of values they carry in the query string, so
/// `?tag=a&tag=b` yields `["a", "b"]` for `tag`. A snapshot is parsed once
/// per navigation and replaced wholesale when the URL changes; bindings
/// re-decode from the new snapshot rather than mutating the old one.
///
/// # Examples
///
/// ```
/// use querybind_params::QueryParamSnapshot;
///
/// let snapshot = QueryParamSnapshot::from_query("offset=10&tag=a&tag=b");
/// assert_eq!(snapshot.get("offset"), Some("10"));
/// assert_eq!(snapshot.get_all("tag"), &["a".to_string(), "b".to_string()]);
/// assert_eq!(snapshot.get("missing"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct QueryParamSnapshot {
	params: BTreeMap<String, Vec<String>>,
}

impl QueryParamSnapshot {
	/// A snapshot with no parameters.
	pub fn empty() -> Self {
		Self::default()
	}

	/// Parse a query string (with or without the leading `?`).
	///
	/// Pairs split on the first `=` only, so `=` inside a value survives
	/// (e.g. Base64 payloads). `+` reads as a space and both keys and values
	/// are percent-decoded. A key without `=` carries the empty string.
	pub fn from_query(query: &str) -> Self {
		let query = query.strip_prefix('?').unwrap_or(query);
		let mut params: BTreeMap<String, Vec<String>> = BTreeMap::new();
		for pair in query.split('&') {
			if pair.is_empty() {
				continue;
			}
			let mut parts = pair.splitn(2, '=');
			let key = decode_component(parts.next().unwrap_or(""));
			let value = decode_component(parts.next().unwrap_or(""));
			params.entry(key).or_default().push(value);
		}
		Self { params }
	}

	/// Parse the query portion of a URL.
	pub fn from_url(url: &Url) -> Self {
		Self::from_query(url.query().unwrap_or(""))
	}

	/// First value for `key`, if the parameter is present.
	pub fn get(&self, key: &str) -> Option<&str> {
		self.params
			.get(key)
			.and_then(|values| values.first())
			.map(String::as_str)
	}

	/// All values for `key`, in query-string order. Empty when absent.
	pub fn get_all(&self, key: &str) -> &[String] {
		self.params.get(key).map(Vec::as_slice).unwrap_or(&[])
	}

	pub fn contains_key(&self, key: &str) -> bool {
		self.params.contains_key(key)
	}

	pub fn keys(&self) -> impl Iterator<Item = &str> {
		self.params.keys().map(String::as_str)
	}

	/// Number of distinct parameter keys.
	pub fn len(&self) -> usize {
		self.params.len()
	}

	pub fn is_empty(&self) -> bool {
		self.params.is_empty()
	}

	/// Re-encode the snapshot as a query string (no leading `?`).
	///
	/// # Examples
	///
	/// ```
	/// use querybind_params::QueryParamSnapshot;
	///
	/// let snapshot = QueryParamSnapshot::from_query("q=hello+world&page=2");
	/// assert_eq!(snapshot.to_query_string(), "page=2&q=hello+world");
	/// ```
	pub fn to_query_string(&self) -> String {
		let mut serializer = url::form_urlencoded::Serializer::new(String::new());
		for (key, values) in &self.params {
			for value in values {
				serializer.append_pair(key, value);
			}
		}
		serializer.finish()
	}
}

fn decode_component(raw: &str) -> String {
	let plus_decoded = raw.replace('+', " ");
	percent_decode_str(&plus_decoded)
		.decode_utf8_lossy()
		.to_string()
}
