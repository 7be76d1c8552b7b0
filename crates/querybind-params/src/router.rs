//! Navigation requests and the host-router seam.

use core::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::coalescer::ParamPayload;
use crate::error::{ParamsError, Result};
use crate::snapshot::QueryParamSnapshot;

/// How a navigation interacts with the history stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HistoryMode {
	/// Overwrite the current history entry
	Replace,
	/// Append a new history entry
	Push,
}

/// How a navigation's parameters combine with the URL's existing ones.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryParamsHandling {
	/// Keep existing parameters, overwriting only the keys in the request
	Merge,
	/// Drop existing parameters entirely
	Replace,
}

/// One outgoing URL update, handed to the host router.
///
/// Coalesced flushes always produce `{history: Replace, handling: Merge,
/// preserve_fragment: true}` so that batched state writes neither grow the
/// back-button stack nor disturb unrelated parameters or the fragment. The
/// other variants exist because the seam models the full router surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavigationRequest {
	pub query_params: BTreeMap<String, ParamPayload>,
	pub history: HistoryMode,
	pub handling: QueryParamsHandling,
	pub preserve_fragment: bool,
}

impl NavigationRequest {
	/// The request shape a coalesced flush emits for `query_params`.
	pub fn merge_replace(query_params: BTreeMap<String, ParamPayload>) -> Self {
		Self {
			query_params,
			history: HistoryMode::Replace,
			handling: QueryParamsHandling::Merge,
			preserve_fragment: true,
		}
	}
}

/// The external collaborator that applies navigation requests to a URL.
///
/// All I/O lives behind this trait; the binding core only produces
/// [`NavigationRequest`] values. Hosts embed their real router here,
/// tests mock it, and [`MemoryRouter`] serves headless use.
pub trait Router {
	fn navigate(&self, request: NavigationRequest) -> Result<()>;
}

/// In-memory [`Router`] for tests and headless hosts.
///
/// Owns a current URL and a history stack, applies merge/replace semantics
/// the way a browser router would, and records every request it receives.
///
/// # Examples
///
/// ```
/// use querybind_params::{MemoryRouter, NavigationRequest, ParamPayload, Router};
/// use std::collections::BTreeMap;
///
/// let router = MemoryRouter::new("https://example.com/items?limit=25").unwrap();
///
/// let mut params = BTreeMap::new();
/// params.insert("offset".to_string(), ParamPayload::Single("50".to_string()));
/// router.navigate(NavigationRequest::merge_replace(params)).unwrap();
///
/// let url = router.current_url();
/// assert_eq!(url.query(), Some("limit=25&offset=50"));
/// ```
#[derive(Debug)]
pub struct MemoryRouter {
	current: RefCell<Url>,
	past: RefCell<Vec<Url>>,
	log: RefCell<Vec<NavigationRequest>>,
}

impl MemoryRouter {
	pub fn new(initial: &str) -> Result<Self> {
		Ok(Self::from_url(Url::parse(initial)?))
	}

	pub fn from_url(initial: Url) -> Self {
		Self {
			current: RefCell::new(initial),
			past: RefCell::new(Vec::new()),
			log: RefCell::new(Vec::new()),
		}
	}

	/// The URL at the top of the history stack.
	pub fn current_url(&self) -> Url {
		self.current.borrow().clone()
	}

	/// Parse the current URL's query into a snapshot, for feeding back into
	/// a [`QueryParams`](crate::QueryParams) context.
	pub fn snapshot(&self) -> QueryParamSnapshot {
		QueryParamSnapshot::from_url(&self.current_url())
	}

	/// Depth of the history stack, counting the current entry.
	pub fn history_len(&self) -> usize {
		self.past.borrow().len() + 1
	}

	/// Every navigation request received, in order.
	pub fn navigations(&self) -> Vec<NavigationRequest> {
		self.log.borrow().clone()
	}

	pub fn last_navigation(&self) -> Option<NavigationRequest> {
		self.log.borrow().last().cloned()
	}

	fn apply(&self, request: &NavigationRequest) -> Url {
		let current = self.current_url();
		let mut pairs: Vec<(String, String)> = Vec::new();

		if request.handling == QueryParamsHandling::Merge {
			// Existing pairs survive unless the request names their key.
			for (key, value) in current.query_pairs() {
				if !request.query_params.contains_key(key.as_ref()) {
					pairs.push((key.into_owned(), value.into_owned()));
				}
			}
		}
		for (key, payload) in &request.query_params {
			for value in payload.values() {
				pairs.push((key.clone(), value.clone()));
			}
		}

		let mut next = current;
		next.set_query(None);
		if !pairs.is_empty() {
			let mut serializer = next.query_pairs_mut();
			for (key, value) in &pairs {
				serializer.append_pair(key, value);
			}
		}
		if !request.preserve_fragment {
			next.set_fragment(None);
		}
		next
	}
}

impl Router for MemoryRouter {
	fn navigate(&self, request: NavigationRequest) -> Result<()> {
		let next = self.apply(&request);
		match request.history {
			HistoryMode::Replace => {
				*self.current.borrow_mut() = next;
			}
			HistoryMode::Push => {
				let previous = self.current.replace(next);
				self.past.borrow_mut().push(previous);
			}
		}
		self.log.borrow_mut().push(request);
		Ok(())
	}
}

/// A router that always fails, for exercising error propagation.
#[derive(Debug, Default)]
pub struct FailingRouter;

impl Router for FailingRouter {
	fn navigate(&self, _request: NavigationRequest) -> Result<()> {
		Err(ParamsError::Navigation("router unavailable".to_string()))
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn single(value: &str) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}

	#[test]
	fn test_merge_preserves_unrelated_params() {
		let router = MemoryRouter::new("https://example.com/?a=1&b=2").unwrap();
		let mut params = BTreeMap::new();
		params.insert("b".to_string(), single("3"));
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		let snapshot = router.snapshot();
		assert_eq!(snapshot.get("a"), Some("1"));
		assert_eq!(snapshot.get("b"), Some("3"));
	}

	#[test]
	fn test_replace_handling_drops_existing_params() {
		let router = MemoryRouter::new("https://example.com/?a=1").unwrap();
		let mut params = BTreeMap::new();
		params.insert("b".to_string(), single("2"));
		router
			.navigate(NavigationRequest {
				query_params: params,
				history: HistoryMode::Replace,
				handling: QueryParamsHandling::Replace,
				preserve_fragment: true,
			})
			.unwrap();

		let snapshot = router.snapshot();
		assert!(!snapshot.contains_key("a"));
		assert_eq!(snapshot.get("b"), Some("2"));
	}

	#[test]
	fn test_absent_removes_the_key() {
		let router = MemoryRouter::new("https://example.com/?a=1&b=2").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), ParamPayload::Absent);
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		let snapshot = router.snapshot();
		assert!(!snapshot.contains_key("a"));
		assert_eq!(snapshot.get("b"), Some("2"));
	}

	#[test]
	fn test_fragment_preserved_on_request() {
		let router = MemoryRouter::new("https://example.com/?a=1#section").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("2"));
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		assert_eq!(router.current_url().fragment(), Some("section"));
	}

	#[test]
	fn test_fragment_dropped_when_not_preserved() {
		let router = MemoryRouter::new("https://example.com/?a=1#section").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("2"));
		router
			.navigate(NavigationRequest {
				query_params: params,
				history: HistoryMode::Replace,
				handling: QueryParamsHandling::Merge,
				preserve_fragment: false,
			})
			.unwrap();

		assert_eq!(router.current_url().fragment(), None);
	}

	#[test]
	fn test_replace_history_keeps_depth() {
		let router = MemoryRouter::new("https://example.com/").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("1"));
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		assert_eq!(router.history_len(), 1);
	}

	#[test]
	fn test_push_history_grows_depth() {
		let router = MemoryRouter::new("https://example.com/").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("1"));
		router
			.navigate(NavigationRequest {
				query_params: params,
				history: HistoryMode::Push,
				handling: QueryParamsHandling::Merge,
				preserve_fragment: true,
			})
			.unwrap();

		assert_eq!(router.history_len(), 2);
	}

	#[test]
	fn test_multi_payload_expands_to_repeated_pairs() {
		let router = MemoryRouter::new("https://example.com/").unwrap();
		let mut params = BTreeMap::new();
		params.insert(
			"sorting".to_string(),
			ParamPayload::Multi(vec!["title".to_string(), "-year".to_string()]),
		);
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		let snapshot = router.snapshot();
		assert_eq!(
			snapshot.get_all("sorting"),
			&["title".to_string(), "-year".to_string()]
		);
	}

	#[test]
	fn test_removing_last_param_leaves_no_query() {
		let router = MemoryRouter::new("https://example.com/?a=1").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), ParamPayload::Absent);
		router.navigate(NavigationRequest::merge_replace(params)).unwrap();

		assert_eq!(router.current_url().query(), None);
	}

	#[test]
	fn test_invalid_initial_url() {
		assert!(matches!(
			MemoryRouter::new("not a url"),
			Err(ParamsError::InvalidUrl(_))
		));
	}

	#[test]
	fn test_navigation_request_serde_round_trip() {
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("1"));
		params.insert("b".to_string(), ParamPayload::Absent);
		let request = NavigationRequest::merge_replace(params);

		let json = serde_json::to_string(&request).unwrap();
		let parsed: NavigationRequest = serde_json::from_str(&json).unwrap();
		assert_eq!(parsed, request);
	}

	#[test]
	fn test_navigation_log_records_requests() {
		let router = MemoryRouter::new("https://example.com/").unwrap();
		let mut params = BTreeMap::new();
		params.insert("a".to_string(), single("1"));
		let request = NavigationRequest::merge_replace(params);
		router.navigate(request.clone()).unwrap();

		assert_eq!(router.navigations(), vec![request]);
	}
}
