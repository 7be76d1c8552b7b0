//! Tests for the navigation request shape and error propagation, with the
//! host router mocked out.

use std::rc::Rc;

use mockall::mock;
use mockall::predicate::function;
use querybind_params::{
	HistoryMode, NavigationRequest, ParamsError, QueryParamSnapshot, QueryParams,
	QueryParamsHandling, Router,
};

mock! {
	pub HostRouter {}

	impl Router for HostRouter {
		fn navigate(&self, request: NavigationRequest) -> querybind_params::Result<()>;
	}
}

#[test]
fn flush_emits_replace_merge_preserve_fragment() {
	let mut router = MockHostRouter::new();
	router
		.expect_navigate()
		.with(function(|request: &NavigationRequest| {
			request.history == HistoryMode::Replace
				&& request.handling == QueryParamsHandling::Merge
				&& request.preserve_fragment
		}))
		.times(1)
		.returning(|_| Ok(()));

	let params = QueryParams::new(
		QueryParamSnapshot::from_query("offset=0"),
		Rc::new(router),
	);
	params.uint_param("offset", 0).set(50);
	assert!(params.flush().expect("flush"));
}

#[test]
fn flush_without_writes_never_calls_the_router() {
	let mut router = MockHostRouter::new();
	router.expect_navigate().times(0);

	let params = QueryParams::new(QueryParamSnapshot::empty(), Rc::new(router));
	assert!(!params.flush().expect("flush"));
}

#[test]
fn router_failure_propagates_out_of_flush() {
	let mut router = MockHostRouter::new();
	router
		.expect_navigate()
		.times(1)
		.returning(|_| Err(ParamsError::Navigation("host rejected".to_string())));

	let params = QueryParams::new(QueryParamSnapshot::empty(), Rc::new(router));
	params.param("q", "").set("rust".to_string());

	let error = params.flush().expect_err("router failure surfaces");
	assert!(matches!(error, ParamsError::Navigation(_)));
}

#[test]
fn failed_flush_drains_the_pending_set() {
	// A failed navigation does not retry on the next tick by itself; the
	// host decides whether to re-drive the writes.
	let mut router = MockHostRouter::new();
	router
		.expect_navigate()
		.times(1)
		.returning(|_| Err(ParamsError::Navigation("host rejected".to_string())));

	let params = QueryParams::new(QueryParamSnapshot::empty(), Rc::new(router));
	params.param("q", "").set("rust".to_string());

	assert!(params.flush().is_err());
	assert!(!params.has_pending());
	assert!(!params.flush().expect("second tick is empty"));
}
