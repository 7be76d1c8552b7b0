//! Integration tests for write coalescing across bindings and ticks.

use std::rc::Rc;

use querybind_params::{MemoryRouter, ParamPayload, QueryParamSnapshot, QueryParams};

fn context(query: &str) -> (Rc<MemoryRouter>, QueryParams) {
	let url = format!("https://example.com/items{query}");
	let router = Rc::new(MemoryRouter::new(&url).expect("valid test url"));
	let params = QueryParams::new(router.snapshot(), router.clone());
	(router, params)
}

#[test]
fn same_tick_writes_to_distinct_keys_flush_once() {
	let (router, params) = context("?offset=0&limit=25");
	let offset = params.uint_param("offset", 0);
	let limit = params.uint_param("limit", 25);
	let query = params.param("q", "");

	offset.set(50);
	limit.set(10);
	query.set("rust".to_string());

	assert!(params.flush().expect("flush"));
	let navigations = router.navigations();
	assert_eq!(navigations.len(), 1);
	assert_eq!(navigations[0].query_params.len(), 3);
}

#[test]
fn same_tick_writes_to_same_key_keep_only_the_last() {
	let (router, params) = context("?offset=0");
	let offset = params.uint_param("offset", 0);

	offset.set(10);
	offset.set(20);
	offset.set(30);

	params.flush().expect("flush");
	let navigations = router.navigations();
	assert_eq!(navigations.len(), 1);
	assert_eq!(
		navigations[0].query_params.get("offset"),
		Some(&ParamPayload::Single("30".to_string()))
	);
}

#[test]
fn writes_in_different_ticks_flush_as_separate_navigations() {
	let (router, params) = context("?offset=0");
	let offset = params.uint_param("offset", 0);

	offset.set(10);
	params.flush().expect("first tick");

	offset.set(20);
	params.flush().expect("second tick");

	let navigations = router.navigations();
	assert_eq!(navigations.len(), 2);
	assert_eq!(
		navigations[0].query_params.get("offset"),
		Some(&ParamPayload::Single("10".to_string()))
	);
	assert_eq!(
		navigations[1].query_params.get("offset"),
		Some(&ParamPayload::Single("20".to_string()))
	);
	assert_eq!(router.snapshot().get("offset"), Some("20"));
}

#[test]
fn feedback_loop_does_not_ping_pong() {
	// Full cycle: write -> flush -> URL change -> handle_navigation.
	// The republish must not schedule another navigation.
	let (router, params) = context("?offset=0");
	let offset = params.uint_param("offset", 0);

	offset.set(50);
	params.flush().expect("flush");
	params.handle_navigation(router.snapshot());

	assert_eq!(offset.get(), 50);
	assert!(!params.has_pending());
	assert!(!params.flush().expect("second flush"));
	assert_eq!(router.navigations().len(), 1);
}

#[test]
fn emptyish_values_are_flushed_not_dropped() {
	let (router, params) = context("?q=rust&n=5&flag=true");
	let query = params.param("q", "default");
	let n = params.uint_param("n", 1);
	let flag = params.bool_param("flag", false);

	query.set(String::new());
	n.set(0);
	flag.set(false);

	params.flush().expect("flush");
	let snapshot = router.snapshot();
	assert_eq!(snapshot.get("q"), Some(""));
	assert_eq!(snapshot.get("n"), Some("0"));
	assert_eq!(snapshot.get("flag"), Some("false"));
}

#[test]
fn writes_from_a_destroyed_scope_never_flush() {
	let (router, params) = context("?offset=0");
	let offset = params.uint_param("offset", 0);

	offset.set(10);
	params.scope().destroy();
	offset.set(20);

	// Teardown renders even the pre-destroy pending write inert.
	assert!(!params.flush().expect("flush"));
	assert!(router.navigations().is_empty());
	assert_eq!(router.snapshot().get("offset"), Some("0"));
}

#[test]
fn external_change_to_unrelated_key_does_not_disturb_binding() {
	let (_, params) = context("?offset=10&q=rust");
	let offset = params.uint_param("offset", 0);

	params.handle_navigation(QueryParamSnapshot::from_query("offset=10&q=tokio"));
	assert_eq!(offset.get(), 10);
	assert!(!params.has_pending());
}

#[test]
fn bound_value_survives_url_normalization() {
	// Re-applying an equivalent snapshot must not notify subscribers.
	let (_, params) = context("?offset=10");
	let offset = params.uint_param("offset", 0);

	let notified = Rc::new(std::cell::Cell::new(0));
	let notified_clone = notified.clone();
	let _sub = offset.subscribe(move |_| notified_clone.set(notified_clone.get() + 1));

	params.handle_navigation(QueryParamSnapshot::from_query("offset=10"));
	assert_eq!(notified.get(), 0);
}

#[test]
fn multiple_contexts_do_not_share_pending_state() {
	let (router_a, params_a) = context("?a=1");
	let (router_b, params_b) = context("?b=2");

	params_a.param("a", "").set("changed".to_string());
	assert!(params_a.has_pending());
	assert!(!params_b.has_pending());

	params_a.flush().expect("flush a");
	params_b.flush().expect("flush b");
	assert_eq!(router_a.navigations().len(), 1);
	assert!(router_b.navigations().is_empty());
}
