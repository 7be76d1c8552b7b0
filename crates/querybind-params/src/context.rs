//! The navigation context: snapshot stream, binding factories, and flushing.

use std::rc::Rc;

use querybind_reactive::{Scope, Signal};
use tracing::{debug, trace};

use crate::binding::{DecodeFn, EncodeFn, ParamBinding};
use crate::codec::{
	ArrayCodec, BoolCodec, CastCodec, FloatCodec, MapCodec, ParamCodec, StringCodec, UIntCodec,
};
use crate::coalescer::{ParamPayload, UpdateCoalescer};
use crate::error::Result;
use crate::router::{NavigationRequest, Router};
use crate::snapshot::QueryParamSnapshot;

/// One navigation context: the owner of the snapshot signal, the shared
/// coalescer, the router handle, and the scope every binding ties its
/// lifetime to.
///
/// The host drives the read path by calling
/// [`QueryParams::handle_navigation`] with each new URL snapshot, and the
/// write path by calling [`QueryParams::flush`] once per scheduling tick.
/// Between those two calls, any number of bindings may read and write;
/// same-tick writes coalesce into at most one outgoing navigation.
///
/// # Examples
///
/// ```
/// use querybind_params::{MemoryRouter, QueryParams};
/// use std::rc::Rc;
///
/// let router = Rc::new(MemoryRouter::new("https://example.com/?offset=10").unwrap());
/// let params = QueryParams::new(router.snapshot(), router.clone());
///
/// let offset = params.uint_param("offset", 0);
/// assert_eq!(offset.get(), 10);
///
/// offset.set(50);
/// assert!(params.flush().unwrap());
/// assert_eq!(router.current_url().query(), Some("offset=50"));
/// ```
pub struct QueryParams {
	snapshot: Signal<QueryParamSnapshot>,
	coalescer: Rc<UpdateCoalescer>,
	router: Rc<dyn Router>,
	scope: Scope,
}

impl QueryParams {
	/// Create a context with its own scope.
	pub fn new(initial: QueryParamSnapshot, router: Rc<dyn Router>) -> Self {
		Self::with_scope(initial, router, Scope::new())
	}

	/// Create a context whose bindings tear down with a caller-provided
	/// scope.
	pub fn with_scope(initial: QueryParamSnapshot, router: Rc<dyn Router>, scope: Scope) -> Self {
		Self {
			snapshot: Signal::new(initial),
			coalescer: Rc::new(UpdateCoalescer::new()),
			router,
			scope,
		}
	}

	/// The scope all of this context's bindings are tied to.
	pub fn scope(&self) -> &Scope {
		&self.scope
	}

	/// The current snapshot.
	pub fn snapshot(&self) -> QueryParamSnapshot {
		self.snapshot.get()
	}

	/// Apply a new URL snapshot - the consumed change stream.
	///
	/// Every binding re-decodes its key from the new snapshot and
	/// republishes if the decoded value changed. A snapshot equal to the
	/// current one is a no-op.
	pub fn handle_navigation(&self, snapshot: QueryParamSnapshot) {
		trace!(keys = snapshot.len(), "applying navigation snapshot");
		self.snapshot.set(snapshot);
	}

	/// Whether any binding has written since the last flush.
	pub fn has_pending(&self) -> bool {
		self.coalescer.has_pending()
	}

	/// Flush the tick's pending writes as one navigation.
	///
	/// Called by the host once per scheduling tick. Returns `Ok(false)`
	/// without touching the router when nothing was written. The emitted
	/// request replaces the history entry, merges with existing parameters,
	/// and preserves the fragment.
	pub fn flush(&self) -> Result<bool> {
		if self.scope.is_destroyed() {
			// Teardown renders pending writes inert.
			self.coalescer.take();
			return Ok(false);
		}
		let Some(query_params) = self.coalescer.take() else {
			return Ok(false);
		};
		debug!(
			count = query_params.len(),
			keys = ?query_params.keys().collect::<Vec<_>>(),
			"flushing coalesced query-parameter update"
		);
		self.router.navigate(NavigationRequest::merge_replace(query_params))?;
		Ok(true)
	}

	/// The generic binding factory: a required parameter with a caller
	/// default, decoded through `codec`.
	pub fn bind_param<C>(&self, key: &str, codec: C, default: C::Value) -> ParamBinding<C::Value>
	where
		C: ParamCodec + 'static,
		C::Value: Clone + 'static,
	{
		let codec = Rc::new(codec);
		let decode: DecodeFn<C::Value> = {
			let codec = codec.clone();
			Rc::new(move |raw: &[String]| codec.decode(raw).unwrap_or_else(|| default.clone()))
		};
		let encode: EncodeFn<C::Value> = Rc::new(move |value| codec.encode(value));
		ParamBinding::bind(
			key.to_string(),
			decode,
			encode,
			&self.snapshot,
			self.coalescer.clone(),
			self.scope.clone(),
		)
	}

	/// The optional counterpart of [`QueryParams::bind_param`]: absent or
	/// undecodable input reads as `None`, and writing `None` removes the
	/// key from the URL.
	pub fn bind_optional<C>(&self, key: &str, codec: C) -> ParamBinding<Option<C::Value>>
	where
		C: ParamCodec + 'static,
		C::Value: Clone + 'static,
	{
		let codec = Rc::new(codec);
		let decode: DecodeFn<Option<C::Value>> = {
			let codec = codec.clone();
			Rc::new(move |raw: &[String]| codec.decode(raw))
		};
		let encode: EncodeFn<Option<C::Value>> = Rc::new(move |value| match value {
			Some(inner) => codec.encode(inner),
			None => ParamPayload::Absent,
		});
		ParamBinding::bind(
			key.to_string(),
			decode,
			encode,
			&self.snapshot,
			self.coalescer.clone(),
			self.scope.clone(),
		)
	}

	/// String parameter with a default.
	pub fn param(&self, key: &str, default: impl Into<String>) -> ParamBinding<String> {
		self.bind_param(key, StringCodec, default.into())
	}

	pub fn optional_param(&self, key: &str) -> ParamBinding<Option<String>> {
		self.bind_optional(key, StringCodec)
	}

	/// Numeric parameter with unary-coercion semantics; see
	/// [`FloatCodec`](crate::codec::FloatCodec) for the `NaN` caveat.
	pub fn float_param(&self, key: &str, default: f64) -> ParamBinding<f64> {
		self.bind_param(key, FloatCodec, default)
	}

	pub fn optional_float_param(&self, key: &str) -> ParamBinding<Option<f64>> {
		self.bind_optional(key, FloatCodec)
	}

	/// Boolean parameter; only the literal `"true"` decodes `true`.
	pub fn bool_param(&self, key: &str, default: bool) -> ParamBinding<bool> {
		self.bind_param(key, BoolCodec, default)
	}

	pub fn optional_bool_param(&self, key: &str) -> ParamBinding<Option<bool>> {
		self.bind_optional(key, BoolCodec)
	}

	/// Unsigned integer parameter with strict validation - malformed input
	/// falls back to `default`.
	pub fn uint_param(&self, key: &str, default: u64) -> ParamBinding<u64> {
		self.bind_param(key, UIntCodec, default)
	}

	pub fn optional_uint_param(&self, key: &str) -> ParamBinding<Option<u64>> {
		self.bind_optional(key, UIntCodec)
	}

	/// Multi-valued parameter, each value cast into `T`. An absent key
	/// reads as an empty vector.
	pub fn array_param<T>(&self, key: &str) -> ParamBinding<Vec<T>>
	where
		T: From<String> + ToString + Clone + 'static,
	{
		self.bind_param(key, ArrayCodec::new(CastCodec::<T>::new()), Vec::new())
	}

	/// Single-valued parameter cast into `T` without validation.
	pub fn cast_param<T>(&self, key: &str, default: T) -> ParamBinding<T>
	where
		T: From<String> + ToString + Clone + 'static,
	{
		self.bind_param(key, CastCodec::new(), default)
	}

	pub fn optional_cast_param<T>(&self, key: &str) -> ParamBinding<Option<T>>
	where
		T: From<String> + ToString + Clone + 'static,
	{
		self.bind_optional(key, CastCodec::<T>::new())
	}

	/// Single-valued parameter decoded through a custom mapping function.
	pub fn map_param<T, F>(&self, key: &str, map: F, default: T) -> ParamBinding<T>
	where
		T: ToString + Clone + 'static,
		F: Fn(&str) -> T + 'static,
	{
		self.bind_param(key, MapCodec::new(map), default)
	}

	pub fn optional_map_param<T, F>(&self, key: &str, map: F) -> ParamBinding<Option<T>>
	where
		T: ToString + Clone + 'static,
		F: Fn(&str) -> T + 'static,
	{
		self.bind_optional(key, MapCodec::new(map))
	}
}

impl core::fmt::Debug for QueryParams {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("QueryParams")
			.field("snapshot", &self.snapshot)
			.field("pending", &self.coalescer.has_pending())
			.field("destroyed", &self.scope.is_destroyed())
			.finish()
	}
}
