//! The pagination aggregate: three parameter bindings behind one value.

use core::cell::Cell;
use std::rc::Rc;

use querybind_params::codec::ParamCodec;
use querybind_params::{ParamBinding, ParamPayload, QueryParams};
use querybind_reactive::{Scope, Signal, Subscription};
use tracing::trace;

use crate::config::PaginationConfig;
use crate::page::Pagination;
use crate::sort::SortKey;

/// Page-size codec: strict unsigned parse, zero rejected, clamped to the
/// configured maximum. Rejection falls back to the default limit, which
/// keeps `limit > 0` by construction.
struct LimitCodec {
	max: Option<u64>,
}

impl ParamCodec for LimitCodec {
	type Value = u64;

	fn decode(&self, raw: &[String]) -> Option<u64> {
		match raw {
			[value] => {
				let limit: u64 = value.trim().parse().ok()?;
				if limit == 0 {
					return None;
				}
				Some(match self.max {
					Some(max) => limit.min(max),
					None => limit,
				})
			}
			_ => None,
		}
	}

	fn encode(&self, value: &u64) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}

/// A composite read/write binding over the `offset`, `limit`, and `sorting`
/// query parameters.
///
/// Reading assembles the three constituents into one [`Pagination`] value,
/// reassembled whenever any constituent changes. Writing decomposes a
/// composite value back into the constituent bindings; because all three
/// writes land in the same coalescer tick, a composite write reaches the URL
/// as a single navigation.
///
/// Reset sources registered with [`PaginationBinding::reset_offset_on`]
/// force the offset back to `0` whenever they change - the "new search
/// invalidates the current page" policy. The reset propagates synchronously,
/// so trigger subscribers registered after the reset source observe the
/// zeroed offset in the same cycle.
///
/// # Examples
///
/// ```
/// use querybind_pagination::{Pagination, PaginationBinding, SortKey};
/// use querybind_params::{MemoryRouter, QueryParams};
/// use std::rc::Rc;
///
/// let router =
///     Rc::new(MemoryRouter::new("https://example.com/?offset=10&limit=25&sorting=title").unwrap());
/// let params = QueryParams::new(router.snapshot(), router.clone());
///
/// let pagination = PaginationBinding::<SortKey>::new(&params);
/// assert_eq!(
///     pagination.get(),
///     Pagination::new(10, 25).with_sorting(vec![SortKey::asc("title")]),
/// );
/// ```
pub struct PaginationBinding<S: 'static = SortKey> {
	offset: ParamBinding<u64>,
	limit: ParamBinding<u64>,
	sorting: ParamBinding<Vec<S>>,
	composite: Signal<Pagination<S>>,
	scope: Scope,
}

impl<S> PaginationBinding<S>
where
	S: From<String> + ToString + Clone + PartialEq + 'static,
{
	/// Bind with the default parameter names (`offset`, `limit`, `sorting`)
	/// and defaults (`0`, `25`, empty).
	pub fn new(params: &QueryParams) -> Self {
		Self::with_config(params, PaginationConfig::default())
	}

	pub fn with_config(params: &QueryParams, config: PaginationConfig) -> Self {
		let default_limit = config.clamp_limit(config.default_limit).max(1);
		let offset = params.uint_param(&config.offset_param, 0);
		let limit = params.bind_param(
			&config.limit_param,
			LimitCodec {
				max: config.max_limit,
			},
			default_limit,
		);
		let sorting = params.array_param::<S>(&config.sorting_param);
		let scope = params.scope().clone();

		let composite = Signal::new(Pagination {
			offset: offset.get(),
			limit: limit.get(),
			sorting: sorting.get(),
		});

		// Guards the two directions against re-entering each other while a
		// composite write is being decomposed.
		let decomposing = Rc::new(Cell::new(false));

		{
			let offset = offset.clone();
			let limit = limit.clone();
			let sorting = sorting.clone();
			let decomposing = decomposing.clone();
			composite
				.subscribe(move |pagination: &Pagination<S>| {
					trace!(
						offset = pagination.offset,
						limit = pagination.limit,
						"decomposing pagination write"
					);
					decomposing.set(true);
					offset.set(pagination.offset);
					limit.set(pagination.limit);
					sorting.set(pagination.sorting.clone());
					decomposing.set(false);
				})
				.bind_to(&scope);
		}

		let recompose: Rc<dyn Fn()> = {
			let offset = offset.clone();
			let limit = limit.clone();
			let sorting = sorting.clone();
			let composite = composite.clone();
			let decomposing = decomposing.clone();
			Rc::new(move || {
				if decomposing.get() {
					return;
				}
				composite.set(Pagination {
					offset: offset.get(),
					limit: limit.get(),
					sorting: sorting.get(),
				});
			})
		};
		{
			let recompose = recompose.clone();
			offset.subscribe(move |_| recompose()).bind_to(&scope);
		}
		{
			let recompose = recompose.clone();
			limit.subscribe(move |_| recompose()).bind_to(&scope);
		}
		{
			let recompose = recompose.clone();
			sorting.subscribe(move |_| recompose()).bind_to(&scope);
		}

		Self {
			offset,
			limit,
			sorting,
			composite,
			scope,
		}
	}

	/// Current composite pagination value.
	pub fn get(&self) -> Pagination<S> {
		self.composite.get()
	}

	/// Write a composite value; the three constituent parameters update
	/// atomically in the next flush. No-op after scope teardown.
	pub fn set(&self, pagination: Pagination<S>) -> bool {
		if self.scope.is_destroyed() {
			return false;
		}
		self.composite.set(pagination)
	}

	pub fn update<F>(&self, f: F) -> bool
	where
		F: FnOnce(&mut Pagination<S>),
	{
		if self.scope.is_destroyed() {
			return false;
		}
		self.composite.update(f)
	}

	/// Observe composite changes, from local writes, URL changes, or reset
	/// triggers alike.
	pub fn subscribe(&self, f: impl Fn(&Pagination<S>) + 'static) -> Subscription {
		self.composite.subscribe(f)
	}

	/// The composite signal, for handing to other aggregates.
	pub fn signal(&self) -> Signal<Pagination<S>> {
		self.composite.clone()
	}

	pub fn offset(&self) -> u64 {
		self.offset.get()
	}

	pub fn set_offset(&self, offset: u64) -> bool {
		self.offset.set(offset)
	}

	pub fn limit(&self) -> u64 {
		self.limit.get()
	}

	pub fn set_limit(&self, limit: u64) -> bool {
		self.limit.set(limit)
	}

	pub fn sorting(&self) -> Vec<S> {
		self.sorting.get()
	}

	pub fn set_sorting(&self, sorting: Vec<S>) -> bool {
		self.sorting.set(sorting)
	}

	/// Register an external change source that invalidates the current
	/// page.
	///
	/// Whenever `trigger` changes, the offset is forced back to `0`; limit
	/// and sorting are untouched. The reset runs synchronously inside the
	/// trigger's notification, so consumers subscribed to the trigger after
	/// this call - or to the composite - read the zeroed offset in the same
	/// cycle. Register reset sources before dependent consumers.
	pub fn reset_offset_on<U: Clone + 'static>(&self, trigger: &Signal<U>) -> &Self {
		let offset = self.offset.clone();
		trigger
			.subscribe(move |_| {
				trace!("reset source changed, forcing offset to 0");
				offset.set(0);
			})
			.bind_to(&self.scope);
		self
	}
}

impl<S: core::fmt::Debug + 'static> core::fmt::Debug for PaginationBinding<S> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("PaginationBinding")
			.field("value", &self.composite)
			.finish()
	}
}

/// A free-text query bound to `query`, bundled with a pagination aggregate
/// that resets to the first page whenever the query changes.
///
/// # Examples
///
/// ```
/// use querybind_pagination::{PagedQuery, SortKey};
/// use querybind_params::{MemoryRouter, QueryParams};
/// use std::rc::Rc;
///
/// let router = Rc::new(MemoryRouter::new("https://example.com/?offset=50").unwrap());
/// let params = QueryParams::new(router.snapshot(), router.clone());
///
/// let listing = PagedQuery::<SortKey>::new(&params);
/// assert_eq!(listing.pagination().offset(), 50);
///
/// listing.set_query("rust");
/// assert_eq!(listing.pagination().offset(), 0);
/// ```
pub struct PagedQuery<S: 'static = SortKey> {
	query: ParamBinding<String>,
	pagination: PaginationBinding<S>,
}

impl<S> PagedQuery<S>
where
	S: From<String> + ToString + Clone + PartialEq + 'static,
{
	pub fn new(params: &QueryParams) -> Self {
		Self::with_config(params, "query", PaginationConfig::default())
	}

	pub fn with_config(params: &QueryParams, query_param: &str, config: PaginationConfig) -> Self {
		let query = params.param(query_param, "");
		let pagination = PaginationBinding::with_config(params, config);
		pagination.reset_offset_on(&query.signal());
		Self { query, pagination }
	}

	pub fn query(&self) -> String {
		self.query.get()
	}

	pub fn set_query(&self, query: impl Into<String>) -> bool {
		self.query.set(query.into())
	}

	pub fn query_binding(&self) -> &ParamBinding<String> {
		&self.query
	}

	pub fn pagination(&self) -> &PaginationBinding<S> {
		&self.pagination
	}
}
