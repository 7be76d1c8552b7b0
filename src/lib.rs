//! # Querybind
//!
//! Typed, reactive, bidirectional binding between URL query parameters and
//! in-memory application state.
//!
//! The URL's query string is the sole persistence medium: it survives page
//! reloads and is shareable and bookmarkable. Querybind mirrors it into
//! typed reactive cells and batches writes going the other way, so that any
//! number of same-tick state changes reach the URL as a single
//! replace-history navigation.
//!
//! - **Read path**: URL snapshot -> codec decode -> typed binding value.
//! - **Write path**: binding write -> pending-update coalescer -> one
//!   navigation per tick, merged with existing parameters, fragment
//!   preserved.
//! - **Aggregate**: offset/limit/sorting composed into one pagination
//!   value, with reset-on-trigger semantics for "new search goes back to
//!   page one".
//!
//! Decoding never errors - malformed or missing parameter values fall back
//! to the caller's default, because user-editable URL state must never
//! break the page.
//!
//! ## Feature Flags
//!
//! - `reactive` - explicit observer/publisher primitives (`Signal`,
//!   `Subscription`, `Scope`)
//! - `params` - snapshots, codecs, bindings, the coalescer, and the router
//!   seam (implies `reactive`)
//! - `pagination` - the pagination aggregate (implies `params`)
//! - `full` (default) - everything
//!
//! ## Quick Example
//!
//! ```
//! use querybind::prelude::*;
//! use std::rc::Rc;
//!
//! // The memory router stands in for the host's URL bar.
//! let router = Rc::new(MemoryRouter::new("https://example.com/books?offset=50&q=rust").unwrap());
//! let params = QueryParams::new(router.snapshot(), router.clone());
//!
//! let query = params.param("q", "");
//! let pagination = PaginationBinding::<SortKey>::new(&params);
//! assert_eq!(query.get(), "rust");
//! assert_eq!(pagination.offset(), 50);
//!
//! // Writes coalesce: one navigation, replace history, merge params.
//! query.set("tokio".to_string());
//! pagination.set_offset(0);
//! params.flush().unwrap();
//! assert_eq!(router.navigations().len(), 1);
//! ```

// Module shims over the member crates
#[cfg(feature = "pagination")]
pub mod pagination;
#[cfg(feature = "params")]
pub mod params;
#[cfg(feature = "reactive")]
pub mod reactive;

// Reactive primitives
#[cfg(feature = "reactive")]
pub use querybind_reactive::{Scope, Signal, Subscription};

// Query-parameter bindings
#[cfg(feature = "params")]
pub use querybind_params::{
	FailingRouter, HistoryMode, MemoryRouter, NavigationRequest, ParamBinding, ParamCodec,
	ParamPayload, ParamsError, QueryParamSnapshot, QueryParams, QueryParamsHandling, Router,
	UpdateCoalescer,
};

// Pagination aggregate
#[cfg(feature = "pagination")]
pub use querybind_pagination::{
	paginate, Page, PagedQuery, Pagination, PaginationBinding, PaginationConfig, SortDirection,
	SortKey,
};

/// Convenience imports for the common case.
pub mod prelude {
	#[cfg(feature = "reactive")]
	pub use crate::{Scope, Signal, Subscription};

	#[cfg(feature = "params")]
	pub use crate::{
		MemoryRouter, NavigationRequest, ParamBinding, ParamCodec, ParamPayload,
		QueryParamSnapshot, QueryParams, Router,
	};

	#[cfg(feature = "pagination")]
	pub use crate::{
		paginate, Page, PagedQuery, Pagination, PaginationBinding, PaginationConfig, SortKey,
	};
}
