//! # Querybind Params
//!
//! Typed, reactive, bidirectional binding between URL query parameters and
//! in-memory application state.
//!
//! The URL's query string is the sole persistence medium here: it survives
//! reloads and is shareable. This crate keeps it in sync with typed state
//! through four cooperating pieces:
//!
//! - [`QueryParamSnapshot`] - an immutable parse of one URL's query string
//! - [`codec`] - pure decode/encode between raw values and typed values;
//!   decoding never errors, malformed input falls back to the caller default
//! - [`ParamBinding`] - a per-key reactive cell created from a
//!   [`QueryParams`] context
//! - [`UpdateCoalescer`] - same-tick writes batched into one outgoing
//!   [`NavigationRequest`], handed to the host [`Router`]
//!
//! ## Example
//!
//! ```
//! use querybind_params::{MemoryRouter, QueryParams};
//! use std::rc::Rc;
//!
//! let router = Rc::new(MemoryRouter::new("https://example.com/?q=rust&offset=20").unwrap());
//! let params = QueryParams::new(router.snapshot(), router.clone());
//!
//! let query = params.param("q", "");
//! let offset = params.uint_param("offset", 0);
//! assert_eq!(query.get(), "rust");
//! assert_eq!(offset.get(), 20);
//!
//! // Same-tick writes coalesce into a single navigation.
//! query.set("tokio".to_string());
//! offset.set(0);
//! params.flush().unwrap();
//! assert_eq!(router.navigations().len(), 1);
//! assert_eq!(router.current_url().query(), Some("offset=0&q=tokio"));
//! ```

pub mod binding;
pub mod coalescer;
pub mod codec;
pub mod context;
pub mod error;
pub mod router;
pub mod snapshot;

pub use binding::ParamBinding;
pub use coalescer::{ParamPayload, UpdateCoalescer};
pub use codec::ParamCodec;
pub use context::QueryParams;
pub use error::{ParamsError, Result};
pub use router::{
	FailingRouter, HistoryMode, MemoryRouter, NavigationRequest, QueryParamsHandling, Router,
};
pub use snapshot::QueryParamSnapshot;
