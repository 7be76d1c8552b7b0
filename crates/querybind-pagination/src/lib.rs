//! # Querybind Pagination
//!
//! Offset/limit/sorting pagination as one composite binding over URL query
//! parameters.
//!
//! [`PaginationBinding`] composes three [`querybind_params`] bindings -
//! `offset`, `limit`, and `sorting` - into a single [`Pagination`] value
//! that reads and writes atomically: a composite write reaches the URL as
//! one coalesced navigation. Reset sources model the "new search goes back
//! to page one" policy, and [`PagedQuery`] packages the common
//! free-text-search-plus-listing shape.
//!
//! ## Example
//!
//! ```
//! use querybind_pagination::{paginate, Pagination, PaginationBinding, SortKey};
//! use querybind_params::{MemoryRouter, QueryParams};
//! use std::rc::Rc;
//!
//! let router = Rc::new(MemoryRouter::new("https://example.com/?sorting=-year").unwrap());
//! let params = QueryParams::new(router.snapshot(), router.clone());
//!
//! let binding = PaginationBinding::<SortKey>::new(&params);
//! assert_eq!(binding.sorting(), vec![SortKey::desc("year")]);
//!
//! // Serve the first page of an in-memory collection.
//! let items: Vec<u32> = (0..100).collect();
//! let page = paginate(&items, &binding.get());
//! assert_eq!(page.len(), 25);
//! assert_eq!(page.count, 100);
//! ```

pub mod binding;
pub mod config;
pub mod page;
pub mod sort;

pub use binding::{PagedQuery, PaginationBinding};
pub use config::PaginationConfig;
pub use page::{paginate, Page, Pagination};
pub use sort::{SortDirection, SortKey};
