//! Query-parameter snapshots, codecs, bindings, and the router seam.
//!
//! The full module tree of the params crate, including the
//! [`codec`](crate::params::codec) module with the built-in codecs for use
//! with [`QueryParams::bind_param`](crate::QueryParams::bind_param).

pub use querybind_params::*;
