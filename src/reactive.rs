//! Explicit observer/publisher reactive primitives.
//!
//! A [`Signal`](crate::Signal) value cell with explicit subscriptions, the
//! RAII [`Subscription`](crate::Subscription) handle, and the
//! [`Scope`](crate::Scope) teardown handle everything else ties its
//! lifetime to.

pub use querybind_reactive::*;
