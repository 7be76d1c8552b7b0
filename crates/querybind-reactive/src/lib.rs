//! # Querybind Reactive
//!
//! Explicit observer/publisher reactive primitives for querybind.
//!
//! This crate provides the minimal reactive core the rest of the workspace is
//! built on: a [`Signal`] value cell with explicit subscriptions, a RAII
//! [`Subscription`] handle, and a [`Scope`] that ties teardown to a
//! caller-controlled lifetime instead of an ambient runtime.
//!
//! Everything here is single-threaded and synchronous: setting a signal
//! stores the value and then notifies subscribers before returning. There is
//! no dependency tracking, no scheduler, and no thread-local state - callers
//! subscribe explicitly and tear down explicitly.
//!
//! ## Example
//!
//! ```
//! use querybind_reactive::{Scope, Signal};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let scope = Scope::new();
//! let count = Signal::new(0);
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let seen_clone = seen.clone();
//! count
//!     .subscribe(move |n| seen_clone.borrow_mut().push(*n))
//!     .bind_to(&scope);
//!
//! count.set(1);
//! count.set(1); // equal value, no notification
//! count.set(2);
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//!
//! scope.destroy();
//! count.set(3); // subscription torn down with the scope
//! assert_eq!(*seen.borrow(), vec![1, 2]);
//! ```

mod scope;
mod signal;
mod subscription;

pub use scope::Scope;
pub use signal::Signal;
pub use subscription::Subscription;
