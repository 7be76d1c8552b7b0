//! Scope - explicit lifetime handle for reactive registrations.

use core::cell::{Cell, RefCell};
use std::rc::Rc;

struct ScopeInner {
	destroyed: Cell<bool>,
	cleanups: RefCell<Vec<Box<dyn FnOnce()>>>,
}

/// A caller-controlled lifetime for subscriptions and other teardown work.
///
/// Consumers create one `Scope` per UI scope (a page, a widget, a test) and
/// destroy it when that scope goes away. Anything registered through
/// [`Scope::on_cleanup`] - most commonly a
/// [`Subscription`](crate::Subscription) via
/// [`Subscription::bind_to`](crate::Subscription::bind_to) - runs exactly
/// once, either at [`Scope::destroy`] or when the last handle is dropped.
///
/// Clones share the same underlying scope.
///
/// ## Example
///
/// ```
/// use querybind_reactive::{Scope, Signal};
///
/// let scope = Scope::new();
/// let signal = Signal::new(0);
/// signal.subscribe(|_| {}).bind_to(&scope);
/// assert_eq!(signal.subscriber_count(), 1);
///
/// scope.destroy();
/// assert_eq!(signal.subscriber_count(), 0);
/// ```
#[derive(Clone)]
pub struct Scope {
	inner: Rc<ScopeInner>,
}

impl Scope {
	pub fn new() -> Self {
		Self {
			inner: Rc::new(ScopeInner {
				destroyed: Cell::new(false),
				cleanups: RefCell::new(Vec::new()),
			}),
		}
	}

	/// Register teardown work.
	///
	/// Runs when the scope is destroyed; runs immediately if the scope is
	/// already destroyed.
	pub fn on_cleanup(&self, f: impl FnOnce() + 'static) {
		if self.inner.destroyed.get() {
			f();
		} else {
			self.inner.cleanups.borrow_mut().push(Box::new(f));
		}
	}

	/// Destroy the scope, running all registered cleanups once.
	///
	/// Subsequent calls are no-ops.
	pub fn destroy(&self) {
		if self.inner.destroyed.replace(true) {
			return;
		}
		let cleanups = core::mem::take(&mut *self.inner.cleanups.borrow_mut());
		for cleanup in cleanups {
			cleanup();
		}
	}

	pub fn is_destroyed(&self) -> bool {
		self.inner.destroyed.get()
	}
}

impl Default for Scope {
	fn default() -> Self {
		Self::new()
	}
}

impl Drop for ScopeInner {
	fn drop(&mut self) {
		// Last handle gone: run any cleanups that destroy() did not.
		if !self.destroyed.replace(true) {
			for cleanup in self.cleanups.take() {
				cleanup();
			}
		}
	}
}
