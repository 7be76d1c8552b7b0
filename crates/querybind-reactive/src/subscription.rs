//! Subscription - RAII handle for an active subscriber registration.

use crate::scope::Scope;

/// Handle to a subscriber registered on a [`Signal`](crate::Signal).
///
/// Dropping the handle unsubscribes. Use [`Subscription::detach`] to keep the
/// subscriber registered for the signal's lifetime, or
/// [`Subscription::bind_to`] to hand ownership to a [`Scope`] so the
/// subscriber is removed when the scope is destroyed.
pub struct Subscription {
	cancel: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
	pub(crate) fn new(cancel: impl FnOnce() + 'static) -> Self {
		Self {
			cancel: Some(Box::new(cancel)),
		}
	}

	/// Remove the subscriber now.
	pub fn unsubscribe(mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}

	/// Keep the subscriber registered without holding a handle.
	pub fn detach(mut self) {
		self.cancel = None;
	}

	/// Tie the subscriber's lifetime to `scope`.
	///
	/// The subscription is dropped (and therefore unsubscribed) when the
	/// scope is destroyed. If the scope is already destroyed, the subscriber
	/// is removed immediately.
	pub fn bind_to(self, scope: &Scope) {
		scope.on_cleanup(move || drop(self));
	}
}

impl Drop for Subscription {
	fn drop(&mut self) {
		if let Some(cancel) = self.cancel.take() {
			cancel();
		}
	}
}

#[cfg(test)]
mod tests {
	use crate::{Scope, Signal};
	use std::cell::RefCell;
	use std::rc::Rc;

	#[test]
	fn test_detach_keeps_subscriber() {
		let signal = Signal::new(0);
		let count = Rc::new(RefCell::new(0));
		let count_clone = count.clone();
		signal
			.subscribe(move |_| *count_clone.borrow_mut() += 1)
			.detach();

		signal.set(1);
		assert_eq!(*count.borrow(), 1);
	}

	#[test]
	fn test_explicit_unsubscribe() {
		let signal = Signal::new(0);
		let count = Rc::new(RefCell::new(0));
		let count_clone = count.clone();
		let sub = signal.subscribe(move |_| *count_clone.borrow_mut() += 1);

		sub.unsubscribe();
		signal.set(1);
		assert_eq!(*count.borrow(), 0);
	}

	#[test]
	fn test_bind_to_destroyed_scope_unsubscribes_now() {
		let signal = Signal::new(0);
		let scope = Scope::new();
		scope.destroy();

		let count = Rc::new(RefCell::new(0));
		let count_clone = count.clone();
		signal
			.subscribe(move |_| *count_clone.borrow_mut() += 1)
			.bind_to(&scope);

		signal.set(1);
		assert_eq!(*count.borrow(), 0);
		assert_eq!(signal.subscriber_count(), 0);
	}
}
