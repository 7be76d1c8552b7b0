//! Signal - a shared reactive value cell with explicit subscriptions.

use core::cell::RefCell;
use core::fmt;
use std::rc::Rc;

use crate::subscription::Subscription;

type EqualFn<T> = Rc<dyn Fn(&T, &T) -> bool>;
type SubscriberFn<T> = Rc<dyn Fn(&T)>;

struct Inner<T> {
	value: T,
	subscribers: Vec<(u64, SubscriberFn<T>)>,
	next_id: u64,
}

/// A reactive value cell.
///
/// `Signal<T>` holds a value and a list of subscribers. Writing a new value
/// with [`Signal::set`] notifies every subscriber synchronously - but only if
/// the new value differs from the current one under the signal's equality
/// function. By default the equality function is `PartialEq`; use
/// [`Signal::with_equal`] when a custom notion of "unchanged" is needed
/// (querybind's parameter bindings compare encoded payloads this way).
///
/// ## Cloning
///
/// `Signal<T>` is a cheap handle: clones share the same value and subscriber
/// list.
///
/// ## Example
///
/// ```
/// use querybind_reactive::Signal;
///
/// let count = Signal::new(0);
/// assert_eq!(count.get(), 0);
///
/// count.set(42);
/// assert_eq!(count.get(), 42);
///
/// count.update(|n| *n += 1);
/// assert_eq!(count.get(), 43);
/// ```
pub struct Signal<T: 'static> {
	inner: Rc<RefCell<Inner<T>>>,
	equal: EqualFn<T>,
}

impl<T: Clone + 'static> Signal<T> {
	/// Create a signal whose change detection uses `PartialEq`.
	pub fn new(value: T) -> Self
	where
		T: PartialEq,
	{
		Self::with_equal(value, |a, b| a == b)
	}

	/// Create a signal with a custom equality function.
	///
	/// `set` skips both the store and the notification when
	/// `equal(&current, &new)` returns true.
	///
	/// ## Example
	///
	/// ```
	/// use querybind_reactive::Signal;
	///
	/// // Compare floats by their display form, so NaN equals NaN.
	/// let value = Signal::with_equal(f64::NAN, |a: &f64, b: &f64| {
	/// 	a.to_string() == b.to_string()
	/// });
	/// assert!(!value.set(f64::NAN));
	/// assert!(value.set(1.0));
	/// ```
	pub fn with_equal(value: T, equal: impl Fn(&T, &T) -> bool + 'static) -> Self {
		Self {
			inner: Rc::new(RefCell::new(Inner {
				value,
				subscribers: Vec::new(),
				next_id: 0,
			})),
			equal: Rc::new(equal),
		}
	}

	/// Get a clone of the current value.
	pub fn get(&self) -> T {
		self.inner.borrow().value.clone()
	}

	/// Identical to [`Signal::get`]. There is no dependency tracking to
	/// bypass here; the name exists for callers porting from runtimes
	/// where the two reads differ.
	pub fn get_untracked(&self) -> T {
		self.get()
	}

	/// Replace the value, notifying subscribers if it changed.
	///
	/// Returns `true` when the value was stored and subscribers were
	/// notified, `false` when the write was dropped as a no-op under the
	/// signal's equality function.
	pub fn set(&self, value: T) -> bool {
		{
			let inner = self.inner.borrow();
			if (self.equal)(&inner.value, &value) {
				return false;
			}
		}
		self.inner.borrow_mut().value = value.clone();
		self.notify(&value);
		true
	}

	/// Update the value in place through a closure.
	///
	/// The closure receives a copy of the current value to mutate; the result
	/// goes through the same equality gate as [`Signal::set`].
	pub fn update<F>(&self, f: F) -> bool
	where
		F: FnOnce(&mut T),
	{
		let mut value = self.get();
		f(&mut value);
		self.set(value)
	}

	/// Register a subscriber, called synchronously after each effective write.
	///
	/// The returned [`Subscription`] unsubscribes when dropped; call
	/// [`Subscription::detach`] to keep the subscriber alive for the
	/// signal's lifetime, or [`Subscription::bind_to`] to tie it to a scope.
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
		let id = {
			let mut inner = self.inner.borrow_mut();
			inner.next_id += 1;
			let id = inner.next_id;
			inner.subscribers.push((id, Rc::new(f)));
			id
		};
		let weak = Rc::downgrade(&self.inner);
		Subscription::new(move || {
			if let Some(inner) = weak.upgrade() {
				inner.borrow_mut().subscribers.retain(|(sid, _)| *sid != id);
			}
		})
	}

	/// Number of live subscribers, mainly for tests.
	pub fn subscriber_count(&self) -> usize {
		self.inner.borrow().subscribers.len()
	}

	// Subscribers run outside the cell borrow, so a callback may read or
	// even write this signal again.
	fn notify(&self, value: &T) {
		let subscribers: Vec<SubscriberFn<T>> = self
			.inner
			.borrow()
			.subscribers
			.iter()
			.map(|(_, f)| f.clone())
			.collect();
		for subscriber in subscribers {
			subscriber(value);
		}
	}
}

impl<T: 'static> Clone for Signal<T> {
	fn clone(&self) -> Self {
		Self {
			inner: self.inner.clone(),
			equal: self.equal.clone(),
		}
	}
}

impl<T: fmt::Debug + 'static> fmt::Debug for Signal<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("Signal")
			.field("value", &self.inner.borrow().value)
			.field("subscribers", &self.inner.borrow().subscribers.len())
			.finish()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use std::cell::RefCell;

	#[test]
	fn test_signal_creation() {
		let signal = Signal::new(42);
		assert_eq!(signal.get(), 42);
	}

	#[test]
	fn test_signal_set_and_update() {
		let signal = Signal::new(0);
		assert!(signal.set(100));
		assert_eq!(signal.get(), 100);

		signal.update(|n| *n *= 2);
		assert_eq!(signal.get(), 200);
	}

	#[test]
	fn test_signal_clone_shares_value() {
		let signal1 = Signal::new(42);
		let signal2 = signal1.clone();

		signal1.set(100);
		assert_eq!(signal2.get(), 100);
	}

	#[test]
	fn test_equal_value_does_not_notify() {
		let signal = Signal::new(1);
		let count = Rc::new(RefCell::new(0));
		let count_clone = count.clone();
		let _sub = signal.subscribe(move |_| *count_clone.borrow_mut() += 1);

		assert!(!signal.set(1));
		assert_eq!(*count.borrow(), 0);

		assert!(signal.set(2));
		assert_eq!(*count.borrow(), 1);
	}

	#[test]
	fn test_custom_equality() {
		let signal = Signal::with_equal(10, |a: &i32, b: &i32| a.abs() == b.abs());
		assert!(!signal.set(-10));
		assert_eq!(signal.get(), 10);
		assert!(signal.set(11));
	}

	#[test]
	fn test_unsubscribe_on_drop() {
		let signal = Signal::new(0);
		let count = Rc::new(RefCell::new(0));
		let count_clone = count.clone();
		{
			let _sub = signal.subscribe(move |_| *count_clone.borrow_mut() += 1);
			signal.set(1);
		}
		signal.set(2);
		assert_eq!(*count.borrow(), 1);
		assert_eq!(signal.subscriber_count(), 0);
	}

	#[test]
	fn test_subscriber_may_read_signal() {
		let signal = Signal::new(1);
		let observed = Rc::new(RefCell::new(0));
		let observed_clone = observed.clone();
		let handle = signal.clone();
		let _sub = signal.subscribe(move |_| {
			*observed_clone.borrow_mut() = handle.get();
		});

		signal.set(7);
		assert_eq!(*observed.borrow(), 7);
	}

	#[test]
	fn test_reentrant_set_from_subscriber() {
		let signal = Signal::new(0);
		let handle = signal.clone();
		let _sub = signal.subscribe(move |n| {
			if *n < 3 {
				handle.set(n + 1);
			}
		});

		signal.set(1);
		assert_eq!(signal.get(), 3);
	}
}
