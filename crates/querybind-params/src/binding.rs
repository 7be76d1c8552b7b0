//! Per-key reactive binding between a query parameter and a typed value.

use core::cell::RefCell;
use std::rc::Rc;

use querybind_reactive::{Scope, Signal, Subscription};
use tracing::trace;

use crate::coalescer::{ParamPayload, UpdateCoalescer};
use crate::snapshot::QueryParamSnapshot;

pub(crate) type DecodeFn<T> = Rc<dyn Fn(&[String]) -> T>;
pub(crate) type EncodeFn<T> = Rc<dyn Fn(&T) -> ParamPayload>;

/// A typed reactive mirror of one query parameter.
///
/// Created through the factory methods on
/// [`QueryParams`](crate::QueryParams). The binding initializes from the
/// current snapshot, re-decodes on every snapshot change, and forwards local
/// writes into the shared [`UpdateCoalescer`] for the next flush. Change
/// detection compares encoded payloads, so a write that round-trips to the
/// same query-string value is a no-op on both the signal and the URL.
///
/// The binding's lifetime is tied to its context's
/// [`Scope`](querybind_reactive::Scope): after the scope is destroyed,
/// republishing stops and [`ParamBinding::set`] silently does nothing.
///
/// Handles are cheap to clone; clones share the same cell.
pub struct ParamBinding<T: 'static> {
	key: String,
	value: Signal<T>,
	scope: Scope,
}

impl<T: Clone + 'static> ParamBinding<T> {
	pub(crate) fn bind(
		key: String,
		decode: DecodeFn<T>,
		encode: EncodeFn<T>,
		snapshot: &Signal<QueryParamSnapshot>,
		coalescer: Rc<UpdateCoalescer>,
		scope: Scope,
	) -> Self {
		let initial = {
			let current = snapshot.get();
			decode(current.get_all(&key))
		};
		// Seed the write-loop guard with the initial payload so creating a
		// binding never enqueues a navigation.
		let last_sent = Rc::new(RefCell::new(Some(encode(&initial))));

		let value = Signal::with_equal(initial, {
			let encode = encode.clone();
			move |a: &T, b: &T| encode(a) == encode(b)
		});

		// Read path: re-decode on each snapshot change. The URL is the
		// source of the new value, so the payload is recorded as "sent"
		// before the signal fires - the forwarding subscriber below must
		// not echo it back to the coalescer.
		{
			let key = key.clone();
			let decode = decode.clone();
			let encode = encode.clone();
			let last_sent = last_sent.clone();
			let value = value.clone();
			snapshot
				.subscribe(move |current: &QueryParamSnapshot| {
					let next = decode(current.get_all(&key));
					*last_sent.borrow_mut() = Some(encode(&next));
					if value.set(next) {
						trace!(key = %key, "binding republished from URL change");
					}
				})
				.bind_to(&scope);
		}

		// Write path: forward every effective local write into the
		// coalescer, guarded against echoing the last-sent payload.
		{
			let key = key.clone();
			let last_sent = last_sent.clone();
			value
				.subscribe(move |next: &T| {
					let payload = encode(next);
					{
						let sent = last_sent.borrow();
						if sent.as_ref() == Some(&payload) {
							return;
						}
					}
					*last_sent.borrow_mut() = Some(payload.clone());
					coalescer.set(key.clone(), payload);
				})
				.bind_to(&scope);
		}

		Self { key, value, scope }
	}

	/// The query-parameter key this binding mirrors.
	pub fn key(&self) -> &str {
		&self.key
	}

	/// Current typed value. Pure read, no side effect.
	pub fn get(&self) -> T {
		self.value.get()
	}

	/// Write a new value, scheduling it for the next flush.
	///
	/// The URL does not change synchronously; the write lands in the
	/// pending-update set and goes out with the tick's single navigation.
	/// Returns `false` when the write was dropped - either because the
	/// value is unchanged under payload equality, or because the owning
	/// scope has been destroyed.
	pub fn set(&self, value: T) -> bool {
		if self.scope.is_destroyed() {
			return false;
		}
		self.value.set(value)
	}

	/// Update the value in place through a closure.
	pub fn update<F>(&self, f: F) -> bool
	where
		F: FnOnce(&mut T),
	{
		if self.scope.is_destroyed() {
			return false;
		}
		self.value.update(f)
	}

	/// Observe value changes. Fires for both local writes and URL-driven
	/// republishes.
	pub fn subscribe(&self, f: impl Fn(&T) + 'static) -> Subscription {
		self.value.subscribe(f)
	}

	/// The underlying signal, for composing bindings into aggregates.
	pub fn signal(&self) -> Signal<T> {
		self.value.clone()
	}
}

impl<T: 'static> Clone for ParamBinding<T> {
	fn clone(&self) -> Self {
		Self {
			key: self.key.clone(),
			value: self.value.clone(),
			scope: self.scope.clone(),
		}
	}
}

impl<T: core::fmt::Debug + 'static> core::fmt::Debug for ParamBinding<T> {
	fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
		f.debug_struct("ParamBinding")
			.field("key", &self.key)
			.field("value", &self.value)
			.finish()
	}
}
