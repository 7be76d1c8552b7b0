//! Pending-update accumulation across one scheduling tick.

use core::cell::RefCell;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// The encoded raw value for one query-parameter key.
///
/// `Absent` is a real payload: merged into a navigation it removes the key
/// from the URL, which is how optional bindings clear their parameter.
/// Payload equality is the uniform change-detection rule for bindings -
/// scalars compare by their encoded string, arrays element-wise - so two
/// `f64::NAN` writes encode to the same `Single("NaN")` and compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamPayload {
	/// One value, `key=value`
	Single(String),
	/// Repeated values, `key=a&key=b`
	Multi(Vec<String>),
	/// Remove the key from the URL
	Absent,
}

impl ParamPayload {
	/// The values this payload writes into a query string. Empty for
	/// [`ParamPayload::Absent`].
	pub fn values(&self) -> &[String] {
		match self {
			Self::Single(value) => core::slice::from_ref(value),
			Self::Multi(values) => values.as_slice(),
			Self::Absent => &[],
		}
	}

	pub fn is_absent(&self) -> bool {
		matches!(self, Self::Absent)
	}
}

/// Accumulates same-tick writes into one pending update set.
///
/// Bindings enqueue encoded payloads with [`UpdateCoalescer::set`]; the
/// owning context drains the set once per tick with [`UpdateCoalescer::take`]
/// and turns it into a single navigation. The pending set is `Option`-wrapped
/// so "no pending writes" stays distinct from pending writes whose payloads
/// are empty-ish - an empty string, `0`, or `false` is a legitimate update
/// and must flush.
///
/// Within one tick the last write per key wins; writes from different ticks
/// flush as separate navigations in FIFO order.
#[derive(Debug, Default)]
pub struct UpdateCoalescer {
	pending: RefCell<Option<BTreeMap<String, ParamPayload>>>,
}

impl UpdateCoalescer {
	pub fn new() -> Self {
		Self::default()
	}

	/// Merge `{key: payload}` into the pending set, creating it if this is
	/// the first write of the tick. A later write to the same key within the
	/// same tick overwrites this one.
	pub fn set(&self, key: impl Into<String>, payload: ParamPayload) {
		let key = key.into();
		trace!(key = %key, ?payload, "coalescer enqueue");
		self.pending
			.borrow_mut()
			.get_or_insert_with(BTreeMap::new)
			.insert(key, payload);
	}

	/// Drain the pending set for a flush. Returns `None` when nothing was
	/// written this tick.
	pub fn take(&self) -> Option<BTreeMap<String, ParamPayload>> {
		self.pending.borrow_mut().take()
	}

	pub fn has_pending(&self) -> bool {
		self.pending.borrow().is_some()
	}
}
