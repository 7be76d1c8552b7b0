//! Codecs between raw query-parameter values and typed values.

use core::marker::PhantomData;

use crate::coalescer::ParamPayload;

/// Decode/encode between the raw string values of one query parameter and a
/// typed value.
///
/// Decoding never errors: `decode` returns `None` when the raw input does
/// not yield a value (absent parameter, wrong multiplicity, malformed input
/// for the stricter codecs), and the binding substitutes the caller's
/// default. This favors availability over strictness - a user-edited URL
/// must never break the page.
pub trait ParamCodec {
	type Value;

	/// Decode the ordered raw values for one key. `None` means the caller
	/// default applies.
	fn decode(&self, raw: &[String]) -> Option<Self::Value>;

	/// Encode a typed value back into its raw query-string payload.
	fn encode(&self, value: &Self::Value) -> ParamPayload;
}

/// Single string value passthrough.
///
/// Decodes only when exactly one value is present; zero or repeated values
/// fall back to the default.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringCodec;

impl ParamCodec for StringCodec {
	type Value = String;

	fn decode(&self, raw: &[String]) -> Option<String> {
		match raw {
			[value] => Some(value.clone()),
			_ => None,
		}
	}

	fn encode(&self, value: &String) -> ParamPayload {
		ParamPayload::Single(value.clone())
	}
}

/// Single numeric value with unary-coercion semantics.
///
/// An empty or whitespace-only value decodes to `0.0`; any other value that
/// fails to parse decodes to `NaN`. `NaN` is an accepted value here, not an
/// error - call sites that cannot tolerate it should use [`UIntCodec`] or
/// validate downstream.
///
/// # Examples
///
/// ```
/// use querybind_params::codec::{FloatCodec, ParamCodec};
///
/// let codec = FloatCodec;
/// assert_eq!(codec.decode(&["12.5".into()]), Some(12.5));
/// assert_eq!(codec.decode(&["".into()]), Some(0.0));
/// assert!(codec.decode(&["abc".into()]).unwrap().is_nan());
/// assert_eq!(codec.decode(&[]), None);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct FloatCodec;

impl ParamCodec for FloatCodec {
	type Value = f64;

	fn decode(&self, raw: &[String]) -> Option<f64> {
		match raw {
			[value] => {
				let trimmed = value.trim();
				if trimmed.is_empty() {
					Some(0.0)
				} else {
					Some(trimmed.parse().unwrap_or(f64::NAN))
				}
			}
			_ => None,
		}
	}

	fn encode(&self, value: &f64) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}

/// Single boolean value, strict equality with the literal `"true"`.
///
/// `"TRUE"`, `"1"`, `"yes"` and everything else decode `false`.
#[derive(Debug, Clone, Copy, Default)]
pub struct BoolCodec;

impl ParamCodec for BoolCodec {
	type Value = bool;

	fn decode(&self, raw: &[String]) -> Option<bool> {
		match raw {
			[value] => Some(value == "true"),
			_ => None,
		}
	}

	fn encode(&self, value: &bool) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}

/// Single unsigned integer value with strict validation.
///
/// Malformed input falls back to the default instead of producing a
/// sentinel, which makes this the right constituent codec for offsets and
/// limits where `NaN` has no representation.
#[derive(Debug, Clone, Copy, Default)]
pub struct UIntCodec;

impl ParamCodec for UIntCodec {
	type Value = u64;

	fn decode(&self, raw: &[String]) -> Option<u64> {
		match raw {
			[value] => value.trim().parse().ok(),
			_ => None,
		}
	}

	fn encode(&self, value: &u64) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}

/// Every raw value mapped through an element codec, order preserved.
///
/// An empty raw list decodes to an empty vector - a valid value, never
/// "missing" - so an array binding reads `[]` from a URL without its key.
/// Elements the inner codec rejects are dropped.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArrayCodec<C> {
	element: C,
}

impl<C> ArrayCodec<C> {
	pub fn new(element: C) -> Self {
		Self { element }
	}
}

impl<C: ParamCodec> ParamCodec for ArrayCodec<C> {
	type Value = Vec<C::Value>;

	fn decode(&self, raw: &[String]) -> Option<Vec<C::Value>> {
		Some(
			raw.iter()
				.filter_map(|value| self.element.decode(core::slice::from_ref(value)))
				.collect(),
		)
	}

	fn encode(&self, values: &Vec<C::Value>) -> ParamPayload {
		let mut encoded = Vec::with_capacity(values.len());
		for value in values {
			encoded.extend(self.element.encode(value).values().iter().cloned());
		}
		ParamPayload::Multi(encoded)
	}
}

/// Identity decode into any string-convertible type.
///
/// The cast performs no membership validation - a URL may carry a value
/// outside the intended literal set and callers validate separately.
#[derive(Debug, Clone, Copy)]
pub struct CastCodec<T> {
	_marker: PhantomData<T>,
}

impl<T> Default for CastCodec<T> {
	fn default() -> Self {
		Self {
			_marker: PhantomData,
		}
	}
}

impl<T> CastCodec<T> {
	pub fn new() -> Self {
		Self::default()
	}
}

impl<T: From<String> + ToString> ParamCodec for CastCodec<T> {
	type Value = T;

	fn decode(&self, raw: &[String]) -> Option<T> {
		match raw {
			[value] => Some(T::from(value.clone())),
			_ => None,
		}
	}

	fn encode(&self, value: &T) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}

/// Custom single-value mapping function.
///
/// The generic seam behind [`QueryParams::map_param`]: decode runs the
/// caller's closure over the single raw value, encode stringifies.
///
/// [`QueryParams::map_param`]: crate::QueryParams::map_param
pub struct MapCodec<T, F> {
	map: F,
	_marker: PhantomData<T>,
}

impl<T, F: Fn(&str) -> T> MapCodec<T, F> {
	pub fn new(map: F) -> Self {
		Self {
			map,
			_marker: PhantomData,
		}
	}
}

impl<T: ToString, F: Fn(&str) -> T> ParamCodec for MapCodec<T, F> {
	type Value = T;

	fn decode(&self, raw: &[String]) -> Option<T> {
		match raw {
			[value] => Some((self.map)(value)),
			_ => None,
		}
	}

	fn encode(&self, value: &T) -> ParamPayload {
		ParamPayload::Single(value.to_string())
	}
}
