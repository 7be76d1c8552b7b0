//! Error types for the params crate.

use thiserror::Error;

/// Errors surfaced by the navigation seam.
///
/// Decoding query-parameter values never errors - malformed or missing input
/// falls back to the caller's default. The only fallible operations are URL
/// parsing and handing a navigation to the host router.
#[derive(Debug, Error)]
pub enum ParamsError {
	/// The host router rejected or failed a navigation request
	#[error("Navigation error: {0}")]
	Navigation(String),

	/// A URL could not be parsed
	#[error("Invalid URL: {0}")]
	InvalidUrl(#[from] url::ParseError),
}

pub type Result<T> = core::result::Result<T, ParamsError>;
