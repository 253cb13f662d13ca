//! Error types for descriptor construction and connection file parsing.

use thiserror::Error;

/// A connection descriptor was rejected at construction time.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DescriptorError {
	/// Transport name is not one the kernel protocol defines.
	#[error("unknown transport '{0}' (expected 'tcp' or 'ipc')")]
	UnknownTransport(String),

	/// Host cannot be embedded in an endpoint address.
	#[error("invalid host '{host}': {reason}")]
	InvalidHost { host: String, reason: &'static str },
}

/// A connection file could not be turned back into a record.
#[derive(Debug, Error)]
pub enum FormatError {
	/// Content is not valid JSON.
	#[error("malformed JSON: {0}")]
	Json(#[from] serde_json::Error),

	/// Top-level JSON value is not an object.
	#[error("connection file must contain a JSON object")]
	NotAnObject,

	/// A required field is absent.
	#[error("missing required field `{0}`")]
	MissingField(&'static str),

	/// A required field has the wrong JSON type or is out of range.
	#[error("field `{field}` must be {expected}")]
	InvalidField { field: &'static str, expected: &'static str },

	/// A field parsed but its value fails descriptor validation.
	#[error("field `{field}`: {source}")]
	Descriptor {
		field: &'static str,
		#[source]
		source: DescriptorError,
	},
}

impl FormatError {
	/// Returns the name of the offending field, when the error is tied to one.
	pub fn field(&self) -> Option<&'static str> {
		match self {
			FormatError::MissingField(field) => Some(*field),
			FormatError::InvalidField { field, .. } | FormatError::Descriptor { field, .. } => Some(*field),
			FormatError::Json(_) | FormatError::NotAnObject => None,
		}
	}
}
