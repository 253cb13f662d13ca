//! Error types for the kernel connection runtime.

use std::path::PathBuf;
use std::time::Duration;

use kc_protocol::{ChannelRole, FormatError};
use thiserror::Error;
use zeromq::ZmqError;

/// Result type alias for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while publishing a session or opening its channels.
#[derive(Debug, Error)]
pub enum Error {
	/// Connection file could not be created, written, read or removed.
	#[error("I/O error on connection file {}: {source}", path.display())]
	Io {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	/// Record could not be encoded.
	#[error("failed to encode connection file: {0}")]
	Serialize(#[from] serde_json::Error),

	/// Connection file content does not follow the schema.
	#[error("invalid connection file {}: {source}", path.display())]
	Format {
		path: PathBuf,
		#[source]
		source: FormatError,
	},

	/// Socket refused to dial the endpoint.
	#[error("failed to connect {role} channel to {endpoint}: {source}")]
	Connect {
		role: ChannelRole,
		endpoint: String,
		#[source]
		source: ZmqError,
	},

	/// Installing the iopub subscription filter failed.
	#[error("failed to subscribe iopub channel for {endpoint}: {source}")]
	Subscribe {
		endpoint: String,
		#[source]
		source: ZmqError,
	},

	/// Dial did not complete before the connect deadline.
	#[error("timed out after {}ms connecting {role} channel to {endpoint}", timeout.as_millis())]
	Timeout { role: ChannelRole, endpoint: String, timeout: Duration },

	/// Channel port is zero on a transport that needs a real port.
	#[error("{role} channel has no assigned port")]
	UnassignedPort { role: ChannelRole },
}

impl Error {
	/// Returns the channel the error belongs to, for channel-level errors.
	pub fn role(&self) -> Option<ChannelRole> {
		match self {
			Error::Connect { role, .. } | Error::Timeout { role, .. } | Error::UnassignedPort { role } => Some(*role),
			Error::Subscribe { .. } => Some(ChannelRole::Iopub),
			_ => None,
		}
	}

	/// Returns true if this is a connect deadline error.
	pub fn is_timeout(&self) -> bool {
		matches!(self, Error::Timeout { .. })
	}

	/// Returns the connection file path for file-level errors.
	pub fn path(&self) -> Option<&std::path::Path> {
		match self {
			Error::Io { path, .. } | Error::Format { path, .. } => Some(path.as_path()),
			_ => None,
		}
	}
}
