//! Transport kinds a kernel can listen on.

use std::fmt;
use std::str::FromStr;

use crate::error::DescriptorError;

/// Transport used by every channel of a kernel session.
///
/// `tcp` endpoints carry a network port. `ipc` endpoints use the port as a
/// filename suffix, so `ipc://kernel-ab12-5555` is a Unix domain socket path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Transport {
	#[default]
	Tcp,
	Ipc,
}

impl Transport {
	/// Wire name as it appears in connection files and endpoint schemes.
	pub fn as_str(self) -> &'static str {
		match self {
			Transport::Tcp => "tcp",
			Transport::Ipc => "ipc",
		}
	}

	pub fn is_tcp(self) -> bool {
		self == Transport::Tcp
	}
}

impl fmt::Display for Transport {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

impl FromStr for Transport {
	type Err = DescriptorError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"tcp" => Ok(Transport::Tcp),
			"ipc" => Ok(Transport::Ipc),
			other => Err(DescriptorError::UnknownTransport(other.to_string())),
		}
	}
}
