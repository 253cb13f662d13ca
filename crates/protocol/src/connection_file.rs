//! Connection file record.
//!
//! The record is the rendezvous point between a kernel and every client that
//! wants to join it. Field names, field order and the 4-space indentation are
//! fixed so that any compliant implementation can read what we write:
//!
//! ```json
//! {
//!     "transport": "tcp",
//!     "ip": "127.0.0.1",
//!     "key": "abc123",
//!     "stdin_port": 5557,
//!     "iopub_port": 5556,
//!     "shell_port": 5555,
//!     "hb_port": 5559,
//!     "control_port": 5558,
//!     "signature_scheme": "hmac-sha256",
//!     "kernel_name": "python3"
//! }
//! ```
//!
//! Parsing ignores unknown fields and reports missing or mistyped ones by name.

use std::fmt;

use serde::de::DeserializeOwned;
use serde::ser::Error as _;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_json::ser::PrettyFormatter;

use crate::channel::ChannelRole;
use crate::connection::{ChannelPorts, ConnectionInfo};
use crate::error::FormatError;
use crate::transport::Transport;

/// Signature scheme written when the session owner does not pick one.
pub const DEFAULT_SIGNATURE_SCHEME: &str = "hmac-sha256";

const INDENT: &[u8] = b"    ";

/// Connection descriptor plus the session secret and signing metadata.
#[derive(Clone, PartialEq, Eq)]
pub struct ConnectionFile {
	info: ConnectionInfo,
	key: String,
	signature_scheme: String,
}

/// Borrowed view in wire order.
#[derive(Serialize)]
struct WireRecord<'a> {
	transport: &'static str,
	ip: &'a str,
	key: &'a str,
	stdin_port: u16,
	iopub_port: u16,
	shell_port: u16,
	hb_port: u16,
	control_port: u16,
	signature_scheme: &'a str,
	kernel_name: &'a str,
}

/// Fields as read from disk. Each one is checked by name when the record is built.
#[derive(Deserialize)]
struct RawRecord {
	transport: Option<Value>,
	ip: Option<Value>,
	key: Option<Value>,
	stdin_port: Option<Value>,
	iopub_port: Option<Value>,
	shell_port: Option<Value>,
	hb_port: Option<Value>,
	control_port: Option<Value>,
	signature_scheme: Option<Value>,
	kernel_name: Option<Value>,
}

const STRING: &str = "a string";
const PORT: &str = "an integer between 0 and 65535";

impl ConnectionFile {
	pub fn new(info: ConnectionInfo, key: impl Into<String>, signature_scheme: impl Into<String>) -> Self {
		Self { info, key: key.into(), signature_scheme: signature_scheme.into() }
	}

	pub fn info(&self) -> &ConnectionInfo {
		&self.info
	}

	/// Shared secret. Opaque to this layer.
	pub fn key(&self) -> &str {
		&self.key
	}

	pub fn signature_scheme(&self) -> &str {
		&self.signature_scheme
	}

	pub fn kernel_name(&self) -> &str {
		self.info.kernel_name()
	}

	/// Splits the record into descriptor, key and signature scheme.
	pub fn into_parts(self) -> (ConnectionInfo, String, String) {
		(self.info, self.key, self.signature_scheme)
	}

	fn wire(&self) -> WireRecord<'_> {
		let ports = self.info.ports();
		WireRecord {
			transport: self.info.transport().as_str(),
			ip: self.info.host(),
			key: &self.key,
			stdin_port: ports.stdin,
			iopub_port: ports.iopub,
			shell_port: ports.shell,
			hb_port: ports.hb,
			control_port: ports.control,
			signature_scheme: &self.signature_scheme,
			kernel_name: self.info.kernel_name(),
		}
	}

	/// Encodes the record exactly as it is stored on disk, trailing newline included.
	pub fn to_json_vec(&self) -> serde_json::Result<Vec<u8>> {
		let mut buf = Vec::with_capacity(256);
		let mut ser = serde_json::Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(INDENT));
		self.wire().serialize(&mut ser)?;
		buf.push(b'\n');
		Ok(buf)
	}

	pub fn to_json_string(&self) -> serde_json::Result<String> {
		String::from_utf8(self.to_json_vec()?).map_err(serde_json::Error::custom)
	}

	pub fn from_json_str(s: &str) -> Result<Self, FormatError> {
		Self::from_json_slice(s.as_bytes())
	}

	pub fn from_json_slice(bytes: &[u8]) -> Result<Self, FormatError> {
		let value: Value = serde_json::from_slice(bytes)?;
		Self::from_value(&value)
	}

	/// Builds a record from an already parsed JSON value.
	pub fn from_value(value: &Value) -> Result<Self, FormatError> {
		if !value.is_object() {
			return Err(FormatError::NotAnObject);
		}
		let raw = RawRecord::deserialize(value)?;

		let transport: Transport = field::<String>(raw.transport, "transport", STRING)?
			.parse()
			.map_err(|source| FormatError::Descriptor { field: "transport", source })?;
		let ip: String = field(raw.ip, "ip", STRING)?;
		let key: String = field(raw.key, "key", STRING)?;
		let ports = ChannelPorts {
			shell: port(raw.shell_port, ChannelRole::Shell)?,
			iopub: port(raw.iopub_port, ChannelRole::Iopub)?,
			stdin: port(raw.stdin_port, ChannelRole::Stdin)?,
			control: port(raw.control_port, ChannelRole::Control)?,
			hb: port(raw.hb_port, ChannelRole::Heartbeat)?,
		};
		let signature_scheme: String = field(raw.signature_scheme, "signature_scheme", STRING)?;
		let kernel_name: String = field(raw.kernel_name, "kernel_name", STRING)?;

		let info = ConnectionInfo::new(transport, ip, kernel_name, ports)
			.map_err(|source| FormatError::Descriptor { field: "ip", source })?;
		Ok(Self::new(info, key, signature_scheme))
	}
}

impl fmt::Debug for ConnectionFile {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("ConnectionFile")
			.field("info", &self.info)
			.field("key", &"<redacted>")
			.field("signature_scheme", &self.signature_scheme)
			.finish()
	}
}

/// Absent and `null` fields both count as missing.
fn field<T: DeserializeOwned>(
	value: Option<Value>,
	name: &'static str,
	expected: &'static str,
) -> Result<T, FormatError> {
	let value = value.ok_or(FormatError::MissingField(name))?;
	serde_json::from_value(value).map_err(|_| FormatError::InvalidField { field: name, expected })
}

fn port(value: Option<Value>, role: ChannelRole) -> Result<u16, FormatError> {
	field(value, role.port_field(), PORT)
}
