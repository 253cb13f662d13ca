//! Connection descriptor for a single kernel session.
//!
//! A [`ConnectionInfo`] is built once by whoever owns the session and then
//! only read: the channel establisher derives endpoint addresses from it and
//! the persistence layer writes it into a connection file. Host and transport
//! are validated at construction so a bad descriptor never reaches a socket.

use crate::channel::ChannelRole;
use crate::error::DescriptorError;
use crate::transport::Transport;

/// Ports of the five kernel channels.
///
/// A zero port means "not assigned yet". It survives persistence unchanged;
/// the runtime refuses to dial a zero TCP port.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ChannelPorts {
	pub shell: u16,
	pub iopub: u16,
	pub stdin: u16,
	pub control: u16,
	pub hb: u16,
}

impl ChannelPorts {
	/// Port selected for `role`.
	pub fn get(&self, role: ChannelRole) -> u16 {
		match role {
			ChannelRole::Shell => self.shell,
			ChannelRole::Control => self.control,
			ChannelRole::Stdin => self.stdin,
			ChannelRole::Iopub => self.iopub,
			ChannelRole::Heartbeat => self.hb,
		}
	}

	fn slot(&mut self, role: ChannelRole) -> &mut u16 {
		match role {
			ChannelRole::Shell => &mut self.shell,
			ChannelRole::Control => &mut self.control,
			ChannelRole::Stdin => &mut self.stdin,
			ChannelRole::Iopub => &mut self.iopub,
			ChannelRole::Heartbeat => &mut self.hb,
		}
	}

	/// Returns `true` when every channel has a non-zero port.
	pub fn all_assigned(&self) -> bool {
		ChannelRole::ALL.iter().all(|role| self.get(*role) != 0)
	}
}

/// Transport, host and per-channel ports of one kernel session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConnectionInfo {
	transport: Transport,
	host: String,
	kernel_name: String,
	ports: ChannelPorts,
}

impl ConnectionInfo {
	/// Creates a validated descriptor.
	pub fn new(
		transport: Transport,
		host: impl Into<String>,
		kernel_name: impl Into<String>,
		ports: ChannelPorts,
	) -> Result<Self, DescriptorError> {
		let host = host.into();
		validate_host(transport, &host)?;
		Ok(Self { transport, host, kernel_name: kernel_name.into(), ports })
	}

	/// Starts a builder defaulting to `tcp` on `127.0.0.1` with unassigned ports.
	pub fn builder() -> ConnectionInfoBuilder {
		ConnectionInfoBuilder::default()
	}

	pub fn transport(&self) -> Transport {
		self.transport
	}

	pub fn host(&self) -> &str {
		&self.host
	}

	pub fn kernel_name(&self) -> &str {
		&self.kernel_name
	}

	pub fn ports(&self) -> &ChannelPorts {
		&self.ports
	}

	pub fn port(&self, role: ChannelRole) -> u16 {
		self.ports.get(role)
	}

	/// Endpoint address for `port` on this descriptor's transport and host.
	///
	/// TCP yields `tcp://<host>:<port>`; any other transport yields
	/// `<transport>://<host>-<port>`.
	pub fn endpoint(&self, port: u16) -> String {
		if self.transport.is_tcp() {
			format!("tcp://{}:{}", self.host, port)
		} else {
			format!("{}://{}-{}", self.transport, self.host, port)
		}
	}

	/// Endpoint address of the channel playing `role`.
	pub fn channel_endpoint(&self, role: ChannelRole) -> String {
		self.endpoint(self.port(role))
	}
}

/// Builder for [`ConnectionInfo`].
#[derive(Debug, Clone)]
pub struct ConnectionInfoBuilder {
	transport: Transport,
	host: String,
	kernel_name: String,
	ports: ChannelPorts,
}

impl Default for ConnectionInfoBuilder {
	fn default() -> Self {
		Self {
			transport: Transport::Tcp,
			host: "127.0.0.1".to_string(),
			kernel_name: String::new(),
			ports: ChannelPorts::default(),
		}
	}
}

impl ConnectionInfoBuilder {
	pub fn transport(mut self, transport: Transport) -> Self {
		self.transport = transport;
		self
	}

	pub fn host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();
		self
	}

	pub fn kernel_name(mut self, kernel_name: impl Into<String>) -> Self {
		self.kernel_name = kernel_name.into();
		self
	}

	/// Sets the port of a single channel.
	pub fn port(mut self, role: ChannelRole, port: u16) -> Self {
		*self.ports.slot(role) = port;
		self
	}

	pub fn ports(mut self, ports: ChannelPorts) -> Self {
		self.ports = ports;
		self
	}

	pub fn build(self) -> Result<ConnectionInfo, DescriptorError> {
		ConnectionInfo::new(self.transport, self.host, self.kernel_name, self.ports)
	}
}

fn validate_host(transport: Transport, host: &str) -> Result<(), DescriptorError> {
	let reason = if host.is_empty() {
		Some("host is empty")
	} else if host.chars().any(char::is_whitespace) {
		Some("host contains whitespace")
	} else if host.contains("://") {
		Some("host must not include a scheme")
	} else if transport.is_tcp() && host.contains('/') {
		Some("tcp host must not contain '/'")
	} else {
		None
	};

	match reason {
		Some(reason) => Err(DescriptorError::InvalidHost { host: host.to_string(), reason }),
		None => Ok(()),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sample_ports() -> ChannelPorts {
		ChannelPorts { shell: 5555, iopub: 5556, stdin: 5557, control: 5558, hb: 5559 }
	}

	#[test]
	fn tcp_endpoints_for_every_channel() {
		let info = ConnectionInfo::new(Transport::Tcp, "127.0.0.1", "python3", sample_ports()).unwrap();

		assert_eq!(info.endpoint(5555), "tcp://127.0.0.1:5555");
		assert_eq!(info.channel_endpoint(ChannelRole::Shell), "tcp://127.0.0.1:5555");
		assert_eq!(info.channel_endpoint(ChannelRole::Iopub), "tcp://127.0.0.1:5556");
		assert_eq!(info.channel_endpoint(ChannelRole::Stdin), "tcp://127.0.0.1:5557");
		assert_eq!(info.channel_endpoint(ChannelRole::Control), "tcp://127.0.0.1:5558");
		assert_eq!(info.channel_endpoint(ChannelRole::Heartbeat), "tcp://127.0.0.1:5559");
	}

	#[test]
	fn ipc_endpoints_use_port_as_suffix() {
		let info = ConnectionInfo::new(Transport::Ipc, "/tmp/kernel-ab12", "python3", sample_ports()).unwrap();

		for role in ChannelRole::ALL {
			let expected = format!("ipc:///tmp/kernel-ab12-{}", info.port(role));
			assert_eq!(info.channel_endpoint(role), expected, "role {role}");
		}
	}

	#[test]
	fn builder_sets_individual_ports() {
		let info = ConnectionInfo::builder()
			.host("10.0.0.7")
			.kernel_name("ir")
			.port(ChannelRole::Shell, 6000)
			.port(ChannelRole::Heartbeat, 6004)
			.build()
			.unwrap();

		assert_eq!(info.transport(), Transport::Tcp);
		assert_eq!(info.port(ChannelRole::Shell), 6000);
		assert_eq!(info.port(ChannelRole::Heartbeat), 6004);
		assert_eq!(info.port(ChannelRole::Iopub), 0);
		assert!(!info.ports().all_assigned());
		assert_eq!(info.kernel_name(), "ir");
	}

	#[test]
	fn rejects_hosts_that_would_corrupt_the_endpoint() {
		for host in ["", "127.0.0.1 ", "tcp://127.0.0.1", "10.0.0.1/24"] {
			let err = ConnectionInfo::new(Transport::Tcp, host, "", sample_ports()).unwrap_err();
			assert!(matches!(err, DescriptorError::InvalidHost { .. }), "host {host:?}");
		}
	}

	#[test]
	fn ipc_host_may_be_a_path() {
		assert!(ConnectionInfo::new(Transport::Ipc, "/run/user/1000/kernel", "", sample_ports()).is_ok());
	}
}
