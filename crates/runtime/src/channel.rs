//! Channel establishment.
//!
//! Every kernel channel is opened the same way: look up the role's port and
//! socket pattern, compute the endpoint from the descriptor, create the
//! socket, and dial (never bind) the kernel. The only per-role difference is
//! that iopub installs the empty subscription filter before dialling, without
//! which a SUB socket drops every message it receives.
//!
//! Dialling is bounded by [`ConnectOptions::timeout`]. A TCP dial to a kernel
//! that is not listening keeps retrying inside the socket, so the deadline is
//! what turns a dead kernel into an error.

use std::fmt;
use std::time::Duration;

use kc_protocol::{ChannelRole, ConnectionInfo, SocketKind};
use tracing::debug;
use zeromq::{DealerSocket, ReqSocket, Socket, SubSocket};

use crate::error::{Error, Result};

/// Default connect deadline per channel.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);

/// Options applied when dialling a channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectOptions {
	/// Maximum time a single dial may take.
	pub timeout: Duration,
}

impl Default for ConnectOptions {
	fn default() -> Self {
		Self { timeout: DEFAULT_CONNECT_TIMEOUT }
	}
}

impl ConnectOptions {
	pub fn with_timeout(timeout: Duration) -> Self {
		Self { timeout }
	}
}

/// Socket of one of the three client-side patterns.
pub enum ChannelSocket {
	Dealer(DealerSocket),
	Sub(SubSocket),
	Req(ReqSocket),
}

impl ChannelSocket {
	pub fn kind(&self) -> SocketKind {
		match self {
			ChannelSocket::Dealer(_) => SocketKind::Dealer,
			ChannelSocket::Sub(_) => SocketKind::Sub,
			ChannelSocket::Req(_) => SocketKind::Req,
		}
	}
}

impl fmt::Debug for ChannelSocket {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ChannelSocket").field(&self.kind()).finish()
	}
}

/// Connected socket bound to one kernel channel.
///
/// Owned exclusively by the caller that opened it. Dropping the handle closes
/// the socket.
pub struct KernelChannel {
	role: ChannelRole,
	endpoint: String,
	socket: ChannelSocket,
}

impl KernelChannel {
	pub fn role(&self) -> ChannelRole {
		self.role
	}

	pub fn kind(&self) -> SocketKind {
		self.socket.kind()
	}

	/// Endpoint address the socket is connected to.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	pub fn socket(&self) -> &ChannelSocket {
		&self.socket
	}

	pub fn socket_mut(&mut self) -> &mut ChannelSocket {
		&mut self.socket
	}

	pub fn into_socket(self) -> ChannelSocket {
		self.socket
	}
}

impl fmt::Debug for KernelChannel {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("KernelChannel")
			.field("role", &self.role)
			.field("kind", &self.kind())
			.field("endpoint", &self.endpoint)
			.finish()
	}
}

/// Opens the channel playing `role` and connects it to the kernel.
///
/// # Errors
///
/// - [`Error::UnassignedPort`] if the role's TCP port is zero
/// - [`Error::Subscribe`] if the iopub filter cannot be installed
/// - [`Error::Connect`] if the socket rejects the endpoint
/// - [`Error::Timeout`] if the dial does not finish within `options.timeout`
pub async fn connect(info: &ConnectionInfo, role: ChannelRole, options: &ConnectOptions) -> Result<KernelChannel> {
	let port = info.port(role);
	if port == 0 && info.transport().is_tcp() {
		return Err(Error::UnassignedPort { role });
	}
	let endpoint = info.endpoint(port);

	let socket = match role.socket_kind() {
		SocketKind::Dealer => ChannelSocket::Dealer(dial(DealerSocket::new(), role, &endpoint, options).await?),
		SocketKind::Sub => {
			let mut socket = SubSocket::new();
			socket
				.subscribe("")
				.await
				.map_err(|source| Error::Subscribe { endpoint: endpoint.clone(), source })?;
			ChannelSocket::Sub(dial(socket, role, &endpoint, options).await?)
		}
		SocketKind::Req => ChannelSocket::Req(dial(ReqSocket::new(), role, &endpoint, options).await?),
	};

	debug!(target = "kc.channel", role = %role, kind = %socket.kind(), endpoint = %endpoint, "channel connected");
	Ok(KernelChannel { role, endpoint, socket })
}

async fn dial<S: Socket>(mut socket: S, role: ChannelRole, endpoint: &str, options: &ConnectOptions) -> Result<S> {
	match tokio::time::timeout(options.timeout, socket.connect(endpoint)).await {
		Ok(Ok(())) => Ok(socket),
		Ok(Err(source)) => Err(Error::Connect { role, endpoint: endpoint.to_string(), source }),
		Err(_) => Err(Error::Timeout { role, endpoint: endpoint.to_string(), timeout: options.timeout }),
	}
}

/// Opens the shell channel (DEALER).
pub async fn connect_shell(info: &ConnectionInfo, options: &ConnectOptions) -> Result<KernelChannel> {
	connect(info, ChannelRole::Shell, options).await
}

/// Opens the control channel (DEALER).
pub async fn connect_control(info: &ConnectionInfo, options: &ConnectOptions) -> Result<KernelChannel> {
	connect(info, ChannelRole::Control, options).await
}

/// Opens the stdin channel (DEALER).
pub async fn connect_stdin(info: &ConnectionInfo, options: &ConnectOptions) -> Result<KernelChannel> {
	connect(info, ChannelRole::Stdin, options).await
}

/// Opens the iopub channel (SUB, subscribed to every topic).
pub async fn connect_iopub(info: &ConnectionInfo, options: &ConnectOptions) -> Result<KernelChannel> {
	connect(info, ChannelRole::Iopub, options).await
}

/// Opens the heartbeat channel (REQ).
pub async fn connect_hb(info: &ConnectionInfo, options: &ConnectOptions) -> Result<KernelChannel> {
	connect(info, ChannelRole::Heartbeat, options).await
}
