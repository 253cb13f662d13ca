//! The fixed kernel channel set and the socket pattern mandated for each role.
//!
//! | Role      | Pattern | Direction                         |
//! |-----------|---------|-----------------------------------|
//! | shell     | DEALER  | request/reply, identity-routed    |
//! | control   | DEALER  | out-of-band control requests      |
//! | stdin     | DEALER  | input requests back to the client |
//! | iopub     | SUB     | kernel broadcast, all topics      |
//! | heartbeat | REQ     | strict ping/pong                  |
//!
//! The mapping is part of the wire contract. A kernel binds the matching
//! ROUTER/PUB/REP sockets and will not talk to anything else.

use std::fmt;

/// One of the five logical channels of a kernel session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelRole {
	Shell,
	Control,
	Stdin,
	Iopub,
	Heartbeat,
}

impl ChannelRole {
	/// Every role, in the order channels are reported.
	pub const ALL: [ChannelRole; 5] =
		[ChannelRole::Shell, ChannelRole::Control, ChannelRole::Stdin, ChannelRole::Iopub, ChannelRole::Heartbeat];

	/// Short protocol name of the channel.
	pub fn name(self) -> &'static str {
		match self {
			ChannelRole::Shell => "shell",
			ChannelRole::Control => "control",
			ChannelRole::Stdin => "stdin",
			ChannelRole::Iopub => "iopub",
			ChannelRole::Heartbeat => "hb",
		}
	}

	/// Socket pattern the client side of this channel must use.
	pub fn socket_kind(self) -> SocketKind {
		match self {
			ChannelRole::Shell | ChannelRole::Control | ChannelRole::Stdin => SocketKind::Dealer,
			ChannelRole::Iopub => SocketKind::Sub,
			ChannelRole::Heartbeat => SocketKind::Req,
		}
	}

	/// Connection file field holding this channel's port.
	pub fn port_field(self) -> &'static str {
		match self {
			ChannelRole::Shell => "shell_port",
			ChannelRole::Control => "control_port",
			ChannelRole::Stdin => "stdin_port",
			ChannelRole::Iopub => "iopub_port",
			ChannelRole::Heartbeat => "hb_port",
		}
	}
}

impl fmt::Display for ChannelRole {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

/// Client-side messaging socket pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SocketKind {
	/// Asynchronous bidirectional socket, paired with a kernel ROUTER.
	Dealer,
	/// Broadcast receiver, paired with a kernel PUB.
	Sub,
	/// Strict request-then-reply socket, paired with a kernel REP.
	Req,
}

impl SocketKind {
	pub fn as_str(self) -> &'static str {
		match self {
			SocketKind::Dealer => "DEALER",
			SocketKind::Sub => "SUB",
			SocketKind::Req => "REQ",
		}
	}
}

impl fmt::Display for SocketKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}
