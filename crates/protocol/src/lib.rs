//! Kernel protocol connection types.
//!
//! This crate holds the pure-data half of the kernel connection layer:
//!
//! - [`ConnectionInfo`] - transport, host and the five channel ports of one kernel session
//! - [`ChannelRole`] / [`SocketKind`] - the fixed channel set and the socket pattern each role uses
//! - [`ConnectionFile`] - the on-disk record other processes read to join the session
//!
//! Nothing here performs I/O. Opening sockets and touching the filesystem is
//! done by `kc-runtime` on top of these types.

pub mod channel;
pub mod connection;
pub mod connection_file;
pub mod error;
pub mod transport;

pub use channel::{ChannelRole, SocketKind};
pub use connection::{ChannelPorts, ConnectionInfo, ConnectionInfoBuilder};
pub use connection_file::{ConnectionFile, DEFAULT_SIGNATURE_SCHEME};
pub use error::{DescriptorError, FormatError};
pub use transport::Transport;
