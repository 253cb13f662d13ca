//! Kernel connection runtime - channel establishment and connection files
//!
//! This crate turns the data types of `kc-protocol` into live resources:
//!
//! - **Channels**: opening the DEALER/SUB/REQ socket each kernel channel
//!   mandates and dialling the kernel's endpoint, with a connect deadline
//! - **Channel sets**: opening all five channels as one unit so a session is
//!   either fully connected or not connected at all
//! - **Connection files**: writing and reading the record other processes use
//!   to discover a kernel session
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │ session owner│  builds ConnectionInfo, owns the channels
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │  kc-runtime  │  This crate
//! │  ┌────────┐  │
//! │  │ Chan   │  │  zeromq sockets on tokio
//! │  └────────┘  │
//! │  ┌────────┐  │
//! │  │ File   │  │  connection file write/read
//! │  └────────┘  │
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ kc-protocol  │  ConnectionInfo, ChannelRole, ConnectionFile
//! └──────────────┘
//! ```

pub mod channel;
pub mod channel_set;
pub mod connection_file;
pub mod error;

pub use channel::{
	ChannelSocket, ConnectOptions, KernelChannel, connect, connect_control, connect_hb, connect_iopub, connect_shell,
	connect_stdin,
};
pub use channel_set::KernelChannels;
pub use connection_file::{
	connection_file_path, read_connection_file, remove_connection_file, write_connection_file,
};
pub use error::{Error, Result};
pub use kc_protocol::{
	ChannelPorts, ChannelRole, ConnectionFile, ConnectionInfo, DEFAULT_SIGNATURE_SCHEME, SocketKind, Transport,
};
