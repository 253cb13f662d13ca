//! All five kernel channels opened as one unit.

use kc_protocol::{ChannelRole, ConnectionInfo};
use tracing::info;

use crate::channel::{
	ConnectOptions, KernelChannel, connect_control, connect_hb, connect_iopub, connect_shell, connect_stdin,
};
use crate::error::Result;

/// Connected shell, control, stdin, iopub and heartbeat channels.
///
/// Either every channel is connected or [`KernelChannels::connect_all`]
/// fails and the sockets it already opened are dropped, so a caller never
/// holds a half-connected session.
#[derive(Debug)]
pub struct KernelChannels {
	pub shell: KernelChannel,
	pub control: KernelChannel,
	pub stdin: KernelChannel,
	pub iopub: KernelChannel,
	pub hb: KernelChannel,
}

impl KernelChannels {
	/// Dials all five channels concurrently on the calling task.
	///
	/// The first failure is returned; it names the failing role and endpoint.
	pub async fn connect_all(info: &ConnectionInfo, options: &ConnectOptions) -> Result<Self> {
		let (shell, control, stdin, iopub, hb) = tokio::try_join!(
			connect_shell(info, options),
			connect_control(info, options),
			connect_stdin(info, options),
			connect_iopub(info, options),
			connect_hb(info, options),
		)?;

		info!(
			target = "kc.channel",
			kernel = info.kernel_name(),
			transport = %info.transport(),
			host = info.host(),
			"all kernel channels connected"
		);
		Ok(Self { shell, control, stdin, iopub, hb })
	}

	pub fn get(&self, role: ChannelRole) -> &KernelChannel {
		match role {
			ChannelRole::Shell => &self.shell,
			ChannelRole::Control => &self.control,
			ChannelRole::Stdin => &self.stdin,
			ChannelRole::Iopub => &self.iopub,
			ChannelRole::Heartbeat => &self.hb,
		}
	}

	pub fn get_mut(&mut self, role: ChannelRole) -> &mut KernelChannel {
		match role {
			ChannelRole::Shell => &mut self.shell,
			ChannelRole::Control => &mut self.control,
			ChannelRole::Stdin => &mut self.stdin,
			ChannelRole::Iopub => &mut self.iopub,
			ChannelRole::Heartbeat => &mut self.hb,
		}
	}

	/// Iterates channels in [`ChannelRole::ALL`] order.
	pub fn iter(&self) -> impl Iterator<Item = &KernelChannel> {
		ChannelRole::ALL.into_iter().map(move |role| self.get(role))
	}
}
