//! Command implementations for `kc`.

use std::fmt::Write as _;
use std::path::Path;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use futures::future::join_all;
use kc_runtime::{
	ChannelPorts, ChannelRole, ConnectOptions, ConnectionFile, ConnectionInfo, read_connection_file,
	write_connection_file,
};
use tracing::info;

use crate::cli::{Commands, ProbeArgs, WriteArgs};

pub async fn dispatch(command: Commands) -> Result<()> {
	match command {
		Commands::Write(args) => write(args),
		Commands::Show(args) => {
			print!("{}", show(&args.file)?);
			Ok(())
		}
		Commands::Probe(args) => probe(args).await,
	}
}

fn write(args: WriteArgs) -> Result<()> {
	let ports = ChannelPorts {
		shell: args.shell_port,
		iopub: args.iopub_port,
		stdin: args.stdin_port,
		control: args.control_port,
		hb: args.hb_port,
	};
	let info = ConnectionInfo::new(args.transport, args.ip, args.kernel_name, ports)
		.context("invalid connection parameters")?;
	let record = ConnectionFile::new(info, args.key, args.signature_scheme);

	write_connection_file(&args.file, &record)?;
	println!("{}", args.file.display());
	Ok(())
}

/// Renders a connection file summary. The key is never included.
pub fn show(path: &Path) -> Result<String> {
	let record = read_connection_file(path)?;
	Ok(render_summary(&record))
}

fn render_summary(record: &ConnectionFile) -> String {
	let info = record.info();
	let mut out = String::new();
	let _ = writeln!(out, "kernel:    {}", display_or_dash(info.kernel_name()));
	let _ = writeln!(out, "transport: {}", info.transport());
	let _ = writeln!(out, "ip:        {}", info.host());
	let _ = writeln!(out, "signature: {}", record.signature_scheme());
	for role in ChannelRole::ALL {
		let _ = writeln!(out, "{:<8} {:<7} {}", role.name(), role.socket_kind(), info.channel_endpoint(role));
	}
	out
}

fn display_or_dash(value: &str) -> &str {
	if value.is_empty() { "-" } else { value }
}

async fn probe(args: ProbeArgs) -> Result<()> {
	let record = read_connection_file(&args.file)?;
	let info = record.info();
	let options = ConnectOptions::with_timeout(Duration::from_millis(args.timeout_ms));

	let results = join_all(ChannelRole::ALL.map(|role| kc_runtime::connect(info, role, &options))).await;

	let mut failed = 0;
	for (role, result) in ChannelRole::ALL.into_iter().zip(results) {
		match result {
			Ok(channel) => println!("{:<8} {:<7} {}  ok", role.name(), channel.kind(), channel.endpoint()),
			Err(err) => {
				failed += 1;
				println!("{:<8} {:<7} {}  failed: {err}", role.name(), role.socket_kind(), info.channel_endpoint(role));
			}
		}
	}

	if failed > 0 {
		bail!("{failed} of {} channels failed to connect", ChannelRole::ALL.len());
	}
	info!(target = "kc.cli", kernel = info.kernel_name(), "all channels reachable");
	Ok(())
}
