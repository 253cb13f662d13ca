use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use kc_runtime::{DEFAULT_SIGNATURE_SCHEME, Transport};

#[derive(Parser, Debug)]
#[command(name = "kc")]
#[command(about = "Write, inspect and probe kernel connection files")]
#[command(version)]
pub struct Cli {
	/// Increase verbosity (-v info, -vv debug, -vvv all targets)
	#[arg(short, long, global = true, action = clap::ArgAction::Count)]
	pub verbose: u8,

	#[command(subcommand)]
	pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
	/// Write a connection file for a kernel session
	Write(WriteArgs),

	/// Print the endpoints described by a connection file
	Show(ShowArgs),

	/// Open every channel of a connection file and report which ones connect
	Probe(ProbeArgs),
}

#[derive(Args, Debug)]
pub struct WriteArgs {
	/// Destination path (replaced if it exists)
	#[arg(value_name = "FILE")]
	pub file: PathBuf,

	/// Transport: tcp or ipc
	#[arg(long, default_value = "tcp")]
	pub transport: Transport,

	/// Host address, or socket path prefix for ipc
	#[arg(long, default_value = "127.0.0.1")]
	pub ip: String,

	#[arg(long, default_value_t = 0)]
	pub shell_port: u16,

	#[arg(long, default_value_t = 0)]
	pub iopub_port: u16,

	#[arg(long, default_value_t = 0)]
	pub stdin_port: u16,

	#[arg(long, default_value_t = 0)]
	pub control_port: u16,

	#[arg(long, default_value_t = 0)]
	pub hb_port: u16,

	/// Shared secret used by the message signing layer
	#[arg(long)]
	pub key: String,

	#[arg(long, default_value = DEFAULT_SIGNATURE_SCHEME)]
	pub signature_scheme: String,

	#[arg(long, default_value = "")]
	pub kernel_name: String,
}

#[derive(Args, Debug)]
pub struct ShowArgs {
	#[arg(value_name = "FILE")]
	pub file: PathBuf,
}

#[derive(Args, Debug)]
pub struct ProbeArgs {
	#[arg(value_name = "FILE")]
	pub file: PathBuf,

	/// Connect deadline per channel in milliseconds
	#[arg(long, default_value_t = 5000)]
	pub timeout_ms: u64,
}

#[cfg(test)]
mod tests;
