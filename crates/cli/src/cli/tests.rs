use std::path::PathBuf;

use clap::Parser;

use super::*;

#[test]
fn parse_write_command() {
	let args = vec![
		"kc",
		"write",
		"/tmp/kernel-1.json",
		"--shell-port",
		"5555",
		"--iopub-port",
		"5556",
		"--stdin-port",
		"5557",
		"--control-port",
		"5558",
		"--hb-port",
		"5559",
		"--key",
		"abc123",
		"--kernel-name",
		"python3",
	];
	let cli = Cli::try_parse_from(args).unwrap();

	match cli.command {
		Commands::Write(args) => {
			assert_eq!(args.file, PathBuf::from("/tmp/kernel-1.json"));
			assert_eq!(args.transport, Transport::Tcp);
			assert_eq!(args.ip, "127.0.0.1");
			assert_eq!(args.shell_port, 5555);
			assert_eq!(args.hb_port, 5559);
			assert_eq!(args.key, "abc123");
			assert_eq!(args.signature_scheme, "hmac-sha256");
			assert_eq!(args.kernel_name, "python3");
		}
		_ => panic!("Expected Write command"),
	}
}

#[test]
fn parse_write_ipc_transport() {
	let args = vec!["kc", "write", "k.json", "--transport", "ipc", "--ip", "/tmp/kernel", "--key", "secret"];
	let cli = Cli::try_parse_from(args).unwrap();

	match cli.command {
		Commands::Write(args) => {
			assert_eq!(args.transport, Transport::Ipc);
			assert_eq!(args.ip, "/tmp/kernel");
			assert_eq!(args.shell_port, 0);
		}
		_ => panic!("Expected Write command"),
	}
}

#[test]
fn write_rejects_unknown_transport() {
	let args = vec!["kc", "write", "k.json", "--transport", "udp", "--key", "k"];
	assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn write_requires_key() {
	let args = vec!["kc", "write", "k.json"];
	assert!(Cli::try_parse_from(args).is_err());
}

#[test]
fn parse_probe_with_timeout_and_verbosity() {
	let args = vec!["kc", "-vv", "probe", "k.json", "--timeout-ms", "250"];
	let cli = Cli::try_parse_from(args).unwrap();

	assert_eq!(cli.verbose, 2);
	match cli.command {
		Commands::Probe(args) => {
			assert_eq!(args.file, PathBuf::from("k.json"));
			assert_eq!(args.timeout_ms, 250);
		}
		_ => panic!("Expected Probe command"),
	}
}

#[test]
fn parse_show_command() {
	let cli = Cli::try_parse_from(vec!["kc", "show", "k.json"]).unwrap();
	assert!(matches!(cli.command, Commands::Show(ShowArgs { ref file }) if file == &PathBuf::from("k.json")));
}
