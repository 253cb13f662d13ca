use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Library events are emitted under `kc.*` targets; the socket library logs under `zeromq`.
fn default_directives(verbosity: u8) -> &'static str {
	match verbosity {
		// errors only
		0 => "error",
		// connection file writes and channel sets
		1 => "warn,kc=info",
		// every channel dial and file load
		2 => "warn,kc=debug,zeromq=info",
		_ => "debug,kc=trace,zeromq=debug",
	}
}

pub fn init_logging(verbosity: u8) {
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directives(verbosity)));

	let stderr = std::io::stderr.with_max_level(tracing::Level::TRACE);

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(stderr)
		.with_target(true)
		.with_level(true)
		.compact()
		.init();
}
