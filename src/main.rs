//! boot-environments: look after ZFS boot environments via bectl(8).
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

fn main() -> Result<ExitCode, anyhow::Error>
{
	let clargs = boot_environments::command::parse();

	// RUST_LOG wins if it's there, otherwise -v's decide
	let filter = EnvFilter::try_from_default_env()
			.unwrap_or_else(|_| EnvFilter::new(clargs.log_level()));
	let _ = tracing_subscriber::fmt()
			.with_env_filter(filter)
			.with_writer(std::io::stderr)
			.with_target(false)
			.try_init();

	boot_environments::command::run(clargs)
}
