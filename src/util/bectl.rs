//! bectl(8) handling for boot environments.
use std::sync::OnceLock;

use regex_lite::Regex;

use crate::config::Config;
use crate::runner::Runner;


pub(crate) static BECTL: &str = "/sbin/bectl";

/// `bectl list -H`; scriptable output, no header.
pub(crate) static LIST_ARGS: [&str; 2] = ["list", "-H"];


/// Check: are boot envs supported?
///
/// Not if we're jailed, and otherwise, whatever `bectl check` says.
pub(crate) fn enabled(config: &Config, runner: &impl Runner)
		-> Result<bool, anyhow::Error>
{
	// If we can't tell about the jail (e.g., not on FreeBSD at all),
	// bectl check will sort it out.
	match crate::info::kernel::jailed() {
		Ok(true) => return Ok(false),
		Ok(false) => (),
		Err(e) => tracing::debug!("Can't tell if we're jailed: {e}"),
	}

	let bret = runner.run(&config.bectl(["check"]))?;
	Ok(bret.success())
}


/// Make a user-given name into something safe to hand bectl.
///
/// Spaces become dashes, then anything not alphanumeric or a dash gets
/// dropped.  "My New BE!" -> "My-New-BE".
pub fn sanitize_name(name: &str) -> String
{
	static BADCHARS: OnceLock<Regex> = OnceLock::new();
	let re = BADCHARS.get_or_init(|| {
		Regex::new(r"[^A-Za-z0-9\-]+").expect("Static regex is valid")
	});

	let dashed = name.replace(' ', "-");
	re.replace_all(&dashed, "").into_owned()
}
