//! General command handling.  This is sorta the central dispatch for
//! everything that goes on.

/// Command-line parsing and handling
mod line;
pub use line::BeArgs;
pub(crate) use line::BeCmds;
pub use line::parse;



// Handle exiting with a code in special cases
use std::process::ExitCode;

use crate::core::Outcome;

#[derive(Debug)]
pub(crate) enum MyExit
{
	Ok,
	Code(u8),
}

impl From<()> for MyExit { fn from(_x: ()) -> Self { Self::Ok } }
impl From<u8> for MyExit { fn from(c: u8)  -> Self { Self::Code(c) } }

/// Cancelling is fine; bectl failing is 1; us never getting as far as
/// bectl is 2.
impl From<Outcome> for MyExit
{
	fn from(o: Outcome) -> Self
	{
		use Outcome as O;
		match o {
			O::Done | O::Cancelled => Self::Ok,
			O::Failed(_) => Self::Code(1),
			O::LaunchFailed(_) | O::Rejected(_) => Self::Code(2),
		}
	}
}

impl From<MyExit> for ExitCode
{
	fn from(my: MyExit) -> Self
	{
		use MyExit as M;
		match my {
			M::Ok      => Self::SUCCESS,
			M::Code(c) => c.into(),
		}
	}
}


/// Pass a bunch of info to the individual command runners as a block
#[derive(Debug)]
pub(crate) struct CmdArg
{
	/// The command-line args
	pub(crate) clargs: BeArgs,

	/// The working config
	pub(crate) config: crate::config::Config,
}


/// Dispatch a command
pub fn run(clargs: BeArgs) -> Result<ExitCode, anyhow::Error>
{
	use crate::*;

	// Load up config
	let config = config::load_config_file(&clargs)?;

	// Any early initalization
	init(&clargs)?;
	check_config(&config)?;

	let carg = CmdArg { clargs, config };

	use line::BeCmds as BC;
	let myex: MyExit = match carg.clargs.command {
		// Show
		BC::List{..}  => cmd::list::run(carg)?.into(),
		BC::Check     => cmd::check::run(carg)?.into(),
		BC::Watch{..} => cmd::watch::run(carg)?,

		// Action
		BC::Activate{..} | BC::Create{..} | BC::Destroy{..}
				| BC::Mount{..} | BC::Unmount{..} | BC::Reboot{..}
				=> cmd::action::run(carg)?,

		// Fake
		#[cfg(test)]
		BC::Dummy => unreachable!("Not a real thing"),
	};
	Ok(myex.into())
}


/// Do any initalization we care about
pub fn init(_clargs: &BeArgs) -> Result<(), anyhow::Error>
{
	// Init cached euid; we don't change perms during the run, so...
	crate::util::set_euid();

	Ok(())
}


/// Check over the config before we go doing anything with it.
pub(crate) fn check_config(config: &crate::config::Config)
		-> Result<(), anyhow::Error>
{
	let mut errs: Vec<String> = vec![];

	macro_rules! check {
		( $fld:ident) => {
			match crate::check::$fld(config) {
				Ok(_) => (),
				Err(e) => errs.push(e),
			}
		};
	}

	check!(bectl);
	check!(refresh_interval);
	check!(wrapper);

	match errs.len() {
		0 => Ok(()),
		_ => {
			use anyhow::anyhow;
			let estr = anyhow!("Bad configuration:\n  - {}",
					errs.join("\n  - "));
			Err(estr)
		},
	}
}
