//! Command line handling
//!
//! General invocation:
//! $0 [options] <command> [command-opts]

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::Elevate;

// Add extra default'ing to make config tests easier

/// Main arg entry point
#[cfg_attr(test, derive(Default))]
#[derive(Debug)]
#[derive(Parser)]
#[command(about = "Look after your ZFS boot environments.")]
#[command(version)]
pub struct BeArgs
{
	#[command(subcommand)]
	pub(crate) command: BeCmds,

	/// Config file [default: /usr/local/etc/boot-environments.conf]
	///
	/// It's fine for the default file to not exist; we'll just run on
	/// defaults.  A file given explicitly has to be there.
	#[arg(short, long)]
	pub(crate) config: Option<PathBuf>,

	/// Path to bectl(8).
	#[arg(long)]
	pub(crate) bectl: Option<PathBuf>,

	/// Privilege wrapper to run privileged bectl calls through.
	///
	/// This gets passed the `WrapperArgs` from the config (by default
	/// `-A -E`), then the real command.  sudo(8) is the expected thing
	/// here, but anything that acts enough like it works.
	#[arg(long)]
	pub(crate) wrapper: Option<PathBuf>,

	/// Credential helper, passed to the wrapper as SUDO_ASKPASS.
	#[arg(long)]
	pub(crate) askpass: Option<PathBuf>,

	/// When to use the privilege wrapper.
	///
	/// `auto` uses it only when we're not already running as root.
	#[arg(long, value_enum)]
	pub(crate) elevate: Option<Elevate>,

	/// More logging (repeat for even more).
	///
	/// RUST_LOG in the environment overrides this.
	#[arg(short, long, action = clap::ArgAction::Count)]
	pub(crate) verbose: u8,
}



/// Individual subcommands and their args
#[cfg_attr(test, derive(Default))]
#[derive(Debug)]
#[derive(Subcommand)]
pub(crate) enum BeCmds
{
	/// Dummy value (mostly to make derive(Default) happy...)
	#[cfg(test)]
	#[cfg_attr(test, default)]
	#[command(skip)]
	Dummy,

	/// List boot environments.
	///
	/// The first column shows `[x]` for the one the system will boot into
	/// next time.
	List(BeCmdList),

	/// Activate a boot environment, so it's used on the next boot.
	Activate(BeCmdName),

	/// Create a new boot environment from the current one.
	///
	/// The name gets tidied up first; spaces become `-`, and anything
	/// else that isn't a letter, digit, or `-` is dropped.
	Create(BeCmdName),

	/// Destroy a boot environment, along with its origin snapshot.
	///
	/// This asks first, unless you give `-y`.
	Destroy(BeCmdDestroy),

	/// Mount a boot environment somewhere temporary.
	///
	/// Once mounted, it gets opened in the configured `FileBrowser`
	/// unless you say not to.
	Mount(BeCmdMount),

	/// Unmount a boot environment.
	Unmount(BeCmdName),

	/// Restart the computer now.
	///
	/// This asks first, unless you give `-y`.
	Reboot(BeCmdReboot),

	/// Check whether boot environments are usable here at all.
	///
	/// They're not, in a jail, or when the system isn't on ZFS.
	Check,

	/// Keep a live listing up, and take commands interactively.
	///
	/// The listing is refreshed on a timer (by default every 3 seconds),
	/// and after anything that changes things.  Type `?` once it's going
	/// for a list of what you can do.
	Watch(BeCmdWatch),
}


/*
 * Various subcommand args
 */

/// List args
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdList
{
	/// Output JSON instead of a table
	#[arg(long)]
	pub(crate) json: bool,
}

/// Args for things that just take a name
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdName
{
	/// Boot environment name
	pub(crate) name: String,
}

/// Destroy args
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdDestroy
{
	/// Don't ask, just do it
	#[arg(short, long)]
	pub(crate) yes: bool,

	/// Boot environment name
	pub(crate) name: String,
}

/// Mount args
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdMount
{
	/// Don't open the file browser afterward
	#[arg(short='n', long)]
	pub(crate) no_browse: bool,

	/// Boot environment name
	pub(crate) name: String,
}

/// Reboot args
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdReboot
{
	/// Don't ask, just do it
	#[arg(short, long)]
	pub(crate) yes: bool,
}

/// Watch args
#[derive(Debug)]
#[derive(Parser)]
pub(crate) struct BeCmdWatch
{
	/// Refresh interval in milliseconds (overrides `RefreshInterval`)
	#[arg(short, long)]
	pub(crate) interval: Option<u64>,
}




/*
 * Misc impls and utils
 */

impl std::fmt::Display for BeCmds
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error>
	{
		match self
		{
			Self::List{..}     => f.write_str("list"),
			Self::Activate{..} => f.write_str("activate"),
			Self::Create{..}   => f.write_str("create"),
			Self::Destroy{..}  => f.write_str("destroy"),
			Self::Mount{..}    => f.write_str("mount"),
			Self::Unmount{..}  => f.write_str("unmount"),
			Self::Reboot{..}   => f.write_str("reboot"),
			Self::Check        => f.write_str("check"),
			Self::Watch{..}    => f.write_str("watch"),

			// Shouldn't really be possible
			#[cfg(test)]
			Self::Dummy => f.write_str("dummy"),
		}
	}
}


impl BeArgs
{
	/// Log level we get from -v's, absent RUST_LOG
	pub fn log_level(&self) -> &'static str
	{
		match self.verbose {
			0 => "warn",
			1 => "info",
			2 => "debug",
			_ => "trace",
		}
	}
}



pub fn parse() -> BeArgs
{
	BeArgs::parse()
}
