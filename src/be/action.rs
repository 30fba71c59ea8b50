//! The things we can ask for, and how each one turns into a privileged
//! command line.
use crate::config::Config;
use crate::runner::Invocation;


/// A fully resolved action against the system.  Names in here are ready
/// to go on a command line; Create's has already been through the
/// sanitizer.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Action
{
	/// Make this the BE we boot into next
	Activate(String),

	/// Make a new BE
	Create(String),

	/// Destroy a BE (and its origin snapshot)
	Remove(String),

	/// Mount it somewhere temporary
	Mount(String),

	/// Unmount it
	Unmount(String),

	/// Restart the machine
	Reboot,
}

impl Action
{
	/// What bectl calls it (or near enough for Reboot)
	pub fn verb(&self) -> &'static str
	{
		match self {
			Self::Activate(_) => "activate",
			Self::Create(_)   => "create",
			Self::Remove(_)   => "destroy",
			Self::Mount(_)    => "mount",
			Self::Unmount(_)  => "unmount",
			Self::Reboot      => "reboot",
		}
	}

	/// The BE this is about, if any
	pub fn target(&self) -> Option<&str>
	{
		match self {
			Self::Activate(n) | Self::Create(n) | Self::Remove(n)
					| Self::Mount(n) | Self::Unmount(n) => Some(n),
			Self::Reboot => None,
		}
	}

	/// The command that does it.
	pub fn invocation(&self, config: &Config) -> Invocation
	{
		let bectl = &config.bectl;
		match self {
			Self::Activate(n) => config.privileged(bectl, ["activate", n.as_str()]),
			Self::Create(n)   => config.privileged(bectl, ["create", n.as_str()]),
			Self::Remove(n)   => config.privileged(bectl, ["destroy", "-Fo", n.as_str()]),
			Self::Mount(n)    => config.privileged(bectl, ["mount", n.as_str()]),
			Self::Unmount(n)  => config.privileged(bectl, ["unmount", n.as_str()]),
			Self::Reboot => config.privileged(&config.shutdown, ["-r", "now"]),
		}
	}

	/// What to say when it failed and didn't tell us why.
	pub fn failure_message(&self) -> String
	{
		match self {
			Self::Reboot => "Could not restart the computer".to_string(),
			_ => format!("Could not {} Boot Environment", self.verb()),
		}
	}

	/// Does somebody need to say "yes, really" first?  If so, here's the
	/// question to ask.
	pub fn confirmation(&self) -> Option<String>
	{
		match self {
			Self::Remove(n) => Some(format!("Do you really want to remove \
					{n}?\nThis cannot be undone.")),
			Self::Reboot => Some("Are you sure you want to restart your \
					computer now?\nAll unsaved work will be lost.".to_string()),
			_ => None,
		}
	}
}

impl std::fmt::Display for Action
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error>
	{
		match self.target() {
			Some(n) => write!(f, "{} {n}", self.verb()),
			None    => f.write_str(self.verb()),
		}
	}
}
