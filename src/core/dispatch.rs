//! Turning requests into privileged commands, and dealing with how they
//! turn out.
//!
//! Every action goes the same way: stop the timer, run it, complain if
//! it didn't work, re-list no matter what, start the timer back up.  The
//! one exception is when the command can't even be started; then nothing
//! happened, so there's nothing to re-list.
use tracing::{debug, info, warn};

use crate::be::{Action, BootEnv};
use crate::runner::{Invocation, Runner};
use super::{Controller, Presenter};


/// Which BE a request is about
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Target
{
	/// Whatever's selected
	Selected,

	/// This one
	Named(String),
}


/// A request from the user, before we've checked it against the listing.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Request
{
	Activate(Target),

	/// Create, with the name as the user typed it
	Create(String),

	Remove(Target),
	Mount(Target),
	Unmount(Target),

	/// Mount if it's not, unmount if it is
	ToggleMount(Target),

	Reboot,
}


/// Why a request never got as far as running anything
#[derive(Debug, Clone, Eq, PartialEq)]
#[derive(thiserror::Error)]
pub enum Rejection
{
	#[error("No boot environment selected")]
	NoSelection,

	#[error("No boot environment named {0}")]
	UnknownName(String),

	#[error("{0:?} has nothing usable in it as a name")]
	EmptyName(String),

	#[error("{0} is already mounted")]
	AlreadyMounted(String),

	#[error("{0} isn't mounted")]
	NotMounted(String),

	#[error("{0} is the running system and can't be unmounted")]
	RunningRoot(String),
}


/// How a request turned out
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Outcome
{
	/// It worked
	Done,

	/// It ran and said no; here's why
	Failed(String),

	/// It couldn't be started
	LaunchFailed(String),

	/// The user backed out at the confirmation
	Cancelled,

	/// We didn't try
	Rejected(Rejection),
}

impl Outcome
{
	pub fn ok(&self) -> bool
	{
		matches!(self, Self::Done | Self::Cancelled)
	}
}


impl<R: Runner, P: Presenter> Controller<R, P>
{
	/// Check a request against what we've got listed, and do it.
	pub fn request(&mut self, req: Request) -> Outcome
	{
		let action = match self.resolve(req) {
			Ok(a) => a,
			Err(rej) => {
				self.presenter.notice(&rej.to_string());
				return Outcome::Rejected(rej);
			},
		};
		self.dispatch(action)
	}


	/// Figure out exactly what a request means right now.
	pub fn resolve(&self, req: Request) -> Result<Action, Rejection>
	{
		use Request as Rq;

		Ok(match req {
			Rq::Activate(t) => Action::Activate(self.target(t)?.name.clone()),
			Rq::Remove(t)   => Action::Remove(self.target(t)?.name.clone()),
			Rq::Create(raw) => {
				let name = crate::util::bectl::sanitize_name(&raw);
				if name.is_empty() { return Err(Rejection::EmptyName(raw)); }
				Action::Create(name)
			},
			Rq::Mount(t) => {
				let be = self.target(t)?;
				if be.is_mounted()
				{ return Err(Rejection::AlreadyMounted(be.name.clone())); }
				Action::Mount(be.name.clone())
			},
			Rq::Unmount(t) => unmount(self.target(t)?)?,
			Rq::ToggleMount(t) => {
				let be = self.target(t)?;
				match be.is_mounted() {
					false => Action::Mount(be.name.clone()),
					true  => unmount(be)?,
				}
			},
			Rq::Reboot => Action::Reboot,
		})
	}

	fn target(&self, t: Target) -> Result<&BootEnv, Rejection>
	{
		match t {
			Target::Selected => self.state.selected_env()
					.ok_or(Rejection::NoSelection),
			Target::Named(n) => self.state.find(&n)
					.ok_or(Rejection::UnknownName(n)),
		}
	}


	/// Run an action.
	pub fn dispatch(&mut self, action: Action) -> Outcome
	{
		if let Some(q) = action.confirmation()
		{
			if !self.presenter.confirm(&q)
			{
				debug!(%action, "not confirmed");
				return Outcome::Cancelled;
			}
		}

		let was_running = self.timer.running();
		self.timer.stop();

		let inv = action.invocation(&self.config);
		info!(%action, cmd = %inv, "dispatching");

		self.presenter.busy(Some(&action.to_string()));
		let res = self.runner.run(&inv);
		self.presenter.busy(None);

		let outcome = match res {
			Err(e) => {
				// Nothing ran, so there's nothing new to list.
				let msg = e.to_string();
				warn!(%action, "{msg}");
				self.presenter.error(&action, &msg);
				if was_running { self.timer.start(); }
				return Outcome::LaunchFailed(msg);
			},
			Ok(out) if out.success() => Outcome::Done,
			Ok(out) => {
				let msg = out.message()
						.unwrap_or_else(|| action.failure_message());
				warn!(%action, code = ?out.code, "{msg}");
				self.presenter.error(&action, &msg);
				Outcome::Failed(msg)
			},
		};

		// Whatever happened, show what's really there now.
		let _ = self.refresh();

		if let (Outcome::Done, Action::Mount(name)) = (&outcome, &action)
		{
			self.browse(name);
		}

		if was_running { self.timer.start(); }
		outcome
	}


	/// Open a freshly mounted BE in the file browser.  Best effort; if it
	/// doesn't go, oh well.
	fn browse(&mut self, name: &str)
	{
		if !self.config.browse_on_mount { return; }

		let mp = match self.state.find(name) {
			Some(be) if be.is_mounted() => be.mountpoint.clone(),
			_ => {
				debug!("{name} not showing as mounted, not browsing");
				return;
			},
		};

		let inv = Invocation::new(&self.config.file_browser).arg(&mp);
		if let Err(e) = self.runner.launch(&inv)
		{
			debug!("Ignoring file browser failure: {e}");
		}
	}
}


/// Can this one be unmounted?
fn unmount(be: &BootEnv) -> Result<Action, Rejection>
{
	if !be.is_mounted()
	{ return Err(Rejection::NotMounted(be.name.clone())); }
	if be.is_root()
	{ return Err(Rejection::RunningRoot(be.name.clone())); }
	Ok(Action::Unmount(be.name.clone()))
}
