//! $0 {activate,create,destroy,mount,unmount,reboot}
//!
//! All the one-shot changes go the same way: list, make sure what we
//! were asked about is there, do it, and show how things look after.
use crate::command::{BeCmds, CmdArg, MyExit};
use crate::core::{Controller, Outcome, Request, Target};
use crate::runner::SysRunner;
use crate::term::TermPresenter;

use anyhow::anyhow;


pub(crate) fn run(carg: CmdArg) -> Result<MyExit, anyhow::Error>
{
	// Split up
	let CmdArg { clargs, mut config } = carg;

	let named = Target::Named;
	let (req, yes) = match clargs.command {
		BeCmds::Activate(a) => (Request::Activate(named(a.name)), false),
		BeCmds::Create(a)   => (Request::Create(a.name), false),
		BeCmds::Destroy(a)  => (Request::Remove(named(a.name)), a.yes),
		BeCmds::Mount(a)    => {
			if a.no_browse { config.browse_on_mount = false; }
			(Request::Mount(named(a.name)), false)
		},
		BeCmds::Unmount(a)  => (Request::Unmount(named(a.name)), false),
		BeCmds::Reboot(a)   => (Request::Reboot, a.yes),
		x => unreachable!("{x} isn't an action, why am I running it??"),
	};
	let reboot = req == Request::Reboot;

	// Need a current listing to check names against
	let mut ctl = Controller::new(config, SysRunner, TermPresenter::oneshot(yes));
	ctl.refresh().map_err(|e| anyhow!("Can't list boot environments: {e}"))?;

	let out = ctl.request(req);
	match &out {
		Outcome::Done if !reboot => {
			println!("{}", crate::be::table::render(ctl.records(),
					ctl.selected()));
		},
		Outcome::Cancelled => println!("Cancelled."),

		// The presenter already complained about anything else
		_ => (),
	}

	Ok(out.into())
}
