//! $0 watch
use std::io::BufRead as _;
use std::time::Duration;

use crossbeam::channel;
use tracing::debug;

use crate::command::{CmdArg, MyExit};
use crate::core::{Controller, Intent};
use crate::runner::SysRunner;
use crate::term::TermPresenter;


pub(crate) fn run(carg: CmdArg) -> Result<MyExit, anyhow::Error>
{
	// Split up
	let CmdArg { clargs, mut config } = carg;

	// Extract our own args
	let args = match clargs.command {
		crate::command::BeCmds::Watch(a) => a,
		_ => unreachable!("I'm a watch, why does it think I'm not??"),
	};
	match args.interval {
		Some(0) => anyhow::bail!("Refresh interval must be more than 0"),
		Some(ms) => config.refresh_interval = Duration::from_millis(ms),
		None => (),
	}

	// Lines from stdin come in as input, and EOF means we're done.  The
	// presenter shares the queue, to pick up answers to its questions.
	let (tx, rx) = channel::unbounded();
	std::thread::Builder::new()
		.name("stdin".to_string())
		.spawn(move || {
			for line in std::io::stdin().lock().lines()
			{
				let line = match line {
					Ok(l) => l,
					Err(e) => { debug!("stdin: {e}"); break; },
				};
				if tx.send(Intent::Input(line)).is_err() { return; }
			}
			let _ = tx.send(Intent::Quit);
		})?;

	println!("Watching boot environments; ? for help, q to quit.");
	let mut ctl = Controller::new(config, SysRunner,
			TermPresenter::live(rx.clone()));
	ctl.run(&rx);

	Ok(MyExit::Ok)
}
