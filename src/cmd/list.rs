//! $0 list
use crate::command::CmdArg;
use crate::core::Controller;
use crate::runner::SysRunner;
use crate::term::TermPresenter;


pub(crate) fn run(carg: CmdArg) -> Result<(), anyhow::Error>
{
	// Split up
	let CmdArg { clargs, config } = carg;

	// Extract our own args
	let args = match clargs.command {
		crate::command::BeCmds::List(a) => a,
		_ => unreachable!("I'm a list, why does it think I'm not??"),
	};

	let mut ctl = Controller::new(config, SysRunner, TermPresenter::oneshot(false));
	ctl.refresh()?;

	match args.json {
		true => println!("{}", serde_json::to_string_pretty(ctl.records())?),
		false => println!("{}", crate::be::table::render(ctl.records(),
				ctl.selected())),
	}

	Ok(())
}
