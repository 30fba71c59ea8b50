//! $0 check
use crate::command::CmdArg;
use crate::runner::SysRunner;


pub(crate) fn run(carg: CmdArg) -> Result<u8, anyhow::Error>
{
	match crate::util::bectl::enabled(&carg.config, &SysRunner)? {
		true => {
			println!("Boot environments are supported here.");
			Ok(0)
		},
		false => {
			println!("Boot environments are not supported here \
					(jailed, or not booted from ZFS?).");
			Ok(1)
		},
	}
}
