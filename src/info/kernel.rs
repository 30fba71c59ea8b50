//! Various info about the kernel


/// Are we in a jail?  bectl can't do anything useful from inside one.
pub(crate) fn jailed() -> Result<bool, anyhow::Error>
{
	use sysctl::{Ctl, Sysctl as _};
	use anyhow::anyhow;

	let jctl = "security.jail.jailed";
	let sv_s = Ctl::new(jctl)
			.map_err(|e| { anyhow!("sysctl {}: {}", jctl, e) })?;
	let sv = sv_s.value()
			.map_err(|e| { anyhow!("{} value: {}", jctl, e) })?;

	munge::jailed(&sv)
			.ok_or_else(|| { anyhow!("{} not int?  {:?}", jctl, sv) })
}


// Mungers for the value returned from sysctl
mod munge {
	use sysctl::CtlValue;

	// Should just be an Int; 1 means jailed.
	pub(super) fn jailed(sv: &CtlValue) -> Option<bool>
	{
		sv.as_int().map(|j| *j == 1)
	}
}
