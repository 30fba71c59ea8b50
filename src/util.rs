//! Misc util funcs

/// Boot envs
pub(crate) mod bectl;



// XXX Is caching worth it?  geteuid() may not even be an actual syscall
// now, so may be cheaper than eating the atomic...
use std::sync::atomic::AtomicU32;
static EUID: AtomicU32 = AtomicU32::new(u32::MAX);

pub(crate) fn set_euid()
{
	use std::sync::atomic::Ordering::Relaxed;
	EUID.store(uzers::get_effective_uid(), Relaxed);
}

/// We care about euid to decide whether we need the privilege wrapper.
/// Until set_euid() is called, we assume we're nobody special.
pub(crate) fn euid() -> u32
{
	use std::sync::atomic::Ordering::Relaxed;
	EUID.load(Relaxed)
}



/// argv[0]
pub(crate) fn argv_0() -> Option<std::ffi::OsString>
{
	std::env::args_os().next()
}


/// What's our command's name?  With fallback...  this is mostly intended
/// for cosmetic use, like telling the user to "run this command".
pub(crate) fn cmdname() -> String
{
	argv_0()
		.map(|c| c.to_string_lossy().into_owned())
		.and_then(|s| Some(s.split('/').next_back()?.to_string()))
		.unwrap_or_else(|| "boot-environments".to_string())
}


/// Pluralize for a number
pub(crate) fn plural(n: usize) -> &'static str
{
	if n == 1 { "" } else { "s" }
}
