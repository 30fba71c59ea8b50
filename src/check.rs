//! Various runtime checks of things
use crate::config::Config;


/*
 * Simple "This is OK, or we know an error"
 */
pub(crate) fn bectl(conf: &Config) -> Result<(), String>
{
	match conf.bectl.as_os_str().len() {
		0 => Err("No bectl given".to_string()),
		_ => Ok(()),
	}
}

pub(crate) fn refresh_interval(conf: &Config) -> Result<(), String>
{
	match conf.refresh_interval.is_zero() {
		true => Err("RefreshInterval must be more than 0".to_string()),
		false => Ok(()),
	}
}

/// We only need a wrapper if we're going to use one.
pub(crate) fn wrapper(conf: &Config) -> Result<(), String>
{
	if !conf.elevated() { return Ok(()); }
	match conf.wrapper.as_os_str().len() {
		0 => Err("Need a privilege Wrapper to elevate with".to_string()),
		_ => Ok(()),
	}
}
