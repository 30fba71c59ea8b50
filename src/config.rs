//! Loading and dealing with boot-environments.conf and runtime usage of
//! its bits.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

use crate::runner::Invocation;


/// Where we look for the config file when not told otherwise
pub const DEFAULT_CONFIG: &str = "/usr/local/etc/boot-environments.conf";


/// When to go through the privilege wrapper
#[derive(Debug, Clone, Copy, Eq, PartialEq, Default)]
#[derive(clap::ValueEnum)]
#[derive(strum::Display, strum::EnumString, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Elevate
{
	/// Only when we're not already root
	#[default]
	Auto,

	/// Always, even as root
	Always,

	/// Never; run bectl directly and hope
	Never,
}


#[derive(Debug, Clone)]
#[derive(derivative::Derivative)]
#[derivative(Default)]
pub struct Config
{
	/// bectl(8)
	#[derivative(Default(value="crate::util::bectl::BECTL.into()"))]
	pub(crate) bectl: PathBuf,

	/// Privilege wrapper; sudo(8) or something that quacks like it
	#[derivative(Default(value="\"/usr/local/bin/sudo\".into()"))]
	pub(crate) wrapper: PathBuf,

	/// Args to give the wrapper before the real command.  -A makes sudo
	/// use the askpass helper, -E keeps our env (so SUDO_ASKPASS et al
	/// make it through).
	#[derivative(Default(value="vec![\"-A\".into(), \"-E\".into()]"))]
	pub(crate) wrapper_args: Vec<String>,

	/// Credential helper for the wrapper, if we set one up ourselves
	pub(crate) askpass: Option<PathBuf>,

	/// shutdown(8)
	#[derivative(Default(value="\"/sbin/shutdown\".into()"))]
	pub(crate) shutdown: PathBuf,

	/// What to open a freshly mounted BE with
	#[derivative(Default(value="\"caja\".into()"))]
	pub(crate) file_browser: PathBuf,

	/// Open a BE in the file browser once it's mounted
	#[derivative(Default(value="true"))]
	pub(crate) browse_on_mount: bool,

	/// How often to re-list
	#[derivative(Default(value="Duration::from_millis(3000)"))]
	pub(crate) refresh_interval: Duration,

	/// When to use the wrapper
	pub(crate) elevate: Elevate,
}


impl Config
{
	/// Are we going through the wrapper for privileged stuff?
	pub(crate) fn elevated(&self) -> bool
	{
		match self.elevate {
			Elevate::Always => true,
			Elevate::Never  => false,
			Elevate::Auto   => crate::util::euid() != 0,
		}
	}

	/// Build up an invocation for something that needs root.
	pub(crate) fn privileged<I, S>(&self, program: &Path, args: I) -> Invocation
			where I: IntoIterator<Item = S>, S: AsRef<std::ffi::OsStr>
	{
		if !self.elevated()
		{
			return Invocation::new(program).args(args);
		}

		let mut inv = Invocation::new(&self.wrapper)
				.args(&self.wrapper_args)
				.arg(program)
				.args(args);
		if let Some(ap) = &self.askpass
		{
			inv = inv.env("SUDO_ASKPASS", ap);
		}
		inv
	}

	/// bectl with some args, unprivileged.
	pub(crate) fn bectl<I, S>(&self, args: I) -> Invocation
			where I: IntoIterator<Item = S>, S: AsRef<std::ffi::OsStr>
	{
		Invocation::new(&self.bectl).args(args)
	}
}


/// Problems loading config
#[derive(Debug)]
#[derive(Error)]
pub enum ConfigErr
{
	/// File I/O error of some sort
	#[error("Config file I/O error: {0}")]
	IO(#[from] std::io::Error),

	/// Syntax error in the config file
	#[error("Config file syntax error: {0}")]
	Syntax(String),
}



/// Load in the config, with appropriate overrides from command-line args.
///
/// If we weren't given a file and the default one isn't there, that's
/// fine, we just run on defaults.
pub(crate) fn load_config_file(clargs: &crate::command::BeArgs)
		-> Result<Config, ConfigErr>
{
	let conf = match &clargs.config {
		Some(cf) => std::fs::read(cf)?,
		None => match std::fs::read(DEFAULT_CONFIG) {
			Ok(c) => c,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				tracing::debug!("No {DEFAULT_CONFIG}, using defaults");
				vec![]
			},
			Err(e) => return Err(e.into()),
		},
	};
	load_config(&conf, clargs)
}


/// Parse the config, with appropriate overrides from command-line args
pub(crate) fn load_config(conf: &[u8], clargs: &crate::command::BeArgs)
		-> Result<Config, ConfigErr>
{
	let mut conf = load(conf)?;

	// And override from CL args as appropriate
	macro_rules! or {
		( $fld:ident ) => {
			if let Some(x) = &clargs.$fld { conf.$fld = x.clone(); }
		};
	}
	or!(bectl);
	or!(wrapper);
	or!(elevate);
	if let Some(ap) = &clargs.askpass { conf.askpass = Some(ap.clone()); }

	Ok(conf)
}


/// Parse out a string of the config
fn load(conf: &[u8]) -> Result<Config, ConfigErr>
{
	let mut config = Config::default();

	for inline in conf.split(|c| *c == b'\n')
	{
		// Discard any parts past a comment
		let line = match inline.splitn(2, |c| *c == b'#').next() {
			Some(l) => l.trim_ascii(),
			None => continue,
		};

		// Split out into [param, value]; lines not matching that aren't
		// useful config.
		let [par, val] = {
			let mut it = line.splitn(2, |c| *c == b' ');
			let par = it.next();
			let val = it.next();
			match (par, val) {
				(Some(p), Some(v)) => [p, v.trim_ascii()],
				(_, _) => continue,
			}
		};

		// Some of the [u8] -> X conversions we use
		let stringify = |bytes, ewhat| -> Result<String, ConfigErr> {
			Ok(std::str::from_utf8(bytes).map_err(|e| {
				ConfigErr::Syntax(format!("Error parsing {ewhat}: {e}"))
			})?.into())
		};
		let boolify = |bytes: &[u8]| -> Option<bool> {
			Some(match bytes {
				b"yes" => true,
				b"no"  => false,
				_      => None?,
			})
		};
		let pathify = |bytes: &[u8]| -> PathBuf {
			let pvec = bytes.to_vec();
			use std::os::unix::ffi::OsStringExt;
			PathBuf::from(OsString::from_vec(pvec))
		};

		match par
		{
			b"Bectl" => {
				if val.is_empty() { continue }
				config.bectl = pathify(val);
			},
			b"Wrapper" => {
				if val.is_empty() { continue }
				config.wrapper = pathify(val);
			},
			b"WrapperArgs" => {
				let astr = stringify(val, "WrapperArgs")?;
				config.wrapper_args = astr.split(' ')
						.filter(|a| !a.is_empty())
						.map(|a| a.to_string()).collect();
			},
			b"Askpass" => {
				if val.is_empty() { continue }
				config.askpass = Some(pathify(val));
			},
			b"Shutdown" => {
				if val.is_empty() { continue }
				config.shutdown = pathify(val);
			},
			b"FileBrowser" => {
				if val.is_empty() { continue }
				config.file_browser = pathify(val);
			},
			b"BrowseOnMount" => {
				config.browse_on_mount = boolify(val).ok_or_else(|| {
					ConfigErr::Syntax(format!("Bad BrowseOnMount value {}",
						String::from_utf8_lossy(val)))
				})?;
			},
			b"RefreshInterval" => {
				let istr = stringify(val, "RefreshInterval")?;
				let ms: u64 = istr.parse().map_err(|e| {
					ConfigErr::Syntax(format!("Bad RefreshInterval {istr}: {e}"))
				})?;
				config.refresh_interval = Duration::from_millis(ms);
			},
			b"Elevate" => {
				let estr = stringify(val, "Elevate")?;
				config.elevate = estr.parse().map_err(|_| {
					ConfigErr::Syntax(format!("Bad Elevate value {estr}"))
				})?;
			},

			_ => continue,
		};
	}

	Ok(config)
}




#[cfg(test)]
mod tests
{
	use super::{load, load_config, load_config_file, Elevate};
	use std::time::Duration;

	const DEFCONF: &[u8] = br##"
# Where bectl lives
Bectl /sbin/bectl

# How to get root.  -A means "ask via the SUDO_ASKPASS helper".
Wrapper /usr/local/bin/sudo
WrapperArgs -A -E
Askpass /usr/local/bin/askpass

# What to open mounted boot environments in
FileBrowser /usr/local/bin/filer

# Milliseconds between listings
RefreshInterval 5000

Elevate always
"##;

	#[test]
	fn default_parse()
	{
		let conf = load(DEFCONF).unwrap();

		use std::ffi::OsStr;
		assert_eq!(conf.bectl, OsStr::new("/sbin/bectl"));
		assert_eq!(conf.wrapper, OsStr::new("/usr/local/bin/sudo"));
		assert_eq!(conf.wrapper_args, ["-A", "-E"]);
		assert_eq!(conf.askpass.as_deref(),
				Some(std::path::Path::new("/usr/local/bin/askpass")));
		assert_eq!(conf.file_browser, OsStr::new("/usr/local/bin/filer"));
		assert_eq!(conf.refresh_interval, Duration::from_millis(5000));
		assert_eq!(conf.elevate, Elevate::Always);

		// Unset, so default
		assert_eq!(conf.shutdown, OsStr::new("/sbin/shutdown"));
	}

	#[test]
	fn empty()
	{
		let conf = load(b"").unwrap();
		assert_eq!(conf.refresh_interval, Duration::from_millis(3000));
		assert_eq!(conf.elevate, Elevate::Auto);
		assert_eq!(conf.askpass, None);
		assert_eq!(conf.wrapper_args, ["-A", "-E"]);
	}

	#[test]
	fn wrapper_args()
	{
		let conf = load(b"WrapperArgs").unwrap();
		assert_eq!(conf.wrapper_args, ["-A", "-E"], "No value, no change");

		let conf = load(b"WrapperArgs -n").unwrap();
		assert_eq!(conf.wrapper_args, ["-n"]);

		let conf = load(b"WrapperArgs -n   -k").unwrap();
		assert_eq!(conf.wrapper_args, ["-n", "-k"]);
	}

	#[test]
	fn browse_on_mount()
	{
		let conf = load(b"").unwrap();
		assert_eq!(conf.browse_on_mount, true);

		let conf = load(b"BrowseOnMount no").unwrap();
		assert_eq!(conf.browse_on_mount, false);

		load(b"BrowseOnMount maybe").expect_err("yes or no");
	}

	#[test]
	fn bad_values()
	{
		load(b"RefreshInterval soon").expect_err("Not a number");
		load(b"RefreshInterval -5").expect_err("Not unsigned");
		load(b"Elevate sometimes").expect_err("Not an Elevate");
	}

	#[test]
	fn comments()
	{
		let conf = load(b"Bectl /opt/bectl # not that one\n# Bectl /x\n")
				.unwrap();
		assert_eq!(conf.bectl, std::ffi::OsStr::new("/opt/bectl"));
	}

	#[test]
	fn cli_override()
	{
		let mut args = crate::command::BeArgs::default();

		let conf = load_config(DEFCONF, &args).unwrap();
		assert_eq!(conf.elevate, Elevate::Always);

		args.elevate = Some(Elevate::Never);
		args.bectl = Some("/tmp/fakebectl".into());
		args.askpass = Some("/tmp/ask".into());
		let conf = load_config(DEFCONF, &args).unwrap();
		assert_eq!(conf.elevate, Elevate::Never);
		assert_eq!(conf.bectl, std::ffi::OsStr::new("/tmp/fakebectl"));
		assert_eq!(conf.askpass.as_deref(),
				Some(std::path::Path::new("/tmp/ask")));
	}

	#[test]
	fn from_file()
	{
		use std::io::Write as _;

		let mut tf = tempfile::NamedTempFile::new().unwrap();
		tf.write_all(b"RefreshInterval 250\n").unwrap();

		let mut args = crate::command::BeArgs::default();
		args.config = Some(tf.path().to_path_buf());
		let conf = load_config_file(&args).unwrap();
		assert_eq!(conf.refresh_interval, Duration::from_millis(250));

		// Given explicitly but not there is an error
		let dir = tempfile::tempdir().unwrap();
		args.config = Some(dir.path().join("nope.conf"));
		load_config_file(&args).expect_err("Missing file");
	}

	#[test]
	fn privileged()
	{
		let mut conf = load(DEFCONF).unwrap();
		let inv = conf.privileged(&conf.bectl.clone(), ["activate", "foo"]);
		assert_eq!(inv.program, std::path::Path::new("/usr/local/bin/sudo"));
		assert_eq!(inv.args_lossy(),
				["-A", "-E", "/sbin/bectl", "activate", "foo"]);
		assert_eq!(inv.env.len(), 1);
		assert_eq!(inv.env[0].0, "SUDO_ASKPASS");

		conf.elevate = Elevate::Never;
		let inv = conf.privileged(&conf.bectl.clone(), ["activate", "foo"]);
		assert_eq!(inv.program, std::path::Path::new("/sbin/bectl"));
		assert_eq!(inv.args_lossy(), ["activate", "foo"]);
		assert!(inv.env.is_empty());
	}
}
