//! Running external commands.
//!
//! Everything this program actually does is done by somebody else
//! (bectl, sudo, shutdown, a file browser), so this is the one seam where
//! we touch the system.  The Runner trait is there so the rest can be
//! driven by a scripted fake in tests.
use std::ffi::{OsStr, OsString};
use std::path::PathBuf;
use std::process::{Command, Stdio};

use tracing::{debug, trace};

#[cfg(test)]
pub(crate) mod fake;


/// A fully specified command to run: program, argv, and any extra
/// environment.  Args are discrete argv entries; nothing here goes
/// through a shell.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Invocation
{
	/// What to run
	pub program: PathBuf,

	/// Its args
	pub args: Vec<OsString>,

	/// Extra environment to set
	pub env: Vec<(OsString, OsString)>,
}

impl Invocation
{
	pub fn new(program: impl Into<PathBuf>) -> Self
	{
		Self { program: program.into(), args: vec![], env: vec![] }
	}

	/// Add an arg
	pub fn arg(mut self, a: impl AsRef<OsStr>) -> Self
	{
		self.args.push(a.as_ref().to_os_string());
		self
	}

	/// Add a bunch of args
	pub fn args<I, S>(mut self, args: I) -> Self
			where I: IntoIterator<Item = S>, S: AsRef<OsStr>
	{
		self.args.extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
		self
	}

	/// Set an env var for the child
	pub fn env(mut self, k: impl AsRef<OsStr>, v: impl AsRef<OsStr>) -> Self
	{
		self.env.push((k.as_ref().to_os_string(), v.as_ref().to_os_string()));
		self
	}

	/// The args as lossy strings, mostly for matching in tests and
	/// showing in logs.
	pub fn args_lossy(&self) -> Vec<String>
	{
		self.args.iter().map(|a| a.to_string_lossy().into_owned()).collect()
	}

	fn command(&self) -> Command
	{
		let mut cmd = Command::new(&self.program);
		cmd.args(&self.args);
		for (k, v) in &self.env { cmd.env(k, v); }
		cmd
	}
}

impl std::fmt::Display for Invocation
{
	fn fmt(&self, f: &mut std::fmt::Formatter) -> Result<(), std::fmt::Error>
	{
		write!(f, "{}", self.program.display())?;
		for a in &self.args { write!(f, " {}", a.to_string_lossy())?; }
		Ok(())
	}
}



/// The program couldn't be started at all.  This is not the same as it
/// running and failing; that's just an Output with a bad status.
#[derive(Debug)]
#[derive(thiserror::Error)]
#[error("{program} cannot be launched: {err}")]
pub struct LaunchErr
{
	/// What we tried to run
	pub program: String,

	/// Why it didn't go
	#[source]
	pub err: std::io::Error,
}

impl LaunchErr
{
	pub fn new(inv: &Invocation, err: std::io::Error) -> Self
	{
		Self { program: inv.program.display().to_string(), err }
	}
}


/// What came back from a completed run.
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Output
{
	/// Exit code; None if it died on a signal
	pub code: Option<i32>,

	/// Captured stdout
	pub stdout: Vec<u8>,

	/// Captured stderr
	pub stderr: Vec<u8>,
}

impl Output
{
	/// A clean exit with some stdout
	pub fn ok(stdout: impl Into<Vec<u8>>) -> Self
	{
		Self { code: Some(0), stdout: stdout.into(), stderr: vec![] }
	}

	/// A failed exit with some stdout
	pub fn failed(code: i32, stdout: impl Into<Vec<u8>>) -> Self
	{
		Self { code: Some(code), stdout: stdout.into(), stderr: vec![] }
	}

	pub fn success(&self) -> bool { self.code == Some(0) }

	/// Pull a human-readable message out of a failed run.
	///
	/// bectl prefixes its complaints with `ERROR: `, which is noise in a
	/// dialog.  We look at stdout first, then stderr.  If neither has
	/// anything, there's nothing to say, and the caller gets to pick a
	/// generic message.  That's also what an elevation failure looks
	/// like; sudo with a cancelled askpass doesn't say much.
	pub fn message(&self) -> Option<String>
	{
		let pick = |raw: &[u8]| -> Option<String> {
			let s = String::from_utf8_lossy(raw);
			let msg: Vec<&str> = s.lines()
					.map(|l| l.trim())
					.map(|l| l.strip_prefix("ERROR: ").unwrap_or(l).trim())
					.filter(|l| !l.is_empty())
					.collect();
			match msg.len() {
				0 => None,
				_ => Some(msg.join("\n")),
			}
		};
		pick(&self.stdout).or_else(|| pick(&self.stderr))
	}
}



/// Something that can run commands.  Blocks until the command is done;
/// there's no timeout and no cancellation.
pub trait Runner
{
	/// Run to completion, capturing output.
	fn run(&self, inv: &Invocation) -> Result<Output, LaunchErr>;

	/// Start something and don't wait around for it.
	fn launch(&self, inv: &Invocation) -> Result<(), LaunchErr>;
}

impl<T: Runner + ?Sized> Runner for std::sync::Arc<T>
{
	fn run(&self, inv: &Invocation) -> Result<Output, LaunchErr>
	{ (**self).run(inv) }

	fn launch(&self, inv: &Invocation) -> Result<(), LaunchErr>
	{ (**self).launch(inv) }
}

impl<T: Runner + ?Sized> Runner for Box<T>
{
	fn run(&self, inv: &Invocation) -> Result<Output, LaunchErr>
	{ (**self).run(inv) }

	fn launch(&self, inv: &Invocation) -> Result<(), LaunchErr>
	{ (**self).launch(inv) }
}



/// The real thing, via std::process.
#[derive(Debug, Default, Clone, Copy)]
pub struct SysRunner;

impl Runner for SysRunner
{
	fn run(&self, inv: &Invocation) -> Result<Output, LaunchErr>
	{
		debug!(cmd = %inv, "running");

		// stdin from /dev/null; anything that wants to prompt us should
		// be doing it through askpass, not the terminal.
		let out = inv.command()
				.stdin(Stdio::null())
				.output()
				.map_err(|e| LaunchErr::new(inv, e))?;

		let ret = Output {
			code: out.status.code(),
			stdout: out.stdout,
			stderr: out.stderr,
		};
		debug!(cmd = %inv, code = ?ret.code, "finished");
		trace!(stdout = %String::from_utf8_lossy(&ret.stdout),
				stderr = %String::from_utf8_lossy(&ret.stderr));
		Ok(ret)
	}

	fn launch(&self, inv: &Invocation) -> Result<(), LaunchErr>
	{
		debug!(cmd = %inv, "launching");
		let child = inv.command()
				.stdin(Stdio::null())
				.stdout(Stdio::null())
				.stderr(Stdio::null())
				.spawn()
				.map_err(|e| LaunchErr::new(inv, e))?;

		// Reap it off to the side so we don't leave a zombie around.
		let mut child = child;
		std::thread::spawn(move || { let _ = child.wait(); });
		Ok(())
	}
}
