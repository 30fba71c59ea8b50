//! A pretend bectl for tests.
//!
//! Keeps a little table of BEs and does roughly what bectl would do to
//! it for each verb, through whatever wrapper the invocation has on the
//! front.  Individual verbs can be told to fail or to not launch at all.
//! It also keeps track of how many runs are in progress at once.
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use super::{Invocation, LaunchErr, Output, Runner};


const VERBS: [&str; 7] = ["list", "check", "activate", "create", "destroy",
		"mount", "unmount"];


#[derive(Debug, Clone)]
enum Fail
{
	Exit(i32, String),
	Launch,
}


#[derive(Debug, Clone)]
struct Env
{
	name: String,
	active: String,
	mountpoint: String,
}


#[derive(Debug, Default)]
struct State
{
	envs: Vec<Env>,
	calls: Vec<Invocation>,
	launch_fails: Vec<Invocation>,
	launches: Vec<Invocation>,
	fails: HashMap<String, Fail>,
	browser_fails: bool,
	garbage: Option<String>,
}


#[derive(Debug, Default)]
pub(crate) struct FakeBectl
{
	state: Mutex<State>,
	delay: Mutex<Duration>,
	inflight: AtomicUsize,
	max_inflight: AtomicUsize,
}

impl FakeBectl
{
	/// Start with (name, active code, mountpoint) BEs
	pub(crate) fn new(envs: &[(&str, &str, &str)]) -> Self
	{
		let envs = envs.iter().map(|(n, a, m)| Env {
			name: n.to_string(),
			active: a.to_string(),
			mountpoint: m.to_string(),
		}).collect();
		let ret = Self::default();
		ret.state.lock().unwrap().envs = envs;
		ret
	}

	/// Make a verb exit with some code and stdout
	pub(crate) fn fail_verb(&self, verb: &str, code: i32, stdout: &str)
	{
		self.state.lock().unwrap().fails.insert(verb.to_string(),
				Fail::Exit(code, stdout.to_string()));
	}

	/// Make a verb fail to launch
	pub(crate) fn unlaunchable(&self, verb: &str)
	{
		self.state.lock().unwrap().fails.insert(verb.to_string(), Fail::Launch);
	}

	/// Make the file browser fail to launch
	pub(crate) fn unlaunchable_browser(&self)
	{
		self.state.lock().unwrap().browser_fails = true;
	}

	/// Give this back for `list` instead of the real table
	pub(crate) fn garbage_listing(&self, text: &str)
	{
		self.state.lock().unwrap().garbage = Some(text.to_string());
	}

	/// Take this long to run anything
	pub(crate) fn set_delay(&self, d: Duration)
	{
		*self.delay.lock().unwrap() = d;
	}

	/// Everything that actually got run
	pub(crate) fn calls(&self) -> Vec<Invocation>
	{
		self.state.lock().unwrap().calls.clone()
	}

	/// Everything that was tried but never started
	pub(crate) fn launch_fails(&self) -> Vec<Invocation>
	{
		self.state.lock().unwrap().launch_fails.clone()
	}

	pub(crate) fn launches(&self) -> Vec<Invocation>
	{
		self.state.lock().unwrap().launches.clone()
	}

	/// Most runs ever going at once
	pub(crate) fn max_inflight(&self) -> usize
	{
		self.max_inflight.load(Ordering::SeqCst)
	}


	fn listing(st: &State) -> String
	{
		if let Some(g) = &st.garbage { return g.clone(); }
		// bectl shows "-" for neither now nor next
		st.envs.iter()
				.map(|e| {
					let active = match e.active.as_str() {
						"" => "-",
						a  => a,
					};
					format!("{}\t{}\t{}\t8K\t2024-01-01 00:00\n",
							e.name, active, e.mountpoint)
				})
				.collect()
	}

	/// Do the thing to the table.  Err is a bectl-ish complaint.
	fn apply(st: &mut State, verb: &str, name: &str) -> Result<String, String>
	{
		let pos = st.envs.iter().position(|e| e.name == name);
		let missing = || format!("ERROR: {name}: boot environment not found\n");

		match verb {
			"list" => Ok(Self::listing(st)),
			"check" | "shutdown" => Ok(String::new()),
			"activate" => {
				pos.ok_or_else(missing)?;
				for e in st.envs.iter_mut()
				{
					let now = e.active.contains('N');
					let next = e.name == name;
					e.active = match (now, next) {
						(true, true)   => "NR",
						(true, false)  => "N",
						(false, true)  => "R",
						(false, false) => "",
					}.to_string();
				}
				Ok(String::new())
			},
			"create" => {
				if pos.is_some()
				{ return Err(format!("ERROR: {name}: already exists\n")); }
				st.envs.push(Env { name: name.to_string(), active: "".into(),
						mountpoint: "-".into() });
				Ok(String::new())
			},
			"destroy" => {
				st.envs.remove(pos.ok_or_else(missing)?);
				Ok(String::new())
			},
			"mount" => {
				let i = pos.ok_or_else(missing)?;
				st.envs[i].mountpoint = format!("/tmp/be_mount.{name}");
				Ok(String::new())
			},
			"unmount" => {
				let i = pos.ok_or_else(missing)?;
				st.envs[i].mountpoint = "-".into();
				Ok(String::new())
			},
			v => Err(format!("ERROR: unknown verb {v}\n")),
		}
	}

	fn run_inner(&self, inv: &Invocation) -> Result<Output, LaunchErr>
	{
		let args = inv.args_lossy();
		let prog = inv.program.to_string_lossy();

		let verb = match args.iter().find(|a| VERBS.contains(&a.as_str())) {
			Some(v) => v.clone(),
			None if prog.ends_with("shutdown")
					|| args.iter().any(|a| a.ends_with("shutdown"))
					=> "shutdown".to_string(),
			None => "unknown".to_string(),
		};
		let name = args.last().cloned().unwrap_or_default();

		let mut st = self.state.lock().unwrap();
		let fail = st.fails.get(&verb).cloned();
		if let Some(Fail::Launch) = fail
		{
			st.launch_fails.push(inv.clone());
			let err = std::io::Error::from(std::io::ErrorKind::NotFound);
			return Err(LaunchErr::new(inv, err));
		}

		st.calls.push(inv.clone());
		if let Some(Fail::Exit(c, o)) = fail
		{
			return Ok(Output::failed(c, o));
		}

		Ok(match Self::apply(&mut st, &verb, &name) {
			Ok(o)  => Output::ok(o),
			Err(o) => Output::failed(1, o),
		})
	}
}

impl Runner for FakeBectl
{
	fn run(&self, inv: &Invocation) -> Result<Output, LaunchErr>
	{
		let now = self.inflight.fetch_add(1, Ordering::SeqCst) + 1;
		self.max_inflight.fetch_max(now, Ordering::SeqCst);

		let delay = *self.delay.lock().unwrap();
		if !delay.is_zero() { std::thread::sleep(delay); }
		let ret = self.run_inner(inv);

		self.inflight.fetch_sub(1, Ordering::SeqCst);
		ret
	}

	fn launch(&self, inv: &Invocation) -> Result<(), LaunchErr>
	{
		let mut st = self.state.lock().unwrap();
		st.launches.push(inv.clone());
		match st.browser_fails {
			true => Err(LaunchErr::new(inv,
					std::io::Error::from(std::io::ErrorKind::NotFound))),
			false => Ok(()),
		}
	}
}
