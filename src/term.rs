//! Terminal front-end: tables on stdout, complaints on stderr, a spinner
//! while something privileged runs, and a tiny command language for the
//! interactive mode.
use std::io::{self, Write as _};
use std::time::Duration;

use crossbeam::channel::Receiver;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::be::{self, Action};
use crate::core::{Intent, Presenter, Request, Snapshot, Target};


#[derive(Debug, Default)]
pub(crate) struct TermPresenter
{
	/// Print the table whenever it changes (interactive), or leave it to
	/// the command (one-shot)
	live: bool,

	/// Don't ask, just do
	assume_yes: bool,

	/// In interactive mode, where answers to questions come in
	answers: Option<Receiver<Intent>>,

	/// What we last printed, so we don't repeat ourselves every tick
	last: String,

	/// Picked up while asking something; handled once the asking's done
	deferred: Option<Intent>,

	spinner: Option<ProgressBar>,
}

impl TermPresenter
{
	/// For one-shot commands
	pub(crate) fn oneshot(assume_yes: bool) -> Self
	{
		Self { assume_yes, ..Default::default() }
	}

	/// For watch mode; answers come in on the same queue as commands.
	pub(crate) fn live(answers: Receiver<Intent>) -> Self
	{
		Self { live: true, answers: Some(answers), ..Default::default() }
	}

	/// Ask on the terminal directly.
	fn ask_tty(&mut self, question: &str) -> bool
	{
		use io::IsTerminal as _;
		if !io::stdin().is_terminal()
		{
			eprintln!("{question}\nstdin isn't a tty; not confirming.  \
					(`{} ... -y` skips the question)", crate::util::cmdname());
			return false;
		}

		print!("{question}\n[y/N] ");
		let _ = io::stdout().flush();
		let mut ans = String::new();
		match io::stdin().read_line(&mut ans) {
			Ok(_)  => is_yes(&ans),
			Err(_) => false,
		}
	}

	/// Ask via the intent queue.  A quit (typed, or stdin going away)
	/// is a no, and gets handed back to do afterward.
	fn ask_queue(rx: &Receiver<Intent>, question: &str)
			-> (bool, Option<Intent>)
	{
		print!("{question}\n[y/N] ");
		let _ = io::stdout().flush();
		while let Ok(i) = rx.recv()
		{
			match i {
				Intent::Input(s) => {
					if parse_line(&s) == Ok(Line::Intent(Intent::Quit))
					{ return (false, Some(Intent::Quit)); }
					return (is_yes(&s), None);
				},
				Intent::Quit => return (false, Some(Intent::Quit)),
				i => debug!(?i, "Ignoring while waiting for an answer"),
			}
		}
		(false, None)
	}
}


impl Presenter for TermPresenter
{
	fn show(&mut self, snap: Snapshot<'_>)
	{
		if !self.live { return; }
		let t = be::table::render(snap.records, snap.selected);
		if t == self.last { return; }
		println!("\n{t}");
		self.last = t;
	}

	fn error(&mut self, action: &Action, msg: &str)
	{
		eprintln!("Error ({action}): {msg}");
	}

	fn confirm(&mut self, question: &str) -> bool
	{
		if self.assume_yes { return true; }
		match &self.answers {
			Some(rx) => {
				let (yes, later) = Self::ask_queue(rx, question);
				self.deferred = later;
				yes
			},
			None => self.ask_tty(question),
		}
	}

	fn busy(&mut self, what: Option<&str>)
	{
		match what {
			Some(w) => {
				let pb = ProgressBar::new_spinner();
				if let Ok(st) = ProgressStyle::with_template("{spinner} {msg}")
				{ pb.set_style(st); }
				pb.set_message(format!("{w}..."));
				pb.enable_steady_tick(Duration::from_millis(100));
				self.spinner = Some(pb);
			},
			None => {
				if let Some(pb) = self.spinner.take() { pb.finish_and_clear(); }
			},
		}
	}

	fn notice(&mut self, msg: &str)
	{
		match self.live {
			true  => println!("{msg}"),
			false => eprintln!("{msg}"),
		}
	}

	fn interpret(&mut self, input: &str) -> Option<Intent>
	{
		match parse_line(input) {
			Ok(Line::Intent(i)) => Some(i),
			Ok(Line::Help) => { println!("{HELP}"); None },
			Ok(Line::Empty) => None,
			Err(e) => { println!("{e}  (? for help)"); None },
		}
	}

	fn deferred(&mut self) -> Option<Intent>
	{
		self.deferred.take()
	}
}


fn is_yes(s: &str) -> bool
{
	matches!(s.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}



pub(crate) const HELP: &str = "\
Commands (the selected row is marked with >; [x] boots next):
  <n> | select <n|name>      select a row
  a | activate [name]        boot into it next time
  n | new <name>             create a new boot environment
  rm | remove [name]         destroy it (asks first)
  m | mount [name]           mount it (or unmount it, if it is)
  u | unmount [name]         unmount it
  reboot                     restart now (asks first)
  r | refresh                list again now
  ? | help                   this
  q | quit                   leave
Names default to the selected row.  Answering a question with q
means no, and then quits.";


/// What a line of input means
#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum Line
{
	Intent(Intent),
	Help,
	Empty,
}


/// Parse a line of interactive input.
pub(crate) fn parse_line(line: &str) -> Result<Line, String>
{
	let line = line.trim();
	let (cmd, rest) = match line.split_once(char::is_whitespace) {
		Some((c, r)) => (c, r.trim()),
		None => (line, ""),
	};
	if cmd.is_empty() { return Ok(Line::Empty); }

	let target = || match rest {
		"" => Target::Selected,
		n  => Target::Named(n.to_string()),
	};
	let req = |r: Request| Ok(Line::Intent(Intent::Request(r)));

	// A bare number is a row
	if let Ok(n) = cmd.parse::<usize>()
	{
		if !rest.is_empty() { return Err(format!("What's {rest:?}?")); }
		return Ok(Line::Intent(Intent::Select(n)));
	}

	match cmd {
		"s" | "select" => match rest {
			"" => Err("Select what?".to_string()),
			r => Ok(Line::Intent(match r.parse::<usize>() {
				Ok(n)  => Intent::Select(n),
				Err(_) => Intent::SelectName(r.to_string()),
			})),
		},
		"a" | "activate" => req(Request::Activate(target())),
		"n" | "new" | "create" => match rest {
			"" => Err("New needs a name".to_string()),
			r => req(Request::Create(r.to_string())),
		},
		"rm" | "remove" | "destroy" => req(Request::Remove(target())),
		"m" | "mount" => req(Request::ToggleMount(target())),
		"u" | "unmount" | "umount" => req(Request::Unmount(target())),
		"reboot" | "restart" => req(Request::Reboot),
		"r" | "refresh" | "l" | "list" => Ok(Line::Intent(Intent::Refresh)),
		"?" | "h" | "help" => Ok(Line::Help),
		"q" | "quit" | "exit" => Ok(Line::Intent(Intent::Quit)),
		c => Err(format!("Unknown command {c:?}")),
	}
}



#[cfg(test)]
mod tests
{
	use super::*;

	fn intent(l: &str) -> Intent
	{
		match parse_line(l) {
			Ok(Line::Intent(i)) => i,
			x => panic!("{l:?} -> {x:?}"),
		}
	}

	fn rq(l: &str) -> Request
	{
		match intent(l) {
			Intent::Request(r) => r,
			x => panic!("{l:?} -> {x:?}"),
		}
	}

	#[test]
	fn selects()
	{
		assert_eq!(intent("3"), Intent::Select(3));
		assert_eq!(intent("  0 "), Intent::Select(0));
		assert_eq!(intent("s 2"), Intent::Select(2));
		assert_eq!(intent("select default"),
				Intent::SelectName("default".into()));
		assert!(parse_line("select").is_err());
		assert!(parse_line("3 4").is_err());
	}

	#[test]
	fn requests()
	{
		let nm = |s: &str| Target::Named(s.to_string());
		assert_eq!(rq("a"), Request::Activate(Target::Selected));
		assert_eq!(rq("activate foo"), Request::Activate(nm("foo")));
		assert_eq!(rq("rm"), Request::Remove(Target::Selected));
		assert_eq!(rq("destroy old"), Request::Remove(nm("old")));
		assert_eq!(rq("m"), Request::ToggleMount(Target::Selected));
		assert_eq!(rq("u x"), Request::Unmount(nm("x")));
		assert_eq!(rq("reboot"), Request::Reboot);

		// New keeps the whole rest; the sanitizer deals with it later
		assert_eq!(rq("new My New BE!"), Request::Create("My New BE!".into()));
		assert!(parse_line("new").is_err());
	}

	#[test]
	fn misc()
	{
		assert_eq!(parse_line(""), Ok(Line::Empty));
		assert_eq!(parse_line("   \n"), Ok(Line::Empty));
		assert_eq!(parse_line("?"), Ok(Line::Help));
		assert_eq!(intent("r"), Intent::Refresh);
		assert_eq!(intent("q"), Intent::Quit);
		assert!(parse_line("frobnicate").is_err());
	}

	#[test]
	fn yes()
	{
		assert!(is_yes("y\n"));
		assert!(is_yes(" YES "));
		assert!(!is_yes(""));
		assert!(!is_yes("n"));
		assert!(!is_yes("yep"));
	}

	#[test]
	fn queue_answers()
	{
		use crossbeam::channel;

		let (tx, rx) = channel::unbounded();
		tx.send(Intent::Refresh).unwrap();
		tx.send(Intent::Input("y".into())).unwrap();
		let mut tp = TermPresenter::live(rx);
		assert!(tp.confirm("Sure?"), "Skipped past the refresh to the y");

		tx.send(Intent::Input("nah".into())).unwrap();
		assert!(!tp.confirm("Sure?"));

		// Quitting at a question is a no, with the quit kept for later
		tx.send(Intent::Input("q".into())).unwrap();
		assert!(!tp.confirm("Sure?"));
		assert_eq!(tp.deferred(), Some(Intent::Quit));
		assert_eq!(tp.deferred(), None, "Only the once");

		tx.send(Intent::Quit).unwrap();
		assert!(!tp.confirm("Sure?"));
		assert_eq!(tp.deferred(), Some(Intent::Quit));

		drop(tx);
		assert!(!tp.confirm("Sure?"), "Hangup is a no");
		assert_eq!(tp.deferred(), None);

		let mut tp = TermPresenter::oneshot(true);
		assert!(tp.confirm("Sure?"));
	}
}
