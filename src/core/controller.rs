//! The controller: one owner for the records, the selection and the
//! timer, fed by a queue of intents.
//!
//! Everything that runs a command goes through here, on whatever thread
//! is calling run(), one at a time.  The timer's stopped while anything
//! runs, and only restarted once it (and the follow-up listing) is done,
//! so there's never more than one child process in flight and nobody
//! else ever touches the records.
use crossbeam::channel::{Receiver, RecvTimeoutError};
use tracing::{debug, trace, warn};

use crate::be::BootEnv;
use crate::config::Config;
use crate::runner::Runner;
use super::{Presenter, Snapshot, Request};
use super::refresh::{Refresher, FetchErr};
use super::timer::Timer;


/// Something somebody wants done.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Intent
{
	/// Re-list now
	Refresh,

	/// Select by row
	Select(usize),

	/// Select by name
	SelectName(String),

	/// Do something to the system
	Request(Request),

	/// Raw user input, for the presenter to make sense of
	Input(String),

	/// All done
	Quit,
}


/// Whether run() should keep going
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Flow
{
	Continue,
	Quit,
}


pub struct Controller<R: Runner, P: Presenter>
{
	pub(super) config: Config,
	pub(super) runner: R,
	pub(super) presenter: P,
	pub(super) state: Refresher,
	pub(super) timer: Timer,
}

impl<R: Runner, P: Presenter> Controller<R, P>
{
	pub fn new(config: Config, runner: R, presenter: P) -> Self
	{
		let timer = Timer::new(config.refresh_interval);
		Self { config, runner, presenter, state: Refresher::default(), timer }
	}

	pub fn snapshot(&self) -> Snapshot<'_> { self.state.snapshot() }
	pub fn records(&self) -> &[BootEnv] { self.state.records() }
	pub fn selected(&self) -> Option<usize> { self.state.selected() }
	pub fn presenter(&self) -> &P { &self.presenter }
	pub fn presenter_mut(&mut self) -> &mut P { &mut self.presenter }
	pub fn config(&self) -> &Config { &self.config }


	/// Fetch a fresh listing and show it.  A failed fetch leaves what we
	/// had; the next one may do better.
	pub fn refresh(&mut self) -> Result<(), FetchErr>
	{
		let ret = self.state.fetch(&self.config, &self.runner);
		match &ret {
			Ok(0) => (),
			Ok(n) => debug!("{n} bad listing line{}", crate::util::plural(*n)),
			Err(e) => warn!("Listing failed: {e}"),
		}
		self.presenter.show(self.state.snapshot());
		ret.map(|_| ())
	}

	/// Timer went off.
	fn tick(&mut self)
	{
		trace!("tick");
		self.timer.stop();
		let _ = self.refresh();
		self.timer.start();
	}

	/// Refresh on demand; whatever tick was pending gets pushed back a
	/// full interval.
	fn refresh_now(&mut self)
	{
		let was = self.timer.running();
		self.timer.stop();
		let _ = self.refresh();
		if was { self.timer.start(); }
	}


	/// Handle one intent.
	pub fn handle(&mut self, intent: Intent) -> Flow
	{
		debug!(?intent, "handling");
		match intent {
			Intent::Refresh => self.refresh_now(),
			Intent::Select(i) => {
				match self.state.select(i) {
					true  => self.presenter.show(self.state.snapshot()),
					false => self.presenter.notice(&format!("No row {i}")),
				}
			},
			Intent::SelectName(n) => {
				match self.state.select_name(&n) {
					true  => self.presenter.show(self.state.snapshot()),
					false => self.presenter.notice(
							&format!("No boot environment {n}")),
				}
			},
			Intent::Request(r) => { self.request(r); },
			Intent::Input(s) => {
				match self.presenter.interpret(&s) {
					// Don't let input turn into more input forever
					Some(Intent::Input(_)) | None => (),
					Some(i) => return self.handle(i),
				}
			},
			Intent::Quit => return Flow::Quit,
		}
		Flow::Continue
	}


	/// Main loop: list, then keep listing every interval while handling
	/// whatever comes in on the queue, until Quit or the queue closes.
	pub fn run(&mut self, rx: &Receiver<Intent>)
	{
		debug!(interval = ?self.timer.interval(), "controller starting");
		let _ = self.refresh();
		self.timer.start();

		loop
		{
			// An overdue tick goes first, so a busy queue can't starve
			// the listing.
			let intent = match self.timer.remaining() {
				Some(left) if left.is_zero() => { self.tick(); continue; },
				Some(left) => match rx.recv_timeout(left) {
					Ok(i) => i,
					Err(RecvTimeoutError::Timeout) => { self.tick(); continue; },
					Err(RecvTimeoutError::Disconnected) => break,
				},
				None => match rx.recv() {
					Ok(i) => i,
					Err(_) => break,
				},
			};

			let mut flow = self.handle(intent);
			while flow == Flow::Continue
			{
				match self.presenter.deferred() {
					Some(i) => flow = self.handle(i),
					None => break,
				}
			}
			if flow == Flow::Quit { break; }
		}

		self.timer.stop();
		debug!("controller done");
	}
}
