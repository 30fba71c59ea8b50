//! The refresh timer.  It doesn't fire on its own; the controller asks
//! it how long until it's due and waits on its queue that long.
use std::time::{Duration, Instant};


#[derive(Debug, Clone)]
pub(crate) struct Timer
{
	/// How long between ticks
	interval: Duration,

	/// When the next one's due; None if we're stopped
	due: Option<Instant>,
}

impl Timer
{
	/// Make a stopped timer
	pub(crate) fn new(interval: Duration) -> Self
	{
		Self { interval, due: None }
	}

	/// Arm it; the next tick is one interval from now.  Restarting a
	/// running timer pushes its tick back.
	pub(crate) fn start(&mut self)
	{
		self.due = Some(Instant::now() + self.interval);
	}

	pub(crate) fn stop(&mut self)
	{
		self.due = None;
	}

	pub(crate) fn running(&self) -> bool
	{
		self.due.is_some()
	}

	/// Time left until the tick; zero if it's overdue, None if stopped.
	pub(crate) fn remaining(&self) -> Option<Duration>
	{
		self.due.map(|d| d.saturating_duration_since(Instant::now()))
	}

	pub(crate) fn interval(&self) -> Duration { self.interval }
}
