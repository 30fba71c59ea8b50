//! The other side of the controller: whatever shows records to a human
//! and asks them things.
use crate::be::{Action, BootEnv};
use super::Intent;


/// A read-only view of the current state, handed out after every
/// refresh.
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a>
{
	/// The records, in bectl's order
	pub records: &'a [BootEnv],

	/// Index of the selected one, if any
	pub selected: Option<usize>,
}

impl<'a> Snapshot<'a>
{
	/// The selected record
	pub fn selected_env(&self) -> Option<&'a BootEnv>
	{
		self.records.get(self.selected?)
	}
}


/// Presentation collaborator.  The controller calls into this; it never
/// calls back into the controller except by way of intents.
pub trait Presenter
{
	/// Fresh state to show
	fn show(&mut self, snap: Snapshot<'_>);

	/// An action failed; say so.
	fn error(&mut self, action: &Action, msg: &str);

	/// Ask a yes/no question.  No means no.
	fn confirm(&mut self, question: &str) -> bool;

	/// Something's running (Some) or done running (None).
	fn busy(&mut self, _what: Option<&str>) {}

	/// Informational message; e.g., why a request couldn't be done.
	fn notice(&mut self, msg: &str);

	/// Turn free-form user input into an intent, if it means anything.
	fn interpret(&mut self, _input: &str) -> Option<Intent> { None }

	/// Something picked up along the way (e.g., a quit typed in answer
	/// to a question) that should be handled next.
	fn deferred(&mut self) -> Option<Intent> { None }
}
