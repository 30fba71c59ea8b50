//! Fetching the listing and keeping the selection sensible across
//! fetches.
//!
//! This owns the current records and which one's selected.  Nothing else
//! writes to them; the presenter sees them through a Snapshot.
use tracing::{debug, warn};

use crate::be::{self, BootEnv};
use crate::config::Config;
use crate::runner::{Runner, LaunchErr};
use super::Snapshot;


/// Ways a fetch can fall over.  Either way, the records we had stay put.
#[derive(Debug)]
#[derive(thiserror::Error)]
pub enum FetchErr
{
	#[error(transparent)]
	Launch(#[from] LaunchErr),

	#[error("bectl list failed: {0}")]
	Status(String),
}


#[derive(Debug, Default)]
pub(crate) struct Refresher
{
	/// Last good listing
	records: Vec<BootEnv>,

	/// Index into records
	selected: Option<usize>,
}

impl Refresher
{
	pub(crate) fn snapshot(&self) -> Snapshot<'_>
	{
		Snapshot { records: &self.records, selected: self.selected }
	}

	pub(crate) fn records(&self) -> &[BootEnv] { &self.records }
	pub(crate) fn selected(&self) -> Option<usize> { self.selected }

	pub(crate) fn selected_env(&self) -> Option<&BootEnv>
	{
		self.records.get(self.selected?)
	}

	pub(crate) fn find(&self, name: &str) -> Option<&BootEnv>
	{
		self.records.iter().find(|r| r.name == name)
	}

	/// Select by index; false (and no change) if it's out of range.
	pub(crate) fn select(&mut self, idx: usize) -> bool
	{
		if idx >= self.records.len() { return false; }
		self.selected = Some(idx);
		true
	}

	/// Select by name; false (and no change) if there's no such BE.
	pub(crate) fn select_name(&mut self, name: &str) -> bool
	{
		match self.records.iter().position(|r| r.name == name) {
			Some(i) => { self.selected = Some(i); true },
			None => false,
		}
	}


	/// Run `bectl list -H` and take on whatever it says.
	///
	/// Returns how many lines got skipped as malformed.  This holds &mut
	/// self the whole time, so there's no second fetch (or anybody
	/// reading half-updated records) while one is going.
	pub(crate) fn fetch(&mut self, config: &Config, runner: &impl Runner)
			-> Result<usize, FetchErr>
	{
		let inv = config.bectl(crate::util::bectl::LIST_ARGS);
		let out = runner.run(&inv)?;
		if !out.success()
		{
			let msg = out.message()
					.unwrap_or_else(|| format!("exit {:?}", out.code));
			return Err(FetchErr::Status(msg));
		}

		let listing = be::parse::bytes(&out.stdout);
		for e in &listing.errs { warn!("Skipping bad listing {e}"); }
		let nbad = listing.errs.len();

		self.install(listing.records);
		Ok(nbad)
	}


	/// Swap in a new set of records and figure out the selection.
	pub(crate) fn install(&mut self, records: Vec<BootEnv>)
	{
		let prev = self.selected_env().map(|r| r.name.clone());
		let sel = reconcile(prev.as_deref(), &records);
		debug!(n = records.len(), ?prev, ?sel, "new listing");
		self.records = records;
		self.selected = sel;
	}
}


/// Where should the selection land in a new listing?
///
/// If something was selected and it's still there, it stays selected
/// wherever it's moved to.  If it's gone, nothing is.  If nothing was,
/// and exactly one BE is set to boot next, that one is.
pub(crate) fn reconcile(prev: Option<&str>, records: &[BootEnv])
		-> Option<usize>
{
	if let Some(name) = prev
	{
		return records.iter().position(|r| r.name == name);
	}

	let mut nexts = records.iter().enumerate()
			.filter(|(_, r)| r.active.on_reboot());
	match (nexts.next(), nexts.next()) {
		(Some((i, _)), None) => Some(i),
		_ => None,
	}
}
