//! Parse of `bectl list -H` output.
//!
//! That's one BE per line, tab-separated, no header:
//!
//! `name <TAB> active <TAB> mountpoint <TAB> space <TAB> created`
//!
//! A bad line doesn't sink the whole listing; we skip it, note why, and
//! hand back everything else in the order bectl gave it to us.  An odd
//! Active code isn't a bad line; the BE is still there, we just have to
//! guess what the code means.
use std::collections::HashSet;

use tracing::warn;

use super::{BootEnv, ActiveState};


/// How many columns a good line has
const NFIELDS: usize = 5;


/// What was wrong with a line
#[derive(Debug, Clone, Eq, PartialEq)]
#[derive(thiserror::Error)]
pub enum ParseLineErr
{
	#[error("line {0}: only {1} fields")]
	TooFewFields(usize, usize),

	#[error("line {0}: {1} fields, expected {NFIELDS}")]
	TooManyFields(usize, usize),

	#[error("line {0}: empty name")]
	EmptyName(usize),

	#[error("line {0}: duplicate name {1:?}")]
	DuplicateName(usize, String),
}


/// The result of parsing a full listing.
#[derive(Debug, Default)]
pub struct Listing
{
	/// Good records, in bectl's order
	pub records: Vec<BootEnv>,

	/// Lines we skipped
	pub errs: Vec<ParseLineErr>,
}


/// Parse a whole listing.
pub fn listing(text: &str) -> Listing
{
	let mut ret = Listing::default();
	let mut seen: HashSet<String> = HashSet::new();

	for (idx, l) in text.split('\n').enumerate()
	{
		let lnum = idx + 1;
		let l = l.trim_end_matches(['\r', '\n']);
		if l.trim().is_empty() { continue; }

		let be = match line(lnum, l) {
			Ok(be) => be,
			Err(e) => { ret.errs.push(e); continue; },
		};

		if !seen.insert(be.name.clone())
		{
			ret.errs.push(ParseLineErr::DuplicateName(lnum, be.name));
			continue;
		}
		ret.records.push(be);
	}

	ret
}


/// Parse the raw bytes we got from the runner; bectl shouldn't be giving
/// us non-UTF-8, but if it does we'll make do.
pub fn bytes(raw: &[u8]) -> Listing
{
	listing(&String::from_utf8_lossy(raw))
}


/// Parse a single line.  The line number is just for error reporting.
pub fn line(lnum: usize, l: &str) -> Result<BootEnv, ParseLineErr>
{
	use ParseLineErr as PLE;

	let fields: Vec<&str> = l.split('\t').collect();
	let nf = fields.len();
	if nf < NFIELDS { return Err(PLE::TooFewFields(lnum, nf)); }
	if nf > NFIELDS { return Err(PLE::TooManyFields(lnum, nf)); }

	let name = fields[0].trim();
	if name.is_empty() { return Err(PLE::EmptyName(lnum)); }

	let acode = fields[1].trim();
	let active = match ActiveState::from_code(acode) {
		Some(a) => a,
		None => {
			let a = ActiveState::guess(acode);
			warn!("line {lnum}: unknown active code {acode:?} for {name}, \
					taking it as {a}");
			a
		},
	};

	Ok(BootEnv {
		name: name.to_string(),
		active,
		mountpoint: fields[2].trim().to_string(),
		space:      fields[3].trim().to_string(),
		created:    fields[4].trim().to_string(),
	})
}
