//! Boot environment records.
//!
//! Every field but the activation state is kept as the display string
//! bectl gave us; we never do math on space or dates, we just show them.


/// Mountpoint column value for "not mounted"
pub const NOT_MOUNTED: &str = "-";


/// Whether a BE is the running one, the next-boot one, both, or neither.
///
/// bectl encodes this as a two-letter code in the Active column; the
/// Display is what we show people.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
#[derive(strum::Display, strum::EnumIter, strum::AsRefStr)]
#[derive(serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ActiveState
{
	/// Not in use
	#[default]
	#[strum(serialize = "-")]
	Inactive,

	/// What we're running on right now
	#[strum(serialize = "Now")]
	ActiveNow,

	/// What we'll boot into next time
	#[strum(serialize = "On reboot")]
	ActiveOnReboot,

	/// Both of the above
	#[strum(serialize = "Now and on reboot")]
	ActiveNowAndOnReboot,
}

impl ActiveState
{
	/// Map a bectl Active code.  bectl writes "-" for neither; we take
	/// an empty column the same way.  Anything else outside the known
	/// ones is an anomaly; see guess().
	pub fn from_code(code: &str) -> Option<Self>
	{
		Some(match code {
			"" | "-" => Self::Inactive,
			"N"  => Self::ActiveNow,
			"R"  => Self::ActiveOnReboot,
			"NR" => Self::ActiveNowAndOnReboot,
			_    => None?,
		})
	}

	/// Make what we can of a code we don't know, going by the letters in
	/// it.  T is bectl's temporary (one-time) next boot, which is still
	/// next boot as far as we're concerned.
	pub fn guess(code: &str) -> Self
	{
		let now = code.contains('N');
		let next = code.contains('R') || code.contains('T');
		match (now, next) {
			(true, true)   => Self::ActiveNowAndOnReboot,
			(true, false)  => Self::ActiveNow,
			(false, true)  => Self::ActiveOnReboot,
			(false, false) => Self::Inactive,
		}
	}

	/// And back to the code.
	pub fn code(&self) -> &'static str
	{
		match self {
			Self::Inactive => "",
			Self::ActiveNow => "N",
			Self::ActiveOnReboot => "R",
			Self::ActiveNowAndOnReboot => "NR",
		}
	}

	/// Is this the one we're running?
	pub fn now(&self) -> bool
	{
		matches!(self, Self::ActiveNow | Self::ActiveNowAndOnReboot)
	}

	/// Is this the one we'll boot into?
	pub fn on_reboot(&self) -> bool
	{
		matches!(self, Self::ActiveOnReboot | Self::ActiveNowAndOnReboot)
	}
}



/// One line of `bectl list -H`.
#[derive(Debug, Clone, Eq, PartialEq)]
#[derive(serde::Serialize)]
pub struct BootEnv
{
	/// BE name; unique within a listing
	pub name: String,

	/// Activation state
	pub active: ActiveState,

	/// Where it's mounted, or "-"
	pub mountpoint: String,

	/// Space used, as bectl formats it
	pub space: String,

	/// Creation time, as bectl formats it
	pub created: String,
}

impl BootEnv
{
	/// Is it mounted anywhere?
	pub fn is_mounted(&self) -> bool
	{
		self.mountpoint != NOT_MOUNTED
	}

	/// Is it the filesystem we're running on?  That one can't be
	/// unmounted out from under us.
	pub fn is_root(&self) -> bool
	{
		self.mountpoint == "/"
	}
}



#[cfg(test)]
mod tests
{
	use super::ActiveState as AS;

	#[test]
	fn codes_total_and_injective()
	{
		use std::collections::HashSet;
		use strum::IntoEnumIterator as _;

		let codes = ["", "N", "R", "NR"];
		let states: HashSet<AS> = codes.iter()
				.map(|c| AS::from_code(c).unwrap()).collect();
		assert_eq!(states.len(), 4, "Every code maps somewhere different");

		// And it covers the whole enum, round trip included
		for s in AS::iter()
		{
			assert!(states.contains(&s), "{s:?} reachable");
			assert_eq!(AS::from_code(s.code()), Some(s));
		}
	}

	#[test]
	fn unknown_codes()
	{
		for c in ["RN", "n", "X", " N", "NRR", "T", "NT", "--"]
		{
			assert_eq!(AS::from_code(c), None, "{c:?} is an anomaly");
		}

		// What bectl actually prints for an idle BE
		assert_eq!(AS::from_code("-"), Some(AS::Inactive));
	}

	#[test]
	fn guesses()
	{
		assert_eq!(AS::guess("T"), AS::ActiveOnReboot);
		assert_eq!(AS::guess("NT"), AS::ActiveNowAndOnReboot);
		assert_eq!(AS::guess("RN"), AS::ActiveNowAndOnReboot);
		assert_eq!(AS::guess("N?"), AS::ActiveNow);
		assert_eq!(AS::guess("X"), AS::Inactive);
		assert_eq!(AS::guess(""), AS::Inactive);
	}

	#[test]
	fn flags()
	{
		assert!(!AS::Inactive.now());
		assert!(!AS::Inactive.on_reboot());
		assert!(AS::ActiveNow.now());
		assert!(!AS::ActiveNow.on_reboot());
		assert!(AS::ActiveOnReboot.on_reboot());
		assert!(AS::ActiveNowAndOnReboot.now());
		assert!(AS::ActiveNowAndOnReboot.on_reboot());
	}

	#[test]
	fn display()
	{
		assert_eq!(AS::Inactive.to_string(), "-");
		assert_eq!(AS::ActiveOnReboot.to_string(), "On reboot");
		assert_eq!(AS::ActiveNowAndOnReboot.to_string(), "Now and on reboot");
	}
}
