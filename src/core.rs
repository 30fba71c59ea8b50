//! The working core: the refresh loop, the action dispatcher, and the
//! controller that owns them both.

/// The refresh timer
mod timer;

/// Listing and selection state
pub(crate) mod refresh;
pub use refresh::FetchErr;

/// The presentation collaborator
mod present;
pub use present::{Presenter, Snapshot};

/// The controller and its intents
mod controller;
pub use controller::{Controller, Intent, Flow};

/// Requests -> actions -> commands
mod dispatch;
pub use dispatch::{Request, Target, Rejection, Outcome};
