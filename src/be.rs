//! Boot environments as bectl(8) reports them, and the things we can ask
//! bectl to do to them.

/// The records themselves
mod structs;
pub use structs::{BootEnv, ActiveState, NOT_MOUNTED};

/// Parsing `bectl list -H` output
pub mod parse;
pub use parse::{Listing, ParseLineErr};

/// Argument templates for the mutating actions
pub mod action;
pub use action::Action;

/// Text rendering of a listing
pub mod table;
