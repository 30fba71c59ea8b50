// Load in the commands
pub(crate) mod list;
pub(crate) mod action;
pub(crate) mod check;
pub(crate) mod watch;
