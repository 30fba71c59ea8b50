//! Main boot-environments impl lib

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// Config
pub mod config;

// Commands and args
pub mod command;

// Boot environments themselves, and what we do to them
pub mod be;

// Running external things
pub mod runner;

// The refresh loop and dispatcher
pub mod core;

// Terminal front-end
mod term;

// Small util bits
mod util;

// Various checks
mod check;

// Loading up info about the system
mod info;


// CLI Commands
mod cmd;
