//! Info about the running system

/// Kernel-ish bits via sysctl
pub(crate) mod kernel;
