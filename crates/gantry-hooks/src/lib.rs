//! Lifecycle hook pipeline for the Gantry executor.
//!
//! A [`Hook`] is a named, prioritized bundle of optional callbacks, one per
//! lifecycle [`Phase`]. The [`HookManager`] owns the enabled-hook set and
//! the ordered hook list, and exposes one run entry point per phase with
//! the right failure policy: setup phases abort on the first error,
//! teardown phases attempt every hook.
//!
//! The [`acl`] module provides the ACL hook, which derives firewall rules
//! from task labels and injects them around the container's running window.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod acl;
pub mod hook;
pub mod manager;
pub mod phase;

#[cfg(test)]
mod testutil;

pub use hook::{Hook, HookFn};
pub use manager::HookManager;
pub use phase::Phase;
