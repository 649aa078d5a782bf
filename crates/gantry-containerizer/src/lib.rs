//! Container backend abstraction for the Gantry executor core.
//!
//! The [`Containerizer`] trait is the contract any container runtime
//! backend (containerd, raw OCI runtime, ...) must satisfy for the hook
//! pipeline to drive it. Backends live in their own crates; this one only
//! defines the capability surface and the asynchronous exec handle.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod containerizer;
pub mod exec;

pub use containerizer::{Containerizer, Info};
pub use exec::{ExecCompletion, ExecHandle, exec_channel};
