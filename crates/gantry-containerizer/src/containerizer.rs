//! The capability contract a container runtime backend must implement.

use std::net::IpAddr;

use gantry_common::error::Result;
use gantry_common::types::{ContainerId, ResourceLimits, TaskInfo};
use tokio_util::sync::CancellationToken;

use crate::exec::ExecHandle;

/// Immutable specification of a container to create.
///
/// Built once per create call and never mutated afterward.
#[derive(Debug, Clone)]
pub struct Info {
    /// Container name, used as the backend identifier seed.
    pub name: String,
    /// Resource limits the backend must apply. Enforcing these is part of
    /// the [`Containerizer::create`] contract, not an optional extra.
    pub limits: ResourceLimits,
    /// Task descriptor the container was created for.
    pub task: TaskInfo,
}

/// A containerizing technology such as containerd.
///
/// The hook manager threads one `Containerizer` through every lifecycle
/// phase so hooks can inspect or mutate runtime state (for example to read
/// assigned IP addresses).
pub trait Containerizer: Send + Sync {
    /// Creates a container from the given spec and returns its ID.
    ///
    /// Implementations must apply `info.limits` to the created container.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::Runtime`](gantry_common::error::GantryError::Runtime)
    /// on backend failure (image pull, spec validation). Safe to retry on
    /// transient failure; retry policy belongs to the caller.
    fn create(&self, info: &Info) -> Result<ContainerId>;

    /// Returns the main PID of the given container.
    ///
    /// # Errors
    ///
    /// Returns [`GantryError::NotFound`](gantry_common::error::GantryError::NotFound)
    /// if the container is unknown.
    fn pid(&self, id: &ContainerId) -> Result<u32>;

    /// Transitions the container from created to running.
    ///
    /// # Errors
    ///
    /// Returns a runtime error if the container cannot start.
    fn run(&self, id: &ContainerId) -> Result<()>;

    /// Blocks until the container's main process exits and returns its
    /// exit code.
    ///
    /// Must not return early for any reason short of process termination;
    /// there is no built-in timeout. Callers needing one layer it above.
    ///
    /// # Errors
    ///
    /// Returns a runtime error if the wait itself fails.
    fn wait(&self, id: &ContainerId) -> Result<i32>;

    /// Requests graceful termination, escalating to forceful termination
    /// on timeout.
    ///
    /// "Already stopped" and "container does not exist" are benign here:
    /// implementations report them as success (or a distinguishable
    /// not-found), never as a fatal error that would block teardown.
    ///
    /// # Errors
    ///
    /// Returns a runtime error only when a live container cannot be
    /// terminated.
    fn stop(&self, id: &ContainerId) -> Result<()>;

    /// Deletes all runtime and snapshot state for the container.
    ///
    /// # Errors
    ///
    /// Returns a runtime error on backend deletion failure.
    fn remove(&self, id: &ContainerId) -> Result<()>;

    /// Executes a command inside a running container.
    ///
    /// Returns immediately; the outcome is delivered through the returned
    /// [`ExecHandle`]. Implementations must honor `cancel` and abort the
    /// in-flight execution when it trips.
    fn exec(&self, cancel: CancellationToken, id: &ContainerId, cmd: &[String]) -> ExecHandle;

    /// Returns the addresses bound to `interface` inside the container's
    /// network namespace.
    ///
    /// An interface with no addresses yields an empty list, not an error.
    ///
    /// # Errors
    ///
    /// Returns a not-found error if the container is unknown.
    fn ips_by_interface(&self, id: &ContainerId, interface: &str) -> Result<Vec<IpAddr>>;
}
