//! Hook definition: a named, prioritized bundle of per-phase callbacks.

use std::fmt;

use gantry_common::error::Result;
use gantry_common::types::{ContainerId, FrameworkInfo, TaskInfo};
use gantry_containerizer::Containerizer;

use crate::phase::Phase;

/// Callback invoked when a hook runs for one phase.
///
/// Receives the containerizer, the task and framework descriptors, and the
/// live container identifier. The identifier is `None` only for the
/// pre-create phase, where no container exists yet.
pub type HookFn = Box<
    dyn Fn(&dyn Containerizer, &TaskInfo, &FrameworkInfo, Option<&ContainerId>) -> Result<()>
        + Send
        + Sync,
>;

/// A named, prioritized set of optional lifecycle callbacks.
///
/// Hooks are immutable after registration. A hook with no callback for a
/// phase is simply skipped for that phase; absence is not an error.
pub struct Hook {
    name: String,
    priority: i32,
    callbacks: [Option<HookFn>; Phase::COUNT],
}

impl Hook {
    /// Creates a hook with no callbacks attached.
    ///
    /// Higher priority runs first; hooks sharing a priority keep their
    /// registration order.
    #[must_use]
    pub fn new(name: impl Into<String>, priority: i32) -> Self {
        Self {
            name: name.into(),
            priority,
            callbacks: [const { None }; Phase::COUNT],
        }
    }

    /// Attaches a callback for one phase, replacing any previous one.
    #[must_use]
    pub fn on<F>(mut self, phase: Phase, callback: F) -> Self
    where
        F: Fn(&dyn Containerizer, &TaskInfo, &FrameworkInfo, Option<&ContainerId>) -> Result<()>
            + Send
            + Sync
            + 'static,
    {
        self.callbacks[phase.index()] = Some(Box::new(callback));
        self
    }

    /// Returns the hook's unique name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the hook's priority.
    #[must_use]
    pub const fn priority(&self) -> i32 {
        self.priority
    }

    /// Returns the callback attached for `phase`, if any.
    #[must_use]
    pub fn callback(&self, phase: Phase) -> Option<&HookFn> {
        self.callbacks[phase.index()].as_ref()
    }
}

impl fmt::Debug for Hook {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phases: Vec<String> = Phase::ALL
            .iter()
            .filter(|p| self.callback(**p).is_some())
            .map(ToString::to_string)
            .collect();
        f.debug_struct("Hook")
            .field("name", &self.name)
            .field("priority", &self.priority)
            .field("phases", &phases)
            .finish()
    }
}
