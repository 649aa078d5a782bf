//! Hook manager: registration, ordering, and per-phase orchestration.

use std::collections::HashSet;

use gantry_common::error::Result;
use gantry_common::types::{ContainerId, FrameworkInfo, TaskInfo};
use gantry_containerizer::Containerizer;

use crate::hook::Hook;
use crate::phase::Phase;

/// Owns the enabled-hook set and the ordered list of registered hooks.
///
/// The manager is a plain caller-owned value: construct it, register hooks,
/// then drive the five phase entry points over one or more container
/// lifetimes. Registration must complete before the first phase call; the
/// manager is not safe for concurrent registration and execution, and the
/// caller serializes the phase calls for a given container.
#[derive(Debug, Default)]
pub struct HookManager {
    enabled: HashSet<String>,
    hooks: Vec<Hook>,
}

impl HookManager {
    /// Creates a manager with the given set of enabled hook names.
    #[must_use]
    pub fn new<I, S>(enabled: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            enabled: enabled.into_iter().map(Into::into).collect(),
            hooks: Vec::new(),
        }
    }

    /// Registers hooks, dropping any whose name is not enabled.
    ///
    /// The registered list is re-sorted by descending priority after every
    /// call; hooks with equal priority keep their registration order.
    pub fn register_hooks(&mut self, hooks: impl IntoIterator<Item = Hook>) {
        for hook in hooks {
            if !self.enabled.contains(hook.name()) {
                tracing::debug!(hook = hook.name(), "disabling hook");
                continue;
            }
            self.hooks.push(hook);
        }

        self.hooks
            .sort_by_key(|hook| std::cmp::Reverse(hook.priority()));
    }

    /// Returns the registered hooks in run order.
    #[must_use]
    pub fn hooks(&self) -> &[Hook] {
        &self.hooks
    }

    /// Runs all pre-create hooks. No container exists yet.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure; remaining hooks are not run.
    pub fn run_pre_create_hooks(
        &self,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
    ) -> Result<()> {
        self.run_hooks(Phase::PreCreate, containerizer, task, framework, None)
    }

    /// Runs all pre-run hooks against the created container.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure; remaining hooks are not run.
    pub fn run_pre_run_hooks(
        &self,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        container_id: &ContainerId,
    ) -> Result<()> {
        self.run_hooks(
            Phase::PreRun,
            containerizer,
            task,
            framework,
            Some(container_id),
        )
    }

    /// Runs all post-run hooks once the container is confirmed started.
    ///
    /// # Errors
    ///
    /// Returns the first hook failure; remaining hooks are not run.
    pub fn run_post_run_hooks(
        &self,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        container_id: &ContainerId,
    ) -> Result<()> {
        self.run_hooks(
            Phase::PostRun,
            containerizer,
            task,
            framework,
            Some(container_id),
        )
    }

    /// Runs all pre-stop hooks before the runtime stops the container.
    ///
    /// Hook failures are logged and skipped so every cleanup action is
    /// attempted.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the entry points uniform.
    pub fn run_pre_stop_hooks(
        &self,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        container_id: &ContainerId,
    ) -> Result<()> {
        self.run_hooks(
            Phase::PreStop,
            containerizer,
            task,
            framework,
            Some(container_id),
        )
    }

    /// Runs all post-stop hooks after the container has been removed.
    ///
    /// Hook failures are logged and skipped so every cleanup action is
    /// attempted.
    ///
    /// # Errors
    ///
    /// Never fails; the `Result` keeps the entry points uniform.
    pub fn run_post_stop_hooks(
        &self,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        container_id: &ContainerId,
    ) -> Result<()> {
        self.run_hooks(
            Phase::PostStop,
            containerizer,
            task,
            framework,
            Some(container_id),
        )
    }

    /// Runs every registered hook for one phase, in sorted order.
    ///
    /// Hooks without a callback for the phase are skipped. On failure the
    /// phase either aborts (setup phases) or logs and moves on (teardown
    /// phases), per [`Phase::exits_on_error`].
    fn run_hooks(
        &self,
        phase: Phase,
        containerizer: &dyn Containerizer,
        task: &TaskInfo,
        framework: &FrameworkInfo,
        container_id: Option<&ContainerId>,
    ) -> Result<()> {
        for hook in &self.hooks {
            let Some(callback) = hook.callback(phase) else {
                continue;
            };

            tracing::info!(hook = hook.name(), %phase, "running hook");

            if let Err(err) = callback(containerizer, task, framework, container_id) {
                tracing::error!(hook = hook.name(), %phase, error = %err, "hook failed");

                if phase.exits_on_error() {
                    return Err(err);
                }
            }
        }

        Ok(())
    }
}
