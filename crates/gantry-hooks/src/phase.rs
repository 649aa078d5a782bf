//! Container lifecycle phases hooks can attach to.

use std::fmt;

/// One of the five points in a container's lifecycle where hooks run.
///
/// The variant order is the order phases occur for one container; each
/// phase also carries its failure policy (see [`Phase::exits_on_error`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Before the container is created. No container exists yet.
    PreCreate,
    /// After create, before the runtime starts the container.
    PreRun,
    /// Once the container is confirmed started.
    PostRun,
    /// Before the runtime stops the container.
    PreStop,
    /// After the container has been stopped and removed.
    PostStop,
}

impl Phase {
    /// Number of lifecycle phases.
    pub const COUNT: usize = 5;

    /// All phases in lifecycle order.
    pub const ALL: [Self; Self::COUNT] = [
        Self::PreCreate,
        Self::PreRun,
        Self::PostRun,
        Self::PreStop,
        Self::PostStop,
    ];

    /// Whether the first hook failure aborts the rest of the phase.
    ///
    /// Setup must succeed or the container must not proceed, so the three
    /// setup phases abort. Teardown must attempt every cleanup action even
    /// if one fails (skipping one could leak firewall rules or other
    /// host-side state), so the two teardown phases continue.
    #[must_use]
    pub const fn exits_on_error(self) -> bool {
        matches!(self, Self::PreCreate | Self::PreRun | Self::PostRun)
    }

    /// Dense index used to address per-phase callback slots.
    #[must_use]
    pub(crate) const fn index(self) -> usize {
        match self {
            Self::PreCreate => 0,
            Self::PreRun => 1,
            Self::PostRun => 2,
            Self::PreStop => 3,
            Self::PostStop => 4,
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PreCreate => write!(f, "pre-create"),
            Self::PreRun => write!(f, "pre-run"),
            Self::PostRun => write!(f, "post-run"),
            Self::PreStop => write!(f, "pre-stop"),
            Self::PostStop => write!(f, "post-stop"),
        }
    }
}
