//! Configuration model for the executor core.
//!
//! Gantry does not load configuration itself; the embedding executor parses
//! whatever format it uses and hands these values down. Everything is a
//! plain owned value threaded through constructors rather than read from
//! ambient global state.

use serde::{Deserialize, Serialize};

/// Configuration for the ACL hook.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AclConfig {
    /// Packet-filter chain rules are injected into. Required; must not be
    /// one of the built-in chains the filter evaluates automatically.
    pub chain: Option<String>,
    /// Host interface rules are scoped to. Unset means all interfaces.
    pub external_interface: Option<String>,
    /// Networks always permitted on every declared port, regardless of
    /// labels (e.g., health-checking infrastructure).
    pub default_allowed_cidr: Vec<String>,
}

/// Configuration consumed by the executor lifecycle core.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutorConfig {
    /// Names of hooks kept at registration; anything else is skipped.
    pub enabled_hooks: Vec<String>,
    /// ACL hook settings.
    pub acl: AclConfig,
}
