//! Domain primitive types used across the Gantry workspace.
//!
//! Task and framework descriptors are read-only metadata handed to the
//! executor by the orchestration protocol; the hook system only reads
//! labels, the container network mode, and port mappings from them.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GantryError, Result};

/// Unique identifier for a container instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContainerId(String);

impl ContainerId {
    /// Creates a new container ID from a string value.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Generates a random container ID.
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Returns the inner string representation.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ContainerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Resource limits a backend must apply when creating a container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceLimits {
    /// CPU shares (relative weight).
    pub cpu_shares: Option<u64>,
    /// Memory limit in bytes.
    pub memory_bytes: Option<u64>,
}

/// Transport protocol of a port mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Protocol {
    /// TCP protocol.
    Tcp,
    /// UDP protocol.
    Udp,
}

impl Protocol {
    /// Returns the protocol name as used in packet-filter rule specs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Tcp => "tcp",
            Self::Udp => "udp",
        }
    }

    /// Parses a protocol name as it appears in task descriptors.
    ///
    /// # Errors
    ///
    /// Returns a validation error for anything other than `tcp` or `udp`
    /// (case-insensitive).
    pub fn parse(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "tcp" => Ok(Self::Tcp),
            "udp" => Ok(Self::Udp),
            other => Err(GantryError::Validation {
                message: format!("unknown protocol: {other}"),
            }),
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Container network mode declared by the task descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NetworkMode {
    /// Container shares the host network namespace.
    Host,
    /// Container is attached to the default bridge.
    Bridge,
    /// Container is attached to a user-defined network.
    User,
    /// Container has no network connectivity.
    None,
}

impl fmt::Display for NetworkMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Host => write!(f, "host"),
            Self::Bridge => write!(f, "bridge"),
            Self::User => write!(f, "user"),
            Self::None => write!(f, "none"),
        }
    }
}

/// Mapping between a host port and a container port.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PortMapping {
    /// Port exposed on the host.
    pub host_port: u16,
    /// Port the workload listens on inside the container.
    pub container_port: u16,
    /// Transport protocol.
    pub protocol: Protocol,
}

/// Key/value label attached to a task by the scheduler.
///
/// Labels form an ordered list; duplicate keys are allowed by the
/// orchestration protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Label {
    /// Label key.
    pub key: String,
    /// Label value.
    pub value: String,
}

impl Label {
    /// Creates a label from a key/value pair.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Task descriptor supplied by the orchestration protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskInfo {
    /// Scheduler-assigned task identifier.
    pub task_id: String,
    /// Human-readable task name.
    pub name: String,
    /// Labels attached to the task.
    pub labels: Vec<Label>,
    /// Container network mode.
    pub network_mode: NetworkMode,
    /// Declared port mappings, indexed by ACL labels.
    pub port_mappings: Vec<PortMapping>,
}

/// Framework descriptor supplied by the orchestration protocol.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameworkInfo {
    /// Scheduler-assigned framework identifier.
    pub framework_id: String,
    /// Framework name.
    pub name: String,
}
