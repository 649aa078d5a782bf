//! Accept-rule value type shared by injection and retraction.

use std::fmt;

use gantry_common::types::Protocol;
use ipnetwork::IpNetwork;

/// One firewall accept rule: traffic entering an interface, matching a
/// protocol, restricted to a source network, destined to a host port.
///
/// Rules are derived deterministically from task metadata, so the spec
/// emitted on injection is byte-identical to the one used for retraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AcceptRule {
    /// Interface the rule is scoped to (`all` when unscoped).
    pub in_interface: String,
    /// Transport protocol of the matched traffic.
    pub protocol: Protocol,
    /// Source network allowed through.
    pub source: IpNetwork,
    /// Destination (host) port.
    pub dest_port: u16,
}

impl AcceptRule {
    /// Creates an accept rule.
    #[must_use]
    pub fn new(
        in_interface: impl Into<String>,
        protocol: Protocol,
        source: IpNetwork,
        dest_port: u16,
    ) -> Self {
        Self {
            in_interface: in_interface.into(),
            protocol,
            source,
            dest_port,
        }
    }

    /// Returns the ordered token list forming the rule specification.
    #[must_use]
    pub fn spec(&self) -> Vec<String> {
        vec![
            "-i".into(),
            self.in_interface.clone(),
            "-p".into(),
            self.protocol.as_str().into(),
            "-s".into(),
            self.source.to_string(),
            "--dport".into(),
            self.dest_port.to_string(),
            "-j".into(),
            "ACCEPT".into(),
        ]
    }
}

impl fmt::Display for AcceptRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.spec().join(" "))
    }
}
