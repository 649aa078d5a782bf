//! Packet-filter plumbing for the Gantry executor.
//!
//! Exposes the [`PacketFilter`] trait the ACL hook mutates rules through,
//! the [`AcceptRule`] value type, and the [`IptablesDriver`] that talks to
//! the host `iptables` binary.

#![cfg_attr(test, allow(clippy::expect_used, clippy::unwrap_used))]

pub mod filter;
pub mod iptables;
pub mod rule;

pub use filter::PacketFilter;
pub use iptables::IptablesDriver;
pub use rule::AcceptRule;
