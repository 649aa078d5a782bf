//! System-wide constants.

/// Packet-filter table holding ACL chains.
pub const FILTER_TABLE: &str = "filter";

/// Built-in chains that must never be targeted by ACL injection: the
/// filter evaluates them automatically, so scoping could not be verified.
pub const RESERVED_CHAINS: [&str; 2] = ["FORWARD", "OUTPUT"];

/// Interface token emitted when no external interface is configured.
pub const ALL_INTERFACES: &str = "all";

/// Label key pattern carrying an ACL declaration for one port index.
pub const ACL_LABEL_PATTERN: &str = r"EXECUTOR_(?P<portIndex>[0-9]+)_ACL";

/// Name under which the ACL hook registers itself.
pub const ACL_HOOK_NAME: &str = "acl";
