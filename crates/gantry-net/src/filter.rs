//! Packet-filter driver contract.

use gantry_common::error::Result;

/// Rule-table introspection and mutation offered by the host packet filter.
///
/// The driver is ambient host state: mutations are not transactional, and
/// a crash mid-injection can leave a partial rule set. Callers own the
/// stop-on-error versus continue-on-error policy.
pub trait PacketFilter: Send + Sync {
    /// Lists the chains present in `table`.
    ///
    /// # Errors
    ///
    /// Returns an error if the table cannot be read.
    fn list_chains(&self, table: &str) -> Result<Vec<String>>;

    /// Appends a rule to `chain` in `table`.
    ///
    /// `rule_spec` is the ordered token list forming the rule
    /// specification, e.g. `-i eth0 -p tcp -s 10.0.0.5/32 --dport 8080 -j
    /// ACCEPT` split on whitespace.
    ///
    /// # Errors
    ///
    /// Returns an error if the filter rejects the rule.
    fn append(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()>;

    /// Deletes a rule from `chain` in `table`, matched by its exact spec.
    ///
    /// # Errors
    ///
    /// Returns an error if the rule cannot be removed.
    fn delete(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()>;
}
