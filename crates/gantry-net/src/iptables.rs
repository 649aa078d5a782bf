//! Driver for the host `iptables` binary.

use std::process::Command;

use gantry_common::error::{GantryError, Result};

use crate::filter::PacketFilter;

/// Default binary name, resolved through `PATH`.
const DEFAULT_BINARY: &str = "iptables";

/// [`PacketFilter`] implementation shelling out to `iptables`.
#[derive(Debug, Clone)]
pub struct IptablesDriver {
    binary: String,
}

impl IptablesDriver {
    /// Creates a driver after probing that the binary is runnable.
    ///
    /// # Errors
    ///
    /// Returns an error if `iptables --version` cannot be executed or
    /// exits non-zero.
    pub fn new() -> Result<Self> {
        Self::with_binary(DEFAULT_BINARY)
    }

    /// Creates a driver using a specific binary path.
    ///
    /// # Errors
    ///
    /// Returns an error if the binary is not runnable.
    pub fn with_binary(binary: impl Into<String>) -> Result<Self> {
        let binary = binary.into();
        let output = Command::new(&binary)
            .arg("--version")
            .output()
            .map_err(|e| GantryError::Io {
                context: format!("probing {binary}"),
                source: e,
            })?;

        if !output.status.success() {
            return Err(GantryError::Runtime {
                message: format!("{binary} version check failed"),
            });
        }

        tracing::debug!(binary, "packet filter driver ready");
        Ok(Self { binary })
    }

    /// Runs the binary with the given arguments and captures stdout.
    fn run(&self, args: &[String]) -> Result<String> {
        tracing::debug!(binary = %self.binary, ?args, "running packet filter command");

        let output = Command::new(&self.binary)
            .args(args)
            .output()
            .map_err(|e| GantryError::Io {
                context: format!("running {}", self.binary),
                source: e,
            })?;

        if !output.status.success() {
            return Err(GantryError::Runtime {
                message: format!(
                    "{} {} failed: {}",
                    self.binary,
                    args.join(" "),
                    String::from_utf8_lossy(&output.stderr).trim()
                ),
            });
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

impl PacketFilter for IptablesDriver {
    fn list_chains(&self, table: &str) -> Result<Vec<String>> {
        let stdout = self.run(&listing_args(table))?;
        Ok(parse_chain_listing(&stdout))
    }

    fn append(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()> {
        self.run(&mutation_args("-A", table, chain, rule_spec))
            .map(|_| ())
    }

    fn delete(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()> {
        self.run(&mutation_args("-D", table, chain, rule_spec))
            .map(|_| ())
    }
}

/// Builds the argument list for a chain listing (`iptables -t <table> -S`).
fn listing_args(table: &str) -> Vec<String> {
    vec!["-t".into(), table.into(), "-S".into()]
}

/// Builds the argument list for a rule mutation.
fn mutation_args(op: &str, table: &str, chain: &str, rule_spec: &[String]) -> Vec<String> {
    let mut args = vec!["-t".into(), table.into(), op.into(), chain.into()];
    args.extend_from_slice(rule_spec);
    args
}

/// Extracts chain names from `iptables -S` output.
///
/// Listing lines look like `-P INPUT ACCEPT` for built-in chains and
/// `-N DOCKER` for user-defined ones; everything else is a rule line.
fn parse_chain_listing(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut tokens = line.split_whitespace();
            match tokens.next() {
                Some("-P" | "-N") => tokens.next().map(String::from),
                _ => None,
            }
        })
        .collect()
}
