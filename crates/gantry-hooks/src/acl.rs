//! ACL hook: derives firewall accept rules from task labels and injects
//! them around the container's running window.
//!
//! Labels shaped like `EXECUTOR_<portIndex>_ACL` carry a comma-separated
//! list of addresses or networks allowed to reach the port mapping at that
//! index. On post-run the derived rules are appended to the configured
//! packet-filter chain; on pre-stop the same rules are deleted. Injection
//! stops at the first failure (a container must not run with partial ACL
//! coverage); retraction attempts every rule (a skipped delete leaks
//! host-side state).

use std::net::IpAddr;
use std::sync::{Arc, LazyLock};

use gantry_common::config::AclConfig;
use gantry_common::constants::{
    ACL_HOOK_NAME, ACL_LABEL_PATTERN, ALL_INTERFACES, FILTER_TABLE, RESERVED_CHAINS,
};
use gantry_common::error::{GantryError, Result};
use gantry_common::types::{NetworkMode, PortMapping, TaskInfo};
use gantry_net::{AcceptRule, PacketFilter};
use ipnetwork::IpNetwork;
use regex::Regex;

use crate::hook::Hook;
use crate::phase::Phase;

#[allow(clippy::expect_used)]
static ACL_LABEL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(ACL_LABEL_PATTERN).expect("ACL label pattern is a valid regex"));

/// Direction of a rule mutation.
#[derive(Debug, Clone, Copy)]
enum RuleAction {
    /// Append rules (post-run injection).
    Append,
    /// Delete rules (pre-stop retraction).
    Delete,
}

impl RuleAction {
    fn apply(self, driver: &dyn PacketFilter, chain: &str, rule: &AcceptRule) -> Result<()> {
        match self {
            Self::Append => driver.append(FILTER_TABLE, chain, &rule.spec()),
            Self::Delete => driver.delete(FILTER_TABLE, chain, &rule.spec()),
        }
    }
}

/// Builds the ACL hook around the given configuration and filter driver.
///
/// The hook registers under the name `acl` with priority 0. It attaches a
/// post-run callback that injects the task's rules and a pre-stop callback
/// that retracts them with identical rule specs.
#[must_use]
pub fn acl_hook(config: AclConfig, driver: Arc<dyn PacketFilter>) -> Hook {
    let inject_config = config.clone();
    let inject_driver = Arc::clone(&driver);

    Hook::new(ACL_HOOK_NAME, 0)
        .on(Phase::PostRun, move |_containerizer, task, _framework, _id| {
            if !policy_applies(task) {
                tracing::warn!(
                    network_mode = %task.network_mode,
                    "acl hook cannot inject rules unless network mode is bridge or user"
                );
                return Ok(());
            }

            let chain = resolve_chain(&inject_config, inject_driver.as_ref())?;
            apply_rules(
                task,
                &inject_config,
                &chain,
                inject_driver.as_ref(),
                RuleAction::Append,
                true,
            )
        })
        .on(Phase::PreStop, move |_containerizer, task, _framework, _id| {
            if !policy_applies(task) {
                tracing::warn!(
                    network_mode = %task.network_mode,
                    "acl hook has no rules to remove unless network mode is bridge or user"
                );
                return Ok(());
            }

            let chain = resolve_chain(&config, driver.as_ref())?;
            apply_rules(task, &config, &chain, driver.as_ref(), RuleAction::Delete, false)
        })
}

/// The ACL policy only applies to bridged and user-defined networking.
fn policy_applies(task: &TaskInfo) -> bool {
    matches!(task.network_mode, NetworkMode::Bridge | NetworkMode::User)
}

/// Resolves the configured chain, failing closed on bad configuration.
///
/// The chain must be set, must not be one of the built-in chains the
/// filter evaluates automatically, and must already exist in the filter
/// table — ACL correctness depends on deployment-controlled chain
/// ordering, so the hook never creates it.
fn resolve_chain(config: &AclConfig, driver: &dyn PacketFilter) -> Result<String> {
    let chain = config
        .chain
        .as_deref()
        .filter(|chain| !chain.is_empty())
        .ok_or_else(|| GantryError::Config {
            message: "no packet-filter chain configured for the acl hook".into(),
        })?;

    if RESERVED_CHAINS.contains(&chain) {
        return Err(GantryError::Config {
            message: format!("built-in chain {chain} cannot be used for acl injection"),
        });
    }

    let chains = driver.list_chains(FILTER_TABLE)?;
    if chains.iter().any(|existing| existing == chain) {
        Ok(chain.to_owned())
    } else {
        Err(GantryError::ChainNotFound {
            chain: chain.to_owned(),
        })
    }
}

/// Derives every rule for the task and applies it through `action`.
///
/// With `stop_on_error` set (injection), the first derivation or driver
/// failure aborts the remainder. Without it (retraction), failures are
/// logged and every remaining rule is still attempted.
fn apply_rules(
    task: &TaskInfo,
    config: &AclConfig,
    chain: &str,
    driver: &dyn PacketFilter,
    action: RuleAction,
    stop_on_error: bool,
) -> Result<()> {
    let interface = external_interface(config);

    for label in &task.labels {
        let Some(captures) = ACL_LABEL.captures(&label.key) else {
            continue;
        };

        let outcome = indexed_port_mapping(&captures, task).and_then(|mapping| {
            let networks = parse_networks(&label.value)?;

            tracing::info!(
                label = %label.key,
                host_port = mapping.host_port,
                allowed = ?networks,
                ?action,
                "applying acl rules"
            );

            for network in networks {
                let rule =
                    AcceptRule::new(interface.as_str(), mapping.protocol, network, mapping.host_port);
                action.apply(driver, chain, &rule)?;
            }
            Ok(())
        });

        if let Err(err) = outcome {
            if stop_on_error {
                return Err(err);
            }
            tracing::warn!(label = %label.key, error = %err, "continuing acl teardown past failure");
        }
    }

    apply_default_allowed(task, config, chain, driver, &interface, action, stop_on_error)
}

/// Applies the always-allowed networks to every declared port mapping,
/// independent of labels.
fn apply_default_allowed(
    task: &TaskInfo,
    config: &AclConfig,
    chain: &str,
    driver: &dyn PacketFilter,
    interface: &str,
    action: RuleAction,
    stop_on_error: bool,
) -> Result<()> {
    for cidr in &config.default_allowed_cidr {
        let outcome = parse_network(cidr).and_then(|network| {
            for mapping in &task.port_mappings {
                let rule = AcceptRule::new(interface, mapping.protocol, network, mapping.host_port);
                action.apply(driver, chain, &rule)?;
            }
            Ok(())
        });

        if let Err(err) = outcome {
            if stop_on_error {
                return Err(err);
            }
            tracing::warn!(%cidr, error = %err, "continuing acl teardown past failure");
        }
    }

    Ok(())
}

/// Returns the configured external interface, widening to all interfaces
/// with a warning when unset.
fn external_interface(config: &AclConfig) -> String {
    config
        .external_interface
        .as_deref()
        .filter(|iface| !iface.is_empty())
        .map_or_else(
            || {
                tracing::warn!(
                    "no external interface configured for the acl hook; rules apply to all interfaces"
                );
                ALL_INTERFACES.to_owned()
            },
            ToOwned::to_owned,
        )
}

/// Looks up the port mapping referenced by an ACL label's index.
fn indexed_port_mapping<'t>(
    captures: &regex::Captures<'_>,
    task: &'t TaskInfo,
) -> Result<&'t PortMapping> {
    let index_text = captures
        .name("portIndex")
        .map(|m| m.as_str())
        .ok_or_else(|| GantryError::Validation {
            message: "could not retrieve port index from acl label".into(),
        })?;
    let index: usize = index_text.parse().map_err(|_| GantryError::Validation {
        message: format!("port index {index_text} is not valid"),
    })?;

    task.port_mappings
        .get(index)
        .ok_or_else(|| GantryError::Validation {
            message: format!("port index {index} does not match any declared port mapping"),
        })
}

/// Parses a comma-separated list of addresses and networks.
///
/// Bare addresses are widened to exact-host networks; any entry failing
/// both parses fails the whole label.
fn parse_networks(value: &str) -> Result<Vec<IpNetwork>> {
    value.split(',').map(|entry| parse_network(entry.trim())).collect()
}

/// Parses one entry as a bare address (widened to an exact-host network)
/// or an explicit network.
fn parse_network(entry: &str) -> Result<IpNetwork> {
    if let Ok(address) = entry.parse::<IpAddr>() {
        return Ok(IpNetwork::from(address));
    }

    entry.parse::<IpNetwork>().map_err(|_| GantryError::Validation {
        message: format!("invalid address or network: {entry}"),
    })
}
