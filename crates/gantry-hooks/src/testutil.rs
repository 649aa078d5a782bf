//! Shared fixtures for the crate's unit tests.

use std::net::IpAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use gantry_common::error::{GantryError, Result};
use gantry_common::types::{
    ContainerId, FrameworkInfo, NetworkMode, PortMapping, Protocol, TaskInfo,
};
use gantry_containerizer::{Containerizer, ExecHandle, Info, exec_channel};
use gantry_net::PacketFilter;
use tokio_util::sync::CancellationToken;

/// Containerizer whose operations all trivially succeed.
pub(crate) struct NullContainerizer;

impl Containerizer for NullContainerizer {
    fn create(&self, info: &Info) -> Result<ContainerId> {
        Ok(ContainerId::new(info.name.clone()))
    }

    fn pid(&self, _id: &ContainerId) -> Result<u32> {
        Ok(1)
    }

    fn run(&self, _id: &ContainerId) -> Result<()> {
        Ok(())
    }

    fn wait(&self, _id: &ContainerId) -> Result<i32> {
        Ok(0)
    }

    fn stop(&self, _id: &ContainerId) -> Result<()> {
        Ok(())
    }

    fn remove(&self, _id: &ContainerId) -> Result<()> {
        Ok(())
    }

    fn exec(&self, _cancel: CancellationToken, _id: &ContainerId, _cmd: &[String]) -> ExecHandle {
        let (completion, handle) = exec_channel();
        completion.deliver(Ok(0));
        handle
    }

    fn ips_by_interface(&self, _id: &ContainerId, _interface: &str) -> Result<Vec<IpAddr>> {
        Ok(Vec::new())
    }
}

/// One recorded packet-filter mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum FilterCall {
    Append {
        table: String,
        chain: String,
        spec: Vec<String>,
    },
    Delete {
        table: String,
        chain: String,
        spec: Vec<String>,
    },
}

/// Packet filter that records mutations instead of touching the host.
pub(crate) struct RecordingFilter {
    chains: Vec<String>,
    pub(crate) calls: Mutex<Vec<FilterCall>>,
    pub(crate) listings: AtomicUsize,
    fail_mutations: bool,
}

impl RecordingFilter {
    pub(crate) fn with_chains<I, S>(chains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            chains: chains.into_iter().map(Into::into).collect(),
            calls: Mutex::new(Vec::new()),
            listings: AtomicUsize::new(0),
            fail_mutations: false,
        }
    }

    /// Makes every append/delete fail with a runtime error.
    pub(crate) fn failing_mutations(mut self) -> Self {
        self.fail_mutations = true;
        self
    }

    pub(crate) fn calls(&self) -> Vec<FilterCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Hands out the trait-object form the ACL hook consumes, keeping the
    /// concrete handle around for assertions.
    pub(crate) fn handle(self: &Arc<Self>) -> Arc<dyn PacketFilter> {
        Arc::<Self>::clone(self)
    }
}

impl PacketFilter for RecordingFilter {
    fn list_chains(&self, _table: &str) -> Result<Vec<String>> {
        let _ = self.listings.fetch_add(1, Ordering::SeqCst);
        Ok(self.chains.clone())
    }

    fn append(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(FilterCall::Append {
            table: table.into(),
            chain: chain.into(),
            spec: rule_spec.to_vec(),
        });
        if self.fail_mutations {
            return Err(GantryError::Runtime {
                message: "append rejected".into(),
            });
        }
        Ok(())
    }

    fn delete(&self, table: &str, chain: &str, rule_spec: &[String]) -> Result<()> {
        self.calls.lock().unwrap().push(FilterCall::Delete {
            table: table.into(),
            chain: chain.into(),
            spec: rule_spec.to_vec(),
        });
        if self.fail_mutations {
            return Err(GantryError::Runtime {
                message: "delete rejected".into(),
            });
        }
        Ok(())
    }
}

/// Bridge-networked task with two declared port mappings and no labels.
pub(crate) fn task() -> TaskInfo {
    TaskInfo {
        task_id: "task-1".into(),
        name: "web".into(),
        labels: Vec::new(),
        network_mode: NetworkMode::Bridge,
        port_mappings: vec![
            PortMapping {
                host_port: 8080,
                container_port: 80,
                protocol: Protocol::Tcp,
            },
            PortMapping {
                host_port: 9000,
                container_port: 90,
                protocol: Protocol::Udp,
            },
        ],
    }
}

pub(crate) fn framework() -> FrameworkInfo {
    FrameworkInfo {
        framework_id: "fw-1".into(),
        name: "scheduler".into(),
    }
}
