//! Placement engine — first-fit scheduling with per-node rollback.
//!
//! For each pod the cluster walks its nodes in registration order and
//! tries to allocate every container on the current node:
//!
//! ```text
//! for node in nodes:
//!     before = node.available()
//!     allocate(c) for c in pod.containers   ── all fit ──▶ start_all, keep pod, done
//!            │
//!            └── one refused ──▶ rollback(node, before), next node
//! no node left ──▶ Rejected { pod }
//! ```
//!
//! Containers are started only after a node has admitted the whole pod, so
//! a rejected pod comes back exactly as it went in.

use std::fmt;

use serde::Serialize;
use tracing::{debug, info, warn};

use podgrid_core::{AllocationResult, Capacity, Node, Pod, Resource, SharedNode};

use crate::error::Rejected;
use crate::rollback::RollbackPolicy;

/// A named pool of nodes plus the pods placed onto it.
#[derive(Debug)]
pub struct Cluster {
    name: String,
    nodes: Vec<SharedNode>,
    pods: Vec<Pod>,
    rollback: RollbackPolicy,
}

impl Cluster {
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_rollback(name, RollbackPolicy::default())
    }

    pub fn with_rollback(name: impl Into<String>, rollback: RollbackPolicy) -> Self {
        Self {
            name: name.into(),
            nodes: Vec::new(),
            pods: Vec::new(),
            rollback,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &[SharedNode] {
        &self.nodes
    }

    /// Placed pods, in placement order.
    pub fn pods(&self) -> &[Pod] {
        &self.pods
    }

    pub fn rollback(&self) -> RollbackPolicy {
        self.rollback
    }

    /// Register a node. Nodes are tried in the order they were added.
    pub fn add_node(&mut self, node: SharedNode) {
        debug!(cluster = %self.name, node = %node.borrow().id(), "node added");
        self.nodes.push(node);
    }

    /// Place `pod` on the first node that can hold all of its containers.
    ///
    /// On success the cluster takes ownership and every container is
    /// started. On failure the pod is returned inside [`Rejected`] with no
    /// container started, and every node is left as it was.
    pub fn schedule_pod(&mut self, mut pod: Pod) -> Result<(), Rejected> {
        for shared in &self.nodes {
            let mut node = shared.borrow_mut();
            let before = node.available();

            match allocate_pod(&mut node, &pod) {
                Ok(()) => {
                    info!(
                        pod = %pod.name(),
                        node = %node.id(),
                        containers = pod.len(),
                        remaining = %node.available(),
                        "pod placed"
                    );
                    drop(node);
                    pod.start_all();
                    self.pods.push(pod);
                    return Ok(());
                }
                Err(err) => {
                    self.rollback.apply(&mut node, before);
                    debug!(
                        pod = %pod.name(),
                        node = %node.id(),
                        error = %err,
                        policy = ?self.rollback,
                        "node refused pod, rolled back"
                    );
                }
            }
        }

        warn!(
            pod = %pod.name(),
            nodes = self.nodes.len(),
            demand = %pod.demand(),
            "no node can host pod"
        );
        Err(Rejected::no_node_available(pod))
    }

    /// Schedule each pod in order.
    ///
    /// A rejection never stops the batch; rejected pods are returned in
    /// their original relative order.
    pub fn deploy_pods(&mut self, pods: impl IntoIterator<Item = Pod>) -> Vec<Rejected> {
        let mut rejected = Vec::new();
        let mut attempted = 0usize;

        for pod in pods {
            attempted += 1;
            if let Err(rejection) = self.schedule_pod(pod) {
                rejected.push(rejection);
            }
        }

        info!(
            cluster = %self.name,
            attempted,
            rejected = rejected.len(),
            "deployment finished"
        );
        rejected
    }

    /// Sum of every node's initial capacity.
    pub fn total_capacity(&self) -> Capacity {
        self.nodes
            .iter()
            .fold(Capacity::ZERO, |acc, n| acc + n.borrow().capacity())
    }

    /// Sum of every node's current remainder.
    pub fn total_available(&self) -> Capacity {
        self.nodes
            .iter()
            .fold(Capacity::ZERO, |acc, n| acc + n.borrow().available())
    }

    pub fn snapshot(&self) -> ClusterSnapshot {
        ClusterSnapshot {
            name: self.name.clone(),
            rollback: self.rollback,
            nodes: self.nodes.iter().map(|n| n.borrow().clone()).collect(),
            pods: self.pods.clone(),
            total_capacity: self.total_capacity(),
            total_available: self.total_available(),
        }
    }

    pub fn metrics(&self) -> String {
        let mut out = format!("Cluster Metrics: {}\nServers:\n", self.name);
        for node in &self.nodes {
            out.push_str("  ");
            out.push_str(&node.borrow().metrics());
            out.push('\n');
        }
        out.push_str("Pods:\n");
        for pod in &self.pods {
            out.push_str("  ");
            out.push_str(&pod.metrics());
            out.push('\n');
        }
        out
    }
}

impl fmt::Display for Cluster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metrics())
    }
}

/// Allocate every container of `pod` on `node`, in container order.
///
/// Stops at the first refusal; the caller owns the rollback.
fn allocate_pod(node: &mut Node, pod: &Pod) -> AllocationResult<()> {
    for container in pod.containers() {
        node.allocate(container.cpu(), container.mem())?;
    }
    Ok(())
}

/// Point-in-time, serializable view of a cluster.
#[derive(Debug, Clone, Serialize)]
pub struct ClusterSnapshot {
    pub name: String,
    pub rollback: RollbackPolicy,
    pub nodes: Vec<Node>,
    pub pods: Vec<Pod>,
    pub total_capacity: Capacity,
    pub total_available: Capacity,
}
