//! Pods — named groups of containers placed as one unit.

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::container::Container;
use crate::resource::{Capacity, Resource};

/// A named group of containers plus free-form labels.
///
/// The pod owns its containers. Labels are kept sorted by key so that
/// [`Pod::metrics`] renders the same text on every run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Pod {
    name: String,
    labels: BTreeMap<String, String>,
    containers: Vec<Container>,
}

impl Pod {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            labels: BTreeMap::new(),
            containers: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Append a container; order is the allocation order during placement.
    pub fn add_container(&mut self, container: Container) {
        self.containers.push(container);
    }

    /// Insert or overwrite a label.
    pub fn set_label(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.labels.insert(key.into(), value.into());
    }

    pub fn label(&self, key: &str) -> Option<&str> {
        self.labels.get(key).map(String::as_str)
    }

    pub fn labels(&self) -> &BTreeMap<String, String> {
        &self.labels
    }

    pub fn containers(&self) -> &[Container] {
        &self.containers
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }

    /// Aggregate demand of every container.
    pub fn demand(&self) -> Capacity {
        self.containers
            .iter()
            .fold(Capacity::ZERO, |acc, c| acc + c.quantity())
    }

    pub fn start_all(&mut self) {
        for container in &mut self.containers {
            container.start();
        }
    }

    pub fn stop_all(&mut self) {
        for container in &mut self.containers {
            container.stop();
        }
    }

    /// Every container is active. Trivially true for an empty pod.
    pub fn is_running(&self) -> bool {
        self.containers.iter().all(Resource::is_active)
    }

    pub fn metrics(&self) -> String {
        let labels = self
            .labels
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect::<Vec<_>>()
            .join(",");
        let containers = self
            .containers
            .iter()
            .map(Resource::metrics)
            .collect::<Vec<_>>()
            .join("\n");

        format!(
            "Pod=[{}\n      labels={{{labels}}}\n      Containers={{\n{containers}}}\n]",
            self.name
        )
    }
}

impl fmt::Display for Pod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metrics())
    }
}
