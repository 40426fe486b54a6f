//! A single workload unit with a fixed CPU/memory demand.

use std::fmt;

use serde::Serialize;

use crate::resource::Resource;

/// A container: fixed demand, an image reference, and an active flag.
///
/// No validation happens here; manifests are checked at ingestion and
/// nodes refuse invalid demand at allocation time.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Container {
    id: String,
    cpu: f64,
    mem: f64,
    image: String,
    active: bool,
}

impl Container {
    pub fn new(id: impl Into<String>, cpu: f64, mem: f64, image: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            cpu,
            mem,
            image: image.into(),
            active: false,
        }
    }

    pub fn image(&self) -> &str {
        &self.image
    }
}

impl Resource for Container {
    fn id(&self) -> &str {
        &self.id
    }

    fn cpu(&self) -> f64 {
        self.cpu
    }

    fn mem(&self) -> f64 {
        self.mem
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn start(&mut self) {
        self.active = true;
    }

    fn stop(&mut self) {
        self.active = false;
    }

    fn metrics(&self) -> String {
        format!(
            "[Container: {}: {:.6} CPU, {:.6} Memory, {}, active:{}]",
            self.id, self.cpu, self.mem, self.image, self.active
        )
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.metrics())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_inactive() {
        let c = Container::new("c1", 1.0, 2.0, "nginx");
        assert!(!c.is_active());
        assert_eq!(c.id(), "c1");
        assert_eq!(c.image(), "nginx");
    }

    #[test]
    fn start_and_stop_toggle_active() {
        let mut c = Container::new("c1", 1.0, 2.0, "nginx");
        c.start();
        assert!(c.is_active());
        c.start();
        assert!(c.is_active());
        c.stop();
        assert!(!c.is_active());
    }

    #[test]
    fn metrics_use_fixed_precision() {
        let c = Container::new("foo", 7.1, 8.2, "img4");
        let m = c.metrics();
        assert!(m.contains("[Container: foo: "));
        assert!(m.contains("7.100000 CPU"));
        assert!(m.contains("8.200000 Memory"));
        assert!(m.contains("img4"));
        assert!(m.ends_with("active:false]"));
    }

    #[test]
    fn metrics_exact_layout() {
        let mut c = Container::new("c1", 1.0, 2.0, "img1");
        c.start();
        assert_eq!(
            c.metrics(),
            "[Container: c1: 1.000000 CPU, 2.000000 Memory, img1, active:true]"
        );
    }

    #[test]
    fn display_matches_metrics() {
        let c = Container::new("c", 0.25, 0.5, "busybox");
        assert_eq!(c.to_string(), c.metrics());
    }

    #[test]
    fn quantity_reports_demand() {
        let c = Container::new("c", 0.25, 0.5, "busybox");
        assert_eq!(c.quantity().cpu, 0.25);
        assert_eq!(c.quantity().mem, 0.5);
    }
}
