//! Worker registry abstraction
//!
//! The coordinator asks once per round which workers are available; it
//! assumes nothing beyond a stable ordering for the duration of that one
//! call. Discovery, health checking and registration live behind this trait.

use async_trait::async_trait;

use crate::wire::WorkerId;

/// Source of currently available worker identifiers
#[async_trait]
pub trait WorkerRegistry: Send + Sync + 'static {
    async fn list_available_workers(&self) -> Vec<WorkerId>;
}

/// Fixed worker list, handed in by whoever wired up the deployment
#[derive(Clone, Default)]
pub struct StaticRegistry {
    workers: Vec<WorkerId>,
}

impl StaticRegistry {
    pub fn new(workers: Vec<WorkerId>) -> Self {
        StaticRegistry { workers }
    }

    /// Registry that reports no workers at all; everything falls back to
    /// local computation
    pub fn empty() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkerRegistry for StaticRegistry {
    async fn list_available_workers(&self) -> Vec<WorkerId> {
        self.workers.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn static_registry_reports_its_workers_in_order() {
        let registry = StaticRegistry::new(vec!["w-0".into(), "w-1".into()]);
        assert_eq!(registry.list_available_workers().await, vec!["w-0", "w-1"]);
        assert!(StaticRegistry::empty()
            .list_available_workers()
            .await
            .is_empty());
    }
}
