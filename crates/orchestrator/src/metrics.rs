use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;

/// Atomic counters tracking orchestrator outcomes.
///
/// All counters use relaxed ordering. For a point-in-time view, call
/// [`snapshot`](Self::snapshot).
#[derive(Debug, Default)]
pub struct OrchestratorMetrics {
    /// Products created successfully.
    pub created: AtomicU64,
    /// Create requests that returned an error.
    pub create_failed: AtomicU64,
    /// List requests served.
    pub listed: AtomicU64,
    /// Images streamed through the cache path.
    pub images_served: AtomicU64,
    /// Image requests whose cache token was absent or unreadable.
    pub cache_misses: AtomicU64,
    /// Cache writes that failed and were swallowed.
    pub cache_write_failures: AtomicU64,
    /// Event publishes that failed and were swallowed.
    pub publish_failures: AtomicU64,
    /// Products deleted successfully.
    pub deleted: AtomicU64,
    /// Delete requests that returned an error.
    pub delete_failed: AtomicU64,
}

impl OrchestratorMetrics {
    pub fn increment_created(&self) {
        self.created.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_create_failed(&self) {
        self.create_failed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_listed(&self) {
        self.listed.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_images_served(&self) {
        self.images_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_misses(&self) {
        self.cache_misses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_cache_write_failures(&self) {
        self.cache_write_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_publish_failures(&self) {
        self.publish_failures.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_deleted(&self) {
        self.deleted.fetch_add(1, Ordering::Relaxed);
    }

    pub fn increment_delete_failed(&self) {
        self.delete_failed.fetch_add(1, Ordering::Relaxed);
    }

    /// Take a point-in-time snapshot of all counters.
    pub fn snapshot(&self) -> MetricsSnapshot {
        MetricsSnapshot {
            created: self.created.load(Ordering::Relaxed),
            create_failed: self.create_failed.load(Ordering::Relaxed),
            listed: self.listed.load(Ordering::Relaxed),
            images_served: self.images_served.load(Ordering::Relaxed),
            cache_misses: self.cache_misses.load(Ordering::Relaxed),
            cache_write_failures: self.cache_write_failures.load(Ordering::Relaxed),
            publish_failures: self.publish_failures.load(Ordering::Relaxed),
            deleted: self.deleted.load(Ordering::Relaxed),
            delete_failed: self.delete_failed.load(Ordering::Relaxed),
        }
    }
}

/// A plain data snapshot of [`OrchestratorMetrics`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct MetricsSnapshot {
    pub created: u64,
    pub create_failed: u64,
    pub listed: u64,
    pub images_served: u64,
    pub cache_misses: u64,
    pub cache_write_failures: u64,
    pub publish_failures: u64,
    pub deleted: u64,
    pub delete_failed: u64,
}
