//! Cached catalog with time-based refresh
//!
//! Dashboards re-read the catalog on every page load; the cache keeps one
//! assembled catalog in memory and only refreshes it once the TTL has
//! passed. A failed refresh is never cached, so the next caller retries.

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::error::Result;
use crate::models::TrainingCatalog;

/// Shared in-memory catalog slot with a freshness deadline
pub struct CatalogCache {
    ttl: Duration,
    slot: RwLock<Option<CachedCatalog>>,
}

struct CachedCatalog {
    loaded_at: Instant,
    catalog: Arc<TrainingCatalog>,
}

impl CatalogCache {
    /// Create an empty cache whose entries stay fresh for `ttl`
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: RwLock::new(None),
        }
    }

    /// Return the cached catalog, running `refresh` if missing or stale
    ///
    /// Concurrent callers share one refresh: whoever wins the write lock
    /// runs it, the rest get the stored result. Errors from `refresh`
    /// propagate to the caller and leave the slot unchanged.
    pub async fn get_or_refresh<F, Fut>(&self, refresh: F) -> Result<Arc<TrainingCatalog>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<TrainingCatalog>>,
    {
        {
            let slot = self.slot.read().await;
            if let Some(cached) = slot.as_ref() {
                if cached.loaded_at.elapsed() < self.ttl {
                    return Ok(Arc::clone(&cached.catalog));
                }
            }
        }

        let mut slot = self.slot.write().await;
        // Another caller may have refreshed while we waited for the lock
        if let Some(cached) = slot.as_ref() {
            if cached.loaded_at.elapsed() < self.ttl {
                return Ok(Arc::clone(&cached.catalog));
            }
        }

        tracing::debug!("Catalog cache stale, refreshing");
        let catalog = Arc::new(refresh().await?);
        *slot = Some(CachedCatalog {
            loaded_at: Instant::now(),
            catalog: Arc::clone(&catalog),
        });
        Ok(catalog)
    }

    /// Drop the cached catalog so the next read refreshes
    pub async fn invalidate(&self) {
        *self.slot.write().await = None;
    }
}
