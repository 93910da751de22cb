//! # Summary Cache
//!
//! Range-keyed cache for computed reconciliation summaries with
//! overlap-based eviction.
//!
//! ## Why Overlap Eviction
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │  Cached ranges:   [Aug 1 ── Aug 8]   [Aug 1 ── Aug 31]   [Jul]      │
//! │                                                                     │
//! │  Withdrawal mutated on Aug 4                                        │
//! │       │                                                             │
//! │       ▼                                                             │
//! │  invalidate_date(Aug 4)                                             │
//! │       ├── [Aug 1 ── Aug 8]   contains Aug 4 → EVICTED               │
//! │       ├── [Aug 1 ── Aug 31]  contains Aug 4 → EVICTED               │
//! │       └── [Jul]              disjoint       → kept                  │
//! │                                                                     │
//! │  Exact-key matching would miss the month view while the week view   │
//! │  was being refreshed - the exact stale-figure bug this subsystem    │
//! │  exists to prevent. Eviction is therefore by range CONTAINMENT,     │
//! │  never by key equality.                                             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Generation Guard
//! A summary is computed from reads that take time. If a mutation lands
//! between the start of those reads and the cache store, the computed
//! summary is already stale and must not be cached. Callers snapshot
//! [`generation`](SummaryCache::generation) before reading and hand it
//! back to [`store_if_current`](SummaryCache::store_if_current); the
//! store is refused when any invalidation happened in between. The
//! mutating caller itself always sees fresh data afterwards
//! (read-after-write), because eviction completes before the mutation is
//! acknowledged.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use tokio::sync::RwLock;

use tillkeep_core::DateRange;

/// Range-keyed cache with overlap eviction.
///
/// Process-scoped and explicitly owned by the service that creates it -
/// no module-level state, no sharing across services.
#[derive(Debug)]
pub struct SummaryCache<T> {
    /// Cached values keyed by the exact requested range.
    entries: RwLock<HashMap<DateRange, Arc<T>>>,

    /// Bumped on every invalidation, under the write lock. Lets readers
    /// detect that their in-flight computation was overtaken.
    generation: AtomicU64,
}

impl<T> SummaryCache<T> {
    /// Creates an empty cache.
    pub fn new() -> Self {
        SummaryCache {
            entries: RwLock::new(HashMap::new()),
            generation: AtomicU64::new(0),
        }
    }

    /// Snapshot of the invalidation counter. Take it BEFORE issuing the
    /// reads that will feed [`store_if_current`](Self::store_if_current).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    /// Returns the cached value for `range`, if any.
    pub async fn get(&self, range: DateRange) -> Option<Arc<T>> {
        self.entries.read().await.get(&range).cloned()
    }

    /// Stores `value` for `range` unless an invalidation happened since
    /// `observed_generation` was taken. Returns whether the store
    /// happened.
    pub async fn store_if_current(
        &self,
        range: DateRange,
        value: Arc<T>,
        observed_generation: u64,
    ) -> bool {
        let mut entries = self.entries.write().await;

        // Both this check and the bump in invalidate_date run under the
        // write lock, so they are totally ordered against each other.
        if self.generation.load(Ordering::Acquire) != observed_generation {
            return false;
        }

        entries.insert(range, value);
        true
    }

    /// Evicts every cached range containing `date` and bumps the
    /// generation. Returns the number of entries evicted.
    ///
    /// Must complete before the triggering mutation is acknowledged to
    /// its caller.
    pub async fn invalidate_date(&self, date: NaiveDate) -> usize {
        let mut entries = self.entries.write().await;
        self.generation.fetch_add(1, Ordering::AcqRel);

        let before = entries.len();
        entries.retain(|range, _| !range.contains(date));
        before - entries.len()
    }

    /// Number of cached ranges.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache is empty.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl<T> Default for SummaryCache<T> {
    fn default() -> Self {
        SummaryCache::new()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 8, d).unwrap()
    }

    fn range(start: u32, end: u32) -> DateRange {
        DateRange::new(date(start), date(end))
    }

    #[tokio::test]
    async fn test_get_and_store() {
        let cache = SummaryCache::new();
        let generation = cache.generation();

        assert!(cache.get(range(1, 8)).await.is_none());

        assert!(
            cache
                .store_if_current(range(1, 8), Arc::new("week"), generation)
                .await
        );
        assert_eq!(cache.get(range(1, 8)).await.as_deref(), Some(&"week"));

        // A different range is a different key
        assert!(cache.get(range(1, 31)).await.is_none());
    }

    #[tokio::test]
    async fn test_eviction_is_by_containment_not_key_equality() {
        let cache = SummaryCache::new();
        let generation = cache.generation();

        cache
            .store_if_current(range(1, 8), Arc::new("week"), generation)
            .await;
        cache
            .store_if_current(range(1, 31), Arc::new("month"), generation)
            .await;
        cache
            .store_if_current(range(10, 12), Arc::new("mid"), generation)
            .await;

        // A mutation on Aug 4 hits the week AND month views
        let evicted = cache.invalidate_date(date(4)).await;
        assert_eq!(evicted, 2);

        assert!(cache.get(range(1, 8)).await.is_none());
        assert!(cache.get(range(1, 31)).await.is_none());
        assert_eq!(cache.get(range(10, 12)).await.as_deref(), Some(&"mid"));
    }

    #[tokio::test]
    async fn test_range_endpoints_are_inside() {
        let cache = SummaryCache::new();
        let generation = cache.generation();

        cache
            .store_if_current(range(1, 8), Arc::new("week"), generation)
            .await;

        // Boundary dates count as contained
        assert_eq!(cache.invalidate_date(date(8)).await, 1);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_stale_computation_is_not_stored() {
        let cache = SummaryCache::new();

        // Reader snapshots the generation, then a mutation lands while
        // its reads are still in flight
        let observed = cache.generation();
        cache.invalidate_date(date(4)).await;

        assert!(
            !cache
                .store_if_current(range(1, 8), Arc::new("stale"), observed)
                .await
        );
        assert!(cache.get(range(1, 8)).await.is_none());

        // A fresh snapshot taken after the invalidation stores fine
        let fresh = cache.generation();
        assert!(
            cache
                .store_if_current(range(1, 8), Arc::new("fresh"), fresh)
                .await
        );
    }

    #[tokio::test]
    async fn test_invalidating_disjoint_date_keeps_entries_but_blocks_inflight() {
        let cache = SummaryCache::new();
        let generation = cache.generation();

        cache
            .store_if_current(range(1, 8), Arc::new("week"), generation)
            .await;

        // July mutation: nothing cached covers it
        assert_eq!(cache.invalidate_date(date(1).pred_opt().unwrap()).await, 0);
        assert_eq!(cache.len().await, 1);
    }
}
