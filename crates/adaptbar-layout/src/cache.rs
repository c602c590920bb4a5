//! Layout result cache.
//!
//! Results are keyed by a coarse signature of the inputs: the container width
//! snapped to a 10pt grid, the item count, side-button and accessory
//! presence, and a hash over each item's `(index, priority, can_hide_title)`.
//!
//! # Invariants
//!
//! - A hit additionally requires the stored exact width to be within
//!   [`WIDTH_TOLERANCE`] of the requested width and the entry to be no older
//!   than the TTL.
//! - At most `capacity` entries are held; the oldest are evicted first.
//! - Expired entries are purged before every insertion.
//!
//! Explicit item widths are not part of the signature; hosts that change
//! them must call [`LayoutCache::invalidate_all`].
//!
//! Time is passed in explicitly so tests can drive expiry deterministically.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::time::Duration;

use adaptbar_core::units::{WIDTH_QUANTUM, quantize, within};
use web_time::Instant;

use crate::result::LayoutResult;
use crate::{ItemDescriptor, Px, SideButtonDescriptor};

/// Default maximum number of cached results.
pub const DEFAULT_CAPACITY: usize = 10;

/// Default lifetime of a cached result.
pub const DEFAULT_TTL: Duration = Duration::from_secs(60);

/// Maximum exact-width drift a cache hit tolerates.
pub const WIDTH_TOLERANCE: Px = 10.0;

#[inline]
fn duration_since_or_zero(now: Instant, earlier: Instant) -> Duration {
    now.checked_duration_since(earlier)
        .unwrap_or(Duration::ZERO)
}

/// Signature of one layout request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LayoutCacheKey {
    quantized_width: i64,
    item_count: usize,
    has_side_button: bool,
    has_accessory: bool,
    items_hash: u64,
}

impl LayoutCacheKey {
    /// Build the signature for a request.
    #[must_use]
    pub fn new(
        container_width: Px,
        items: &[ItemDescriptor],
        side_button: Option<&SideButtonDescriptor>,
        has_accessory: bool,
    ) -> Self {
        let mut hasher = DefaultHasher::new();
        for item in items {
            item.index.hash(&mut hasher);
            item.priority.hash(&mut hasher);
            item.can_hide_title.hash(&mut hasher);
        }
        Self {
            quantized_width: quantize(container_width, WIDTH_QUANTUM),
            item_count: items.len(),
            has_side_button: side_button.is_some(),
            has_accessory,
            items_hash: hasher.finish(),
        }
    }

    /// Width bucket this key was built for.
    #[must_use]
    pub const fn quantized_width(&self) -> i64 {
        self.quantized_width
    }
}

#[derive(Debug, Clone)]
struct CacheEntry {
    result: LayoutResult,
    created: Instant,
    /// Insertion order; breaks ties between equal `created` stamps.
    seq: u64,
    exact_width: Px,
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CacheStats {
    /// Number of entries currently in the cache.
    pub entries: usize,
    /// Total cache hits since creation or last reset.
    pub hits: u64,
    /// Total cache misses since creation or last reset.
    pub misses: u64,
    /// Hit rate as a fraction (0.0 to 1.0).
    pub hit_rate: f64,
}

/// Bounded, time-limited store of layout results.
#[derive(Debug)]
pub struct LayoutCache {
    entries: HashMap<LayoutCacheKey, CacheEntry>,
    capacity: usize,
    ttl: Duration,
    hits: u64,
    misses: u64,
    next_seq: u64,
}

impl LayoutCache {
    /// Create a cache holding at most `capacity` entries for at most `ttl` each.
    #[must_use]
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: HashMap::with_capacity(capacity.saturating_add(1)),
            capacity,
            ttl,
            hits: 0,
            misses: 0,
            next_seq: 0,
        }
    }

    /// Look up a result, counting the outcome as a hit or a miss.
    ///
    /// An expired entry for `key` is removed on the way.
    pub fn get(&mut self, key: &LayoutCacheKey, exact_width: Px, now: Instant) -> Option<LayoutResult> {
        let found = match self.entries.get(key) {
            None => None,
            Some(entry) if duration_since_or_zero(now, entry.created) > self.ttl => {
                self.entries.remove(key);
                None
            }
            Some(entry) if !within(entry.exact_width, exact_width, WIDTH_TOLERANCE) => None,
            Some(entry) => Some(entry.result.clone()),
        };

        if found.is_some() {
            self.hits += 1;
        } else {
            self.misses += 1;
        }
        found
    }

    /// Store a result. Returns how many entries were dropped to make room.
    pub fn insert(
        &mut self,
        key: LayoutCacheKey,
        result: LayoutResult,
        exact_width: Px,
        now: Instant,
    ) -> usize {
        let mut dropped = self.purge_expired(now);

        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.entries.insert(
            key,
            CacheEntry {
                result,
                created: now,
                seq,
                exact_width,
            },
        );

        dropped += self.evict_oldest();
        dropped
    }

    /// Remove entries that have lived for `ttl` or longer.
    pub fn purge_expired(&mut self, now: Instant) -> usize {
        let before = self.entries.len();
        let ttl = self.ttl;
        self.entries
            .retain(|_, entry| duration_since_or_zero(now, entry.created) < ttl);
        before - self.entries.len()
    }

    fn evict_oldest(&mut self) -> usize {
        let excess = self.entries.len().saturating_sub(self.capacity);
        if excess == 0 {
            return 0;
        }
        let mut by_age: Vec<(LayoutCacheKey, Instant, u64)> = self
            .entries
            .iter()
            .map(|(key, entry)| (*key, entry.created, entry.seq))
            .collect();
        by_age.sort_by_key(|&(_, created, seq)| (created, seq));
        for (key, _, _) in by_age.into_iter().take(excess) {
            self.entries.remove(&key);
        }
        excess
    }

    /// Drop every entry. Hit/miss counters are kept.
    pub fn invalidate_all(&mut self) {
        self.entries.clear();
    }

    /// Reset hit/miss counters.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Current statistics.
    #[must_use]
    pub fn stats(&self) -> CacheStats {
        let total = self.hits + self.misses;
        CacheStats {
            entries: self.entries.len(),
            hits: self.hits,
            misses: self.misses,
            hit_rate: if total > 0 {
                self.hits as f64 / total as f64
            } else {
                0.0
            },
        }
    }

    /// Number of stored entries.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing is stored.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Maximum number of entries.
    #[inline]
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Entry lifetime.
    #[inline]
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        self.ttl
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        CompressionLevel, ItemPriority, SideButtonDisplayMode, SideButtonPriority, SpaceTier,
    };
    use std::collections::BTreeMap;

    fn result(width: Px) -> LayoutResult {
        LayoutResult {
            space_tier: SpaceTier::Regular,
            compression_level: CompressionLevel::Full,
            item_spacing: 12.0,
            item_display_modes: BTreeMap::new(),
            visible_indices: Vec::new(),
            overflow_indices: Vec::new(),
            side_button_mode: SideButtonDisplayMode::None,
            toolbar_width: width,
            accessory_width: 200.0,
        }
    }

    fn items() -> Vec<ItemDescriptor> {
        ItemDescriptor::from_priorities(&[ItemPriority::Essential, ItemPriority::Primary])
    }

    fn key(width: Px) -> LayoutCacheKey {
        LayoutCacheKey::new(width, &items(), None, false)
    }

    #[test]
    fn key_quantizes_width() {
        assert_eq!(key(371.0), key(379.9));
        assert_ne!(key(369.9), key(370.0));
        assert_eq!(key(375.0).quantized_width(), 370);
    }

    #[test]
    fn key_tracks_item_identity_and_presence() {
        let base = key(400.0);
        let mut changed = items();
        changed[1].priority = ItemPriority::Secondary;
        assert_ne!(base, LayoutCacheKey::new(400.0, &changed, None, false));

        let mut titles = items();
        titles[0].can_hide_title = false;
        assert_ne!(base, LayoutCacheKey::new(400.0, &titles, None, false));

        let button = SideButtonDescriptor::new(SideButtonPriority::Primary);
        assert_ne!(base, LayoutCacheKey::new(400.0, &items(), Some(&button), false));
        assert_ne!(base, LayoutCacheKey::new(400.0, &items(), None, true));
        assert_ne!(base, LayoutCacheKey::new(400.0, &items()[..1], None, false));

        let mut widths = items();
        widths[0].full_width = Some(99.0);
        assert_eq!(base, LayoutCacheKey::new(400.0, &widths, None, false));
    }

    #[test]
    fn hit_within_tolerance() {
        let mut cache = LayoutCache::default();
        let t0 = Instant::now();
        cache.insert(key(371.0), result(1.0), 371.0, t0);

        assert_eq!(cache.get(&key(379.0), 379.0, t0), Some(result(1.0)));
        let stats = cache.stats();
        assert_eq!((stats.hits, stats.misses, stats.entries), (1, 0, 1));
        assert_eq!(stats.hit_rate, 1.0);
    }

    #[test]
    fn exact_width_drift_is_a_miss() {
        let mut cache = LayoutCache::default();
        let t0 = Instant::now();
        cache.insert(key(300.0), result(1.0), 300.0, t0);
        assert!(cache.get(&key(309.9), 309.9, t0).is_some());

        assert!(cache.get(&key(300.0), 315.0, t0).is_none());
        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn expired_entry_is_removed_on_lookup() {
        let mut cache = LayoutCache::new(4, Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert(key(400.0), result(1.0), 400.0, t0);

        assert!(cache.get(&key(400.0), 400.0, t0 + Duration::from_secs(60)).is_some());
        assert!(cache.get(&key(400.0), 400.0, t0 + Duration::from_secs(61)).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn insert_purges_expired_first() {
        let mut cache = LayoutCache::new(4, Duration::from_secs(60));
        let t0 = Instant::now();
        cache.insert(key(100.0), result(1.0), 100.0, t0);
        cache.insert(key(200.0), result(2.0), 200.0, t0 + Duration::from_secs(30));

        let dropped = cache.insert(key(300.0), result(3.0), 300.0, t0 + Duration::from_secs(60));
        assert_eq!(dropped, 1);
        assert_eq!(cache.len(), 2);
        assert!(cache.get(&key(100.0), 100.0, t0 + Duration::from_secs(60)).is_none());
    }

    #[test]
    fn capacity_evicts_oldest() {
        let mut cache = LayoutCache::new(3, Duration::from_secs(600));
        let t0 = Instant::now();
        for i in 0..5u64 {
            let w = 100.0 + 20.0 * i as Px;
            cache.insert(key(w), result(w), w, t0 + Duration::from_millis(i));
        }
        assert_eq!(cache.len(), 3);
        let now = t0 + Duration::from_millis(10);
        assert!(cache.get(&key(100.0), 100.0, now).is_none());
        assert!(cache.get(&key(120.0), 120.0, now).is_none());
        assert!(cache.get(&key(140.0), 140.0, now).is_some());
        assert!(cache.get(&key(180.0), 180.0, now).is_some());
    }

    #[test]
    fn same_instant_evicts_in_insertion_order() {
        // Each cache gets a fresh hasher seed, so repeat to cover many orders.
        for _ in 0..64 {
            let mut cache = LayoutCache::new(3, DEFAULT_TTL);
            let now = Instant::now();
            for i in 0..4u8 {
                let w = 100.0 + 20.0 * Px::from(i);
                assert_eq!(cache.insert(key(w), result(w), w, now), usize::from(i == 3));
            }
            assert!(cache.get(&key(100.0), 100.0, now).is_none());
            for w in [120.0, 140.0, 160.0] {
                assert!(cache.get(&key(w), w, now).is_some(), "lost entry at {w}");
            }
        }
    }

    #[test]
    fn invalidate_keeps_counters() {
        let mut cache = LayoutCache::default();
        let t0 = Instant::now();
        cache.insert(key(400.0), result(1.0), 400.0, t0);
        let _ = cache.get(&key(400.0), 400.0, t0);
        cache.invalidate_all();
        assert!(cache.is_empty());
        assert_eq!(cache.stats().hits, 1);
        cache.reset_stats();
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn zero_capacity_stores_nothing() {
        let mut cache = LayoutCache::new(0, DEFAULT_TTL);
        let t0 = Instant::now();
        assert_eq!(cache.insert(key(400.0), result(1.0), 400.0, t0), 1);
        assert!(cache.is_empty());
    }
}
