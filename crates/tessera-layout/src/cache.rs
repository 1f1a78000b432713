#![forbid(unsafe_code)]

//! LRU cache for solved layouts.
//!
//! Solving a layout builds and optimises a fresh constraint tableau, which is
//! far more expensive than hashing the inputs. Frames usually re-split the
//! same areas with the same layouts, so results are memoized by
//! `(area, layout)`.
//!
//! Caching never changes results: a hit returns exactly what a fresh solve
//! would produce.
//!
//! Entries are keyed by the area plus an FxHash of the layout, so a lookup
//! never clones the layout. The stored layout is compared structurally on a
//! hit; a hash collision is treated as a miss.
//!
//! # Example
//! ```
//! use tessera_layout::{Constraint, Layout, LayoutCache, Rect};
//!
//! let mut cache = LayoutCache::new(16);
//! let layout = Layout::horizontal([Constraint::Length(3), Constraint::Fill(1)]);
//! let area = Rect::new(0, 0, 10, 1);
//!
//! let first = layout.split_with_cache(area, &mut cache);
//! let second = layout.split_with_cache(area, &mut cache);
//! assert_eq!(first, second);
//!
//! let stats = cache.stats();
//! assert_eq!(stats.hits, 1);
//! assert_eq!(stats.misses, 1);
//! ```

use std::cell::RefCell;
use std::hash::{Hash, Hasher};
use std::num::NonZeroUsize;
use std::rc::Rc;

use lru::LruCache;
use rustc_hash::{FxBuildHasher, FxHasher};
use tessera_core::geometry::Rect;

use crate::Layout;

/// Default number of cached layouts per thread.
pub const DEFAULT_CACHE_CAPACITY: usize = 500;

/// Solved segment rects.
pub type Segments = Rc<[Rect]>;
/// Solved spacer rects.
pub type Spacers = Rc<[Rect]>;

type Key = (Rect, u64);
type Entries = LruCache<Key, Entry, FxBuildHasher>;

#[derive(Debug)]
struct Entry {
    layout: Layout,
    segments: Segments,
    spacers: Spacers,
}

/// FxHash of a layout's structure.
fn layout_hash(layout: &Layout) -> u64 {
    let mut hasher = FxHasher::default();
    layout.hash(&mut hasher);
    hasher.finish()
}

/// Statistics about cache performance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayoutCacheStats {
    /// Number of cache hits.
    pub hits: u64,
    /// Number of cache misses (every solve counts, including when disabled).
    pub misses: u64,
    /// Current number of entries.
    pub size: usize,
    /// Maximum capacity. Zero means caching is disabled.
    pub capacity: usize,
}

impl LayoutCacheStats {
    /// Fraction of lookups that hit (0.0 to 1.0).
    #[must_use]
    pub fn hit_ratio(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Bounded LRU map from `(area, layout)` to solved segments and spacers.
///
/// Not thread-safe. The process default lives in a thread-local (see
/// [`init_cache`]); independent instances can be passed to
/// [`Layout::split_with_cache`].
#[derive(Debug)]
pub struct LayoutCache {
    entries: Option<Entries>,
    hits: u64,
    misses: u64,
}

impl LayoutCache {
    /// Create a cache holding at most `capacity` layouts.
    ///
    /// A capacity of zero disables caching: every lookup solves.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity)
                .map(|capacity| LruCache::with_hasher(capacity, FxBuildHasher)),
            hits: 0,
            misses: 0,
        }
    }

    /// Create a cache with [`DEFAULT_CACHE_CAPACITY`].
    #[must_use]
    pub fn with_default_capacity() -> Self {
        Self::new(DEFAULT_CACHE_CAPACITY)
    }

    /// Return the cached result for `(area, layout)`, or run `solve` and
    /// cache what it returns. Errors are not cached.
    pub fn get_or_try_insert_with<E>(
        &mut self,
        area: Rect,
        layout: &Layout,
        solve: impl FnOnce() -> Result<(Segments, Spacers), E>,
    ) -> Result<(Segments, Spacers), E> {
        let Some(entries) = self.entries.as_mut() else {
            self.misses += 1;
            return solve();
        };

        let key = (area, layout_hash(layout));
        if let Some(entry) = entries.get(&key)
            && entry.layout == *layout
        {
            self.hits += 1;
            tessera_core::trace!(%area, "layout cache hit");
            return Ok((Rc::clone(&entry.segments), Rc::clone(&entry.spacers)));
        }

        self.misses += 1;
        tessera_core::trace!(%area, "layout cache miss");
        let (segments, spacers) = solve()?;
        let entry = Entry {
            layout: layout.clone(),
            segments: Rc::clone(&segments),
            spacers: Rc::clone(&spacers),
        };
        if let Some((evicted, _)) = entries.push(key, entry)
            && evicted != key
        {
            tessera_core::trace!(capacity = entries.cap().get(), "layout cache eviction");
        }
        Ok((segments, spacers))
    }

    /// Check whether `(area, layout)` is cached without touching LRU order.
    #[must_use]
    pub fn contains(&self, area: Rect, layout: &Layout) -> bool {
        self.entries.as_ref().is_some_and(|entries| {
            entries
                .peek(&(area, layout_hash(layout)))
                .is_some_and(|entry| entry.layout == *layout)
        })
    }

    /// Drop every entry and reset statistics.
    pub fn clear(&mut self) {
        if let Some(entries) = self.entries.as_mut() {
            entries.clear();
        }
        self.reset_stats();
    }

    /// Reset hit/miss counters, keeping entries.
    pub fn reset_stats(&mut self) {
        self.hits = 0;
        self.misses = 0;
    }

    /// Get cache statistics.
    #[must_use]
    pub fn stats(&self) -> LayoutCacheStats {
        LayoutCacheStats {
            hits: self.hits,
            misses: self.misses,
            size: self.len(),
            capacity: self.capacity(),
        }
    }

    /// Current number of cached layouts.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.as_ref().map_or(0, LruCache::len)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of cached layouts; zero when disabled.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.entries
            .as_ref()
            .map_or(0, |entries| entries.cap().get())
    }

    /// Whether lookups can ever hit.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.entries.is_some()
    }
}

impl Default for LayoutCache {
    fn default() -> Self {
        Self::with_default_capacity()
    }
}

thread_local! {
    static THREAD_CACHE: RefCell<LayoutCache> = RefCell::new(LayoutCache::with_default_capacity());
}

/// Run `f` against this thread's default cache.
pub(crate) fn with_thread_cache<R>(f: impl FnOnce(&mut LayoutCache) -> R) -> R {
    THREAD_CACHE.with(|cache| f(&mut cache.borrow_mut()))
}

/// Replace this thread's default cache with an empty one of `capacity`.
///
/// Entries and statistics are discarded, not migrated.
pub fn init_cache(capacity: usize) {
    tessera_core::debug!(capacity, "layout cache reinitialized");
    with_thread_cache(|cache| *cache = LayoutCache::new(capacity));
}

/// Statistics for this thread's default cache.
#[must_use]
pub fn layout_cache_stats() -> LayoutCacheStats {
    with_thread_cache(|cache| cache.stats())
}

/// Clear this thread's default cache, keeping its capacity.
pub fn clear_layout_cache() {
    with_thread_cache(LayoutCache::clear);
}

/// Install `cache` as this thread's default and return the previous one.
pub fn swap_layout_cache(cache: LayoutCache) -> LayoutCache {
    with_thread_cache(|current| std::mem::replace(current, cache))
}
