use std::path::{Path, PathBuf};
use std::sync::{Arc, Weak};
use std::thread;
use std::time::{Duration, Instant};

use dashmap::DashMap;

use crate::cache::CacheEntry;

struct Stored {
    expires_at: Instant,
    entry: Arc<CacheEntry>,
}

/// Concurrency-safe TTL store for served file content.
///
/// Keys are resolved filesystem paths; one entry per path. Inserting over
/// an existing key replaces the entry and resets its expiry. Expired
/// entries behave as absent on lookup even before the sweeper removes them.
pub struct InMemoryCache {
    entries: Arc<DashMap<PathBuf, Stored>>,
}

impl InMemoryCache {
    /// Creates the cache and starts its sweeper.
    ///
    /// The sweeper wakes every `cleanup_interval` and removes entries whose
    /// expiry has passed. It holds only a weak handle to the map, so
    /// dropping the cache lets it exit on the next wakeup.
    pub fn new(cleanup_interval: Duration) -> Self {
        let entries: Arc<DashMap<PathBuf, Stored>> = Arc::new(DashMap::new());
        let handle = Arc::downgrade(&entries);

        thread::spawn(move || sweep_loop(handle, cleanup_interval));

        Self { entries }
    }

    pub fn get(&self, key: &Path) -> Option<Arc<CacheEntry>> {
        let stored = self.entries.get(key)?;

        // Expired but not yet swept counts as absent.
        if stored.expires_at <= Instant::now() {
            return None;
        }

        Some(Arc::clone(&stored.entry))
    }

    pub fn set(&self, key: PathBuf, ttl: Duration, entry: CacheEntry) {
        self.entries.insert(
            key,
            Stored {
                expires_at: Instant::now() + ttl,
                entry: Arc::new(entry),
            },
        );
    }

    /// Number of stored entries. May transiently include expired entries
    /// the sweeper has not removed yet; admission decisions tolerate the
    /// over-count.
    pub fn count(&self) -> usize {
        self.entries.len()
    }
}

fn sweep_loop(entries: Weak<DashMap<PathBuf, Stored>>, interval: Duration) {
    loop {
        thread::sleep(interval);

        let Some(entries) = entries.upgrade() else {
            return;
        };

        let now = Instant::now();
        entries.retain(|_, stored| stored.expires_at > now);
    }
}
