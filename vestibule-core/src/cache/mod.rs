mod memory;

pub use memory::InMemoryCache;

use std::time::SystemTime;

use bytes::Bytes;

/// A cached file: modification time plus full content.
///
/// `Bytes` hands every reader an independent view over one immutable
/// buffer, so concurrent requests reading the same entry never share a
/// cursor.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub modified: SystemTime,
    pub content: Bytes,
}
