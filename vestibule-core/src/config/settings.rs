use std::path::PathBuf;
use std::time::Duration;

use http::Method;

pub const DEFAULT_INDEX_FILE: &str = "index.html";
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5);
pub const DEFAULT_CACHE_MAX_FILE_SIZE: u64 = 64 * 1024; // 64 KiB
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 64;

/// Immutable configuration snapshot for a [`FileServer`](crate::FileServer).
///
/// Build one with [`FileServerSettings::new`] and adjust the public fields
/// before handing it to the server. Validation (root exists and is a
/// directory, TTL is non-zero) happens at server construction.
#[derive(Debug, Clone)]
pub struct FileServerSettings {
    /// Directory the served files live under.
    pub root: PathBuf,

    /// File name substituted for directory requests. An empty name disables
    /// index substitution; directories then fail to serve.
    pub index_file_name: String,

    /// File under `root` used as the error page template, if any.
    pub error_file_name: Option<String>,

    /// Answer `/foo/{index}` requests with a permanent redirect to `/foo/`.
    pub redirect_index_to_root: bool,

    /// Request methods the server answers. Empty means GET only.
    pub allowed_methods: Vec<Method>,

    pub cache_enabled: bool,

    /// Lifetime of a cache entry. Must be non-zero when caching is enabled.
    pub cache_ttl: Duration,

    /// Largest file size (bytes) admitted to the cache.
    pub cache_max_file_size: u64,

    /// Entry-count ceiling; inserts are refused once reached.
    pub cache_max_entries: usize,
}

impl FileServerSettings {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            index_file_name: DEFAULT_INDEX_FILE.to_string(),
            error_file_name: None,
            redirect_index_to_root: false,
            allowed_methods: vec![Method::GET],
            cache_enabled: false,
            cache_ttl: DEFAULT_CACHE_TTL,
            cache_max_file_size: DEFAULT_CACHE_MAX_FILE_SIZE,
            cache_max_entries: DEFAULT_CACHE_MAX_ENTRIES,
        }
    }
}
