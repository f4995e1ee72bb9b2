use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::anyhow;
use http::Method;
use serde::Deserialize;
use vestibule_core::FileServerSettings;
use vestibule_core::config::{
    DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_MAX_FILE_SIZE, DEFAULT_CACHE_TTL, DEFAULT_INDEX_FILE,
};

#[derive(Debug, Deserialize)]
pub struct ServerConfig {
    /// e.g. "0.0.0.0:8080"
    pub listen: String,
}

#[derive(Debug, Deserialize)]
pub struct FilesConfig {
    /// Directory the served files live under.
    pub root: PathBuf,

    #[serde(default = "default_index_file")]
    pub index_file: String,

    /// File under `root` used as the error page template.
    pub error_file: Option<String>,

    /// Answer `/foo/{index_file}` with a redirect to `/foo/`.
    #[serde(default)]
    pub redirect_index_to_root: bool,

    #[serde(default = "default_allowed_methods")]
    pub allowed_methods: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default = "default_ttl_secs")]
    pub ttl_secs: u64,

    #[serde(default = "default_max_file_size")]
    pub max_file_size: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            ttl_secs: default_ttl_secs(),
            max_file_size: default_max_file_size(),
            max_entries: default_max_entries(),
        }
    }
}

fn default_index_file() -> String {
    DEFAULT_INDEX_FILE.to_string()
}

fn default_allowed_methods() -> Vec<String> {
    vec![Method::GET.to_string()]
}

fn default_true() -> bool {
    true
}

fn default_ttl_secs() -> u64 {
    DEFAULT_CACHE_TTL.as_secs()
}

fn default_max_file_size() -> u64 {
    DEFAULT_CACHE_MAX_FILE_SIZE
}

fn default_max_entries() -> usize {
    DEFAULT_CACHE_MAX_ENTRIES
}

#[derive(Debug, Deserialize)]
pub struct VestibuleConfig {
    pub server: ServerConfig,
    pub files: FilesConfig,

    #[serde(default)]
    pub cache: CacheConfig,
}

impl VestibuleConfig {
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    pub fn file_server_settings(&self) -> anyhow::Result<FileServerSettings> {
        let allowed_methods = self
            .files
            .allowed_methods
            .iter()
            .map(|name| {
                Method::from_bytes(name.as_bytes())
                    .map_err(|_| anyhow!("invalid HTTP method: {name}"))
            })
            .collect::<anyhow::Result<Vec<Method>>>()?;

        let mut settings = FileServerSettings::new(&self.files.root);
        settings.index_file_name = self.files.index_file.clone();
        settings.error_file_name = self.files.error_file.clone();
        settings.redirect_index_to_root = self.files.redirect_index_to_root;
        settings.allowed_methods = allowed_methods;
        settings.cache_enabled = self.cache.enabled;
        settings.cache_ttl = Duration::from_secs(self.cache.ttl_secs);
        settings.cache_max_file_size = self.cache.max_file_size;
        settings.cache_max_entries = self.cache.max_entries;

        Ok(settings)
    }
}
