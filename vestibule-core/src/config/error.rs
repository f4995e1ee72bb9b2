use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("files root {path} does not exist")]
    RootMissing { path: PathBuf },

    #[error("files root {path} is not a directory")]
    RootNotDirectory { path: PathBuf },

    #[error("failed to inspect files root {path}: {source}")]
    RootUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cache ttl must be greater than zero")]
    ZeroCacheTtl,
}

impl ConfigError {
    pub fn root_unreadable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::RootUnreadable {
            path: path.into(),
            source,
        }
    }
}
