mod respond;

pub use respond::write_response;

use std::collections::HashSet;
use std::io::ErrorKind;
use std::path::Path;
use std::sync::Arc;
use std::time::SystemTime;

use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use tokio::fs;
use tokio::io::AsyncReadExt;
use tracing::{debug, warn};

use crate::cache::{CacheEntry, InMemoryCache};
use crate::config::{ConfigError, FileServerSettings};
use crate::errors::{
    ErrorPageResponder, ErrorPageTemplate, ErrorResponder, FALLBACK_ERROR_TEMPLATE,
    JsonErrorResponder, html_response,
};
use crate::resolve::{Resolution, resolve_request_path};
use crate::serve::{
    ConditionalHeaders, FileBody, FileResponse, HeaderBuilder, render_bytes, render_file,
};

/// The slice of an HTTP request the pipeline needs.
pub struct FileRequest {
    pub method: Method,
    pub path: String,
    pub headers: HeaderMap,
}

/// Serves files from a configured root with an in-memory TTL cache and an
/// ordered chain of error responders.
///
/// One instance handles all requests concurrently; the cache is the only
/// shared mutable state.
pub struct FileServer {
    settings: FileServerSettings,
    allowed_methods: HashSet<Method>,
    cache: Option<InMemoryCache>,
    responders: Vec<Box<dyn ErrorResponder>>,
    fallback: ErrorPageTemplate,
}

impl FileServer {
    pub fn new(mut settings: FileServerSettings) -> Result<Self, ConfigError> {
        match std::fs::metadata(&settings.root) {
            Ok(info) if !info.is_dir() => {
                return Err(ConfigError::RootNotDirectory {
                    path: settings.root,
                });
            }
            Ok(_) => {}
            Err(source) if source.kind() == ErrorKind::NotFound => {
                return Err(ConfigError::RootMissing {
                    path: settings.root,
                });
            }
            Err(source) => return Err(ConfigError::root_unreadable(settings.root, source)),
        }

        if settings.cache_enabled && settings.cache_ttl.is_zero() {
            return Err(ConfigError::ZeroCacheTtl);
        }

        if settings.allowed_methods.is_empty() {
            settings.allowed_methods.push(Method::GET);
        }

        // Built once here so request handling never races a lazy init.
        let allowed_methods: HashSet<Method> = settings.allowed_methods.iter().cloned().collect();

        let cache = settings
            .cache_enabled
            .then(|| InMemoryCache::new(settings.cache_ttl / 2));

        Ok(Self {
            settings,
            allowed_methods,
            cache,
            responders: vec![Box::new(JsonErrorResponder), Box::new(ErrorPageResponder)],
            fallback: ErrorPageTemplate::new(FALLBACK_ERROR_TEMPLATE),
        })
    }

    pub fn settings(&self) -> &FileServerSettings {
        &self.settings
    }

    /// Replaces the error responder chain. The builtin fallback template
    /// stays in place behind whatever is registered here.
    pub fn set_error_responders(&mut self, responders: Vec<Box<dyn ErrorResponder>>) {
        self.responders = responders;
    }

    /// Single entry point per request.
    pub async fn handle(&self, request: &FileRequest) -> FileResponse {
        if !self.allowed_methods.contains(&request.method) {
            debug!(method = %request.method, "method not allowed");
            return self
                .error_response(request, StatusCode::METHOD_NOT_ALLOWED)
                .await;
        }

        let path = match resolve_request_path(&request.path, &self.settings) {
            Resolution::Redirect(target) => {
                debug!(%target, "redirecting index request");
                return redirect_response(&target);
            }
            Resolution::File(path) => path,
        };

        let conditional = ConditionalHeaders::from_headers(&request.headers);

        if let Some(entry) = self.lookup_cached(&path) {
            debug!(path = %path.display(), "cache hit");
            return render_bytes(entry.content.clone(), entry.modified, &path, &conditional);
        }

        let metadata = match fs::metadata(&path).await {
            Ok(metadata) if metadata.is_file() => metadata,
            Ok(_) => {
                debug!(path = %path.display(), "not a regular file");
                return self.error_response(request, StatusCode::NOT_FOUND).await;
            }
            Err(_) => {
                debug!(path = %path.display(), "stat failed");
                return self.error_response(request, StatusCode::NOT_FOUND).await;
            }
        };

        let mut file = match fs::File::open(&path).await {
            Ok(file) => file,
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to open file");
                return self
                    .error_response(request, StatusCode::INTERNAL_SERVER_ERROR)
                    .await;
            }
        };

        let modified = metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH);
        let len = metadata.len();

        if self.cache_admits(len) {
            let mut buf = Vec::with_capacity(len as usize);

            return match file.read_to_end(&mut buf).await {
                Ok(_) => {
                    let content = Bytes::from(buf);
                    // Committed only after the full content is in memory.
                    self.store_in_cache(&path, modified, content.clone());
                    render_bytes(content, modified, &path, &conditional)
                }
                Err(error) => {
                    warn!(path = %path.display(), %error, "failed to read file");
                    self.error_response(request, StatusCode::INTERNAL_SERVER_ERROR)
                        .await
                }
            };
        }

        match render_file(file, len, modified, &path, &conditional).await {
            Ok(response) => response,
            Err(error) => {
                warn!(path = %path.display(), %error, "failed to serve file");
                self.error_response(request, StatusCode::INTERNAL_SERVER_ERROR)
                    .await
            }
        }
    }

    /// Walks the responder chain in registration order; the first response
    /// wins. Falls back to the builtin template so an answer is always
    /// produced.
    pub async fn error_response(&self, request: &FileRequest, code: StatusCode) -> FileResponse {
        for responder in &self.responders {
            if let Some(response) = responder.respond(request, self, code).await {
                return response;
            }
        }

        html_response(code, self.fallback.render(code))
    }

    /// Cache lookup for the resolved path; `None` when caching is off, the
    /// key is absent, or the entry has expired.
    pub fn lookup_cached(&self, path: &Path) -> Option<Arc<CacheEntry>> {
        self.cache.as_ref()?.get(path)
    }

    /// Admission rule shared by ordinary content and error pages: caching
    /// on, entry ceiling not reached, content within the size limit.
    pub fn cache_admits(&self, len: u64) -> bool {
        match &self.cache {
            Some(cache) => {
                cache.count() < self.settings.cache_max_entries
                    && len <= self.settings.cache_max_file_size
            }
            None => false,
        }
    }

    /// Inserts (or replaces) the entry for a resolved path, resetting its
    /// TTL. Callers enforce [`cache_admits`](Self::cache_admits) first.
    pub fn store_in_cache(&self, path: &Path, modified: SystemTime, content: Bytes) {
        if let Some(cache) = &self.cache {
            cache.set(
                path.to_path_buf(),
                self.settings.cache_ttl,
                CacheEntry { modified, content },
            );
        }
    }
}

fn redirect_response(target: &str) -> FileResponse {
    let mut headers = HeaderBuilder::default();
    headers.location(target);
    headers.content_length("0");

    FileResponse {
        status: StatusCode::MOVED_PERMANENTLY,
        headers: headers.build(),
        body: FileBody::Empty,
    }
}
