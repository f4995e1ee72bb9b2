use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;
use tokio::fs;
use tracing::debug;

use crate::errors::{ErrorPageTemplate, ErrorResponder, html_response};
use crate::server::{FileRequest, FileServer};
use crate::serve::FileResponse;

/// Serves a configured error page file with placeholders substituted.
///
/// The file is loaded through the same cache path as ordinary content and
/// is subject to the same admission rules. Any failure to load it passes
/// the error down the chain.
pub struct ErrorPageResponder;

#[async_trait]
impl ErrorResponder for ErrorPageResponder {
    async fn respond(
        &self,
        _request: &FileRequest,
        server: &FileServer,
        code: StatusCode,
    ) -> Option<FileResponse> {
        let name = server.settings().error_file_name.as_deref()?;
        if name.is_empty() {
            return None;
        }

        let path = server.settings().root.join(name);

        let content = match server.lookup_cached(&path) {
            Some(entry) => entry.content.clone(),
            None => {
                let metadata = fs::metadata(&path).await.ok()?;
                if !metadata.is_file() {
                    return None;
                }

                let data = fs::read(&path).await.ok()?;
                let content = Bytes::from(data);

                if server.cache_admits(metadata.len()) {
                    server.store_in_cache(&path, modified_time(&metadata), content.clone());
                } else {
                    debug!(path = %path.display(), "error page not admitted to cache");
                }

                content
            }
        };

        let template = ErrorPageTemplate::new(String::from_utf8_lossy(&content).into_owned());

        Some(html_response(code, template.render(code)))
    }
}

fn modified_time(metadata: &std::fs::Metadata) -> std::time::SystemTime {
    metadata
        .modified()
        .unwrap_or(std::time::SystemTime::UNIX_EPOCH)
}
