mod etag;
mod headers;
mod range;
mod render;

pub(crate) use headers::HeaderBuilder;
pub use render::{render_bytes, render_file};

use bytes::Bytes;
use http::{HeaderMap, StatusCode, header};
use tokio::fs;

pub enum FileBody {
    Empty,
    /// In-memory content: cache hits, freshly cached files, error pages.
    Bytes(Bytes),
    /// Streamed from disk when the content was not admitted to the cache.
    File(fs::File),

    /// Byte-range slice of a file served without buffering.
    RangedFile {
        file: fs::File,
        remaining: u64,
    },
}

pub struct FileResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: FileBody,
}

/// Conditional request headers used for cache validation and ranges.
#[derive(Debug, Default)]
pub struct ConditionalHeaders {
    pub if_none_match: Option<String>,
    pub if_modified_since: Option<String>,
    pub range: Option<String>,
}

impl ConditionalHeaders {
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let text = |name: header::HeaderName| {
            headers
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };

        Self {
            if_none_match: text(header::IF_NONE_MATCH),
            if_modified_since: text(header::IF_MODIFIED_SINCE),
            range: text(header::RANGE),
        }
    }
}
