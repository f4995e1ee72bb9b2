use std::io;
use std::path::Path;
use std::time::SystemTime;

use bytes::Bytes;
use http::StatusCode;
use httpdate::fmt_http_date;
use tokio::fs;
use tokio::io::AsyncSeekExt;

use crate::serve::etag::{entity_tag, modified_since, none_match};
use crate::serve::headers::HeaderBuilder;
use crate::serve::range::parse_byte_range;
use crate::serve::{ConditionalHeaders, FileBody, FileResponse};

struct Validators {
    not_modified: bool,
    etag: String,
    last_modified: String,
}

fn evaluate(len: u64, modified: SystemTime, conditional: &ConditionalHeaders) -> Validators {
    let etag = entity_tag(len, modified);

    // If-None-Match takes precedence over If-Modified-Since.
    let not_modified = match (
        conditional.if_none_match.as_deref(),
        conditional.if_modified_since.as_deref(),
    ) {
        (Some(inm), _) => none_match(&etag, inm),
        (None, Some(ims)) => !modified_since(modified, ims),
        _ => false,
    };

    Validators {
        not_modified,
        etag,
        last_modified: fmt_http_date(modified),
    }
}

/// Headers common to 200, 206 and 304 answers. The path supplies the
/// content-type hint via its last segment.
fn base_headers(path: &Path, validators: &Validators) -> HeaderBuilder {
    let mime = mime_guess::from_path(path).first_or_octet_stream();

    let mut headers = HeaderBuilder::default();
    headers.accept_ranges();
    headers.content_type(mime.as_ref());
    headers.etag(&validators.etag);
    headers.last_modified(&validators.last_modified);

    headers
}

/// Serves in-memory content: cache hits and freshly admitted files.
///
/// Range answers slice the shared buffer; no copying beyond the slice
/// bookkeeping.
pub fn render_bytes(
    content: Bytes,
    modified: SystemTime,
    path: &Path,
    conditional: &ConditionalHeaders,
) -> FileResponse {
    let len = content.len() as u64;
    let validators = evaluate(len, modified, conditional);
    let mut headers = base_headers(path, &validators);

    if validators.not_modified {
        headers.content_length("0");

        return FileResponse {
            status: StatusCode::NOT_MODIFIED,
            headers: headers.build(),
            body: FileBody::Empty,
        };
    }

    if let Some(range) = conditional
        .range
        .as_deref()
        .and_then(|r| parse_byte_range(r, len))
    {
        let slice = content.slice(range.start as usize..=range.end as usize);

        headers.content_range(&range, len);
        headers.content_length(&slice.len().to_string());

        return FileResponse {
            status: StatusCode::PARTIAL_CONTENT,
            headers: headers.build(),
            body: FileBody::Bytes(slice),
        };
    }

    headers.content_length(&len.to_string());

    FileResponse {
        status: StatusCode::OK,
        headers: headers.build(),
        body: FileBody::Bytes(content),
    }
}

/// Serves from an open file handle without buffering the whole content.
pub async fn render_file(
    mut file: fs::File,
    len: u64,
    modified: SystemTime,
    path: &Path,
    conditional: &ConditionalHeaders,
) -> io::Result<FileResponse> {
    let validators = evaluate(len, modified, conditional);
    let mut headers = base_headers(path, &validators);

    if validators.not_modified {
        headers.content_length("0");

        return Ok(FileResponse {
            status: StatusCode::NOT_MODIFIED,
            headers: headers.build(),
            body: FileBody::Empty,
        });
    }

    if let Some(range) = conditional
        .range
        .as_deref()
        .and_then(|r| parse_byte_range(r, len))
    {
        file.seek(io::SeekFrom::Start(range.start)).await?;

        let remaining = range.end - range.start + 1;

        headers.content_range(&range, len);
        headers.content_length(&remaining.to_string());

        return Ok(FileResponse {
            status: StatusCode::PARTIAL_CONTENT,
            headers: headers.build(),
            body: FileBody::RangedFile { file, remaining },
        });
    }

    headers.content_length(&len.to_string());

    Ok(FileResponse {
        status: StatusCode::OK,
        headers: headers.build(),
        body: FileBody::File(file),
    })
}
