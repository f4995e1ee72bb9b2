mod json;
mod page;
mod template;

pub use json::JsonErrorResponder;
pub use page::ErrorPageResponder;
pub use template::{ErrorPageTemplate, FALLBACK_ERROR_TEMPLATE};
pub(crate) use template::reason_phrase;

use async_trait::async_trait;
use bytes::Bytes;
use http::StatusCode;

use crate::serve::{FileBody, FileResponse, HeaderBuilder};
use crate::server::{FileRequest, FileServer};

/// A responder that may fully answer an HTTP error condition.
///
/// Responders are consulted in registration order; the first to return a
/// response stops the chain. Returning `None` passes the error on. When
/// every responder declines, the server renders its builtin fallback
/// template.
#[async_trait]
pub trait ErrorResponder: Send + Sync {
    async fn respond(
        &self,
        request: &FileRequest,
        server: &FileServer,
        code: StatusCode,
    ) -> Option<FileResponse>;
}

pub(crate) fn html_response(status: StatusCode, html: String) -> FileResponse {
    let mut headers = HeaderBuilder::default();
    headers.content_type("text/html; charset=utf-8");
    headers.content_length(&html.len().to_string());

    FileResponse {
        status,
        headers: headers.build(),
        body: FileBody::Bytes(Bytes::from(html)),
    }
}
