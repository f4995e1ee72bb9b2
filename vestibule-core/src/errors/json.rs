use async_trait::async_trait;
use http::{StatusCode, header};
use serde::Serialize;

use crate::errors::{ErrorResponder, reason_phrase};
use crate::serve::{FileBody, FileResponse, HeaderBuilder};
use crate::server::{FileRequest, FileServer};

#[derive(Serialize)]
struct JsonError {
    code: u16,
    message: &'static str,
}

/// Answers with a JSON body when the Accept header asks for JSON.
///
/// The check is a plain substring match, so `application/json`,
/// `text/json` and vendor types all qualify.
pub struct JsonErrorResponder;

#[async_trait]
impl ErrorResponder for JsonErrorResponder {
    async fn respond(
        &self,
        request: &FileRequest,
        _server: &FileServer,
        code: StatusCode,
    ) -> Option<FileResponse> {
        let accept = request.headers.get(header::ACCEPT)?.to_str().ok()?;

        if !accept.contains("json") {
            return None;
        }

        let body = serde_json::to_vec(&JsonError {
            code: code.as_u16(),
            message: reason_phrase(code),
        })
        .ok()?;

        let mut headers = HeaderBuilder::default();
        headers.content_type("application/json; charset=utf-8");
        headers.content_length(&body.len().to_string());

        Some(FileResponse {
            status: code,
            headers: headers.build(),
            body: FileBody::Bytes(body.into()),
        })
    }
}
