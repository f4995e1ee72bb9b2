use std::sync::Arc;

use async_trait::async_trait;
use pingora::prelude::*;
use pingora::{Custom, Error};

use vestibule_core::server::write_response;
use vestibule_core::{FileRequest, FileServer};

/// Static-only gateway: request_filter answers every request, so the
/// upstream phases never run.
pub struct VestibuleGateway {
    pub files: Arc<FileServer>,
}

#[async_trait]
impl ProxyHttp for VestibuleGateway {
    type CTX = ();

    fn new_ctx(&self) -> Self::CTX {}

    /// Unreachable: there is no upstream to proxy to.
    async fn upstream_peer(
        &self,
        _session: &mut Session,
        _ctx: &mut Self::CTX,
    ) -> Result<Box<HttpPeer>> {
        Err(Error::new(Custom("vestibule serves no upstream")))
    }

    async fn request_filter(&self, session: &mut Session, _ctx: &mut Self::CTX) -> Result<bool> {
        let req = session.req_header();

        let request = FileRequest {
            method: req.method.clone(),
            path: req.uri.path().to_string(),
            headers: req.headers.clone(),
        };

        let response = self.files.handle(&request).await;

        tracing::debug!(
            method = %request.method,
            path = %request.path,
            status = %response.status,
            "request served"
        );

        write_response(session, response).await?;

        Ok(true)
    }
}
