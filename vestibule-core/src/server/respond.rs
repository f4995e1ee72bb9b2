use bytes::{Bytes, BytesMut};
use http::Method;
use pingora::prelude::Session;
use pingora::{Custom, Error};
use pingora_http::ResponseHeader;
use tokio::io::AsyncReadExt;

use crate::serve::{FileBody, FileResponse};

const CHUNK_SIZE: usize = 32 * 1024;

/// Writes a pipeline response to the client session.
///
/// HEAD requests receive headers only. File bodies stream in fixed-size
/// chunks; in-memory bodies go out in one write.
pub async fn write_response(session: &mut Session, response: FileResponse) -> pingora::Result<()> {
    let mut header = ResponseHeader::build(response.status, None)?;

    for (name, value) in response.headers.iter() {
        header.insert_header(name, value)?;
    }

    // Headers first; the body decides end-of-stream.
    session.write_response_header(Box::new(header), false).await?;

    if session.req_header().method == Method::HEAD {
        session.write_response_body(None, true).await?;
        return Ok(());
    }

    match response.body {
        FileBody::Empty => {
            session.write_response_body(None, true).await?;
        }

        FileBody::Bytes(bytes) => {
            session.write_response_body(Some(bytes), true).await?;
        }

        FileBody::File(mut file) => {
            // Allocate once per request.
            let mut buf = BytesMut::with_capacity(CHUNK_SIZE);

            loop {
                buf.resize(CHUNK_SIZE, 0);

                let n = file
                    .read(&mut buf[..])
                    .await
                    .map_err(|_| Error::new(Custom("file read error while streaming")))?;

                if n == 0 {
                    break;
                }

                buf.truncate(n);

                let chunk: Bytes = buf.split().freeze();
                session.write_response_body(Some(chunk), false).await?;
            }

            session.write_response_body(None, true).await?;
        }

        FileBody::RangedFile {
            mut file,
            mut remaining,
        } => {
            let mut buf = BytesMut::with_capacity(CHUNK_SIZE);

            while remaining > 0 {
                let to_read = std::cmp::min(CHUNK_SIZE as u64, remaining) as usize;

                buf.resize(to_read, 0);

                let n = file
                    .read(&mut buf[..])
                    .await
                    .map_err(|_| Error::new(Custom("file read error while streaming")))?;

                if n == 0 {
                    break;
                }

                remaining -= n as u64;
                buf.truncate(n);

                session
                    .write_response_body(Some(buf.split().freeze()), false)
                    .await?;
            }

            session.write_response_body(None, true).await?;
        }
    }

    Ok(())
}
