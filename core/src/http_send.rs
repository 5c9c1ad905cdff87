use crate::Result;
use bytes::Bytes;
use log::debug;
use std::fmt::Debug;
use std::sync::Arc;

/// HttpSend is the single capability a transport stage exposes: send an
/// outbound http request and return its response.
///
/// Stages compose by wrapping each other, each stage exclusively owning the
/// reference to the next one. The chain is built once at setup time in a
/// fixed, caller-determined order; stages installed outside the auth stage
/// observe the already-signed request.
#[async_trait::async_trait]
pub trait HttpSend: Debug + Send + Sync + 'static {
    /// Send http request and return the response.
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>>;
}

/// LoggingHttpSend is a transport stage that logs every request it forwards.
///
/// It logs method, uri and header names at debug level, then delegates to the
/// wrapped stage untouched. Header values are deliberately not logged; they
/// may carry signatures and session tokens.
#[derive(Debug)]
pub struct LoggingHttpSend {
    next: Arc<dyn HttpSend>,
}

impl LoggingHttpSend {
    /// Wrap the next transport stage with request logging.
    pub fn new(next: Arc<dyn HttpSend>) -> Self {
        Self { next }
    }
}

#[async_trait::async_trait]
impl HttpSend for LoggingHttpSend {
    async fn http_send(&self, req: http::Request<Bytes>) -> Result<http::Response<Bytes>> {
        debug!(
            "sending request: {} {} (headers: {:?})",
            req.method(),
            req.uri(),
            req.headers().keys().collect::<Vec<_>>()
        );

        let resp = self.next.http_send(req).await?;
        debug!("received response: {}", resp.status());
        Ok(resp)
    }
}
