//! The wire exchange behind [`crate::VeSyncClient`].
//!
//! [`Transport`] sends one fully assembled [`HttpRequest`] and hands back the
//! status, content type and body bytes. Everything VeSync specific (URL
//! layout, headers, status handling, decoding) stays in the client so a
//! transport can be swapped for a test double.

use std::io::Read;
use std::time::{Duration, Instant};

use reqwest::blocking::{Client, Response};
use reqwest::header::{HeaderMap, CONTENT_TYPE};
use reqwest::Method;

use crate::config::ClientConfig;
use crate::decode::MAX_BODY_SIZE;
use crate::error::{Result, VeSyncError};

#[derive(Debug, Clone)]
pub struct HttpRequest {
    pub method: Method,
    pub url: String,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

/// A response whose body has been read completely. The body holds at most
/// `MAX_BODY_SIZE + 1` bytes so the decoder can tell an oversized body apart.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: Vec<u8>,
}

pub trait Transport {
    /// Sends `request` and reads the response body. Failures to reach the
    /// server or to receive the body are transport errors.
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse>;
}

/// Blocking reqwest client. The configured timeout is a deadline for the
/// whole exchange, body included.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    timeout: Duration,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(VeSyncError::ClientBuild)?;
        Ok(ReqwestTransport {
            client,
            timeout: config.timeout,
        })
    }

    /// Reads the body chunk by chunk, checking the deadline between reads.
    /// A single stalled read is cut off by the client timeout.
    fn read_body(&self, mut response: Response, deadline: Instant) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        let mut chunk = [0u8; 8192];
        loop {
            if Instant::now() >= deadline {
                return Err(VeSyncError::Timeout {
                    timeout: self.timeout,
                });
            }
            let n = response.read(&mut chunk).map_err(body_error)?;
            if n == 0 {
                break;
            }
            body.extend_from_slice(&chunk[..n]);
            if body.len() as u64 > MAX_BODY_SIZE {
                break;
            }
        }
        Ok(body)
    }
}

/// reqwest wraps its own error into the `io::Error` a body read returns.
fn body_error(err: std::io::Error) -> VeSyncError {
    let kind = err.kind();
    match err.into_inner() {
        Some(inner) => match inner.downcast::<reqwest::Error>() {
            Ok(source) => VeSyncError::transport(*source),
            Err(inner) => VeSyncError::BodyRead(std::io::Error::new(kind, inner)),
        },
        None => VeSyncError::BodyRead(kind.into()),
    }
}

impl Transport for ReqwestTransport {
    fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
        let deadline = Instant::now() + self.timeout;
        let response = self
            .client
            .request(request.method, &request.url)
            .headers(request.headers)
            .body(request.body)
            .send()
            .map_err(VeSyncError::transport)?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = self.read_body(response, deadline)?;
        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}


#[cfg(test)]
pub(crate) mod stub {
    use std::cell::RefCell;

    use super::*;

    /// Records every request and answers with a canned response.
    pub(crate) struct StubTransport {
        pub(crate) requests: RefCell<Vec<HttpRequest>>,
        status: u16,
        content_type: Option<String>,
        body: String,
    }

    impl StubTransport {
        pub(crate) fn json(status: u16, body: impl ToString) -> Self {
            StubTransport {
                requests: RefCell::new(Vec::new()),
                status,
                content_type: Some("application/json".to_string()),
                body: body.to_string(),
            }
        }

        pub(crate) fn with_content_type(mut self, content_type: &str) -> Self {
            self.content_type = Some(content_type.to_string());
            self
        }

        pub(crate) fn calls(&self) -> usize {
            self.requests.borrow().len()
        }
    }

    impl Transport for StubTransport {
        fn execute(&self, request: HttpRequest) -> Result<HttpResponse> {
            self.requests.borrow_mut().push(request);
            Ok(HttpResponse {
                status: self.status,
                content_type: self.content_type.clone(),
                body: self.body.clone().into_bytes(),
            })
        }
    }
}
