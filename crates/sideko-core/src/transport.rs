//! Wire transports.
//!
//! A transport sends one [`PreparedRequest`] and returns one [`ResponseEnvelope`] or one
//! error. Connection pooling, redirects and TLS belong to the wrapped reqwest client;
//! nothing here retries.

use crate::assemble::PreparedRequest;
use crate::encode::FilePart;
use crate::error::{Error, Result};
use crate::request::RequestBody;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use tracing::debug;

/// Raw response as received from the server.
#[derive(Debug, Clone, PartialEq)]
pub struct ResponseEnvelope {
    /// HTTP status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Undecoded body
    pub body: Bytes,
}

impl ResponseEnvelope {
    /// Create an envelope with no headers.
    #[must_use]
    pub fn new(status: StatusCode, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.into(),
        }
    }

    /// Add headers.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

/// Transport used by the cooperative client.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AsyncTransport: Send + Sync {
    /// Send a request and wait for the complete response.
    async fn send(&self, request: PreparedRequest) -> Result<ResponseEnvelope>;
}

/// Transport used by the blocking client.
#[cfg_attr(test, mockall::automock)]
pub trait BlockingTransport: Send + Sync {
    /// Send a request, blocking the calling thread until the response is complete.
    fn send(&self, request: PreparedRequest) -> Result<ResponseEnvelope>;
}

/// [`AsyncTransport`] backed by [`reqwest::Client`].
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &reqwest::Client {
        &self.http
    }
}

#[async_trait]
impl AsyncTransport for ReqwestTransport {
    async fn send(&self, request: PreparedRequest) -> Result<ResponseEnvelope> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.http.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => {
                let mut multipart = reqwest::multipart::Form::new();
                for (name, value) in form.fields {
                    multipart = multipart.text(name, value);
                }
                for part in form.files {
                    let (field, part) = async_part(part)?;
                    multipart = multipart.part(field, part);
                }
                builder.multipart(multipart)
            }
        };

        let response = builder.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;
        debug!(status = %status, bytes = body.len(), "received response");

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
        })
    }
}

fn async_part(part: FilePart) -> Result<(String, reqwest::multipart::Part)> {
    let FilePart { field, file } = part;
    let mut built = reqwest::multipart::Part::bytes(file.content().to_vec());
    if let Some(filename) = file.filename() {
        built = built.file_name(filename.to_string());
    }
    if let Some(content_type) = file.content_type() {
        built = built
            .mime_str(content_type)
            .map_err(|err| invalid_mime(&field, &err))?;
    }
    Ok((field, built))
}

/// [`BlockingTransport`] backed by [`reqwest::blocking::Client`].
///
/// A blocking reqwest client owns its own runtime and must not be created or dropped
/// from inside an async context.
#[derive(Debug, Clone)]
pub struct BlockingReqwestTransport {
    http: reqwest::blocking::Client,
}

impl BlockingReqwestTransport {
    /// Wrap an existing client.
    #[must_use]
    pub const fn new(http: reqwest::blocking::Client) -> Self {
        Self { http }
    }

    /// Underlying HTTP client.
    #[must_use]
    pub const fn http(&self) -> &reqwest::blocking::Client {
        &self.http
    }
}

impl BlockingTransport for BlockingReqwestTransport {
    fn send(&self, request: PreparedRequest) -> Result<ResponseEnvelope> {
        debug!(method = %request.method, url = %request.url, "sending request");

        let mut builder = self.http.request(request.method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(timeout) = request.timeout {
            builder = builder.timeout(timeout);
        }
        builder = match request.body {
            RequestBody::Empty => builder,
            RequestBody::Json(value) => builder.json(&value),
            RequestBody::Multipart(form) => {
                let mut multipart = reqwest::blocking::multipart::Form::new();
                for (name, value) in form.fields {
                    multipart = multipart.text(name, value);
                }
                for part in form.files {
                    let (field, part) = blocking_part(part)?;
                    multipart = multipart.part(field, part);
                }
                builder.multipart(multipart)
            }
        };

        let response = builder.send()?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes()?;
        debug!(status = %status, bytes = body.len(), "received response");

        Ok(ResponseEnvelope {
            status,
            headers,
            body,
        })
    }
}

fn blocking_part(part: FilePart) -> Result<(String, reqwest::blocking::multipart::Part)> {
    let FilePart { field, file } = part;
    let mut built = reqwest::blocking::multipart::Part::bytes(file.content().to_vec());
    if let Some(filename) = file.filename() {
        built = built.file_name(filename.to_string());
    }
    if let Some(content_type) = file.content_type() {
        built = built
            .mime_str(content_type)
            .map_err(|err| invalid_mime(&field, &err))?;
    }
    Ok((field, built))
}

fn invalid_mime(field: &str, err: &reqwest::Error) -> Error {
    Error::Encoding(format!("invalid content type for file field `{field}`: {err}"))
}
