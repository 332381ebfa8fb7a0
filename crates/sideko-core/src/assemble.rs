//! Request assembly.
//!
//! Combines a [`RequestSpec`] with the client's base URL, auth registry and default
//! options into a [`PreparedRequest`] that a transport can send without further
//! decisions.

use crate::auth::AuthRegistry;
use crate::error::{Error, Result};
use crate::request::{RequestBody, RequestOptions, RequestSpec};
use reqwest::header::{HeaderName, HeaderValue};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;
use url::Url;

/// A fully resolved wire request.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    /// HTTP method
    pub method: Method,
    /// Absolute URL, query string included
    pub url: Url,
    /// Headers in send order; cookies are folded into one `Cookie` header
    pub headers: Vec<(String, String)>,
    /// Encoded body
    pub body: RequestBody,
    /// Round-trip timeout
    pub timeout: Option<Duration>,
}

impl PreparedRequest {
    /// First header named `name`, compared case-insensitively.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Build the wire request for `spec`.
///
/// # Errors
///
/// Returns [`Error::Encoding`] for unusable path parameters, header names or values
/// that cannot go on the wire, or body parameters that cannot be merged, and
/// [`Error::InvalidEndpoint`] if the base URL cannot take a path.
pub fn assemble(
    base_url: &Url,
    auth: &AuthRegistry,
    defaults: &RequestOptions,
    spec: RequestSpec,
) -> Result<PreparedRequest> {
    let (method, path, query, body, auth_names, options) = spec.into_parts();
    let options = options.merged_over(defaults);
    let credentials = auth.apply(&auth_names);

    let mut url = base_url.clone();
    {
        let segments = path.segments()?;
        let mut url_path = url.path_segments_mut().map_err(|()| {
            Error::InvalidEndpoint(format!("base URL `{base_url}` cannot carry a path"))
        })?;
        url_path.pop_if_empty().extend(segments.iter());
    }

    let mut query_pairs = query.into_pairs();
    query_pairs.extend(credentials.query);
    if let Some(extra) = options.additional_query_params {
        query_pairs.extend(extra);
    }
    if !query_pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(query_pairs.iter());
    }

    let mut headers = credentials.headers;
    if !credentials.cookies.is_empty() {
        let cookie = credentials
            .cookies
            .iter()
            .map(|(name, value)| format!("{name}={value}"))
            .collect::<Vec<_>>()
            .join("; ");
        headers.push(("Cookie".to_string(), cookie));
    }
    if let Some(extra) = options.additional_headers {
        for (name, value) in extra {
            headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
            headers.push((name, value));
        }
    }

    for (name, value) in &headers {
        validate_header(name, value)?;
    }

    let body = match options.additional_body_params {
        Some(extra) if !extra.is_empty() => merge_body_params(body, extra)?,
        _ => body,
    };

    Ok(PreparedRequest {
        method,
        url,
        headers,
        body,
        timeout: options.timeout,
    })
}

fn validate_header(name: &str, value: &str) -> Result<()> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|err| Error::Encoding(format!("invalid header name `{name}`: {err}")))?;
    // The value may be a credential, so it is never echoed.
    HeaderValue::from_str(value)
        .map_err(|err| Error::Encoding(format!("invalid value for header `{name}`: {err}")))?;
    Ok(())
}

// Requests without a body stay bodiless.
fn merge_body_params(
    body: RequestBody,
    extra: serde_json::Map<String, Value>,
) -> Result<RequestBody> {
    match body {
        RequestBody::Empty => Ok(RequestBody::Empty),
        RequestBody::Json(Value::Object(mut fields)) => {
            fields.extend(extra);
            Ok(RequestBody::Json(Value::Object(fields)))
        }
        RequestBody::Json(_) => Err(Error::Encoding(
            "additional body params require a JSON object body".to_string(),
        )),
        RequestBody::Multipart(mut form) => {
            for (name, value) in extra {
                form.fields.retain(|(existing, _)| *existing != name);
                form.push_value(&name, value);
            }
            Ok(RequestBody::Multipart(form))
        }
    }
}
