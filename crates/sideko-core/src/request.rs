//! Per-call request description.
//!
//! Endpoint methods describe a call as a [`RequestSpec`]: verb, path template with its
//! parameters, encoded query and body, accepted auth schemes and caller options. The
//! spec is turned into a wire request by [`assemble`](crate::assemble::assemble) and
//! discarded after the call.

use crate::encode::{encode_multipart, to_json, MultipartBody, MultipartForm};
use crate::error::{Error, Result};
use crate::query::QueryParams;
use reqwest::Method;
use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Caller-supplied per-request overrides.
///
/// Merged over the client's defaults one field at a time: a timeout set here replaces
/// the default timeout, while header, query and body maps are combined with the
/// defaults, keys set here winning.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestOptions {
    /// Timeout for the whole round trip
    pub timeout: Option<Duration>,
    /// Extra headers
    pub additional_headers: Option<BTreeMap<String, String>>,
    /// Extra query parameters
    pub additional_query_params: Option<BTreeMap<String, String>>,
    /// Extra body fields, merged into JSON objects and multipart forms; requests
    /// without a body ignore them
    pub additional_body_params: Option<Map<String, Value>>,
}

impl RequestOptions {
    /// Create empty options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Add a header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_headers
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a query parameter.
    #[must_use]
    pub fn with_query_param(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_query_params
            .get_or_insert_with(BTreeMap::new)
            .insert(name.into(), value.into());
        self
    }

    /// Add a body field.
    #[must_use]
    pub fn with_body_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.additional_body_params
            .get_or_insert_with(Map::new)
            .insert(name.into(), value.into());
        self
    }

    /// Merge these options over `defaults`, field by field.
    #[must_use]
    pub fn merged_over(&self, defaults: &Self) -> Self {
        Self {
            timeout: self.timeout.or(defaults.timeout),
            additional_headers: merge_maps(
                defaults.additional_headers.as_ref(),
                self.additional_headers.as_ref(),
            ),
            additional_query_params: merge_maps(
                defaults.additional_query_params.as_ref(),
                self.additional_query_params.as_ref(),
            ),
            additional_body_params: merge_maps(
                defaults.additional_body_params.as_ref(),
                self.additional_body_params.as_ref(),
            ),
        }
    }
}

fn merge_maps<M>(base: Option<&M>, overlay: Option<&M>) -> Option<M>
where
    M: Clone + Default + IntoIterator + Extend<<M as IntoIterator>::Item>,
{
    match (base, overlay) {
        (None, None) => None,
        (base, overlay) => {
            let mut merged = base.cloned().unwrap_or_default();
            if let Some(overlay) = overlay {
                merged.extend(overlay.clone());
            }
            Some(merged)
        }
    }
}

/// A path template such as `/api_link/{id}` plus the values for its placeholders.
///
/// Templates are static strings owned by the endpoint definition. Values are
/// substituted per segment and percent-encoded individually at assembly time, so a
/// value containing `/` stays inside its segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathTemplate {
    template: &'static str,
    params: Vec<(&'static str, String)>,
}

impl PathTemplate {
    /// Create a template.
    #[must_use]
    pub const fn new(template: &'static str) -> Self {
        Self {
            template,
            params: Vec::new(),
        }
    }

    /// Bind a placeholder value.
    #[must_use]
    pub fn param(mut self, name: &'static str, value: impl fmt::Display) -> Self {
        self.params.push((name, value.to_string()));
        self
    }

    /// The raw template string.
    #[must_use]
    pub const fn template(&self) -> &'static str {
        self.template
    }

    /// Substitute every placeholder and return the unencoded path segments.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if a placeholder has no bound value, a template
    /// brace is left open, or a bound value cannot stand as its own segment: empty,
    /// `.`/`..`, or containing tabs or line breaks the URL parser would strip.
    pub fn segments(&self) -> Result<Vec<String>> {
        self.template
            .split('/')
            .filter(|segment| !segment.is_empty())
            .map(|segment| {
                let rendered = self.render_segment(segment)?;
                // URL paths collapse dot segments, even when percent-encoded.
                if segment.contains('{') && matches!(rendered.as_str(), "." | "..") {
                    return Err(Error::Encoding(format!(
                        "path segment `{rendered}` for `{}` would be resolved away",
                        self.template
                    )));
                }
                Ok(rendered)
            })
            .collect()
    }

    fn render_segment(&self, segment: &str) -> Result<String> {
        let mut rendered = String::with_capacity(segment.len());
        let mut rest = segment;
        while let Some(start) = rest.find('{') {
            rendered.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| {
                Error::Encoding(format!("unterminated placeholder in `{}`", self.template))
            })?;
            let name = &after[..end];
            let value = self
                .params
                .iter()
                .find(|(param, _)| *param == name)
                .map(|(_, value)| value)
                .ok_or_else(|| {
                    Error::Encoding(format!(
                        "missing path parameter `{name}` for `{}`",
                        self.template
                    ))
                })?;
            if value.is_empty() {
                return Err(Error::Encoding(format!(
                    "path parameter `{name}` for `{}` is empty",
                    self.template
                )));
            }
            if value.contains(['\t', '\n', '\r']) {
                return Err(Error::Encoding(format!(
                    "path parameter `{name}` for `{}` contains a tab or line break",
                    self.template
                )));
            }
            rendered.push_str(value);
            rest = &after[end + 1..];
        }
        rendered.push_str(rest);
        Ok(rendered)
    }
}

/// Encoded request body.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum RequestBody {
    /// No body
    #[default]
    Empty,
    /// `application/json`
    Json(Value),
    /// `multipart/form-data`
    Multipart(MultipartBody),
}

/// Everything one endpoint call needs to become a wire request.
#[derive(Debug, Clone)]
pub struct RequestSpec {
    method: Method,
    path: PathTemplate,
    query: QueryParams,
    body: RequestBody,
    auth_names: Vec<&'static str>,
    options: RequestOptions,
}

impl RequestSpec {
    /// Create a spec with no query, body, auth or options.
    #[must_use]
    pub fn new(method: Method, path: PathTemplate) -> Self {
        Self {
            method,
            path,
            query: QueryParams::new(),
            body: RequestBody::Empty,
            auth_names: Vec::new(),
            options: RequestOptions::default(),
        }
    }

    /// `GET` request.
    #[must_use]
    pub fn get(path: PathTemplate) -> Self {
        Self::new(Method::GET, path)
    }

    /// `POST` request.
    #[must_use]
    pub fn post(path: PathTemplate) -> Self {
        Self::new(Method::POST, path)
    }

    /// `PUT` request.
    #[must_use]
    pub fn put(path: PathTemplate) -> Self {
        Self::new(Method::PUT, path)
    }

    /// `PATCH` request.
    #[must_use]
    pub fn patch(path: PathTemplate) -> Self {
        Self::new(Method::PATCH, path)
    }

    /// `DELETE` request.
    #[must_use]
    pub fn delete(path: PathTemplate) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Attach encoded query parameters.
    #[must_use]
    pub fn with_query(mut self, query: QueryParams) -> Self {
        self.query = query;
        self
    }

    /// Attach a JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the body cannot be serialized.
    pub fn with_json<T>(mut self, body: &T) -> Result<Self>
    where
        T: Serialize + ?Sized,
    {
        self.body = RequestBody::Json(to_json(body)?);
        Ok(self)
    }

    /// Attach a multipart body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the form cannot be serialized.
    pub fn with_multipart<T>(mut self, form: &T) -> Result<Self>
    where
        T: MultipartForm,
    {
        self.body = RequestBody::Multipart(encode_multipart(form)?);
        Ok(self)
    }

    /// Name the auth schemes this endpoint accepts, in preference order.
    #[must_use]
    pub fn with_auth(mut self, auth_names: &[&'static str]) -> Self {
        self.auth_names = auth_names.to_vec();
        self
    }

    /// Attach caller options; `None` keeps the client defaults.
    #[must_use]
    pub fn with_options(mut self, options: Option<RequestOptions>) -> Self {
        self.options = options.unwrap_or_default();
        self
    }

    /// HTTP method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }

    /// Path template.
    #[must_use]
    pub const fn path(&self) -> &PathTemplate {
        &self.path
    }

    /// Encoded query parameters.
    #[must_use]
    pub const fn query(&self) -> &QueryParams {
        &self.query
    }

    /// Encoded body.
    #[must_use]
    pub const fn body(&self) -> &RequestBody {
        &self.body
    }

    /// Accepted auth schemes.
    #[must_use]
    pub fn auth_names(&self) -> &[&'static str] {
        &self.auth_names
    }

    /// Caller options.
    #[must_use]
    pub const fn options(&self) -> &RequestOptions {
        &self.options
    }

    pub(crate) fn into_parts(
        self,
    ) -> (
        Method,
        PathTemplate,
        QueryParams,
        RequestBody,
        Vec<&'static str>,
        RequestOptions,
    ) {
        (
            self.method,
            self.path,
            self.query,
            self.body,
            self.auth_names,
            self.options,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn caller_timeout_overrides_default() {
        let defaults = RequestOptions::new().with_timeout(Duration::from_secs(60));
        let caller = RequestOptions::new().with_timeout(Duration::from_secs(5));
        let merged = caller.merged_over(&defaults);
        assert_eq!(merged.timeout, Some(Duration::from_secs(5)));

        let merged = RequestOptions::new().merged_over(&defaults);
        assert_eq!(merged.timeout, Some(Duration::from_secs(60)));
    }

    #[test]
    fn header_maps_merge_additively() {
        let defaults = RequestOptions::new()
            .with_header("x-trace", "default")
            .with_header("x-team", "docs");
        let caller = RequestOptions::new().with_header("x-trace", "caller");

        let headers = caller.merged_over(&defaults).additional_headers.unwrap();
        assert_eq!(headers.get("x-trace").map(String::as_str), Some("caller"));
        assert_eq!(headers.get("x-team").map(String::as_str), Some("docs"));

        let headers = RequestOptions::new()
            .merged_over(&defaults)
            .additional_headers
            .unwrap();
        assert_eq!(headers.len(), 2);
    }

    #[test]
    fn unset_maps_stay_unset() {
        let merged = RequestOptions::new().merged_over(&RequestOptions::new());
        assert_eq!(merged, RequestOptions::default());
    }

    #[test]
    fn body_params_merge() {
        let defaults = RequestOptions::new().with_body_param("source", "sdk");
        let caller = RequestOptions::new().with_body_param("dry_run", true);
        let body = caller.merged_over(&defaults).additional_body_params.unwrap();
        assert_eq!(Value::Object(body), json!({"source": "sdk", "dry_run": true}));
    }

    #[test]
    fn path_template_substitutes_segments() {
        let path = PathTemplate::new("/doc_project/{doc_name}/version/{doc_version}/guide")
            .param("doc_name", "my-project")
            .param("doc_version", 3);
        assert_eq!(
            path.segments().unwrap(),
            vec!["doc_project", "my-project", "version", "3", "guide"]
        );
    }

    #[test]
    fn path_template_keeps_reserved_characters_in_one_segment() {
        let path = PathTemplate::new("/organization/asset/{id}").param("id", "a/b c");
        assert_eq!(
            path.segments().unwrap(),
            vec!["organization", "asset", "a/b c"]
        );
    }

    #[test]
    fn missing_path_parameter_is_an_encoding_error() {
        let err = PathTemplate::new("/api_link/{id}").segments().unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn empty_path_parameter_is_an_encoding_error() {
        let err = PathTemplate::new("/api_link/{id}")
            .param("id", "")
            .segments()
            .unwrap_err();
        assert!(matches!(err, Error::Encoding(ref message) if message.contains("`id`")));
    }

    #[test]
    fn dot_segments_are_rejected() {
        for value in [".", ".."] {
            let err = PathTemplate::new("/doc_project/{doc_name}/guide")
                .param("doc_name", value)
                .segments()
                .unwrap_err();
            assert!(matches!(err, Error::Encoding(_)), "accepted `{value}`");
        }

        let path = PathTemplate::new("/doc_project/{doc_name}/guide").param("doc_name", "...");
        assert_eq!(path.segments().unwrap()[1], "...");
    }

    #[test]
    fn line_breaks_in_path_parameters_are_rejected() {
        let err = PathTemplate::new("/api_link/{id}")
            .param("id", "a\nb")
            .segments()
            .unwrap_err();
        assert!(matches!(err, Error::Encoding(_)));
    }

    #[test]
    fn json_body_keeps_explicit_null() {
        let spec = RequestSpec::patch(PathTemplate::new("/organization/asset/{id}"))
            .with_json(&json!({"name": null}))
            .unwrap();
        assert_eq!(spec.body(), &RequestBody::Json(json!({"name": null})));
    }
}
