//! Response casting.
//!
//! Each endpoint declares the shape of its successful response as a type implementing
//! [`CastTarget`]. [`cast`] checks the status first: anything at or above 400 becomes
//! [`Error::Api`] without looking at the target. Successful bodies are then handled by
//! the target's [`ResultKind`]:
//!
//! - [`ResultKind::Json`]: parsed and validated field by field; the first mismatch is
//!   reported as [`Error::SchemaValidation`] with its path (`$.results[0].id`).
//! - [`ResultKind::Empty`]: the body is ignored and never parsed.
//! - [`ResultKind::Binary`]: the body is returned untouched as a [`BinaryResponse`].
//! - [`ResultKind::Text`]: the body is decoded as UTF-8.

use crate::error::{Error, Result};
use crate::transport::ResponseEnvelope;
use bytes::Bytes;
use reqwest::header::HeaderMap;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde_path_to_error::Segment;
use std::path::Path;

/// How a successful body is turned into the declared result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResultKind {
    /// Parse and validate JSON
    Json,
    /// Expect no meaningful body
    Empty,
    /// Hand back the raw bytes
    Binary,
    /// Decode as UTF-8 text
    Text,
}

/// A payload type that can be deserialized from a JSON response body.
///
/// Implemented by every response model. Lists, options and raw JSON values of models
/// are models too.
pub trait Model: DeserializeOwned {}

impl<T: Model> Model for Vec<T> {}
impl<T: Model> Model for Option<T> {}
impl Model for bool {}
impl Model for serde_json::Value {}

/// The declared result of an endpoint.
pub trait CastTarget: Sized {
    /// How the body is handled.
    const KIND: ResultKind;

    /// Convert a successful response.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SchemaValidation`] if the body does not have the declared shape.
    fn from_success(envelope: ResponseEnvelope) -> Result<Self>;
}

impl<T: Model> CastTarget for T {
    const KIND: ResultKind = ResultKind::Json;

    fn from_success(envelope: ResponseEnvelope) -> Result<Self> {
        decode_json(&envelope.body)
    }
}

impl CastTarget for () {
    const KIND: ResultKind = ResultKind::Empty;

    fn from_success(_envelope: ResponseEnvelope) -> Result<Self> {
        Ok(())
    }
}

impl CastTarget for String {
    const KIND: ResultKind = ResultKind::Text;

    fn from_success(envelope: ResponseEnvelope) -> Result<Self> {
        String::from_utf8(envelope.body.to_vec())
            .map_err(|err| Error::schema("$", format!("response is not valid UTF-8: {err}")))
    }
}

/// Undecoded response content, for downloads such as generated archives.
#[derive(Debug, Clone, PartialEq)]
pub struct BinaryResponse {
    status: StatusCode,
    headers: HeaderMap,
    content: Bytes,
}

impl BinaryResponse {
    /// HTTP status of the response.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        self.status
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    /// Value of a header, if present and valid text.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|value| value.to_str().ok())
    }

    /// Raw content.
    #[must_use]
    pub const fn content(&self) -> &Bytes {
        &self.content
    }

    /// Take the raw content.
    #[must_use]
    pub fn into_content(self) -> Bytes {
        self.content
    }

    /// Content length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.content.len()
    }

    /// Returns true if the response had no content.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    /// Write the content to `path`, replacing any existing file.
    ///
    /// # Errors
    ///
    /// Returns the underlying I/O error if the file cannot be written.
    pub fn write_to(&self, path: impl AsRef<Path>) -> std::io::Result<()> {
        std::fs::write(path, &self.content)
    }
}

impl CastTarget for BinaryResponse {
    const KIND: ResultKind = ResultKind::Binary;

    fn from_success(envelope: ResponseEnvelope) -> Result<Self> {
        Ok(Self {
            status: envelope.status,
            headers: envelope.headers,
            content: envelope.body,
        })
    }
}

/// Convert a raw response into the declared result.
///
/// # Errors
///
/// Returns [`Error::Api`] for status codes of 400 and above, and
/// [`Error::SchemaValidation`] when a successful body does not match `T`.
pub fn cast<T: CastTarget>(envelope: ResponseEnvelope) -> Result<T> {
    if envelope.status.as_u16() >= 400 {
        return Err(Error::api(envelope.status, &envelope.body));
    }
    T::from_success(envelope)
}

fn decode_json<T: DeserializeOwned>(body: &[u8]) -> Result<T> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Err(Error::schema("$", "expected a JSON body, got an empty response"));
    }

    let mut deserializer = serde_json::Deserializer::from_slice(body);
    let value = serde_path_to_error::deserialize(&mut deserializer).map_err(|err| {
        let path = json_path(err.path());
        Error::schema(path, err.into_inner().to_string())
    })?;
    deserializer
        .end()
        .map_err(|err| Error::schema("$", err.to_string()))?;
    Ok(value)
}

fn json_path(path: &serde_path_to_error::Path) -> String {
    let mut rendered = String::from("$");
    for segment in path.iter() {
        match segment {
            Segment::Seq { index } => rendered.push_str(&format!("[{index}]")),
            other => rendered.push_str(&format!(".{other}")),
        }
    }
    rendered
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    #[serde(rename_all = "lowercase")]
    enum Language {
        Go,
        Rust,
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Generation {
        id: String,
        language: Language,
    }

    impl Model for Generation {}

    #[derive(Debug, Deserialize, PartialEq)]
    struct Page {
        results: Vec<Generation>,
    }

    impl Model for Page {}

    #[derive(Debug, Deserialize, PartialEq)]
    struct Node {
        slug: String,
        #[serde(default)]
        children: Vec<Node>,
    }

    impl Model for Node {}

    fn ok(body: &'static str) -> ResponseEnvelope {
        ResponseEnvelope::new(StatusCode::OK, body)
    }

    #[test]
    fn no_content_against_empty_target_is_unit() {
        let envelope = ResponseEnvelope::new(StatusCode::NO_CONTENT, Bytes::new());
        cast::<()>(envelope).unwrap();
    }

    #[test]
    fn no_content_against_model_is_a_schema_error() {
        let envelope = ResponseEnvelope::new(StatusCode::NO_CONTENT, Bytes::new());
        let err = cast::<Generation>(envelope).unwrap_err();
        assert_eq!(err, Error::schema("$", "expected a JSON body, got an empty response"));
    }

    #[test]
    fn empty_target_never_parses_the_body() {
        cast::<()>(ok("not json at all")).unwrap();
    }

    #[test]
    fn error_status_wins_over_every_target() {
        let envelope = ResponseEnvelope::new(StatusCode::NOT_FOUND, r#"{"message":"gone"}"#);
        let err = cast::<()>(envelope).unwrap_err();
        assert!(err.is_not_found());
        let Error::Api { detail, .. } = err else {
            panic!("expected api error");
        };
        assert_eq!(detail.unwrap().message.as_deref(), Some("gone"));

        let envelope = ResponseEnvelope::new(StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let err = cast::<BinaryResponse>(envelope).unwrap_err();
        assert_eq!(err.status(), Some(StatusCode::INTERNAL_SERVER_ERROR));
    }

    #[test]
    fn model_is_decoded() {
        let generation: Generation = cast(ok(r#"{"id": "g1", "language": "rust"}"#)).unwrap();
        assert_eq!(generation.language, Language::Rust);
    }

    #[test]
    fn list_of_models_is_decoded() {
        let generations: Vec<Generation> = cast(ok(
            r#"[{"id": "g1", "language": "go"}, {"id": "g2", "language": "rust"}]"#,
        ))
        .unwrap();
        assert_eq!(generations.len(), 2);
    }

    #[test]
    fn mismatch_reports_the_nested_path() {
        let err = cast::<Page>(ok(r#"{"results": [{"id": 3, "language": "go"}]}"#)).unwrap_err();
        let Error::SchemaValidation { path, .. } = err else {
            panic!("expected schema error");
        };
        assert_eq!(path, "$.results[0].id");
    }

    #[test]
    fn top_level_list_paths_start_at_an_index() {
        let err = cast::<Vec<Generation>>(ok(r#"[{"id": "g1", "language": 1}]"#)).unwrap_err();
        let Error::SchemaValidation { path, .. } = err else {
            panic!("expected schema error");
        };
        assert_eq!(path, "$[0].language");
    }

    #[test]
    fn unknown_enum_value_is_rejected() {
        let err = cast::<Generation>(ok(r#"{"id": "g1", "language": "cobol"}"#)).unwrap_err();
        let Error::SchemaValidation { path, message } = err else {
            panic!("expected schema error");
        };
        assert_eq!(path, "$.language");
        assert!(message.contains("cobol"));
    }

    #[test]
    fn missing_field_points_at_the_enclosing_record() {
        let err = cast::<Page>(ok(r#"{"results": [{"language": "go"}]}"#)).unwrap_err();
        let Error::SchemaValidation { path, message } = err else {
            panic!("expected schema error");
        };
        assert_eq!(path, "$.results[0]");
        assert!(message.contains("missing field `id`"));
    }

    #[test]
    fn recursive_trees_are_validated_at_depth() {
        let tree: Node = cast(ok(
            r#"{"slug": "root", "children": [{"slug": "a", "children": [{"slug": "b"}]}]}"#,
        ))
        .unwrap();
        assert_eq!(tree.children[0].children[0].slug, "b");

        let err = cast::<Node>(ok(r#"{"slug": "root", "children": [{"children": []}]}"#))
            .unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { ref path, .. } if path == "$.children[0]"));
    }

    #[test]
    fn trailing_garbage_is_rejected() {
        let err = cast::<Generation>(ok(r#"{"id": "g1", "language": "go"} extra"#)).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { .. }));
    }

    #[test]
    fn binary_target_keeps_raw_bytes() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", "application/gzip".parse().unwrap());
        let envelope = ResponseEnvelope::new(StatusCode::CREATED, vec![0x1f_u8, 0x8b, 0x08])
            .with_headers(headers);

        let binary: BinaryResponse = cast(envelope).unwrap();
        assert_eq!(binary.status(), StatusCode::CREATED);
        assert_eq!(binary.content(), &Bytes::from_static(&[0x1f, 0x8b, 0x08]));
        assert_eq!(binary.header("content-type"), Some("application/gzip"));
        assert_eq!(binary.len(), 3);
    }

    #[test]
    fn text_target_decodes_utf8() {
        let patch: String = cast(ok("diff --git a/x b/x\n")).unwrap();
        assert!(patch.starts_with("diff --git"));

        let envelope = ResponseEnvelope::new(StatusCode::OK, vec![0xff_u8, 0xfe]);
        let err = cast::<String>(envelope).unwrap_err();
        assert!(matches!(err, Error::SchemaValidation { ref path, .. } if path == "$"));
    }

    #[test]
    fn result_kinds_follow_the_target_type() {
        assert_eq!(<Generation as CastTarget>::KIND, ResultKind::Json);
        assert_eq!(<Vec<Generation> as CastTarget>::KIND, ResultKind::Json);
        assert_eq!(<() as CastTarget>::KIND, ResultKind::Empty);
        assert_eq!(<BinaryResponse as CastTarget>::KIND, ResultKind::Binary);
        assert_eq!(<String as CastTarget>::KIND, ResultKind::Text);
    }
}
