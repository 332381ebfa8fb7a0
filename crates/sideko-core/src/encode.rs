//! Request body encoding.
//!
//! Bodies are plain `Serialize` types whose serde attributes carry the wire names.
//! JSON bodies go through [`to_json`]. Multipart bodies implement [`MultipartForm`]:
//! their file fields are marked `#[serde(skip)]` and handed over separately through
//! [`MultipartForm::file_parts`], and every other field becomes a text part.

use crate::error::{Error, Result};
use crate::query::scalar_text;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;

/// Serialize a body to JSON, reporting failures as [`Error::Encoding`].
///
/// # Errors
///
/// Returns [`Error::Encoding`] if serialization fails.
pub fn to_json<T>(value: &T) -> Result<Value>
where
    T: Serialize + ?Sized,
{
    serde_json::to_value(value).map_err(|err| Error::Encoding(err.to_string()))
}

/// Resolve an untyped payload into one variant of a tagged union.
///
/// The variant is picked by its discriminant field alone; a payload matching no
/// variant is rejected before anything is sent.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the payload satisfies none of the variants of `T`.
pub fn resolve_variant<T>(raw: Value) -> Result<T>
where
    T: DeserializeOwned,
{
    serde_json::from_value(raw).map_err(|err| {
        Error::Encoding(format!(
            "value matches no variant of `{}`: {err}",
            std::any::type_name::<T>()
        ))
    })
}

/// Binary content uploaded as one multipart part.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    content: Bytes,
    filename: Option<String>,
    content_type: Option<String>,
}

impl FileUpload {
    /// Wrap in-memory content.
    #[must_use]
    pub fn new(content: impl Into<Bytes>) -> Self {
        Self {
            content: content.into(),
            filename: None,
            content_type: None,
        }
    }

    /// Read a file from disk, using its file name for the part.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`] if the file cannot be read.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read(path).map_err(|err| {
            Error::Encoding(format!("cannot read upload `{}`: {err}", path.display()))
        })?;
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned());
        Ok(Self {
            content: Bytes::from(content),
            filename,
            content_type: None,
        })
    }

    /// Set the file name sent with the part.
    #[must_use]
    pub fn with_filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    /// Set an explicit MIME type. Without one, the transport decides.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// File content.
    #[must_use]
    pub const fn content(&self) -> &Bytes {
        &self.content
    }

    /// Optional file name.
    #[must_use]
    pub fn filename(&self) -> Option<&str> {
        self.filename.as_deref()
    }

    /// Optional MIME type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.content_type.as_deref()
    }
}

/// A file bound to a form field name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilePart {
    /// Form field name
    pub field: String,
    /// Uploaded content
    pub file: FileUpload,
}

impl FilePart {
    /// Bind `file` to `field`.
    #[must_use]
    pub fn new(field: impl Into<String>, file: FileUpload) -> Self {
        Self {
            field: field.into(),
            file,
        }
    }
}

/// A body sent as `multipart/form-data`.
pub trait MultipartForm: Serialize {
    /// The file fields of this body. Fields returned here must be skipped by serde.
    fn file_parts(&self) -> Vec<FilePart>;
}

/// Encoded multipart body: text fields plus file parts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MultipartBody {
    /// Text fields, in field declaration order
    pub fields: Vec<(String, String)>,
    /// File parts, in declaration order
    pub files: Vec<FilePart>,
}

impl MultipartBody {
    /// Append a text field, exploding lists into repeated fields and dropping nulls.
    pub fn push_value(&mut self, name: &str, value: Value) {
        match value {
            Value::Array(items) => {
                for item in items {
                    if let Some(text) = scalar_text(item) {
                        self.fields.push((name.to_string(), text));
                    }
                }
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    self.fields.push((name.to_string(), text));
                }
            }
        }
    }
}

/// Encode a multipart body.
///
/// # Errors
///
/// Returns [`Error::Encoding`] if the body does not serialize to an object.
pub fn encode_multipart<T>(form: &T) -> Result<MultipartBody>
where
    T: MultipartForm,
{
    let Value::Object(properties) = to_json(form)? else {
        return Err(Error::Encoding(
            "multipart body must serialize to an object".to_string(),
        ));
    };

    let mut body = MultipartBody {
        fields: Vec::new(),
        files: form.file_parts(),
    };
    for (name, value) in properties {
        if body.files.iter().any(|part| part.field == name) {
            continue;
        }
        body.push_value(&name, value);
    }
    Ok(body)
}
