//! Request payloads and query parameters.
//!
//! Optional fields use [`OptionalValue`]: `NotGiven` fields never reach the wire, while
//! `Null` is sent as JSON `null` (and dropped from query strings and forms).

use crate::models::{PolicyKind, SdkLanguage};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sideko_core::{
    resolve_variant, FilePart, FileUpload, MultipartForm, OptionalValue, QueryParams, Result,
};
use uuid::Uuid;

/// Query parameters of the asset list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListAssetsParams {
    /// Filter by asset name.
    pub name: OptionalValue<String>,
    /// Page to fetch.
    pub page: OptionalValue<i64>,
}

impl ListAssetsParams {
    /// Encode into query pairs.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if a value cannot be serialized.
    pub fn to_query(&self) -> Result<QueryParams> {
        let mut query = QueryParams::new();
        query.push_opt("name", &self.name)?;
        query.push_opt("page", &self.page)?;
        Ok(query)
    }
}

/// Query parameters of the SDK list endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListSdksParams {
    /// Filter by API name or UUID.
    pub api_name: OptionalValue<String>,
    /// Filter by generation outcome.
    pub successful: OptionalValue<bool>,
}

impl ListSdksParams {
    /// Encode into query pairs.
    ///
    /// # Errors
    ///
    /// Returns an encoding error if a value cannot be serialized.
    pub fn to_query(&self) -> Result<QueryParams> {
        let mut query = QueryParams::new();
        query.push_opt("api_name", &self.api_name)?;
        query.push_opt("successful", &self.successful)?;
        Ok(query)
    }
}

/// Body of the asset update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateAsset {
    /// New asset name, without extension.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub name: OptionalValue<String>,
}

/// Body of the asset upload endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UploadAsset {
    /// File to upload.
    #[serde(skip)]
    pub file: FileUpload,
}

impl UploadAsset {
    /// Upload `file`.
    #[must_use]
    pub const fn new(file: FileUpload) -> Self {
        Self { file }
    }
}

impl MultipartForm for UploadAsset {
    fn file_parts(&self) -> Vec<FilePart> {
        vec![FilePart::new("file", self.file.clone())]
    }
}

/// Update policy of a new API link, discriminated by its `type` field.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ApiLinkPolicy {
    /// Track the latest version of the API.
    Latest {
        /// API identifier.
        api_id: String,
    },
    /// Stay on one version of the API.
    Pinned {
        /// API identifier.
        api_id: String,
        /// Pinned semantic version.
        api_version: String,
    },
}

impl ApiLinkPolicy {
    /// Policy tracking the latest version of `api_id`.
    #[must_use]
    pub fn latest(api_id: impl Into<String>) -> Self {
        Self::Latest {
            api_id: api_id.into(),
        }
    }

    /// Policy pinned to `api_version` of `api_id`.
    #[must_use]
    pub fn pinned(api_id: impl Into<String>, api_version: impl Into<String>) -> Self {
        Self::Pinned {
            api_id: api_id.into(),
            api_version: api_version.into(),
        }
    }

    /// The discriminant of this policy.
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::Latest { .. } => PolicyKind::Latest,
            Self::Pinned { .. } => PolicyKind::Pinned,
        }
    }
}

impl TryFrom<Value> for ApiLinkPolicy {
    type Error = sideko_core::Error;

    fn try_from(raw: Value) -> Result<Self> {
        resolve_variant(raw)
    }
}

/// Body of the API link create endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewApiLink {
    /// Enable the request builder in the API reference.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub build_request_enabled: OptionalValue<bool>,
    /// Documentation version to link into.
    pub doc_version_id: Uuid,
    /// Link group.
    pub group_id: Uuid,
    /// Offer the mock server as a server option.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub include_mock_server: OptionalValue<bool>,
    /// Navigation label.
    pub nav_label: String,
    /// Update policy.
    pub policy: ApiLinkPolicy,
    /// URL slug.
    pub slug: String,
}

impl NewApiLink {
    /// Create a link body with every optional field omitted.
    #[must_use]
    pub fn new(
        doc_version_id: Uuid,
        group_id: Uuid,
        nav_label: impl Into<String>,
        slug: impl Into<String>,
        policy: ApiLinkPolicy,
    ) -> Self {
        Self {
            build_request_enabled: OptionalValue::NotGiven,
            doc_version_id,
            group_id,
            include_mock_server: OptionalValue::NotGiven,
            nav_label: nav_label.into(),
            policy,
            slug: slug.into(),
        }
    }

    /// Set whether the request builder is enabled.
    #[must_use]
    pub fn with_build_request_enabled(mut self, enabled: impl Into<OptionalValue<bool>>) -> Self {
        self.build_request_enabled = enabled.into();
        self
    }

    /// Set whether the mock server is offered.
    #[must_use]
    pub fn with_include_mock_server(mut self, include: impl Into<OptionalValue<bool>>) -> Self {
        self.include_mock_server = include.into();
        self
    }
}

/// New API version for a pinned link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateApiLinkApiVersion {
    /// API identifier.
    pub api_id: String,
    /// Semantic version.
    pub version: String,
}

/// Body of the API link update endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct UpdateApiLink {
    /// New API version; only valid on pinned links.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub api_version: OptionalValue<UpdateApiLinkApiVersion>,
    /// Enable the request builder in the API reference.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub build_request_enabled: OptionalValue<bool>,
    /// Offer the mock server as a server option.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub include_mock_server: OptionalValue<bool>,
    /// Navigation label.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub nav_label: OptionalValue<String>,
    /// Update policy.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub policy: OptionalValue<PolicyKind>,
    /// URL slug.
    #[serde(default, skip_serializing_if = "OptionalValue::is_not_given")]
    pub slug: OptionalValue<String>,
}

/// Body of the SDK generation endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct NewSdk {
    /// SDK configuration file in YAML format.
    #[serde(skip)]
    pub config: FileUpload,
    /// Target language.
    pub language: SdkLanguage,
    /// Generate even if the API has lint errors.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub allow_lint_errors: OptionalValue<bool>,
    /// Semantic version or release name such as `latest`.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub api_version: OptionalValue<String>,
    /// Include GitHub Actions boilerplate.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub github_actions: OptionalValue<bool>,
    /// Semantic version of the generated SDK.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub sdk_version: OptionalValue<String>,
}

impl NewSdk {
    /// Generate a `language` SDK from `config`, every optional field omitted.
    #[must_use]
    pub const fn new(config: FileUpload, language: SdkLanguage) -> Self {
        Self {
            config,
            language,
            allow_lint_errors: OptionalValue::NotGiven,
            api_version: OptionalValue::NotGiven,
            github_actions: OptionalValue::NotGiven,
            sdk_version: OptionalValue::NotGiven,
        }
    }

    /// Set the API version to generate from.
    #[must_use]
    pub fn with_api_version(mut self, api_version: impl Into<String>) -> Self {
        self.api_version = OptionalValue::Value(api_version.into());
        self
    }

    /// Set the SDK version.
    #[must_use]
    pub fn with_sdk_version(mut self, sdk_version: impl Into<String>) -> Self {
        self.sdk_version = OptionalValue::Value(sdk_version.into());
        self
    }

    /// Set whether lint errors are tolerated.
    #[must_use]
    pub fn with_allow_lint_errors(mut self, allow: bool) -> Self {
        self.allow_lint_errors = OptionalValue::Value(allow);
        self
    }

    /// Set whether GitHub Actions boilerplate is included.
    #[must_use]
    pub fn with_github_actions(mut self, enabled: bool) -> Self {
        self.github_actions = OptionalValue::Value(enabled);
        self
    }
}

impl MultipartForm for NewSdk {
    fn file_parts(&self) -> Vec<FilePart> {
        vec![FilePart::new("config", self.config.clone())]
    }
}

/// Body of the SDK update endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateSdk {
    /// SDK configuration file in YAML format.
    #[serde(skip)]
    pub config: FileUpload,
    /// Compressed `.git/` directory of the previous SDK.
    #[serde(skip)]
    pub prev_sdk_git: FileUpload,
    /// Previous SDK generation.
    pub prev_sdk_id: Uuid,
    /// Semantic version or release type (`major`, `minor`, `patch`, `rc`, ...).
    pub sdk_version: String,
    /// Generate even if the API has lint errors.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub allow_lint_errors: OptionalValue<bool>,
    /// Semantic version or release name such as `latest`.
    #[serde(skip_serializing_if = "OptionalValue::is_not_given")]
    pub api_version: OptionalValue<String>,
}

impl UpdateSdk {
    /// Update the SDK `prev_sdk_id` to `sdk_version`, every optional field omitted.
    #[must_use]
    pub fn new(
        config: FileUpload,
        prev_sdk_git: FileUpload,
        prev_sdk_id: Uuid,
        sdk_version: impl Into<String>,
    ) -> Self {
        Self {
            config,
            prev_sdk_git,
            prev_sdk_id,
            sdk_version: sdk_version.into(),
            allow_lint_errors: OptionalValue::NotGiven,
            api_version: OptionalValue::NotGiven,
        }
    }
}

impl MultipartForm for UpdateSdk {
    fn file_parts(&self) -> Vec<FilePart> {
        vec![
            FilePart::new("config", self.config.clone()),
            FilePart::new("prev_sdk_git", self.prev_sdk_git.clone()),
        ]
    }
}
