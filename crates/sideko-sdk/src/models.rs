//! Response payloads returned by the Sideko API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sideko_core::Model;
use std::fmt;
use uuid::Uuid;

/// Result of the authenticated health check.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthCheckResponse {
    /// Whether the service is up.
    pub ok: bool,
}

/// Result of the unauthenticated ping.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthPingResponse {
    /// Whether the service is up.
    pub ok: bool,
}

/// A media asset stored for an organization.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Asset {
    /// File extension.
    pub extension: String,
    /// Asset UUID.
    pub id: Uuid,
    /// Asset name without extension.
    pub name: String,
    /// Public URL of the asset.
    pub url: String,
}

/// Paging information for list responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pagination {
    /// Current page.
    pub page: i64,
    /// Total number of pages.
    pub page_count: i64,
    /// Maximum number of results per page.
    pub page_limit: i64,
    /// Total number of results across all pages.
    pub total_count: i64,
}

/// One page of organization assets.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ListAssetsPage {
    /// Paging information.
    pub pagination: Pagination,
    /// Assets on this page.
    pub results: Vec<Asset>,
}

/// How an API link follows new API versions.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolicyKind {
    /// Always track the latest version.
    Latest,
    /// Stay on one version.
    Pinned,
}

/// Summary of the API version behind a link.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiLinkApiVersion {
    /// API identifier.
    pub api_id: String,
    /// API name.
    pub api_name: String,
    /// Version UUID.
    pub id: Uuid,
    /// Semantic version.
    pub version: String,
}

/// Summary of the documentation version a link belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiLinkDocVersion {
    /// Documentation project UUID.
    pub doc_project_id: Uuid,
    /// Documentation project name.
    pub doc_project_name: String,
    /// Documentation version UUID.
    pub id: Uuid,
    /// Documentation version number.
    pub version: i64,
}

/// An API version linked into a documentation project version.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ApiLink {
    /// Linked API version.
    pub api_version: ApiLinkApiVersion,
    /// Whether the request builder is enabled in the API reference.
    pub build_request_enabled: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Owning documentation version.
    pub doc_version: ApiLinkDocVersion,
    /// Link group UUID.
    pub group_id: Uuid,
    /// Link UUID.
    pub id: Uuid,
    /// Whether the mock server is offered as a server option.
    pub include_mock_server: bool,
    /// Navigation label.
    pub nav_label: String,
    /// Position inside the group.
    pub order: i64,
    /// Update policy.
    pub policy: PolicyKind,
    /// URL slug.
    pub slug: String,
}

/// A guide and its nested sub-guides.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct GuideWithChildren {
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Lucide icon name.
    pub icon: Option<String>,
    /// Guide UUID.
    pub id: Uuid,
    /// Whether the guide groups other guides.
    pub is_parent: bool,
    /// Navigation label.
    pub nav_label: String,
    /// Position among its siblings.
    pub order: i64,
    /// Parent guide UUID.
    pub parent_id: Option<Uuid>,
    /// URL slug.
    pub slug: String,
    /// Whether a table of contents is shown.
    pub table_of_contents: bool,
    /// Nested guides.
    pub children: Vec<GuideWithChildren>,
}

impl GuideWithChildren {
    /// Depth-first iterator over this guide and every descendant.
    pub fn iter(&self) -> impl Iterator<Item = &Self> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let guide = stack.pop()?;
            stack.extend(guide.children.iter().rev());
            Some(guide)
        })
    }
}

/// Languages an SDK can be generated in.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum SdkLanguage {
    /// C#
    Csharp,
    /// Go
    Go,
    /// Java
    Java,
    /// Python
    Python,
    /// Rust
    Rust,
    /// TypeScript
    Typescript,
}

impl fmt::Display for SdkLanguage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Csharp => "csharp",
            Self::Go => "go",
            Self::Java => "java",
            Self::Python => "python",
            Self::Rust => "rust",
            Self::Typescript => "typescript",
        };
        f.write_str(name)
    }
}

/// A managed SDK generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SdkGeneration {
    /// API version the SDK was generated from.
    pub api_version_id: Uuid,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Target language.
    pub language: SdkLanguage,
    /// Package name.
    pub name: String,
    /// Whether generation succeeded.
    pub successful: bool,
    /// Semantic version of the SDK.
    pub version: String,
}

impl Model for HealthCheckResponse {}
impl Model for HealthPingResponse {}
impl Model for Asset {}
impl Model for Pagination {}
impl Model for ListAssetsPage {}
impl Model for ApiLinkApiVersion {}
impl Model for ApiLinkDocVersion {}
impl Model for ApiLink {}
impl Model for GuideWithChildren {}
impl Model for SdkGeneration {}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::StatusCode;
    use serde_json::json;
    use sideko_core::encode::to_json;
    use sideko_core::response::cast;
    use sideko_core::ResponseEnvelope;
    use std::fmt::Debug;

    /// Encode `value` the way request bodies are encoded, then decode it the way
    /// responses are cast.
    fn assert_round_trip<T>(value: &T)
    where
        T: Serialize + Model + PartialEq + Debug,
    {
        let encoded = to_json(value).unwrap();
        let envelope = ResponseEnvelope::new(StatusCode::OK, encoded.to_string());
        let decoded: T = cast(envelope).unwrap();
        assert_eq!(&decoded, value);
    }

    fn asset(name: &str) -> Asset {
        Asset {
            extension: "png".to_string(),
            id: Uuid::new_v4(),
            name: name.to_string(),
            url: format!("https://cdn.sideko.dev/{name}.png"),
        }
    }

    fn guide(slug: &str, children: Vec<GuideWithChildren>) -> GuideWithChildren {
        GuideWithChildren {
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            icon: None,
            id: Uuid::new_v4(),
            is_parent: !children.is_empty(),
            nav_label: slug.to_uppercase(),
            order: 0,
            parent_id: None,
            slug: slug.to_string(),
            table_of_contents: true,
            children,
        }
    }

    #[test]
    fn sdk_language_wire_names() {
        assert_eq!(json!(SdkLanguage::Csharp), json!("csharp"));
        assert_eq!(json!(SdkLanguage::Typescript), json!("typescript"));
        assert_eq!(SdkLanguage::Rust.to_string(), "rust");
        assert!(serde_json::from_value::<SdkLanguage>(json!("cobol")).is_err());
    }

    #[test]
    fn api_link_round_trip() {
        let link = ApiLink {
            api_version: ApiLinkApiVersion {
                api_id: "my-api".to_string(),
                api_name: "My API".to_string(),
                id: Uuid::new_v4(),
                version: "1.0.0".to_string(),
            },
            build_request_enabled: true,
            created_at: "2024-05-01T12:00:00Z".parse().unwrap(),
            doc_version: ApiLinkDocVersion {
                doc_project_id: Uuid::new_v4(),
                doc_project_name: "my-project".to_string(),
                id: Uuid::new_v4(),
                version: 3,
            },
            group_id: Uuid::new_v4(),
            id: Uuid::new_v4(),
            include_mock_server: false,
            nav_label: "Reference".to_string(),
            order: 1,
            policy: PolicyKind::Pinned,
            slug: "reference".to_string(),
        };

        let encoded = serde_json::to_value(&link).unwrap();
        assert_eq!(encoded["policy"], json!("pinned"));
        assert_round_trip(&link);
        assert_round_trip(&link.api_version);
        assert_round_trip(&link.doc_version);
    }

    #[test]
    fn guide_tree_round_trip_and_walk() {
        let tree = guide("root", vec![guide("a", vec![guide("a1", vec![])]), guide("b", vec![])]);

        assert_round_trip(&tree);

        let slugs: Vec<&str> = tree.iter().map(|guide| guide.slug.as_str()).collect();
        assert_eq!(slugs, vec!["root", "a", "a1", "b"]);
    }

    #[test]
    fn list_assets_page_deserializes() {
        let page: ListAssetsPage = serde_json::from_value(json!({
            "pagination": {"page": 1, "page_count": 1, "page_limit": 25, "total_count": 1},
            "results": [{
                "extension": "png",
                "id": "3e4666bf-d5e5-4aa7-b8ce-cefe41c7568a",
                "name": "logo",
                "url": "https://cdn.sideko.dev/logo.png"
            }]
        }))
        .unwrap();
        assert_eq!(page.results[0].name, "logo");
        assert_eq!(page.pagination.page_limit, 25);
    }

    #[test]
    fn health_responses_round_trip() {
        assert_round_trip(&HealthCheckResponse { ok: true });
        assert_round_trip(&HealthPingResponse { ok: false });
    }

    #[test]
    fn asset_models_round_trip() {
        let pagination = Pagination {
            page: 2,
            page_count: 3,
            page_limit: 2,
            total_count: 5,
        };
        assert_round_trip(&asset("logo"));
        assert_round_trip(&pagination);
        assert_round_trip(&ListAssetsPage {
            pagination,
            results: vec![asset("logo"), asset("banner")],
        });
    }

    #[test]
    fn sdk_generation_round_trip() {
        for language in [
            SdkLanguage::Csharp,
            SdkLanguage::Go,
            SdkLanguage::Java,
            SdkLanguage::Python,
            SdkLanguage::Rust,
            SdkLanguage::Typescript,
        ] {
            assert_round_trip(&SdkGeneration {
                api_version_id: Uuid::new_v4(),
                created_at: "2024-08-19T08:00:00.125Z".parse().unwrap(),
                language,
                name: format!("petstore-{language}"),
                successful: language != SdkLanguage::Java,
                version: "1.0.0".to_string(),
            });
        }
    }
}
