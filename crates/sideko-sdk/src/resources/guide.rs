//! Documentation guides.

use super::AUTHENTICATED;
use crate::models::GuideWithChildren;
use crate::Result;
use sideko_core::{AsyncBaseClient, PathTemplate, RequestOptions, RequestSpec, SyncBaseClient};
use std::fmt;

fn list_request(
    doc_name: &str,
    doc_version: &dyn fmt::Display,
    options: Option<RequestOptions>,
) -> RequestSpec {
    let path = PathTemplate::new("/doc_project/{doc_name}/version/{doc_version}/guide")
        .param("doc_name", doc_name)
        .param("doc_version", doc_version);
    RequestSpec::get(path)
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

/// Blocking guide endpoints.
#[derive(Debug, Clone, Copy)]
pub struct GuideClient<'a> {
    base: &'a SyncBaseClient,
}

impl<'a> GuideClient<'a> {
    pub(crate) const fn new(base: &'a SyncBaseClient) -> Self {
        Self { base }
    }

    /// Guide tree of one documentation version.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn list(
        &self,
        doc_name: &str,
        doc_version: impl fmt::Display,
        options: Option<RequestOptions>,
    ) -> Result<Vec<GuideWithChildren>> {
        self.base.request(list_request(doc_name, &doc_version, options))
    }
}

/// Async guide endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AsyncGuideClient<'a> {
    base: &'a AsyncBaseClient,
}

impl<'a> AsyncGuideClient<'a> {
    pub(crate) const fn new(base: &'a AsyncBaseClient) -> Self {
        Self { base }
    }

    /// Guide tree of one documentation version.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn list(
        &self,
        doc_name: &str,
        doc_version: impl fmt::Display,
        options: Option<RequestOptions>,
    ) -> Result<Vec<GuideWithChildren>> {
        let spec = list_request(doc_name, &doc_version, options);
        self.base.request(spec).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AsyncClient, ClientOptions};
    use serde_json::json;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[test]
    fn path_parameters_fill_their_segments() {
        let spec = list_request("my docs", &"latest", None);
        assert_eq!(
            spec.path().segments().unwrap(),
            vec!["doc_project", "my docs", "version", "latest", "guide"]
        );
    }

    #[tokio::test]
    async fn nested_guides_are_decoded() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/doc_project/docs/version/2/guide"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
                "created_at": "2024-05-01T12:00:00Z",
                "icon": null,
                "id": "3e4666bf-d5e5-4aa7-b8ce-cefe41c7568a",
                "is_parent": true,
                "nav_label": "Getting started",
                "order": 0,
                "parent_id": null,
                "slug": "getting-started",
                "table_of_contents": false,
                "children": [{
                    "created_at": "2024-05-01T12:00:00Z",
                    "icon": "rocket",
                    "id": "1b4e28ba-2fa1-11d2-883f-0016d3cca427",
                    "is_parent": false,
                    "nav_label": "Install",
                    "order": 0,
                    "parent_id": "3e4666bf-d5e5-4aa7-b8ce-cefe41c7568a",
                    "slug": "install",
                    "table_of_contents": true,
                    "children": []
                }]
            }])))
            .mount(&server)
            .await;

        let client = AsyncClient::new(&ClientOptions::new().with_base_url(server.uri())).unwrap();
        let guides = client.guide().list("docs", 2, None).await.unwrap();
        let labels: Vec<&str> = guides[0].iter().map(|guide| guide.nav_label.as_str()).collect();
        assert_eq!(labels, vec!["Getting started", "Install"]);
    }
}
