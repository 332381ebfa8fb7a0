//! Organization media assets.

use super::AUTHENTICATED;
use crate::models::{Asset, ListAssetsPage};
use crate::params::{ListAssetsParams, UpdateAsset, UploadAsset};
use crate::Result;
use sideko_core::{AsyncBaseClient, PathTemplate, RequestOptions, RequestSpec, SyncBaseClient};
use uuid::Uuid;

fn list_request(
    params: &ListAssetsParams,
    options: Option<RequestOptions>,
) -> Result<RequestSpec> {
    Ok(RequestSpec::get(PathTemplate::new("/organization/asset"))
        .with_query(params.to_query()?)
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

fn patch_request(
    id: Uuid,
    body: &UpdateAsset,
    options: Option<RequestOptions>,
) -> Result<RequestSpec> {
    Ok(
        RequestSpec::patch(PathTemplate::new("/organization/asset/{id}").param("id", id))
            .with_json(body)?
            .with_auth(AUTHENTICATED)
            .with_options(options),
    )
}

fn create_request(body: &UploadAsset, options: Option<RequestOptions>) -> Result<RequestSpec> {
    Ok(RequestSpec::post(PathTemplate::new("/organization/asset"))
        .with_multipart(body)?
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

fn delete_request(id: Uuid, options: Option<RequestOptions>) -> RequestSpec {
    RequestSpec::delete(PathTemplate::new("/organization/asset/{id}").param("id", id))
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

/// Blocking asset endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AssetClient<'a> {
    base: &'a SyncBaseClient,
}

impl<'a> AssetClient<'a> {
    pub(crate) const fn new(base: &'a SyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /organization/asset`: list the organization's assets.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn list(
        &self,
        params: &ListAssetsParams,
        options: Option<RequestOptions>,
    ) -> Result<ListAssetsPage> {
        self.base.request(list_request(params, options)?)
    }

    /// `PATCH /organization/asset/{id}`: rename an asset.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn patch(
        &self,
        id: Uuid,
        body: &UpdateAsset,
        options: Option<RequestOptions>,
    ) -> Result<Asset> {
        self.base.request(patch_request(id, body, options)?)
    }

    /// `POST /organization/asset`: upload assets.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn create(
        &self,
        body: &UploadAsset,
        options: Option<RequestOptions>,
    ) -> Result<Vec<Asset>> {
        self.base.request(create_request(body, options)?)
    }

    /// `DELETE /organization/asset/{id}`: delete an asset.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn delete(&self, id: Uuid, options: Option<RequestOptions>) -> Result<()> {
        self.base.request(delete_request(id, options))
    }
}

/// Async asset endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AsyncAssetClient<'a> {
    base: &'a AsyncBaseClient,
}

impl<'a> AsyncAssetClient<'a> {
    pub(crate) const fn new(base: &'a AsyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /organization/asset`: list the organization's assets.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn list(
        &self,
        params: &ListAssetsParams,
        options: Option<RequestOptions>,
    ) -> Result<ListAssetsPage> {
        self.base.request(list_request(params, options)?).await
    }

    /// `PATCH /organization/asset/{id}`: rename an asset.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn patch(
        &self,
        id: Uuid,
        body: &UpdateAsset,
        options: Option<RequestOptions>,
    ) -> Result<Asset> {
        self.base.request(patch_request(id, body, options)?).await
    }

    /// `POST /organization/asset`: upload assets.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn create(
        &self,
        body: &UploadAsset,
        options: Option<RequestOptions>,
    ) -> Result<Vec<Asset>> {
        self.base.request(create_request(body, options)?).await
    }

    /// `DELETE /organization/asset/{id}`: delete an asset.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn delete(&self, id: Uuid, options: Option<RequestOptions>) -> Result<()> {
        self.base.request(delete_request(id, options)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{AsyncClient, ClientOptions};
    use serde_json::json;
    use sideko_core::request::RequestBody;
    use sideko_core::{FileUpload, OptionalValue};
    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> AsyncClient {
        AsyncClient::new(
            &ClientOptions::new()
                .with_base_url(server.uri())
                .with_api_key("abc"),
        )
        .unwrap()
    }

    #[test]
    fn not_given_name_leaves_an_empty_patch() {
        let spec = patch_request(Uuid::nil(), &UpdateAsset::default(), None).unwrap();
        assert_eq!(spec.body(), &RequestBody::Json(json!({})));
    }

    #[test]
    fn upload_is_multipart_with_one_file() {
        let body = UploadAsset::new(FileUpload::new(&b"png"[..]).with_filename("logo.png"));
        let spec = create_request(&body, None).unwrap();
        let RequestBody::Multipart(form) = spec.body() else {
            panic!("expected multipart body");
        };
        assert_eq!(form.files.len(), 1);
        assert!(form.fields.is_empty());
    }

    #[tokio::test]
    async fn list_sends_given_filters_only() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/organization/asset"))
            .and(query_param("page", "2"))
            .and(header("x-sideko-key", "abc"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "pagination": {"page": 2, "page_count": 2, "page_limit": 1, "total_count": 2},
                "results": []
            })))
            .mount(&server)
            .await;

        let params = ListAssetsParams {
            page: 2.into(),
            ..ListAssetsParams::default()
        };
        let page = client(&server).asset().list(&params, None).await.unwrap();
        assert_eq!(page.pagination.page, 2);

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests[0].url.query(), Some("page=2"));
    }

    #[tokio::test]
    async fn patch_sends_explicit_null() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("PATCH"))
            .and(path(format!("/organization/asset/{id}").as_str()))
            .and(body_json(json!({"name": null})))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "extension": "png",
                "id": id,
                "name": "logo",
                "url": "https://cdn.sideko.dev/logo.png"
            })))
            .mount(&server)
            .await;

        let body = UpdateAsset {
            name: OptionalValue::Null,
        };
        let asset = client(&server).asset().patch(id, &body, None).await.unwrap();
        assert_eq!(asset.id, id);
    }

    #[tokio::test]
    async fn delete_accepts_no_content() {
        let server = MockServer::start().await;
        let id = Uuid::new_v4();
        Mock::given(method("DELETE"))
            .and(path(format!("/organization/asset/{id}").as_str()))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).asset().delete(id, None).await.unwrap();
    }
}
