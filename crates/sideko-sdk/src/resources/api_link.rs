//! API versions linked into documentation projects.

use super::AUTHENTICATED;
use crate::models::ApiLink;
use crate::params::{NewApiLink, UpdateApiLink};
use crate::Result;
use sideko_core::{
    AsyncBaseClient, PathTemplate, QueryParams, RequestOptions, RequestSpec, SyncBaseClient,
};
use std::fmt;
use uuid::Uuid;

fn list_request(
    doc_name: &str,
    doc_version: &dyn fmt::Display,
    options: Option<RequestOptions>,
) -> RequestSpec {
    let mut query = QueryParams::new();
    query.push_raw("doc_name", doc_name);
    query.push_raw("doc_version", doc_version.to_string());
    RequestSpec::get(PathTemplate::new("/api_link"))
        .with_query(query)
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

fn get_request(id: Uuid, options: Option<RequestOptions>) -> RequestSpec {
    RequestSpec::get(PathTemplate::new("/api_link/{id}").param("id", id))
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

fn create_request(body: &NewApiLink, options: Option<RequestOptions>) -> Result<RequestSpec> {
    Ok(RequestSpec::post(PathTemplate::new("/api_link"))
        .with_json(body)?
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

fn patch_request(
    id: Uuid,
    body: &UpdateApiLink,
    options: Option<RequestOptions>,
) -> Result<RequestSpec> {
    Ok(
        RequestSpec::patch(PathTemplate::new("/api_link/{id}").param("id", id))
            .with_json(body)?
            .with_auth(AUTHENTICATED)
            .with_options(options),
    )
}

fn delete_request(id: Uuid, options: Option<RequestOptions>) -> RequestSpec {
    RequestSpec::delete(PathTemplate::new("/api_link/{id}").param("id", id))
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

/// Blocking API link endpoints.
#[derive(Debug, Clone, Copy)]
pub struct ApiLinkClient<'a> {
    base: &'a SyncBaseClient,
}

impl<'a> ApiLinkClient<'a> {
    pub(crate) const fn new(base: &'a SyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /api_link`: links of one documentation version.
    ///
    /// `doc_name` is the project name or UUID, `doc_version` the version number or UUID.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn list(
        &self,
        doc_name: &str,
        doc_version: impl fmt::Display,
        options: Option<RequestOptions>,
    ) -> Result<Vec<ApiLink>> {
        self.base.request(list_request(doc_name, &doc_version, options))
    }

    /// `GET /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn get(&self, id: Uuid, options: Option<RequestOptions>) -> Result<ApiLink> {
        self.base.request(get_request(id, options))
    }

    /// `POST /api_link`: link an API version into a documentation version.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn create(&self, body: &NewApiLink, options: Option<RequestOptions>) -> Result<ApiLink> {
        self.base.request(create_request(body, options)?)
    }

    /// `PATCH /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn patch(
        &self,
        id: Uuid,
        body: &UpdateApiLink,
        options: Option<RequestOptions>,
    ) -> Result<ApiLink> {
        self.base.request(patch_request(id, body, options)?)
    }

    /// `DELETE /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn delete(&self, id: Uuid, options: Option<RequestOptions>) -> Result<()> {
        self.base.request(delete_request(id, options))
    }
}

/// Async API link endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AsyncApiLinkClient<'a> {
    base: &'a AsyncBaseClient,
}

impl<'a> AsyncApiLinkClient<'a> {
    pub(crate) const fn new(base: &'a AsyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /api_link`: links of one documentation version.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn list(
        &self,
        doc_name: &str,
        doc_version: impl fmt::Display,
        options: Option<RequestOptions>,
    ) -> Result<Vec<ApiLink>> {
        let spec = list_request(doc_name, &doc_version, options);
        self.base.request(spec).await
    }

    /// `GET /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn get(&self, id: Uuid, options: Option<RequestOptions>) -> Result<ApiLink> {
        self.base.request(get_request(id, options)).await
    }

    /// `POST /api_link`: link an API version into a documentation version.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn create(
        &self,
        body: &NewApiLink,
        options: Option<RequestOptions>,
    ) -> Result<ApiLink> {
        self.base.request(create_request(body, options)?).await
    }

    /// `PATCH /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn patch(
        &self,
        id: Uuid,
        body: &UpdateApiLink,
        options: Option<RequestOptions>,
    ) -> Result<ApiLink> {
        self.base.request(patch_request(id, body, options)?).await
    }

    /// `DELETE /api_link/{id}`
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn delete(&self, id: Uuid, options: Option<RequestOptions>) -> Result<()> {
        self.base.request(delete_request(id, options)).await
    }
}
