//! Managed SDK generation.

use super::AUTHENTICATED;
use crate::models::SdkGeneration;
use crate::params::{ListSdksParams, NewSdk, UpdateSdk};
use crate::Result;
use sideko_core::{
    AsyncBaseClient, BinaryResponse, PathTemplate, RequestOptions, RequestSpec, SyncBaseClient,
};

fn list_request(params: &ListSdksParams, options: Option<RequestOptions>) -> Result<RequestSpec> {
    Ok(RequestSpec::get(PathTemplate::new("/sdk"))
        .with_query(params.to_query()?)
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

fn generate_request(body: &NewSdk, options: Option<RequestOptions>) -> Result<RequestSpec> {
    Ok(RequestSpec::post(PathTemplate::new("/sdk"))
        .with_multipart(body)?
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

fn update_request(body: &UpdateSdk, options: Option<RequestOptions>) -> Result<RequestSpec> {
    Ok(RequestSpec::post(PathTemplate::new("/sdk/update"))
        .with_multipart(body)?
        .with_auth(AUTHENTICATED)
        .with_options(options))
}

/// Blocking SDK endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SdkClient<'a> {
    base: &'a SyncBaseClient,
}

impl<'a> SdkClient<'a> {
    pub(crate) const fn new(base: &'a SyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /sdk`: managed SDKs of the organization.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn list(
        &self,
        params: &ListSdksParams,
        options: Option<RequestOptions>,
    ) -> Result<Vec<SdkGeneration>> {
        self.base.request(list_request(params, options)?)
    }

    /// `POST /sdk`: generate a new SDK and download it as a `.tar.gz` archive.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn generate(
        &self,
        body: &NewSdk,
        options: Option<RequestOptions>,
    ) -> Result<BinaryResponse> {
        self.base.request(generate_request(body, options)?)
    }

    /// `POST /sdk/update`: regenerate an SDK and return the git patch against the previous one.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn update(&self, body: &UpdateSdk, options: Option<RequestOptions>) -> Result<String> {
        self.base.request(update_request(body, options)?)
    }
}

/// Async SDK endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AsyncSdkClient<'a> {
    base: &'a AsyncBaseClient,
}

impl<'a> AsyncSdkClient<'a> {
    pub(crate) const fn new(base: &'a AsyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /sdk`: managed SDKs of the organization.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn list(
        &self,
        params: &ListSdksParams,
        options: Option<RequestOptions>,
    ) -> Result<Vec<SdkGeneration>> {
        self.base.request(list_request(params, options)?).await
    }

    /// `POST /sdk`: generate a new SDK and download it as a `.tar.gz` archive.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn generate(
        &self,
        body: &NewSdk,
        options: Option<RequestOptions>,
    ) -> Result<BinaryResponse> {
        self.base.request(generate_request(body, options)?).await
    }

    /// `POST /sdk/update`: regenerate an SDK and return the git patch against the previous one.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn update(
        &self,
        body: &UpdateSdk,
        options: Option<RequestOptions>,
    ) -> Result<String> {
        self.base.request(update_request(body, options)?).await
    }
}
