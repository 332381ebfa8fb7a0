//! Service health endpoints.

use super::AUTHENTICATED;
use crate::models::{HealthCheckResponse, HealthPingResponse};
use crate::Result;
use sideko_core::{AsyncBaseClient, PathTemplate, RequestOptions, RequestSpec, SyncBaseClient};

fn check_request(options: Option<RequestOptions>) -> RequestSpec {
    RequestSpec::get(PathTemplate::new("/_health"))
        .with_auth(AUTHENTICATED)
        .with_options(options)
}

fn ping_request(options: Option<RequestOptions>) -> RequestSpec {
    RequestSpec::get(PathTemplate::new("/_ping")).with_options(options)
}

/// Blocking health endpoints.
#[derive(Debug, Clone, Copy)]
pub struct HealthClient<'a> {
    base: &'a SyncBaseClient,
}

impl<'a> HealthClient<'a> {
    pub(crate) const fn new(base: &'a SyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /_health`: authenticated liveness check.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn check(&self, options: Option<RequestOptions>) -> Result<HealthCheckResponse> {
        self.base.request(check_request(options))
    }

    /// `GET /_ping`: unauthenticated liveness check.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub fn ping(&self, options: Option<RequestOptions>) -> Result<HealthPingResponse> {
        self.base.request(ping_request(options))
    }
}

/// Async health endpoints.
#[derive(Debug, Clone, Copy)]
pub struct AsyncHealthClient<'a> {
    base: &'a AsyncBaseClient,
}

impl<'a> AsyncHealthClient<'a> {
    pub(crate) const fn new(base: &'a AsyncBaseClient) -> Self {
        Self { base }
    }

    /// `GET /_health`: authenticated liveness check.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn check(&self, options: Option<RequestOptions>) -> Result<HealthCheckResponse> {
        self.base.request(check_request(options)).await
    }

    /// `GET /_ping`: unauthenticated liveness check.
    ///
    /// # Errors
    ///
    /// Returns the dispatch error if the call fails.
    pub async fn ping(&self, options: Option<RequestOptions>) -> Result<HealthPingResponse> {
        self.base.request(ping_request(options)).await
    }
}
