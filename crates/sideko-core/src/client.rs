//! Base clients.
//!
//! [`AsyncBaseClient`] and [`SyncBaseClient`] have the same layout and the same single
//! entry point, `request`. Both assemble and cast through the same functions; they only
//! differ in whether the transport call suspends or blocks. Configuration captured at
//! construction (base URL, auth registry, default options) is shared read-only between
//! calls.

use crate::assemble::{assemble, PreparedRequest};
use crate::auth::{AuthKey, AuthRegistry};
use crate::config::CoreConfig;
use crate::error::Result;
use crate::request::{RequestOptions, RequestSpec};
use crate::response::{cast, CastTarget};
use crate::transport::{
    AsyncTransport, BlockingReqwestTransport, BlockingTransport, ReqwestTransport,
};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Immutable state shared by every call of one client.
struct ClientCore {
    base_url: Url,
    auth: AuthRegistry,
    defaults: RequestOptions,
}

impl ClientCore {
    fn prepare(&self, spec: RequestSpec) -> Result<PreparedRequest> {
        assemble(&self.base_url, &self.auth, &self.defaults, spec)
    }
}

impl fmt::Debug for ClientCore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientCore")
            .field("base_url", &self.base_url.as_str())
            .field("auth", &self.auth)
            .field("defaults", &self.defaults)
            .finish()
    }
}

/// Builder for [`AsyncBaseClient`] and [`SyncBaseClient`].
pub struct ClientBuilder {
    config: CoreConfig,
    auth: AuthRegistry,
    defaults: RequestOptions,
    http: Option<reqwest::Client>,
    blocking_http: Option<reqwest::blocking::Client>,
    transport: Option<Arc<dyn AsyncTransport>>,
    blocking_transport: Option<Arc<dyn BlockingTransport>>,
}

impl ClientBuilder {
    /// Create a builder for `base_url` with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the URL is invalid.
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let config = CoreConfig::new(base_url)?;
        Self::from_config(&config)
    }

    /// Create a builder from an existing configuration.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`](crate::Error::Config) if the configuration fails
    /// validation.
    pub fn from_config(config: &CoreConfig) -> Result<Self> {
        validator::Validate::validate(config)?;
        Ok(Self {
            config: config.clone(),
            auth: AuthRegistry::new(),
            defaults: RequestOptions::new().with_timeout(config.timeout()),
            http: None,
            blocking_http: None,
            transport: None,
            blocking_transport: None,
        })
    }

    /// Override the default timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.defaults.timeout = Some(timeout);
        self
    }

    /// Send requests without a default timeout; a per-call timeout still applies.
    #[must_use]
    pub fn without_timeout(mut self) -> Self {
        self.defaults.timeout = None;
        self
    }

    /// Register an auth scheme under `name`.
    #[must_use]
    pub fn with_auth(mut self, name: impl Into<String>, scheme: AuthKey) -> Self {
        self.auth.register(name, scheme);
        self
    }

    /// Merge default options applied to every call.
    #[must_use]
    pub fn with_default_options(mut self, options: RequestOptions) -> Self {
        self.defaults = options.merged_over(&self.defaults);
        self
    }

    /// Set the `User-Agent` header. Ignored when an HTTP client is supplied.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.config = self.config.with_user_agent(user_agent);
        self
    }

    /// Use a preconfigured async HTTP client.
    #[must_use]
    pub fn with_http_client(mut self, http: reqwest::Client) -> Self {
        self.http = Some(http);
        self
    }

    /// Use a preconfigured blocking HTTP client.
    #[must_use]
    pub fn with_blocking_http_client(mut self, http: reqwest::blocking::Client) -> Self {
        self.blocking_http = Some(http);
        self
    }

    /// Use a custom async transport. Takes precedence over any HTTP client.
    #[must_use]
    pub fn with_transport(mut self, transport: Arc<dyn AsyncTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Use a custom blocking transport. Takes precedence over any HTTP client.
    #[must_use]
    pub fn with_blocking_transport(mut self, transport: Arc<dyn BlockingTransport>) -> Self {
        self.blocking_transport = Some(transport);
        self
    }

    /// Build the cooperative client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be used or the HTTP client cannot be
    /// built.
    pub fn build(self) -> Result<AsyncBaseClient> {
        let transport = match (self.transport, self.http) {
            (Some(transport), _) => transport,
            (None, Some(http)) => Arc::new(ReqwestTransport::new(http)),
            (None, None) => Arc::new(ReqwestTransport::new(self.config.http_client()?)),
        };
        let core = ClientCore {
            base_url: self.config.parse_base_url()?,
            auth: self.auth,
            defaults: self.defaults,
        };
        Ok(AsyncBaseClient {
            core: Arc::new(core),
            transport,
        })
    }

    /// Build the blocking client.
    ///
    /// Without a custom transport or HTTP client this creates a blocking reqwest client,
    /// which must not happen inside an async runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL cannot be used or the HTTP client cannot be
    /// built.
    pub fn build_blocking(self) -> Result<SyncBaseClient> {
        let base_url = self.config.parse_base_url()?;
        let transport = match (self.blocking_transport, self.blocking_http) {
            (Some(transport), _) => transport,
            (None, Some(http)) => Arc::new(BlockingReqwestTransport::new(http)),
            (None, None) => Arc::new(BlockingReqwestTransport::new(
                self.config.blocking_http_client()?,
            )),
        };
        let core = ClientCore {
            base_url,
            auth: self.auth,
            defaults: self.defaults,
        };
        Ok(SyncBaseClient {
            core: Arc::new(core),
            transport,
        })
    }
}

impl fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("config", &self.config)
            .field("auth", &self.auth)
            .field("defaults", &self.defaults)
            .field("custom_transport", &self.transport.is_some())
            .field("custom_blocking_transport", &self.blocking_transport.is_some())
            .finish_non_exhaustive()
    }
}

/// Cooperative base client: `request` suspends while the transport waits on the network.
#[derive(Clone)]
pub struct AsyncBaseClient {
    core: Arc<ClientCore>,
    transport: Arc<dyn AsyncTransport>,
}

impl AsyncBaseClient {
    /// Send one request and cast its response to `T`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Encoding`](crate::Error::Encoding) before any I/O if the request
    /// cannot be assembled, a transport error if the exchange fails, and
    /// [`Error::Api`](crate::Error::Api) or
    /// [`Error::SchemaValidation`](crate::Error::SchemaValidation) for unusable responses.
    pub async fn request<T: CastTarget>(&self, spec: RequestSpec) -> Result<T> {
        let prepared = self.core.prepare(spec)?;
        let envelope = self.transport.send(prepared).await?;
        cast(envelope)
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.core.base_url
    }

    /// Registered auth schemes.
    #[must_use]
    pub fn auth(&self) -> &AuthRegistry {
        &self.core.auth
    }

    /// Options merged under every call's options.
    #[must_use]
    pub fn default_options(&self) -> &RequestOptions {
        &self.core.defaults
    }
}

impl fmt::Debug for AsyncBaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AsyncBaseClient")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}

/// Blocking base client: `request` holds the calling thread for the whole round trip.
#[derive(Clone)]
pub struct SyncBaseClient {
    core: Arc<ClientCore>,
    transport: Arc<dyn BlockingTransport>,
}

impl SyncBaseClient {
    /// Send one request and cast its response to `T`.
    ///
    /// # Errors
    ///
    /// Same as [`AsyncBaseClient::request`].
    pub fn request<T: CastTarget>(&self, spec: RequestSpec) -> Result<T> {
        let prepared = self.core.prepare(spec)?;
        let envelope = self.transport.send(prepared)?;
        cast(envelope)
    }

    /// Base URL every path is appended to.
    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.core.base_url
    }

    /// Registered auth schemes.
    #[must_use]
    pub fn auth(&self) -> &AuthRegistry {
        &self.core.auth
    }

    /// Options merged under every call's options.
    #[must_use]
    pub fn default_options(&self) -> &RequestOptions {
        &self.core.defaults
    }
}

impl fmt::Debug for SyncBaseClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncBaseClient")
            .field("core", &self.core)
            .finish_non_exhaustive()
    }
}
