//! Root clients.

use crate::environment::{resolve_base_url, Environment};
use crate::resources::api_link::{ApiLinkClient, AsyncApiLinkClient};
use crate::resources::asset::{AssetClient, AsyncAssetClient};
use crate::resources::guide::{AsyncGuideClient, GuideClient};
use crate::resources::health::{AsyncHealthClient, HealthClient};
use crate::resources::sdk::{AsyncSdkClient, SdkClient};
use crate::Result;
use sideko_core::{AsyncBaseClient, AuthKey, ClientBuilder, SyncBaseClient};
use std::fmt;
use std::time::Duration;
use tracing::debug;

const USER_AGENT: &str = concat!("sideko-sdk/", env!("CARGO_PKG_VERSION"));

/// Name of the API key scheme.
pub const API_KEY_AUTH: &str = "ApiKeyAuth";

/// Name of the session cookie scheme.
pub const COOKIE_AUTH: &str = "CookieAuth";

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "x-sideko-key";

/// Cookie carrying the session.
pub const SESSION_COOKIE: &str = "SIDEKO_SESSION";

/// Settings shared by [`Client`] and [`AsyncClient`].
#[derive(Clone, Default)]
pub struct ClientOptions {
    /// Default timeout for every call; 60 seconds when unset.
    pub timeout: Option<Duration>,
    /// Wait indefinitely unless a call sets its own timeout. Overrides `timeout`.
    pub disable_timeout: bool,
    /// Explicit base URL, overriding `environment`.
    pub base_url: Option<String>,
    /// Predefined API location.
    pub environment: Environment,
    /// Value for the `x-sideko-key` header.
    pub api_key: Option<String>,
    /// Value for the `SIDEKO_SESSION` cookie.
    pub session_cookie: Option<String>,
}

impl ClientOptions {
    /// Options targeting production without credentials.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Drop the default timeout so calls wait as long as the server takes.
    #[must_use]
    pub const fn without_timeout(mut self) -> Self {
        self.disable_timeout = true;
        self
    }

    /// Set an explicit base URL.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    /// Select a predefined environment.
    #[must_use]
    pub const fn with_environment(mut self, environment: Environment) -> Self {
        self.environment = environment;
        self
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the session cookie.
    #[must_use]
    pub fn with_session_cookie(mut self, session: impl Into<String>) -> Self {
        self.session_cookie = Some(session.into());
        self
    }

    /// Core builder with the base URL resolved and both auth schemes registered.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the resolved base URL is invalid.
    pub fn builder(&self) -> Result<ClientBuilder> {
        let base_url = resolve_base_url(self.base_url.as_deref(), self.environment);
        let mut builder = ClientBuilder::new(base_url)?
            .with_user_agent(USER_AGENT)
            .with_auth(
                API_KEY_AUTH,
                AuthKey::header(API_KEY_HEADER, self.api_key.clone()),
            )
            .with_auth(
                COOKIE_AUTH,
                AuthKey::cookie(SESSION_COOKIE, self.session_cookie.clone()),
            );
        if self.disable_timeout {
            builder = builder.without_timeout();
        } else if let Some(timeout) = self.timeout {
            builder = builder.with_timeout(timeout);
        }
        Ok(builder)
    }
}

impl fmt::Debug for ClientOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientOptions")
            .field("timeout", &self.timeout)
            .field("disable_timeout", &self.disable_timeout)
            .field("base_url", &self.base_url)
            .field("environment", &self.environment)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field(
                "session_cookie",
                &self.session_cookie.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

/// Blocking Sideko API client.
#[derive(Debug, Clone)]
pub struct Client {
    base: SyncBaseClient,
}

impl Client {
    /// Build a client.
    ///
    /// Must not be called from inside an async runtime; use [`AsyncClient`] there.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let base = options.builder()?.build_blocking()?;
        debug!(base_url = %base.base_url(), "built blocking client");
        Ok(Self { base })
    }

    /// Build a client on top of a preconfigured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_http_client(
        options: &ClientOptions,
        http: reqwest::blocking::Client,
    ) -> Result<Self> {
        let base = options
            .builder()?
            .with_blocking_http_client(http)
            .build_blocking()?;
        Ok(Self { base })
    }

    /// Wrap an existing base client.
    #[must_use]
    pub const fn from_base(base: SyncBaseClient) -> Self {
        Self { base }
    }

    /// The underlying base client.
    #[must_use]
    pub const fn base(&self) -> &SyncBaseClient {
        &self.base
    }

    /// API link endpoints.
    #[must_use]
    pub const fn api_link(&self) -> ApiLinkClient<'_> {
        ApiLinkClient::new(&self.base)
    }

    /// Asset endpoints.
    #[must_use]
    pub const fn asset(&self) -> AssetClient<'_> {
        AssetClient::new(&self.base)
    }

    /// Guide endpoints.
    #[must_use]
    pub const fn guide(&self) -> GuideClient<'_> {
        GuideClient::new(&self.base)
    }

    /// Health endpoints.
    #[must_use]
    pub const fn health(&self) -> HealthClient<'_> {
        HealthClient::new(&self.base)
    }

    /// SDK endpoints.
    #[must_use]
    pub const fn sdk(&self) -> SdkClient<'_> {
        SdkClient::new(&self.base)
    }
}

/// Asynchronous Sideko API client.
#[derive(Debug, Clone)]
pub struct AsyncClient {
    base: AsyncBaseClient,
}

impl AsyncClient {
    /// Build a client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(options: &ClientOptions) -> Result<Self> {
        let base = options.builder()?.build()?;
        debug!(base_url = %base.base_url(), "built async client");
        Ok(Self { base })
    }

    /// Build a client on top of a preconfigured HTTP client.
    ///
    /// # Errors
    ///
    /// Returns an error if the base URL is invalid.
    pub fn with_http_client(options: &ClientOptions, http: reqwest::Client) -> Result<Self> {
        let base = options.builder()?.with_http_client(http).build()?;
        Ok(Self { base })
    }

    /// Wrap an existing base client.
    #[must_use]
    pub const fn from_base(base: AsyncBaseClient) -> Self {
        Self { base }
    }

    /// The underlying base client.
    #[must_use]
    pub const fn base(&self) -> &AsyncBaseClient {
        &self.base
    }

    /// API link endpoints.
    #[must_use]
    pub const fn api_link(&self) -> AsyncApiLinkClient<'_> {
        AsyncApiLinkClient::new(&self.base)
    }

    /// Asset endpoints.
    #[must_use]
    pub const fn asset(&self) -> AsyncAssetClient<'_> {
        AsyncAssetClient::new(&self.base)
    }

    /// Guide endpoints.
    #[must_use]
    pub const fn guide(&self) -> AsyncGuideClient<'_> {
        AsyncGuideClient::new(&self.base)
    }

    /// Health endpoints.
    #[must_use]
    pub const fn health(&self) -> AsyncHealthClient<'_> {
        AsyncHealthClient::new(&self.base)
    }

    /// SDK endpoints.
    #[must_use]
    pub const fn sdk(&self) -> AsyncSdkClient<'_> {
        AsyncSdkClient::new(&self.base)
    }
}
