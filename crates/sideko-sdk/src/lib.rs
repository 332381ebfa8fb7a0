//! Blocking and asynchronous clients for the Sideko API.
//!
//! Both root clients share the same endpoint groups; they differ only in how a call
//! is dispatched.
//!
//! ```no_run
//! use sideko_sdk::{Client, ClientOptions};
//!
//! # fn main() -> sideko_sdk::Result<()> {
//! let client = Client::new(&ClientOptions::new().with_api_key("sk-..."))?;
//! let health = client.health().check(None)?;
//! assert!(health.ok);
//! # Ok(())
//! # }
//! ```

#![deny(missing_docs)]

pub mod client;
pub mod environment;
pub mod models;
pub mod params;
pub mod resources;

pub use client::{AsyncClient, Client, ClientOptions};
pub use environment::Environment;
pub use models::{
    ApiLink, ApiLinkApiVersion, ApiLinkDocVersion, Asset, GuideWithChildren,
    HealthCheckResponse, HealthPingResponse, ListAssetsPage, Pagination, PolicyKind,
    SdkGeneration, SdkLanguage,
};
pub use params::{
    ApiLinkPolicy, ListAssetsParams, ListSdksParams, NewApiLink, NewSdk, UpdateApiLink,
    UpdateApiLinkApiVersion, UpdateAsset, UpdateSdk, UploadAsset,
};
pub use sideko_core::{BinaryResponse, Error, FileUpload, OptionalValue, RequestOptions};

/// Convenient result alias that reuses the core error type.
pub type Result<T> = sideko_core::Result<T>;
