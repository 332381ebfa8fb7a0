//! # sideko-core
//!
//! Typed request dispatch shared by the Sideko API clients.
//!
//! Every endpoint method is a thin description of one HTTP operation: a
//! [`RequestSpec`] built from its arguments and a result type implementing
//! [`CastTarget`]. This crate turns that description into a wire request, applies
//! authentication, sends it over a blocking or an async transport and casts the
//! response.
//!
//! ## Modules
//!
//! - [`optional`] - Tri-state `NotGiven | Null | Value` argument wrapper
//! - [`auth`] - Named auth schemes and their injection rules
//! - [`encode`] - JSON, multipart and tagged-union body encoding
//! - [`query`] - Form-explode query string encoding
//! - [`request`] - Per-call request description and options
//! - [`assemble`] - Merge of a request with client defaults and credentials
//! - [`transport`] - Blocking and async reqwest transports
//! - [`response`] - Status handling and response casting
//! - [`client`] - Base clients and their builder
//! - [`config`] - Validated client configuration
//! - [`error`] - Error types

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod assemble;
pub mod auth;
pub mod client;
pub mod config;
pub mod encode;
pub mod error;
pub mod optional;
pub mod query;
pub mod request;
pub mod response;
pub mod transport;

// Re-export commonly used types
pub use auth::{AuthKey, AuthLocation, AuthRegistry};
pub use client::{AsyncBaseClient, ClientBuilder, SyncBaseClient};
pub use config::{CoreConfig, DEFAULT_TIMEOUT_SECS};
pub use encode::{resolve_variant, FilePart, FileUpload, MultipartForm};
pub use error::{ApiErrorDetail, Error, Result};
pub use optional::OptionalValue;
pub use query::QueryParams;
pub use request::{PathTemplate, RequestOptions, RequestSpec};
pub use response::{BinaryResponse, CastTarget, Model, ResultKind};
pub use transport::{AsyncTransport, BlockingTransport, ResponseEnvelope};
