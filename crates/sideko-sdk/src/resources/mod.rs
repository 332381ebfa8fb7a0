//! Endpoint groups.
//!
//! Every operation has one function describing its request and two façades that send
//! it: a blocking one over [`SyncBaseClient`](sideko_core::SyncBaseClient) and an async
//! one over [`AsyncBaseClient`](sideko_core::AsyncBaseClient).

use crate::client::{API_KEY_AUTH, COOKIE_AUTH};

pub mod api_link;
pub mod asset;
pub mod guide;
pub mod health;
pub mod sdk;

/// Schemes accepted by every authenticated endpoint, in preference order.
pub(crate) const AUTHENTICATED: &[&str] = &[API_KEY_AUTH, COOKIE_AUTH];
