//! Named authentication schemes.
//!
//! A client registers every scheme the API declares when it is constructed. Each
//! endpoint then names the schemes it accepts, in preference order, and the registry
//! turns the usable ones into headers, query parameters or cookies. Missing credentials
//! are not an error here: the server answers 401/403 if it needed them.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Where a credential is placed on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthLocation {
    /// Request header
    Header,
    /// Query string parameter
    Query,
    /// Cookie
    Cookie,
}

impl fmt::Display for AuthLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Header => "header",
            Self::Query => "query",
            Self::Cookie => "cookie",
        };
        f.write_str(name)
    }
}

/// A credential and the rule for injecting it.
#[derive(Debug)]
pub struct AuthKey {
    key: String,
    location: AuthLocation,
    value: Option<SecretString>,
}

impl AuthKey {
    /// Create a scheme injected at `location` under `key`.
    ///
    /// An empty value is treated the same as no value.
    #[must_use]
    pub fn new(
        location: AuthLocation,
        key: impl Into<String>,
        value: Option<impl Into<String>>,
    ) -> Self {
        let value = value
            .map(Into::into)
            .filter(|value: &String| !value.is_empty())
            .map(SecretString::from);
        Self {
            key: key.into(),
            location,
            value,
        }
    }

    /// Header credential, e.g. `x-api-key: <value>`.
    #[must_use]
    pub fn header(key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self::new(AuthLocation::Header, key, value)
    }

    /// Query string credential.
    #[must_use]
    pub fn query(key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self::new(AuthLocation::Query, key, value)
    }

    /// Cookie credential.
    #[must_use]
    pub fn cookie(key: impl Into<String>, value: Option<impl Into<String>>) -> Self {
        Self::new(AuthLocation::Cookie, key, value)
    }

    /// Wire name of the credential.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Injection location.
    #[must_use]
    pub const fn location(&self) -> AuthLocation {
        self.location
    }

    /// Returns true if the scheme carries a usable credential.
    #[must_use]
    pub const fn has_value(&self) -> bool {
        self.value.is_some()
    }
}

/// Credentials resolved for a single request.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AppliedAuth {
    /// Headers to add
    pub headers: Vec<(String, String)>,
    /// Query parameters to add
    pub query: Vec<(String, String)>,
    /// Cookies to add
    pub cookies: Vec<(String, String)>,
}

impl AppliedAuth {
    /// Returns true if no credential was resolved.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty() && self.query.is_empty() && self.cookies.is_empty()
    }

    fn slot(&mut self, location: AuthLocation) -> &mut Vec<(String, String)> {
        match location {
            AuthLocation::Header => &mut self.headers,
            AuthLocation::Query => &mut self.query,
            AuthLocation::Cookie => &mut self.cookies,
        }
    }
}

/// Registry of the schemes a client was constructed with.
///
/// Written while the client is being built and only read afterwards.
#[derive(Debug, Default)]
pub struct AuthRegistry {
    schemes: HashMap<String, AuthKey>,
}

impl AuthRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a scheme, replacing any earlier scheme with the same name.
    pub fn register(&mut self, name: impl Into<String>, scheme: AuthKey) {
        self.schemes.insert(name.into(), scheme);
    }

    /// Look up a scheme by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&AuthKey> {
        self.schemes.get(name)
    }

    /// Number of registered schemes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.schemes.len()
    }

    /// Returns true if nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.schemes.is_empty()
    }

    /// Resolve the credentials for `auth_names`, in order.
    ///
    /// Unregistered and valueless schemes are skipped. When two schemes target the same
    /// key at the same location, the first one listed wins.
    #[must_use]
    pub fn apply<S: AsRef<str>>(&self, auth_names: &[S]) -> AppliedAuth {
        let mut applied = AppliedAuth::default();
        for name in auth_names {
            let name = name.as_ref();
            let Some(scheme) = self.schemes.get(name) else {
                tracing::trace!(scheme = name, "auth scheme not registered, skipping");
                continue;
            };
            let Some(value) = scheme.value.as_ref() else {
                tracing::trace!(scheme = name, "auth scheme has no credential, skipping");
                continue;
            };

            let slot = applied.slot(scheme.location);
            if slot
                .iter()
                .any(|(key, _)| key.eq_ignore_ascii_case(&scheme.key))
            {
                continue;
            }
            slot.push((scheme.key.clone(), value.expose_secret().to_string()));
        }
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_registry() -> AuthRegistry {
        let mut registry = AuthRegistry::new();
        registry.register("ApiKeyAuth", AuthKey::header("x-api-key", Some("abc")));
        registry.register("CookieAuth", AuthKey::cookie("SESSION", None::<String>));
        registry
    }

    #[test]
    fn header_applied_and_valueless_cookie_skipped() {
        let registry = sample_registry();
        let applied = registry.apply(&["ApiKeyAuth", "CookieAuth"]);

        assert_eq!(
            applied.headers,
            vec![("x-api-key".to_string(), "abc".to_string())]
        );
        assert!(applied.cookies.is_empty());
        assert!(applied.query.is_empty());
    }

    #[test]
    fn unregistered_scheme_is_ignored() {
        let registry = sample_registry();
        let applied = registry.apply(&["BearerAuth"]);
        assert!(applied.is_empty());
    }

    #[test]
    fn empty_value_counts_as_missing() {
        let key = AuthKey::query("token", Some(""));
        assert!(!key.has_value());
    }

    #[test]
    fn first_scheme_wins_for_the_same_key() {
        let mut registry = AuthRegistry::new();
        registry.register("Primary", AuthKey::header("Authorization", Some("one")));
        registry.register("Fallback", AuthKey::header("authorization", Some("two")));

        let applied = registry.apply(&["Primary", "Fallback"]);
        assert_eq!(
            applied.headers,
            vec![("Authorization".to_string(), "one".to_string())]
        );

        let applied = registry.apply(&["Fallback", "Primary"]);
        assert_eq!(applied.headers[0].1, "two");
    }

    #[test]
    fn register_is_an_upsert() {
        let mut registry = sample_registry();
        registry.register("CookieAuth", AuthKey::cookie("SESSION", Some("s3")));
        assert_eq!(registry.len(), 2);

        let applied = registry.apply(&["CookieAuth"]);
        assert_eq!(
            applied.cookies,
            vec![("SESSION".to_string(), "s3".to_string())]
        );
    }

    #[test]
    fn credentials_are_redacted_in_debug_output() {
        let key = AuthKey::header("x-api-key", Some("super-secret"));
        assert!(!format!("{key:?}").contains("super-secret"));
        assert_eq!(key.location().to_string(), "header");
    }
}
