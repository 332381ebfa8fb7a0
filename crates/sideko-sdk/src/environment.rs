//! Predefined API locations.

use std::fmt;

/// Predefined base URLs for the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Environment {
    /// Hosted production API
    #[default]
    Production,
    /// Local mock server
    MockServer,
}

impl Environment {
    /// Base URL of this environment.
    #[must_use]
    pub const fn base_url(self) -> &'static str {
        match self {
            Self::Production => "https://api.sideko.dev/v1",
            Self::MockServer => "http://127.0.0.1:8082/v1/mock/local/local-api-21/0.1.0",
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.base_url())
    }
}

/// Pick the base URL a client talks to: an explicit URL wins over the environment.
#[must_use]
pub fn resolve_base_url(base_url: Option<&str>, environment: Environment) -> String {
    base_url.map_or_else(|| environment.base_url().to_string(), str::to_string)
}
