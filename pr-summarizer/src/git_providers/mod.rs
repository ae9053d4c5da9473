//! Source-control provider access.
//!
//! Only GitHub is wired: a concrete client with plain `async fn`s, no trait
//! objects. The base API URL is configurable so tests (and GitHub Enterprise)
//! can point it elsewhere.

pub mod github;
pub mod types;

pub use github::GitHubClient;
pub use types::*;

/// Runtime configuration for the provider client.
#[derive(Clone)]
pub struct ProviderConfig {
    /// API base, e.g. "https://api.github.com"
    pub base_api: String,
    /// Access token (PAT or app installation token), sent as a bearer token.
    pub token: String,
}

impl std::fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("base_api", &self.base_api)
            .field("token", &"<redacted>")
            .finish()
    }
}
