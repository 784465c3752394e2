//! Credential provider seam between the API client and the session
//!
//! The API client never reaches for ambient state: it is handed a provider
//! at construction and goes through it for the current token, for installing
//! a refreshed token, and for forcing logout when recovery fails.

use crate::auth::session::LogoutReason;
use crate::error::Result;

/// Trait for credential providers
pub trait CredentialProvider: Send + Sync {
    /// Bearer token to attach, if any
    fn access_token(&self) -> Option<String>;

    /// Install a freshly minted token (updates token store and session)
    fn token_refreshed(&self, token: &str) -> Result<()>;

    /// Recovery failed; drop the session. Must be idempotent.
    fn session_expired(&self, reason: LogoutReason);

    /// Get the provider name for logging/debugging
    fn provider_name(&self) -> &'static str {
        "CUSTOM"
    }
}
