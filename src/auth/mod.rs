//! Authentication and authorization module

pub mod permissions;
pub mod provider;
pub mod session;
pub mod token;
pub mod token_store;

// Re-export main components
pub use permissions::{capability, Action, Entity, PermissionSet};
pub use provider::CredentialProvider;
pub use session::{LogoutReason, Session, SessionContext, SessionUser};
pub use token::{decode_claims, Claims};
pub use token_store::{create_token_store, SharedTokenStore, TokenStore};
