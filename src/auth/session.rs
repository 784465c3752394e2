//! Session context: the decoded identity behind the current bearer token
//!
//! At most one session is live per client. Logging in decodes the token,
//! parses its permission claim and pushes the token into the shared
//! [`TokenStore`](crate::auth::token_store::TokenStore); logging out clears
//! both and may be called any number of times.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

use crate::auth::permissions::{capability, Action, Entity, PermissionSet};
use crate::auth::provider::CredentialProvider;
use crate::auth::token::{decode_claims, Claims};
use crate::auth::token_store::SharedTokenStore;
use crate::error::{Result, TaskdeskError};
use crate::security_logger::{SecurityEvent, SecurityLogger};

/// Why a session ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogoutReason {
    /// The user asked to log out
    UserRequested,
    /// The refresh cookie was rejected or the refresh call failed
    RefreshFailed,
    /// The replayed request was still unauthorized after a refresh
    ReplayRejected,
}

/// Identity fields decoded from the access token
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub role_name: String,
}

impl SessionUser {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl From<&Claims> for SessionUser {
    fn from(claims: &Claims) -> Self {
        Self {
            user_id: claims.user_id,
            first_name: claims.first_name.clone(),
            last_name: claims.last_name.clone(),
            email: claims.email.clone(),
            role_name: claims.role_name.clone(),
        }
    }
}

/// A live session
#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: String,
    pub user: SessionUser,
    pub permissions: PermissionSet,
}

impl Session {
    fn from_claims(token: &str, claims: &Claims, permissions: PermissionSet) -> Self {
        Self {
            token: token.trim().to_string(),
            user: SessionUser::from(claims),
            permissions,
        }
    }

    pub fn can(&self, name: &str) -> bool {
        self.permissions.contains(name)
    }

    pub fn allows(&self, action: Action, entity: Entity) -> bool {
        self.permissions.allows(action, entity)
    }
}

/// A non-empty claim that produced no permissions was not understood
fn claim_is_malformed(claims: &Claims, parsed: &PermissionSet) -> bool {
    if !parsed.is_empty() {
        return false;
    }
    match &claims.role_permissions {
        serde_json::Value::Null => false,
        serde_json::Value::String(raw) => {
            let raw = raw.trim();
            !(raw.is_empty() || raw == "[]")
        }
        serde_json::Value::Array(items) => !items.is_empty(),
        _ => true,
    }
}

/// Holder of the current session, shared by the API client and the screens
pub struct SessionContext {
    tokens: SharedTokenStore,
    current: RwLock<Option<Session>>,
    security: Arc<SecurityLogger>,
}

impl SessionContext {
    pub fn new(tokens: SharedTokenStore, security: Arc<SecurityLogger>) -> Self {
        Self {
            tokens,
            current: RwLock::new(None),
            security,
        }
    }

    /// Decode `token` and make it the live session.
    ///
    /// A token that does not decode leaves the previous state untouched.
    pub fn login(&self, token: &str) -> Result<Session> {
        let claims = match decode_claims(token) {
            Ok(claims) => claims,
            Err(e) => {
                self.security.log_event(SecurityEvent::TokenRejected {
                    reason: e.to_string(),
                });
                return Err(e);
            }
        };

        let permissions = claims.permissions();
        if claim_is_malformed(&claims, &permissions) {
            self.security.log_event(SecurityEvent::MalformedPermissionClaim {
                user_id: claims.user_id,
            });
        }

        let session = Session::from_claims(token, &claims, permissions);

        {
            let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
            *current = Some(session.clone());
        }
        self.tokens.set(Some(session.token.clone()));

        self.security.log_event(SecurityEvent::SessionEstablished {
            user_id: session.user.user_id,
            email: session.user.email.clone(),
        });

        Ok(session)
    }

    /// User-initiated logout
    pub fn logout(&self) {
        self.end_session(LogoutReason::UserRequested);
    }

    /// Clear identity and token; safe to call repeatedly
    pub fn end_session(&self, reason: LogoutReason) {
        let previous = {
            let mut current = self.current.write().unwrap_or_else(|p| p.into_inner());
            current.take()
        };
        self.tokens.clear();

        if let Some(session) = previous {
            self.security.log_event(SecurityEvent::SessionCleared {
                user_id: Some(session.user.user_id),
                reason,
            });
        }
    }

    pub fn current(&self) -> Option<Session> {
        self.current
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }

    pub fn user(&self) -> Option<SessionUser> {
        self.current().map(|s| s.user)
    }

    pub fn permissions(&self) -> PermissionSet {
        self.current().map(|s| s.permissions).unwrap_or_default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .is_some()
    }

    /// Membership test against the live permission set
    pub fn can(&self, name: &str) -> bool {
        self.current
            .read()
            .unwrap_or_else(|p| p.into_inner())
            .as_ref()
            .map_or(false, |s| s.can(name))
    }

    pub fn can_perform(&self, action: Action, entity: Entity) -> bool {
        self.can(&capability(action, entity))
    }

    /// Like [`can_perform`](Self::can_perform), but as an error for callers
    /// that have no button to disable
    pub fn require(&self, action: Action, entity: Entity) -> Result<()> {
        let user_id = match self.current() {
            Some(session) if session.allows(action, entity) => return Ok(()),
            Some(session) => Some(session.user.user_id),
            None => return Err(TaskdeskError::NotAuthenticated),
        };

        let name = capability(action, entity);
        self.security.log_event(SecurityEvent::PermissionDenied {
            user_id,
            capability: name.clone(),
        });
        Err(TaskdeskError::PermissionDenied(format!("missing '{}'", name)))
    }

    /// Email used for the audit fields of create/update payloads
    pub fn actor_email(&self) -> Result<String> {
        self.user()
            .map(|u| u.email)
            .ok_or(TaskdeskError::NotAuthenticated)
    }

    pub fn security(&self) -> &Arc<SecurityLogger> {
        &self.security
    }
}

impl CredentialProvider for SessionContext {
    fn access_token(&self) -> Option<String> {
        self.tokens.get()
    }

    fn token_refreshed(&self, token: &str) -> Result<()> {
        let session = self.login(token)?;
        self.security.log_event(SecurityEvent::TokenRefreshed {
            user_id: session.user.user_id,
        });
        Ok(())
    }

    fn session_expired(&self, reason: LogoutReason) {
        if reason == LogoutReason::RefreshFailed {
            self.security.log_event(SecurityEvent::RefreshFailed {
                reason: "refresh endpoint rejected the cookie".to_string(),
            });
        }
        self.end_session(reason);
    }

    fn provider_name(&self) -> &'static str {
        "SESSION"
    }
}
