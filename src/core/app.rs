//! Client facade wiring the session, the API client and the services together

use std::sync::Arc;

use crate::auth::permissions::Entity;
use crate::auth::provider::CredentialProvider;
use crate::auth::session::{LogoutReason, Session, SessionContext};
use crate::auth::token_store::{create_token_store, SharedTokenStore};
use crate::config::ClientConfig;
use crate::core::http::ApiClient;
use crate::core::router::{navigate, Navigation};
use crate::error::{Result, TaskdeskError};
use crate::models::auth::{GoogleLoginOutcome, RegisterRequest};
use crate::security_logger::{SecurityEvent, SecurityLogger};
use crate::services::{
    AuthService, ProjectService, RoleService, TaskService, TaskStatusService, UserService,
};
use crate::views::Affordances;

/// One signed-in (or signed-out) client of the backend
pub struct Taskdesk {
    tokens: SharedTokenStore,
    session: Arc<SessionContext>,
    client: ApiClient,
    auth: AuthService,
    projects: ProjectService,
    tasks: TaskService,
    users: UserService,
    roles: RoleService,
    task_statuses: TaskStatusService,
}

impl Taskdesk {
    pub fn new(config: ClientConfig) -> Result<Self> {
        Self::with_security(config, Arc::new(SecurityLogger::new()))
    }

    pub fn from_env() -> Result<Self> {
        Self::new(ClientConfig::from_env()?)
    }

    /// Build with a caller-owned security logger
    pub fn with_security(config: ClientConfig, security: Arc<SecurityLogger>) -> Result<Self> {
        let tokens = create_token_store();
        let session = Arc::new(SessionContext::new(tokens.clone(), security));
        let credentials: Arc<dyn CredentialProvider> = session.clone();
        let client = ApiClient::new(config, credentials)?;

        log::info!("Taskdesk client ready for {}", client.config().api_url);

        Ok(Self {
            tokens,
            session,
            auth: AuthService::new(client.clone()),
            projects: ProjectService::new(client.clone()),
            tasks: TaskService::new(client.clone()),
            users: UserService::new(client.clone()),
            roles: RoleService::new(client.clone()),
            task_statuses: TaskStatusService::new(client.clone()),
            client,
        })
    }

    /// Log in with email and password and make the returned token the session
    pub async fn login(&self, email: &str, password: &str) -> Result<Session> {
        let email = email.trim();
        let result = match self.auth.login(email, password).await {
            Ok(response) => self.session.login(&response.access_token),
            Err(e) => Err(e),
        };
        if let Err(ref e) = result {
            self.login_failed(Some(email), e);
        }
        result
    }

    /// Log in with a Google ID token.
    ///
    /// A known account is signed in right away. An unknown one returns the
    /// prefilled profile for [`register`](Self::register).
    pub async fn login_with_google(&self, id_token: &str) -> Result<GoogleLoginOutcome> {
        let result = match self.auth.google_login(id_token).await {
            Ok(GoogleLoginOutcome::Authenticated(token)) => self
                .session
                .login(&token)
                .map(|_| GoogleLoginOutcome::Authenticated(token)),
            other => other,
        };
        if let Err(ref e) = result {
            self.login_failed(None, e);
        }
        result
    }

    /// Covers both a rejected request and a token that does not decode
    fn login_failed(&self, email: Option<&str>, error: &TaskdeskError) {
        self.security().log_event(SecurityEvent::LoginFailed {
            email: email.map(str::to_string),
            reason: error.user_message(),
        });
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value> {
        self.auth.register(request).await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<serde_json::Value> {
        self.auth.forgot_password(email).await
    }

    /// Restore a session from the refresh cookie, e.g. on start-up
    pub async fn restore(&self) -> Result<Session> {
        match self.auth.refresh().await {
            Ok(response) => {
                self.session.token_refreshed(&response.access_token)?;
                self.session
                    .current()
                    .ok_or(TaskdeskError::NotAuthenticated)
            }
            Err(e) => {
                log::info!("No session to restore: {}", e);
                self.session.session_expired(LogoutReason::RefreshFailed);
                Err(e)
            }
        }
    }

    pub fn logout(&self) {
        log::info!("Logging out");
        self.session.logout();
    }

    /// Resolve a client route against the current session
    pub fn navigate(&self, path: &str) -> Navigation {
        navigate(path, &self.session)
    }

    pub fn affordances(&self, entity: Entity) -> Affordances {
        Affordances::for_entity(&self.session, entity)
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_token(&self) -> Option<String> {
        self.tokens.get()
    }

    pub fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    pub fn security(&self) -> &Arc<SecurityLogger> {
        self.session.security()
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }

    pub fn auth(&self) -> &AuthService {
        &self.auth
    }

    pub fn projects(&self) -> &ProjectService {
        &self.projects
    }

    pub fn tasks(&self) -> &TaskService {
        &self.tasks
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }

    pub fn roles(&self) -> &RoleService {
        &self.roles
    }

    pub fn task_statuses(&self) -> &TaskStatusService {
        &self.task_statuses
    }
}
