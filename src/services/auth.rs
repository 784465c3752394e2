//! Calls against the authentication endpoints
//!
//! Everything except `forgot_password` is public: no bearer token, no refresh.

use crate::constants::{
    FORGOT_PASSWORD_FAILED, FORGOT_PASSWORD_PATH, GOOGLE_LOGIN_FAILED, GOOGLE_LOGIN_PATH,
    LOGIN_FAILED, LOGIN_PATH, REGISTER_PATH, REGISTRATION_FAILED,
};
use crate::core::http::ApiClient;
use crate::error::{Result, TaskdeskError};
use crate::models::auth::{
    ForgotPasswordRequest, GoogleLoginOutcome, GoogleLoginRequest, GoogleLoginResponse,
    LoginRequest, RegisterRequest, TokenResponse,
};

const REGISTER_STATUS: &str = "register";

#[derive(Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// Exchange email and password for an access token
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenResponse> {
        let body = LoginRequest {
            email: email.trim().to_string(),
            plain_password: password.to_string(),
        };
        self.client
            .post_public(LOGIN_PATH, Some(&body), LOGIN_FAILED)
            .await
    }

    /// Create an account. The backend's acknowledgement is returned as-is.
    pub async fn register(&self, request: &RegisterRequest) -> Result<serde_json::Value> {
        log::debug!("Registering {} via {}", request.email, request.provider);
        self.client
            .post_public(REGISTER_PATH, Some(request), REGISTRATION_FAILED)
            .await
    }

    pub async fn forgot_password(&self, email: &str) -> Result<serde_json::Value> {
        let body = ForgotPasswordRequest {
            email: email.trim().to_string(),
        };
        self.client
            .post_with_fallback(FORGOT_PASSWORD_PATH, &body, FORGOT_PASSWORD_FAILED)
            .await
    }

    /// Mint a new access token from the refresh cookie
    pub async fn refresh(&self) -> Result<TokenResponse> {
        let access_token = self.client.refresh_access_token().await?;
        Ok(TokenResponse { access_token })
    }

    /// Sign in with a Google ID token.
    ///
    /// An account the backend does not know yet comes back as
    /// [`GoogleLoginOutcome::Register`] with the profile to prefill.
    pub async fn google_login(&self, id_token: &str) -> Result<GoogleLoginOutcome> {
        let body = GoogleLoginRequest {
            token: id_token.to_string(),
        };
        let response: GoogleLoginResponse = self
            .client
            .post_public(GOOGLE_LOGIN_PATH, Some(&body), GOOGLE_LOGIN_FAILED)
            .await?;

        match response {
            GoogleLoginResponse::Authenticated { access_token } => {
                Ok(GoogleLoginOutcome::Authenticated(access_token))
            }
            GoogleLoginResponse::Prefill { status, profile } if status == REGISTER_STATUS => {
                Ok(GoogleLoginOutcome::Register(profile))
            }
            GoogleLoginResponse::Prefill { status, .. } => {
                log::warn!("Unexpected Google login status: {}", status);
                Err(TaskdeskError::Serialization(format!(
                    "unexpected Google login status '{}'",
                    status
                )))
            }
        }
    }
}
