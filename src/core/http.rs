//! HTTP client wrapper for the backend API
//!
//! Every authenticated call carries `Authorization: Bearer <token>` when the
//! credential provider has one. A 401 triggers exactly one refresh through the
//! cookie-authenticated refresh endpoint, after which the original request is
//! replayed with the new token. See [`RequestState`] for the transitions.

use reqwest::header::AUTHORIZATION;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use url::Url;

use crate::auth::provider::CredentialProvider;
use crate::auth::token::bearer_header;
use crate::config::ClientConfig;
use crate::constants::{REFRESH_FAILED, REFRESH_TOKEN_PATH, REQUEST_FAILED};
use crate::core::retry::{Outcome, RequestState};
use crate::error::{Result, TaskdeskError};
use crate::models::auth::TokenResponse;

/// Backend client shared by the auth and resource services
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    config: Arc<ClientConfig>,
    credentials: Arc<dyn CredentialProvider>,
}

impl ApiClient {
    /// Create a client. The cookie jar holds the refresh cookie between calls.
    pub fn new(config: ClientConfig, credentials: Arc<dyn CredentialProvider>) -> Result<Self> {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;

        log::debug!(
            "API client for {} using {} credentials",
            config.api_url,
            credentials.provider_name()
        );

        Ok(Self {
            http,
            config: Arc::new(config),
            credentials,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn credentials(&self) -> &Arc<dyn CredentialProvider> {
        &self.credentials
    }

    /// Authenticated GET
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.execute(Method::GET, path, None, REQUEST_FAILED).await
    }

    /// Authenticated POST with a JSON body
    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        self.post_with_fallback(path, body, REQUEST_FAILED).await
    }

    /// Authenticated POST whose errors default to `fallback`
    pub async fn post_with_fallback<B, T>(&self, path: &str, body: &B, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let body = serde_json::to_value(body)?;
        self.execute(Method::POST, path, Some(body), fallback).await
    }

    /// POST without bearer token or refresh handling, for the auth endpoints.
    ///
    /// `fallback` is the message used when the backend sends none.
    pub async fn post_public<B, T>(&self, path: &str, body: Option<&B>, fallback: &str) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.config.endpoint(path)?;
        let mut request = self.http.post(url);
        if let Some(body) = body {
            request = request.json(body);
        }

        log::debug!("POST {} (public)", path);
        let response = request.send().await?;

        if response.status().is_success() {
            read_body(response).await
        } else {
            Err(error_from_response(response, fallback).await)
        }
    }

    /// Mint a new access token from the refresh cookie
    pub async fn refresh_access_token(&self) -> Result<String> {
        let response: TokenResponse = self
            .post_public::<(), _>(REFRESH_TOKEN_PATH, None, REFRESH_FAILED)
            .await?;
        Ok(response.access_token)
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
        fallback: &str,
    ) -> Result<T> {
        let url = self.config.endpoint(path)?;
        let mut state = RequestState::start();
        let mut completed: Option<reqwest::Response> = None;
        let mut last_error: Option<TaskdeskError> = None;

        loop {
            state = match state {
                RequestState::Sent(attempt) => {
                    log::debug!("{} {} ({:?})", method, path, attempt);
                    match self.dispatch(&method, &url, body.as_ref()).await {
                        Ok(response) => {
                            let outcome = Outcome::from_status(response.status().as_u16());
                            if outcome == Outcome::Success {
                                completed = Some(response);
                            } else {
                                last_error = Some(error_from_response(response, fallback).await);
                            }
                            state.on_response(outcome)
                        }
                        Err(e) => {
                            last_error = Some(e.into());
                            state.on_response(Outcome::Transport)
                        }
                    }
                }
                RequestState::Refreshing => {
                    log::debug!("{} {} returned 401, refreshing access token", method, path);
                    let refreshed = match self.refresh_access_token().await {
                        Ok(token) => self.credentials.token_refreshed(&token),
                        Err(e) => Err(e),
                    };
                    if let Err(ref e) = refreshed {
                        log::warn!("Token refresh failed: {}", e);
                    }
                    state.on_refresh(refreshed.is_ok())
                }
                RequestState::Done => {
                    let response = completed.take().ok_or_else(|| {
                        TaskdeskError::Transport("completed request has no response".to_string())
                    })?;
                    return read_body(response).await;
                }
                RequestState::Failed(failure) => {
                    if let Some(reason) = failure.logout_reason() {
                        log::warn!("{} {} could not be recovered ({:?}), logging out", method, path, failure);
                        self.credentials.session_expired(reason);
                        return Err(TaskdeskError::SessionExpired);
                    }
                    return Err(last_error
                        .take()
                        .unwrap_or_else(|| TaskdeskError::Transport(fallback.to_string())));
                }
            };
        }
    }

    async fn dispatch(
        &self,
        method: &Method,
        url: &Url,
        body: Option<&serde_json::Value>,
    ) -> reqwest::Result<reqwest::Response> {
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(token) = self.credentials.access_token() {
            request = request.header(AUTHORIZATION, bearer_header(&token));
        }
        if let Some(body) = body {
            request = request.json(body);
        }
        request.send().await
    }
}

/// Decode a success body; an empty body reads as JSON `null`
async fn read_body<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let bytes = response.bytes().await?;
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(serde_json::from_value(serde_json::Value::Null)?);
    }
    Ok(serde_json::from_slice(&bytes)?)
}

async fn error_from_response(response: reqwest::Response, fallback: &str) -> TaskdeskError {
    let status = response.status();
    let message = response
        .text()
        .await
        .ok()
        .and_then(|body| backend_message(&body))
        .unwrap_or_else(|| fallback.to_string());

    if status == StatusCode::UNAUTHORIZED {
        TaskdeskError::Unauthorized(message)
    } else {
        TaskdeskError::Api {
            status: status.as_u16(),
            message,
        }
    }
}

/// Pull the human-readable message out of an error body, if there is one
pub fn backend_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    ["detail", "message", "error"].iter().find_map(|key| {
        value
            .get(key)
            .and_then(|v| v.as_str())
            .map(str::trim)
            .filter(|msg| !msg.is_empty())
            .map(str::to_string)
    })
}
