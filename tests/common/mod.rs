// Fake Taskdesk backend for integration tests
// Serves the auth endpoints plus a catch-all for every protected /api route

#![allow(dead_code)]

use serde_json::{json, Value};
use std::sync::{Arc, Mutex};
use warp::http::{Method, StatusCode};
use warp::hyper::body::Bytes;
use warp::path::FullPath;
use warp::reply::Response;
use warp::{Filter, Reply};

pub const PASSWORD: &str = "secret";
pub const REFRESH_COOKIE: &str = "refresh_token";

#[derive(Debug, Clone)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub authorization: Option<String>,
    pub body: Value,
}

#[derive(Debug)]
pub struct BackendState {
    /// Token handed out by /api/login
    pub login_token: String,
    /// Bearer the protected routes accept
    pub accepted_token: String,
    /// Token handed out by /api/refresh-token; `None` makes refresh fail
    pub refreshed_token: Option<String>,
    /// Reject every protected call, even with the accepted token
    pub always_unauthorized: bool,
    /// Protected path that answers 500
    pub failing_path: Option<String>,
    pub refresh_calls: usize,
    pub refresh_saw_cookie: bool,
    pub requests: Vec<Recorded>,
}

impl BackendState {
    pub fn new(login_token: &str) -> Self {
        Self {
            login_token: login_token.to_string(),
            accepted_token: login_token.to_string(),
            refreshed_token: None,
            always_unauthorized: false,
            failing_path: None,
            refresh_calls: 0,
            refresh_saw_cookie: false,
            requests: Vec::new(),
        }
    }

    /// Requests made against protected routes, in order
    pub fn requests_to(&self, path: &str) -> Vec<Recorded> {
        self.requests
            .iter()
            .filter(|r| r.path == path)
            .cloned()
            .collect()
    }
}

pub type SharedState = Arc<Mutex<BackendState>>;

/// Mint an access token shaped like the backend's
pub fn mint_token(user_id: i64, permissions: &str, nonce: &str) -> String {
    let claims = json!({
        "user_id": user_id,
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada@example.com",
        "role_name": "admin",
        "role_permissions": permissions,
        "type": "access",
        "nonce": nonce,
    });
    jsonwebtoken::encode(
        &jsonwebtoken::Header::default(),
        &claims,
        &jsonwebtoken::EncodingKey::from_secret(b"backend-only-secret"),
    )
    .unwrap()
}

fn json_reply(status: StatusCode, body: Value) -> Response {
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

fn with_state(
    state: SharedState,
) -> impl Filter<Extract = (SharedState,), Error = std::convert::Infallible> + Clone {
    warp::any().map(move || state.clone())
}

/// Start the backend on an ephemeral port; returns its base URL
pub async fn spawn_backend(state: BackendState) -> (String, SharedState) {
    let shared: SharedState = Arc::new(Mutex::new(state));

    let login = warp::post()
        .and(warp::path!("api" / "login"))
        .and(warp::body::json())
        .and(with_state(shared.clone()))
        .map(|body: Value, state: SharedState| {
            let state = state.lock().unwrap();
            if body["plain_password"] == PASSWORD {
                let reply = json_reply(
                    StatusCode::OK,
                    json!({ "access_token": state.login_token }),
                );
                warp::reply::with_header(
                    reply,
                    "set-cookie",
                    format!("{}=rt-1; HttpOnly; Path=/", REFRESH_COOKIE),
                )
                .into_response()
            } else {
                json_reply(
                    StatusCode::UNAUTHORIZED,
                    json!({ "detail": "Invalid credentials" }),
                )
            }
        });

    let refresh = warp::post()
        .and(warp::path!("api" / "refresh-token"))
        .and(warp::cookie::optional::<String>(REFRESH_COOKIE))
        .and(with_state(shared.clone()))
        .map(|cookie: Option<String>, state: SharedState| {
            let mut state = state.lock().unwrap();
            state.refresh_calls += 1;
            state.refresh_saw_cookie |= cookie.is_some();
            match state.refreshed_token.clone() {
                Some(token) => {
                    state.accepted_token = token.clone();
                    json_reply(StatusCode::OK, json!({ "access_token": token }))
                }
                None => json_reply(
                    StatusCode::UNAUTHORIZED,
                    json!({ "detail": "Refresh token expired" }),
                ),
            }
        });

    let google = warp::post()
        .and(warp::path!("api" / "login" / "google"))
        .and(warp::body::json())
        .and(with_state(shared.clone()))
        .map(|body: Value, state: SharedState| {
            let state = state.lock().unwrap();
            if body["token"] == "known-google-id" {
                json_reply(StatusCode::OK, json!({ "access_token": state.login_token }))
            } else {
                json_reply(
                    StatusCode::OK,
                    json!({
                        "status": "register",
                        "first_name": "Grace",
                        "last_name": null,
                        "email": "grace@example.com"
                    }),
                )
            }
        });

    let protected = warp::method()
        .and(warp::path::full())
        .and(warp::header::optional::<String>("authorization"))
        .and(warp::body::bytes())
        .and(with_state(shared.clone()))
        .map(
            |method: Method,
             path: FullPath,
             authorization: Option<String>,
             body: Bytes,
             state: SharedState| {
                let mut state = state.lock().unwrap();
                let path = path.as_str().to_string();
                state.requests.push(Recorded {
                    method: method.to_string(),
                    path: path.clone(),
                    authorization: authorization.clone(),
                    body: serde_json::from_slice(&body).unwrap_or(Value::Null),
                });

                let expected = format!("Bearer {}", state.accepted_token);
                if state.always_unauthorized || authorization.as_deref() != Some(expected.as_str())
                {
                    return json_reply(
                        StatusCode::UNAUTHORIZED,
                        json!({ "detail": "Token expired" }),
                    );
                }

                if state.failing_path.as_deref() == Some(path.as_str()) {
                    return json_reply(
                        StatusCode::INTERNAL_SERVER_ERROR,
                        json!({ "detail": "Database unavailable" }),
                    );
                }

                if method == Method::POST {
                    return json_reply(StatusCode::OK, json!({ "message": "ok" }));
                }

                json_reply(StatusCode::OK, fixture(&path))
            },
        );

    let routes = login.or(google).or(refresh).or(protected);
    let (addr, server) = warp::serve(routes).bind_ephemeral(([127, 0, 0, 1], 0));
    tokio::spawn(server);

    (format!("http://{}", addr), shared)
}

fn fixture(path: &str) -> Value {
    match path {
        "/api/projects" => json!([
            {
                "project_id": 1,
                "project_name": "Apollo",
                "project_description": "Moon",
                "project_start_date": "2024-01-01",
                "project_end_date": "2024-12-31",
                "owner_id": 1,
                "project_active": true
            },
            {
                "project_id": 2,
                "project_name": "Gemini",
                "project_description": "Orbit",
                "project_start_date": "2023-01-01",
                "project_end_date": "2023-06-30",
                "owner_id": 1,
                "project_active": false
            }
        ]),
        "/api/projects/1" => json!({
            "project_id": 1,
            "project_name": "Apollo",
            "project_description": "Moon",
            "project_start_date": "2024-01-01",
            "project_end_date": "2024-12-31",
            "owner_id": 1,
            "project_active": true
        }),
        "/api/projects/7/tasks" => json!([task_row(70, 7)]),
        "/api/tasks/80" => task_row(80, 8),
        "/api/users/4" => json!({
            "user_id": 4,
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "grace@example.com",
            "provider": "local",
            "role_id": 3
        }),
        "/api/roles/2" => json!({
            "role_id": 2,
            "role_name": "viewer",
            "role_permissions": "['view_project']"
        }),
        "/api/taskstatus/3" => json!({ "task_status_id": 3, "task_status_name": "Done" }),
        "/api/tasks" => json!([task_row(70, 7), task_row(80, 8)]),
        "/api/role_permissions" => json!([
            { "role_permissions_name": "view_project" },
            { "role_permissions_name": "update_project" }
        ]),
        _ => json!([]),
    }
}

pub fn task_row(task_id: i64, project_id: i64) -> Value {
    json!({
        "task_id": task_id,
        "task_description": "Write the report",
        "task_due_date": "2024-03-01",
        "task_status_id": 1,
        "owner_id": 1,
        "project_id": project_id,
        "task_active": true,
        "created_by_email": "ada@example.com",
        "modified_by_email": "ada@example.com"
    })
}
