// Integration tests for the Taskdesk client against a fake backend
// Covers bearer propagation, the single refresh retry and soft deletes

mod common;

use common::{mint_token, spawn_backend, task_row, BackendState, PASSWORD};
use serde_json::{json, Value};
use std::future::Future;
use std::pin::Pin;
use taskdesk::auth::permissions::Entity;
use taskdesk::core::router::{Navigation, Route};
use taskdesk::models::{GoogleLoginOutcome, Project, RegisterRequest, Task};
use taskdesk::views::EntityList;
use taskdesk::{ClientConfig, Taskdesk, TaskdeskError};

const EMAIL: &str = "ada@example.com";

async fn signed_in(state: BackendState) -> (Taskdesk, common::SharedState) {
    let (url, backend) = spawn_backend(state).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();
    app.login(EMAIL, PASSWORD).await.unwrap();
    (app, backend)
}

#[tokio::test]
async fn test_login_parses_permission_claim() {
    let token = mint_token(1, "['read', 'update_project']", "a");
    let (url, _backend) = spawn_backend(BackendState::new(&token)).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();

    let session = app.login(EMAIL, PASSWORD).await.unwrap();

    assert_eq!(session.permissions.len(), 2);
    assert!(session.can("read"));
    assert!(session.can("update_project"));
    assert_eq!(session.user.full_name(), "Ada Lovelace");
    assert_eq!(app.current_token(), Some(token));
    assert_eq!(app.security().event_count("session_established"), 1);

    let affordances = app.affordances(Entity::Project);
    assert!(affordances.can_edit);
    assert!(!affordances.can_delete);
}

#[tokio::test]
async fn test_login_failure_surfaces_backend_detail() {
    let token = mint_token(1, "['read']", "a");
    let (url, _backend) = spawn_backend(BackendState::new(&token)).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();

    let err = app.login(EMAIL, "wrong").await.unwrap_err();

    assert_eq!(err.user_message(), "Invalid credentials");
    assert!(!app.is_authenticated());
    assert_eq!(app.current_token(), None);
    assert_eq!(app.security().event_count("login_failed"), 1);
}

#[tokio::test]
async fn test_bearer_attached_to_protected_calls() {
    let token = mint_token(1, "['view_project']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    let projects = app.projects().list().await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[0].project_name, "Apollo");

    let active = app.projects().list_active().await.unwrap();
    assert_eq!(active.len(), 1);

    let state = backend.lock().unwrap();
    let calls = state.requests_to("/api/projects");
    assert_eq!(calls.len(), 2);
    assert!(calls
        .iter()
        .all(|c| c.authorization.as_deref() == Some(format!("Bearer {}", token).as_str())));
    assert_eq!(state.refresh_calls, 0);
}

#[tokio::test]
async fn test_expired_token_refreshes_once_and_replays() {
    let stale = mint_token(1, "['view_project']", "stale");
    let fresh = mint_token(1, "['view_project','delete_project']", "fresh");
    let mut state = BackendState::new(&stale);
    state.accepted_token = "something-else".to_string();
    state.refreshed_token = Some(fresh.clone());
    let (app, backend) = signed_in(state).await;

    let projects = app.projects().list().await.unwrap();
    assert_eq!(projects.len(), 2);

    {
        let state = backend.lock().unwrap();
        assert_eq!(state.refresh_calls, 1);
        assert!(state.refresh_saw_cookie);

        let calls = state.requests_to("/api/projects");
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[0].authorization, Some(format!("Bearer {}", stale)));
        assert_eq!(calls[1].authorization, Some(format!("Bearer {}", fresh)));
    }

    // The refreshed token is the live session now
    assert_eq!(app.current_token(), Some(fresh));
    assert!(app.session().can("delete_project"));
    assert_eq!(app.security().event_count("token_refreshed"), 1);
}

#[tokio::test]
async fn test_second_unauthorized_logs_out() {
    let token = mint_token(1, "['view_project']", "a");
    let mut state = BackendState::new(&token);
    state.always_unauthorized = true;
    state.refreshed_token = Some(mint_token(1, "['view_project']", "b"));
    let (app, backend) = signed_in(state).await;

    let err = app.projects().list().await.unwrap_err();

    assert!(matches!(err, TaskdeskError::SessionExpired));
    assert!(!app.is_authenticated());
    assert_eq!(app.current_token(), None);
    {
        let state = backend.lock().unwrap();
        assert_eq!(state.refresh_calls, 1);
        assert_eq!(state.requests_to("/api/projects").len(), 2);
    }

    assert_eq!(app.navigate("/projects"), Navigation::Redirect(Route::Login));
}

#[tokio::test]
async fn test_refresh_failure_logs_out() {
    let token = mint_token(1, "['view_project']", "a");
    let mut state = BackendState::new(&token);
    state.accepted_token = "something-else".to_string();
    let (app, backend) = signed_in(state).await;

    let err = app.projects().list().await.unwrap_err();

    assert!(matches!(err, TaskdeskError::SessionExpired));
    assert!(!app.is_authenticated());
    assert_eq!(backend.lock().unwrap().refresh_calls, 1);
    // Only the original request went out
    assert_eq!(backend.lock().unwrap().requests_to("/api/projects").len(), 1);
    assert_eq!(app.security().event_count("refresh_failed"), 1);
    assert_eq!(app.security().event_count("session_cleared"), 1);
}

#[tokio::test]
async fn test_deactivate_posts_update_endpoint() {
    let token = mint_token(1, "['delete_project']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    app.projects().deactivate(5, EMAIL).await.unwrap();

    let state = backend.lock().unwrap();
    let calls = state.requests_to("/api/update_project");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].method, "POST");
    assert_eq!(
        calls[0].body,
        json!({ "project_id": 5, "project_active": false, "modified_by_email": EMAIL })
    );
    assert!(state.requests.iter().all(|r| r.method != "DELETE"));
}

#[tokio::test]
async fn test_task_status_change_sends_full_row() {
    let token = mint_token(1, "['update_taskstatus_in_task']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    let tasks: Vec<Task> = app.tasks().list_for_project(7).await.unwrap();
    assert_eq!(tasks.len(), 1);

    app.tasks().change_status(&tasks[0], 3, EMAIL).await.unwrap();

    let state = backend.lock().unwrap();
    let calls = state.requests_to("/api/update_taskstatus_in_task");
    assert_eq!(calls.len(), 1);
    let mut expected = task_row(70, 7);
    expected["task_status_id"] = json!(3);
    assert_eq!(calls[0].body, expected);
}

#[tokio::test]
async fn test_role_permission_catalogue() {
    let token = mint_token(1, "['view_role']", "a");
    let (app, _backend) = signed_in(BackendState::new(&token)).await;

    let catalogue = app.roles().list_permissions().await.unwrap();
    let names: Vec<&str> = catalogue
        .iter()
        .map(|p| p.role_permissions_name.as_str())
        .collect();
    assert_eq!(names, vec!["view_project", "update_project"]);
}

#[tokio::test]
async fn test_failed_reload_keeps_last_rows() {
    let token = mint_token(1, "['view_project']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    let mut list: EntityList<Project> = EntityList::new(Entity::Project);
    assert!(list.reload(app.projects().list()).await);
    assert_eq!(list.items().len(), 2);

    backend.lock().unwrap().failing_path = Some("/api/projects".to_string());
    assert!(!list.reload(app.projects().list()).await);

    assert_eq!(list.items().len(), 2);
    assert_eq!(list.error(), Some("Failed to load projects"));
    // A server error is not an auth failure
    assert!(app.is_authenticated());
}

#[tokio::test]
async fn test_backend_error_message_passes_through() {
    let token = mint_token(1, "['update_project']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;
    backend.lock().unwrap().failing_path = Some("/api/update_project".to_string());

    let err = app
        .projects()
        .deactivate(1, EMAIL)
        .await
        .unwrap_err();

    match err {
        TaskdeskError::Api { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_google_login_outcomes() {
    let token = mint_token(1, "['read']", "a");
    let (url, _backend) = spawn_backend(BackendState::new(&token)).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();

    let outcome = app.login_with_google("new-google-id").await.unwrap();
    let prefill = match outcome {
        GoogleLoginOutcome::Register(prefill) => prefill,
        other => panic!("expected registration, got {:?}", other),
    };
    assert_eq!(prefill.email, "grace@example.com");
    // Google profile without a family name
    assert_eq!(prefill.last_name, "");
    assert!(!app.is_authenticated());

    let request = RegisterRequest::from_google(&prefill, "pw");
    assert_eq!(request.provider, "google");
    assert_eq!(request.first_name, "Grace");

    let outcome = app.login_with_google("known-google-id").await.unwrap();
    assert!(matches!(outcome, GoogleLoginOutcome::Authenticated(_)));
    assert!(app.is_authenticated());
}

#[tokio::test]
async fn test_forgot_password_carries_bearer() {
    let token = mint_token(1, "['read']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    app.forgot_password(EMAIL).await.unwrap();

    let state = backend.lock().unwrap();
    let calls = state.requests_to("/api/forgot-password");
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].body, json!({ "email": EMAIL }));
    assert_eq!(calls[0].authorization, Some(format!("Bearer {}", token)));
}

#[tokio::test]
async fn test_logout_then_protected_route_redirects() {
    let token = mint_token(1, "['read']", "a");
    let (app, _backend) = signed_in(BackendState::new(&token)).await;

    assert_eq!(app.navigate("/"), Navigation::Redirect(Route::Projects));
    assert_eq!(app.navigate("/users"), Navigation::Render(Route::Users));

    app.logout();
    app.logout();

    assert_eq!(app.navigate("/users"), Navigation::Redirect(Route::Login));
    assert_eq!(app.navigate("/login"), Navigation::Render(Route::Login));
    assert_eq!(app.security().event_count("session_cleared"), 1);
}

#[tokio::test]
async fn test_undecodable_login_token_counts_as_failed_login() {
    let (url, _backend) = spawn_backend(BackendState::new("not-a-jwt")).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();

    let err = app.login(EMAIL, PASSWORD).await.unwrap_err();

    assert!(matches!(err, TaskdeskError::InvalidToken(_)));
    assert!(!app.is_authenticated());
    assert_eq!(app.security().event_count("token_rejected"), 1);
    assert_eq!(app.security().event_count("login_failed"), 1);
}

#[tokio::test]
async fn test_get_by_id_for_every_entity() {
    let token = mint_token(1, "['read']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    let project = app.projects().get(1).await.unwrap();
    assert_eq!(project.project_name, "Apollo");
    let task = app.tasks().get(80).await.unwrap();
    assert_eq!(task.project_id, 8);
    let user = app.users().get(4).await.unwrap();
    assert_eq!(user.full_name(), "Grace Hopper");
    let role = app.roles().get(2).await.unwrap();
    assert!(role.permissions().contains("view_project"));
    let status = app.task_statuses().get(3).await.unwrap();
    assert_eq!(status.task_status_name, "Done");

    let state = backend.lock().unwrap();
    let paths: Vec<&str> = state.requests.iter().map(|r| r.path.as_str()).collect();
    assert_eq!(
        paths,
        vec![
            "/api/projects/1",
            "/api/tasks/80",
            "/api/users/4",
            "/api/roles/2",
            "/api/taskstatus/3"
        ]
    );
    assert!(state.requests.iter().all(|r| r.method == "GET"));
}

type Pending<'a> = Pin<Box<dyn Future<Output = taskdesk::Result<Value>> + 'a>>;

#[tokio::test]
async fn test_deactivate_every_entity() {
    let token = mint_token(1, "['read']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;

    let cases: Vec<(&str, Value, Pending<'_>)> = vec![
        (
            "/api/update_project",
            json!({ "project_id": 5, "project_active": false, "modified_by_email": EMAIL }),
            Box::pin(app.projects().deactivate(5, EMAIL)),
        ),
        (
            "/api/update_task",
            json!({ "task_id": 6, "task_active": false, "modified_by_email": EMAIL }),
            Box::pin(app.tasks().deactivate(6, EMAIL)),
        ),
        (
            "/api/update_user",
            json!({ "user_id": 7, "user_active": false, "modified_by_email": EMAIL }),
            Box::pin(app.users().deactivate(7, EMAIL)),
        ),
        (
            "/api/update_role",
            json!({ "role_id": 8, "role_active": false, "modified_by_email": EMAIL }),
            Box::pin(app.roles().deactivate(8, EMAIL)),
        ),
        (
            "/api/update_taskstatus",
            json!({ "task_status_id": 9, "task_status_active": false, "modified_by_email": EMAIL }),
            Box::pin(app.task_statuses().deactivate(9, EMAIL)),
        ),
    ];

    for (path, expected, call) in cases {
        call.await.unwrap();

        let state = backend.lock().unwrap();
        let calls = state.requests_to(path);
        assert_eq!(calls.len(), 1, "{}", path);
        assert_eq!(calls[0].method, "POST", "{}", path);
        assert_eq!(calls[0].body, expected, "{}", path);
    }

    let state = backend.lock().unwrap();
    assert_eq!(state.requests.len(), 5);
    assert!(state.requests.iter().all(|r| r.method == "POST"));
}

#[tokio::test]
async fn test_restore_from_refresh_cookie() {
    let fresh = mint_token(1, "['view_project']", "restored");
    let mut state = BackendState::new("unused");
    state.refreshed_token = Some(fresh.clone());
    let (url, backend) = spawn_backend(state).await;
    let app = Taskdesk::new(ClientConfig::new(&url).unwrap()).unwrap();

    let session = app.restore().await.unwrap();

    assert_eq!(session.token, fresh);
    assert!(app.is_authenticated());
    assert!(app.session().can("view_project"));
    assert_eq!(backend.lock().unwrap().refresh_calls, 1);
    assert_eq!(app.security().event_count("token_refreshed"), 1);

    // The restored token is the one protected calls carry
    app.projects().list().await.unwrap();
    let calls = backend.lock().unwrap().requests_to("/api/projects");
    assert_eq!(calls[0].authorization, Some(format!("Bearer {}", fresh)));
}

#[tokio::test]
async fn test_restore_without_cookie_stays_signed_out() {
    let token = mint_token(1, "['view_project']", "a");
    let (app, backend) = signed_in(BackendState::new(&token)).await;
    assert!(app.is_authenticated());

    // The backend no longer honours the refresh cookie
    let err = app.restore().await.unwrap_err();

    assert!(matches!(err, TaskdeskError::Unauthorized(_)));
    assert_eq!(err.user_message(), "Refresh token expired");
    assert!(!app.is_authenticated());
    assert_eq!(app.current_token(), None);
    assert_eq!(backend.lock().unwrap().refresh_calls, 1);
    assert_eq!(app.security().event_count("refresh_failed"), 1);
    assert_eq!(app.security().event_count("session_cleared"), 1);
    assert_eq!(app.navigate("/projects"), Navigation::Redirect(Route::Login));
}
