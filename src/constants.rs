// Backend location
pub const DEFAULT_API_URL: &str = "http://localhost:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_USER_AGENT: &str = concat!("taskdesk/", env!("CARGO_PKG_VERSION"));

// Environment keys
pub const ENV_API_URL: &str = "TASKDESK_API_URL";
pub const ENV_API_URL_FALLBACK: &str = "BACKEND_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "TASKDESK_TIMEOUT_SECS";
pub const ENV_USER_AGENT: &str = "TASKDESK_USER_AGENT";

// Auth endpoints (never carry the bearer token, except forgot-password)
pub const LOGIN_PATH: &str = "/api/login";
pub const REGISTER_PATH: &str = "/api/register";
pub const FORGOT_PASSWORD_PATH: &str = "/api/forgot-password";
pub const REFRESH_TOKEN_PATH: &str = "/api/refresh-token";
pub const GOOGLE_LOGIN_PATH: &str = "/api/login/google";

// Resource endpoints
pub const PROJECTS_PATH: &str = "/api/projects";
pub const UPDATE_PROJECT_PATH: &str = "/api/update_project";
pub const TASKS_PATH: &str = "/api/tasks";
pub const UPDATE_TASK_PATH: &str = "/api/update_task";
pub const UPDATE_TASK_STATUS_IN_TASK_PATH: &str = "/api/update_taskstatus_in_task";
pub const ROLES_PATH: &str = "/api/roles";
pub const UPDATE_ROLE_PATH: &str = "/api/update_role";
pub const ROLE_PERMISSIONS_PATH: &str = "/api/role_permissions";
pub const TASK_STATUS_PATH: &str = "/api/taskstatus";
pub const UPDATE_TASK_STATUS_PATH: &str = "/api/update_taskstatus";
pub const USERS_PATH: &str = "/api/users";
pub const UPDATE_USER_PATH: &str = "/api/update_user";

// Client routes
pub const ROUTE_ROOT: &str = "/";
pub const ROUTE_LOGIN: &str = "/login";
pub const ROUTE_PROJECTS: &str = "/projects";
pub const ROUTE_USERS: &str = "/users";
pub const ROUTE_ROLES: &str = "/roles";
pub const ROUTE_TASK_STATUS: &str = "/taskStatus";

// Fallback messages when the backend sends none
pub const LOGIN_FAILED: &str = "Login failed.";
pub const REGISTRATION_FAILED: &str = "Registration failed.";
pub const FORGOT_PASSWORD_FAILED: &str = "Failed to send reset email.";
pub const REFRESH_FAILED: &str = "Token refresh failed.";
pub const GOOGLE_LOGIN_FAILED: &str = "Google login failed.";
pub const REQUEST_FAILED: &str = "Request failed.";

// Registration defaults
pub const DEFAULT_ROLE_ID: i64 = 3;
pub const LOCAL_PROVIDER: &str = "local";
pub const GOOGLE_PROVIDER: &str = "google";
