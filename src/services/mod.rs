//! Backend services built on [`ApiClient`](crate::core::http::ApiClient)

pub mod auth;
pub mod resource;

pub use auth::AuthService;
pub use resource::{
    ProjectService, ResourceService, RoleService, TaskService, TaskStatusService, UserService,
};
