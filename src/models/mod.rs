//! Wire types for the backend API
//!
//! Each entity has a read type, a create payload and a partial update
//! payload. Deleting is never a hard delete: it is an update that flips the
//! entity's `*_active` flag to false.

pub mod auth;
pub mod project;
pub mod role;
pub mod task;
pub mod task_status;
pub mod user;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::auth::permissions::Entity;

pub use auth::{
    ForgotPasswordRequest, GoogleLoginOutcome, GooglePrefill, LoginRequest, RegisterRequest,
    TokenResponse,
};
pub use project::{NewProject, Project, ProjectUpdate};
pub use role::{NewRole, Role, RolePermission, RoleUpdate};
pub use task::{NewTask, Task, TaskUpdate};
pub use task_status::{NewTaskStatus, TaskStatus, TaskStatusUpdate};
pub use user::{User, UserUpdate};

/// Rows are active unless the backend says otherwise
pub(crate) fn default_active() -> bool {
    true
}

/// An entity served by a list endpoint and an update endpoint
pub trait Resource: DeserializeOwned + Clone + Send + Sync + 'static {
    /// Partial update payload; also carries the soft-delete flag
    type Update: Serialize + Send + Sync;

    const ENTITY: Entity;
    /// `GET` lists, `POST` creates
    const COLLECTION_PATH: &'static str;
    const UPDATE_PATH: &'static str;

    fn id(&self) -> i64;
    fn is_active(&self) -> bool;

    /// Update that marks the row inactive
    fn deactivation(id: i64, modified_by_email: &str) -> Self::Update;
}

/// Entities that can be created from the client (users come from registration)
pub trait Creatable: Resource {
    type New: Serialize + Send + Sync;
}
