//! Typed CRUD calls shared by every entity
//!
//! The backend has no delete endpoint. `deactivate` posts the entity's update
//! endpoint with the `*_active` flag cleared.

use std::marker::PhantomData;

use crate::constants::{PROJECTS_PATH, ROLE_PERMISSIONS_PATH, UPDATE_TASK_STATUS_IN_TASK_PATH};
use crate::core::http::ApiClient;
use crate::error::Result;
use crate::models::{Creatable, Project, Resource, Role, RolePermission, Task, TaskStatus, User};

#[derive(Clone)]
pub struct ResourceService<R: Resource> {
    client: ApiClient,
    _entity: PhantomData<fn() -> R>,
}

pub type ProjectService = ResourceService<Project>;
pub type TaskService = ResourceService<Task>;
pub type UserService = ResourceService<User>;
pub type RoleService = ResourceService<Role>;
pub type TaskStatusService = ResourceService<TaskStatus>;

impl<R: Resource> ResourceService<R> {
    pub fn new(client: ApiClient) -> Self {
        Self {
            client,
            _entity: PhantomData,
        }
    }

    /// Every row the backend returns, inactive ones included
    pub async fn list(&self) -> Result<Vec<R>> {
        let rows: Vec<R> = self.client.get(R::COLLECTION_PATH).await?;
        log::debug!("Fetched {} {}", rows.len(), R::ENTITY.plural());
        Ok(rows)
    }

    /// One row by id
    pub async fn get(&self, id: i64) -> Result<R> {
        let path = format!("{}/{}", R::COLLECTION_PATH, id);
        self.client.get(&path).await
    }

    /// Rows still marked active
    pub async fn list_active(&self) -> Result<Vec<R>> {
        Ok(self
            .list()
            .await?
            .into_iter()
            .filter(|row| row.is_active())
            .collect())
    }

    pub async fn update(&self, update: &R::Update) -> Result<serde_json::Value> {
        self.client.post(R::UPDATE_PATH, update).await
    }

    /// Soft delete
    pub async fn deactivate(&self, id: i64, modified_by_email: &str) -> Result<serde_json::Value> {
        log::info!("Deactivating {} {}", R::ENTITY.label(), id);
        let update = R::deactivation(id, modified_by_email);
        self.client.post(R::UPDATE_PATH, &update).await
    }
}

impl<R: Creatable> ResourceService<R> {
    pub async fn create(&self, new: &R::New) -> Result<serde_json::Value> {
        self.client.post(R::COLLECTION_PATH, new).await
    }
}

impl ResourceService<Task> {
    pub async fn list_for_project(&self, project_id: i64) -> Result<Vec<Task>> {
        let path = format!("{}/{}/tasks", PROJECTS_PATH, project_id);
        self.client.get(&path).await
    }

    /// Move a task to another status. The backend expects the full task row.
    pub async fn change_status(
        &self,
        task: &Task,
        task_status_id: i64,
        modified_by_email: &str,
    ) -> Result<serde_json::Value> {
        let moved = task.with_status(task_status_id, modified_by_email);
        self.client
            .post(UPDATE_TASK_STATUS_IN_TASK_PATH, &moved)
            .await
    }
}

impl ResourceService<Role> {
    /// Catalogue of capability names a role may be granted
    pub async fn list_permissions(&self) -> Result<Vec<RolePermission>> {
        self.client.get(ROLE_PERMISSIONS_PATH).await
    }
}
