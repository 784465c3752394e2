use serde::{Deserialize, Serialize};

use super::{default_active, Creatable, Resource};
use crate::auth::permissions::Entity;
use crate::constants::{TASK_STATUS_PATH, UPDATE_TASK_STATUS_PATH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskStatus {
    pub task_status_id: i64,
    pub task_status_name: String,
    #[serde(default = "default_active")]
    pub task_status_active: bool,
    #[serde(default)]
    pub created_by_email: String,
    #[serde(default)]
    pub modified_by_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTaskStatus {
    pub task_status_name: String,
    pub created_by_email: String,
    pub modified_by_email: String,
}

impl NewTaskStatus {
    pub fn new(name: &str, actor_email: &str) -> Self {
        Self {
            task_status_name: name.trim().to_string(),
            created_by_email: actor_email.to_string(),
            modified_by_email: actor_email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskStatusUpdate {
    pub task_status_id: i64,
    pub modified_by_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status_active: Option<bool>,
}

impl TaskStatusUpdate {
    pub fn new(task_status_id: i64, modified_by_email: &str) -> Self {
        Self {
            task_status_id,
            modified_by_email: modified_by_email.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for TaskStatus {
    type Update = TaskStatusUpdate;

    const ENTITY: Entity = Entity::TaskStatus;
    const COLLECTION_PATH: &'static str = TASK_STATUS_PATH;
    const UPDATE_PATH: &'static str = UPDATE_TASK_STATUS_PATH;

    fn id(&self) -> i64 {
        self.task_status_id
    }

    fn is_active(&self) -> bool {
        self.task_status_active
    }

    fn deactivation(id: i64, modified_by_email: &str) -> TaskStatusUpdate {
        TaskStatusUpdate {
            task_status_active: Some(false),
            ..TaskStatusUpdate::new(id, modified_by_email)
        }
    }
}

impl Creatable for TaskStatus {
    type New = NewTaskStatus;
}
