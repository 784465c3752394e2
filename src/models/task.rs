use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{default_active, Creatable, Resource};
use crate::auth::permissions::Entity;
use crate::constants::{TASKS_PATH, UPDATE_TASK_PATH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub task_id: i64,
    pub task_description: String,
    pub task_due_date: NaiveDate,
    pub task_status_id: i64,
    pub owner_id: i64,
    pub project_id: i64,
    #[serde(default = "default_active")]
    pub task_active: bool,
    #[serde(default)]
    pub created_by_email: String,
    #[serde(default)]
    pub modified_by_email: String,
}

impl Task {
    /// Copy of this task moved to another status, stamped with the editor
    pub fn with_status(&self, task_status_id: i64, modified_by_email: &str) -> Task {
        Task {
            task_status_id,
            modified_by_email: modified_by_email.to_string(),
            ..self.clone()
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub task_description: String,
    pub task_due_date: NaiveDate,
    pub task_status_id: i64,
    pub owner_id: i64,
    pub project_id: i64,
    pub created_by_email: String,
    pub modified_by_email: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskUpdate {
    pub task_id: i64,
    pub modified_by_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_due_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_status_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub task_active: Option<bool>,
}

impl TaskUpdate {
    pub fn new(task_id: i64, modified_by_email: &str) -> Self {
        Self {
            task_id,
            modified_by_email: modified_by_email.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for Task {
    type Update = TaskUpdate;

    const ENTITY: Entity = Entity::Task;
    const COLLECTION_PATH: &'static str = TASKS_PATH;
    const UPDATE_PATH: &'static str = UPDATE_TASK_PATH;

    fn id(&self) -> i64 {
        self.task_id
    }

    fn is_active(&self) -> bool {
        self.task_active
    }

    fn deactivation(id: i64, modified_by_email: &str) -> TaskUpdate {
        TaskUpdate {
            task_active: Some(false),
            ..TaskUpdate::new(id, modified_by_email)
        }
    }
}

impl Creatable for Task {
    type New = NewTask;
}
