use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{default_active, Creatable, Resource};
use crate::auth::permissions::Entity;
use crate::constants::{PROJECTS_PATH, UPDATE_PROJECT_PATH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub project_id: i64,
    pub project_name: String,
    #[serde(default)]
    pub project_description: String,
    pub project_start_date: NaiveDate,
    pub project_end_date: NaiveDate,
    pub owner_id: i64,
    #[serde(default = "default_active")]
    pub project_active: bool,
    #[serde(default)]
    pub created_by_email: String,
    #[serde(default)]
    pub modified_by_email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewProject {
    pub project_name: String,
    pub project_description: String,
    pub project_start_date: NaiveDate,
    pub project_end_date: NaiveDate,
    pub owner_id: i64,
    pub created_by_email: String,
    pub modified_by_email: String,
}

/// Partial project update; unset fields are left out of the payload
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectUpdate {
    pub project_id: i64,
    pub modified_by_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_start_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_end_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_active: Option<bool>,
}

impl ProjectUpdate {
    pub fn new(project_id: i64, modified_by_email: &str) -> Self {
        Self {
            project_id,
            modified_by_email: modified_by_email.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for Project {
    type Update = ProjectUpdate;

    const ENTITY: Entity = Entity::Project;
    const COLLECTION_PATH: &'static str = PROJECTS_PATH;
    const UPDATE_PATH: &'static str = UPDATE_PROJECT_PATH;

    fn id(&self) -> i64 {
        self.project_id
    }

    fn is_active(&self) -> bool {
        self.project_active
    }

    fn deactivation(id: i64, modified_by_email: &str) -> ProjectUpdate {
        ProjectUpdate {
            project_active: Some(false),
            ..ProjectUpdate::new(id, modified_by_email)
        }
    }
}

impl Creatable for Project {
    type New = NewProject;
}
