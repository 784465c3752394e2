use serde::{Deserialize, Serialize};

use super::{default_active, Resource};
use crate::auth::permissions::Entity;
use crate::constants::{UPDATE_USER_PATH, USERS_PATH};

/// User row as listed by the backend; password hashes never leave the server
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub provider: String,
    pub role_id: i64,
    #[serde(default = "default_active")]
    pub user_active: bool,
    #[serde(default)]
    pub created_by_email: String,
    #[serde(default)]
    pub modified_by_email: String,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UserUpdate {
    pub user_id: i64,
    pub modified_by_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plain_password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_active: Option<bool>,
}

impl UserUpdate {
    pub fn new(user_id: i64, modified_by_email: &str) -> Self {
        Self {
            user_id,
            modified_by_email: modified_by_email.to_string(),
            ..Self::default()
        }
    }
}

impl Resource for User {
    type Update = UserUpdate;

    const ENTITY: Entity = Entity::User;
    const COLLECTION_PATH: &'static str = USERS_PATH;
    const UPDATE_PATH: &'static str = UPDATE_USER_PATH;

    fn id(&self) -> i64 {
        self.user_id
    }

    fn is_active(&self) -> bool {
        self.user_active
    }

    fn deactivation(id: i64, modified_by_email: &str) -> UserUpdate {
        UserUpdate {
            user_active: Some(false),
            ..UserUpdate::new(id, modified_by_email)
        }
    }
}
