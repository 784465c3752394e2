use serde::{Deserialize, Serialize};

use super::{default_active, Creatable, Resource};
use crate::auth::permissions::{Entity, PermissionSet};
use crate::constants::{ROLES_PATH, UPDATE_ROLE_PATH};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Role {
    pub role_id: i64,
    pub role_name: String,
    /// Stored in the same stringified-list form as the token claim
    #[serde(default)]
    pub role_permissions: String,
    #[serde(default = "default_active")]
    pub role_active: bool,
    #[serde(default)]
    pub created_by_email: String,
    #[serde(default)]
    pub modified_by_email: String,
}

impl Role {
    pub fn permissions(&self) -> PermissionSet {
        PermissionSet::parse(&self.role_permissions)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewRole {
    pub role_name: String,
    pub role_permissions: String,
    pub created_by_email: String,
    pub modified_by_email: String,
}

impl NewRole {
    pub fn new(role_name: &str, permissions: &PermissionSet, actor_email: &str) -> Self {
        Self {
            role_name: role_name.trim().to_string(),
            role_permissions: permissions.to_claim_string(),
            created_by_email: actor_email.to_string(),
            modified_by_email: actor_email.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RoleUpdate {
    pub role_id: i64,
    pub modified_by_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_permissions: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role_active: Option<bool>,
}

impl RoleUpdate {
    pub fn new(role_id: i64, modified_by_email: &str) -> Self {
        Self {
            role_id,
            modified_by_email: modified_by_email.to_string(),
            ..Self::default()
        }
    }

    pub fn with_permissions(mut self, permissions: &PermissionSet) -> Self {
        self.role_permissions = Some(permissions.to_claim_string());
        self
    }
}

/// Entry in the catalogue of assignable capabilities
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolePermission {
    pub role_permissions_name: String,
}

impl Resource for Role {
    type Update = RoleUpdate;

    const ENTITY: Entity = Entity::Role;
    const COLLECTION_PATH: &'static str = ROLES_PATH;
    const UPDATE_PATH: &'static str = UPDATE_ROLE_PATH;

    fn id(&self) -> i64 {
        self.role_id
    }

    fn is_active(&self) -> bool {
        self.role_active
    }

    fn deactivation(id: i64, modified_by_email: &str) -> RoleUpdate {
        RoleUpdate {
            role_active: Some(false),
            ..RoleUpdate::new(id, modified_by_email)
        }
    }
}

impl Creatable for Role {
    type New = NewRole;
}
