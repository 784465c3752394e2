//! Capability names and the permission set carried by a session
//!
//! The backend emits a role's permissions as a stringified list with
//! inconsistent quoting, e.g. `"['view_project', \"update_project\"]"`.
//! Parsing is deliberately forgiving: anything unreadable yields an empty set.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Verb half of a capability name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    View,
    Create,
    Update,
    Delete,
}

impl Action {
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Delete => "delete",
        }
    }
}

/// Entities whose screens are gated by capabilities
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Entity {
    Project,
    Task,
    User,
    Role,
    TaskStatus,
}

impl Entity {
    /// Suffix used in capability names
    pub fn as_str(&self) -> &'static str {
        match self {
            Entity::Project => "project",
            Entity::Task => "task",
            Entity::User => "user",
            Entity::Role => "role",
            Entity::TaskStatus => "taskstatus",
        }
    }

    /// Human-readable singular, used in screen messages
    pub fn label(&self) -> &'static str {
        match self {
            Entity::Project => "project",
            Entity::Task => "task",
            Entity::User => "user",
            Entity::Role => "role",
            Entity::TaskStatus => "task status",
        }
    }

    pub fn plural(&self) -> &'static str {
        match self {
            Entity::Project => "projects",
            Entity::Task => "tasks",
            Entity::User => "users",
            Entity::Role => "roles",
            Entity::TaskStatus => "task statuses",
        }
    }
}

/// Capability name for an action on an entity, e.g. `update_project`
pub fn capability(action: Action, entity: Entity) -> String {
    format!("{}_{}", action.as_str(), entity.as_str())
}

/// Moving a task between statuses has its own capability
pub const UPDATE_TASK_STATUS_IN_TASK: &str = "update_taskstatus_in_task";

/// Unordered set of capability names
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    names: HashSet<String>,
}

impl PermissionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the raw claim string; never fails
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let inner = trimmed
            .strip_prefix('[')
            .unwrap_or(trimmed);
        let inner = inner.strip_suffix(']').unwrap_or(inner);

        inner
            .split(',')
            .map(strip_quotes)
            .filter(|name| !name.is_empty())
            .collect()
    }

    /// Parse whatever shape the claim arrived in
    pub fn from_claim(value: &serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(raw) => Self::parse(raw),
            serde_json::Value::Array(items) => items
                .iter()
                .filter_map(|item| item.as_str())
                .map(strip_quotes)
                .filter(|name| !name.is_empty())
                .collect(),
            _ => Self::new(),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn allows(&self, action: Action, entity: Entity) -> bool {
        self.contains(&capability(action, entity))
    }

    pub fn insert(&mut self, name: impl Into<String>) -> bool {
        self.names.insert(name.into())
    }

    pub fn remove(&mut self, name: &str) -> bool {
        self.names.remove(name)
    }

    /// Add the name if absent, remove it if present
    pub fn toggle(&mut self, name: &str) {
        if !self.remove(name) {
            self.insert(name);
        }
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    /// Names in a stable order
    pub fn sorted(&self) -> Vec<String> {
        let mut names: Vec<String> = self.names.iter().cloned().collect();
        names.sort();
        names
    }

    /// Render in the single-quoted list form roles are stored with: `['a','b']`
    pub fn to_claim_string(&self) -> String {
        let quoted: Vec<String> = self
            .sorted()
            .into_iter()
            .map(|name| format!("'{}'", name))
            .collect();
        format!("[{}]", quoted.join(","))
    }
}

fn strip_quotes(part: &str) -> String {
    let part = part.trim();
    let part = part
        .strip_prefix('\'')
        .or_else(|| part.strip_prefix('"'))
        .unwrap_or(part);
    let part = part
        .strip_suffix('\'')
        .or_else(|| part.strip_suffix('"'))
        .unwrap_or(part);
    part.trim().to_string()
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for PermissionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.sorted().join(", "))
    }
}
