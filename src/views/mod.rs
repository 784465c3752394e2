//! State a screen keeps between renders
//!
//! A failed load never wipes the list: the last good rows stay visible and an
//! error line is shown above them.

use std::future::Future;

use crate::auth::permissions::{Action, Entity, UPDATE_TASK_STATUS_IN_TASK};
use crate::auth::session::SessionContext;
use crate::error::{Result, TaskdeskError};

/// Last-known-good rows of one entity plus the screen's error line
#[derive(Debug, Clone)]
pub struct EntityList<T> {
    entity: Entity,
    items: Vec<T>,
    error: Option<String>,
}

impl<T> EntityList<T> {
    pub fn new(entity: Entity) -> Self {
        Self {
            entity,
            items: Vec::new(),
            error: None,
        }
    }

    pub fn entity(&self) -> Entity {
        self.entity
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Replace the rows with the result of `load`.
    ///
    /// Returns `true` when the rows were refreshed.
    pub async fn reload<F>(&mut self, load: F) -> bool
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        match load.await {
            Ok(items) => {
                self.items = items;
                self.error = None;
                true
            }
            Err(e) => {
                let op = format!("load {}", self.entity.plural());
                self.record_failure(&op, &e);
                false
            }
        }
    }

    /// Set the `Failed to <op>` line, e.g. `op = "save project"`
    pub fn record_failure(&mut self, op: &str, error: &TaskdeskError) {
        log::warn!("Failed to {}: {}", op, error);
        self.error = Some(format!("Failed to {}", op));
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }
}

/// Which buttons a screen shows for an entity
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Affordances {
    pub can_view: bool,
    pub can_create: bool,
    pub can_edit: bool,
    pub can_delete: bool,
}

impl Affordances {
    /// All false without a session
    pub fn for_entity(session: &SessionContext, entity: Entity) -> Self {
        let Some(current) = session.current() else {
            return Self::default();
        };

        Self {
            can_view: current.allows(Action::View, entity),
            can_create: current.allows(Action::Create, entity),
            can_edit: current.allows(Action::Update, entity),
            can_delete: current.allows(Action::Delete, entity),
        }
    }
}

/// Whether the task board lets the user drag a task to another status
pub fn can_move_tasks(session: &SessionContext) -> bool {
    session.can(UPDATE_TASK_STATUS_IN_TASK)
}
