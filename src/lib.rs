//! Taskdesk - a session-aware client for the Taskdesk project management API
//!
//! This library provides authentication against the backend, a permission
//! set decoded from the access token, transparent token refresh, typed
//! access to projects, tasks, users, roles and task statuses, and the route
//! guard the screens use.

pub mod auth;
pub mod config;
pub mod constants;
pub mod core;
pub mod error;
pub mod models;
pub mod security_logger;
pub mod services;
pub mod views;

// Re-export main components
pub use crate::config::ClientConfig;
pub use crate::core::Taskdesk;
pub use crate::error::{Result, TaskdeskError};
