//! Security-focused logging module to track session and credential events

use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use crate::auth::session::LogoutReason;

/// Types of security events to track
#[derive(Debug, Clone, PartialEq)]
pub enum SecurityEvent {
    // Authentication events
    SessionEstablished { user_id: i64, email: String },
    LoginFailed { email: Option<String>, reason: String },
    TokenRejected { reason: String },

    // Refresh events
    TokenRefreshed { user_id: i64 },
    RefreshFailed { reason: String },
    SessionCleared { user_id: Option<i64>, reason: LogoutReason },

    // Authorization events
    MalformedPermissionClaim { user_id: i64 },
    PermissionDenied { user_id: Option<i64>, capability: String },
}

impl SecurityEvent {
    /// Get event key for tracking
    pub fn key(&self) -> &'static str {
        match self {
            SecurityEvent::SessionEstablished { .. } => "session_established",
            SecurityEvent::LoginFailed { .. } => "login_failed",
            SecurityEvent::TokenRejected { .. } => "token_rejected",
            SecurityEvent::TokenRefreshed { .. } => "token_refreshed",
            SecurityEvent::RefreshFailed { .. } => "refresh_failed",
            SecurityEvent::SessionCleared { .. } => "session_cleared",
            SecurityEvent::MalformedPermissionClaim { .. } => "malformed_permission_claim",
            SecurityEvent::PermissionDenied { .. } => "permission_denied",
        }
    }
}

/// Security event with timestamp
#[derive(Debug, Clone)]
struct TimestampedEvent {
    event: SecurityEvent,
    timestamp: Instant,
}

/// Security logger for tracking and alerting on session events
pub struct SecurityLogger {
    events: Mutex<VecDeque<TimestampedEvent>>,
    event_counts: Mutex<HashMap<&'static str, usize>>,
    max_events: usize,
    alert_thresholds: HashMap<&'static str, usize>,
}

impl Default for SecurityLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl SecurityLogger {
    /// Create a new security logger
    pub fn new() -> Self {
        Self::with_capacity(1000)
    }

    pub fn with_capacity(max_events: usize) -> Self {
        let mut alert_thresholds = HashMap::new();
        alert_thresholds.insert("login_failed", 5);
        alert_thresholds.insert("token_rejected", 3);
        alert_thresholds.insert("refresh_failed", 3);
        alert_thresholds.insert("permission_denied", 20);

        Self {
            events: Mutex::new(VecDeque::new()),
            event_counts: Mutex::new(HashMap::new()),
            max_events: max_events.max(1),
            alert_thresholds,
        }
    }

    /// Log a security event
    pub fn log_event(&self, event: SecurityEvent) {
        let event_key = event.key();

        {
            let mut events = self.events.lock().unwrap_or_else(|p| p.into_inner());
            events.push_back(TimestampedEvent {
                event: event.clone(),
                timestamp: Instant::now(),
            });
            while events.len() > self.max_events {
                events.pop_front();
            }
        }

        {
            let mut counts = self.event_counts.lock().unwrap_or_else(|p| p.into_inner());
            let count = counts.entry(event_key).or_insert(0);
            *count += 1;

            if let Some(&threshold) = self.alert_thresholds.get(event_key) {
                if *count % threshold == 0 {
                    log::error!(
                        "SECURITY ALERT: {} events of type '{}' recorded",
                        count,
                        event_key
                    );
                }
            }
        }

        match event {
            SecurityEvent::SessionEstablished { user_id, email } => {
                log::info!("SECURITY: Session established - User: {}, Email: {}", user_id, email);
            }
            SecurityEvent::LoginFailed { email, reason } => {
                log::warn!("SECURITY: Login failed - Email: {:?}, Reason: {}", email, reason);
            }
            SecurityEvent::TokenRejected { reason } => {
                log::warn!("SECURITY: Token rejected - Reason: {}", reason);
            }
            SecurityEvent::TokenRefreshed { user_id } => {
                log::debug!("SECURITY: Access token refreshed - User: {}", user_id);
            }
            SecurityEvent::RefreshFailed { reason } => {
                log::warn!("SECURITY: Token refresh failed - Reason: {}", reason);
            }
            SecurityEvent::SessionCleared { user_id, reason } => {
                log::info!("SECURITY: Session cleared - User: {:?}, Reason: {:?}", user_id, reason);
            }
            SecurityEvent::MalformedPermissionClaim { user_id } => {
                log::warn!(
                    "SECURITY: Malformed permission claim, treating as empty - User: {}",
                    user_id
                );
            }
            SecurityEvent::PermissionDenied { user_id, capability } => {
                log::debug!(
                    "SECURITY: Permission denied - User: {:?}, Capability: {}",
                    user_id,
                    capability
                );
            }
        }
    }

    /// Get recent security events
    pub fn recent_events(&self, within: Duration) -> Vec<SecurityEvent> {
        let events = self.events.lock().unwrap_or_else(|p| p.into_inner());
        let now = Instant::now();

        events
            .iter()
            .filter(|e| now.duration_since(e.timestamp) <= within)
            .map(|e| e.event.clone())
            .collect()
    }

    /// Number of events recorded per kind
    pub fn event_count(&self, key: &str) -> usize {
        let counts = self.event_counts.lock().unwrap_or_else(|p| p.into_inner());
        counts.get(key).copied().unwrap_or(0)
    }

    /// Get event statistics
    pub fn event_stats(&self) -> HashMap<&'static str, usize> {
        self.event_counts
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}
