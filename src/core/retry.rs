//! Per-request state machine for the refresh-on-401 interceptor
//!
//! ```text
//! Sent(Original) --2xx--> Done
//! Sent(Original) --401--> Refreshing --ok--> Sent(Replay) --2xx--> Done
//!                                    --err-> Failed(RefreshFailed)
//! Sent(Replay)   --401--> Failed(ReplayRejected)
//! Sent(_)        --other status / transport--> Failed(..)
//! ```
//!
//! `Sent(Replay)` has no edge back to `Refreshing`, so a request is refreshed
//! at most once.

use crate::auth::session::LogoutReason;

/// Which send of a logical request this is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attempt {
    Original,
    Replay,
}

/// What the transport observed for one send
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Unauthorized,
    Status(u16),
    Transport,
}

impl Outcome {
    pub fn from_status(status: u16) -> Self {
        match status {
            200..=299 => Outcome::Success,
            401 => Outcome::Unauthorized,
            other => Outcome::Status(other),
        }
    }
}

/// Terminal failure kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Failure {
    Status(u16),
    Transport,
    RefreshFailed,
    ReplayRejected,
}

impl Failure {
    /// Failures that must end the session
    pub fn logout_reason(&self) -> Option<LogoutReason> {
        match self {
            Failure::RefreshFailed => Some(LogoutReason::RefreshFailed),
            Failure::ReplayRejected => Some(LogoutReason::ReplayRejected),
            Failure::Status(_) | Failure::Transport => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestState {
    Sent(Attempt),
    Refreshing,
    Done,
    Failed(Failure),
}

impl RequestState {
    pub fn start() -> Self {
        RequestState::Sent(Attempt::Original)
    }

    /// Feed the result of a send. Ignored outside `Sent`.
    pub fn on_response(self, outcome: Outcome) -> Self {
        match (self, outcome) {
            (RequestState::Sent(_), Outcome::Success) => RequestState::Done,
            (RequestState::Sent(Attempt::Original), Outcome::Unauthorized) => RequestState::Refreshing,
            (RequestState::Sent(Attempt::Replay), Outcome::Unauthorized) => {
                RequestState::Failed(Failure::ReplayRejected)
            }
            (RequestState::Sent(_), Outcome::Status(code)) => RequestState::Failed(Failure::Status(code)),
            (RequestState::Sent(_), Outcome::Transport) => RequestState::Failed(Failure::Transport),
            (state, _) => state,
        }
    }

    /// Feed the result of the refresh call. Ignored outside `Refreshing`.
    pub fn on_refresh(self, refreshed: bool) -> Self {
        match self {
            RequestState::Refreshing if refreshed => RequestState::Sent(Attempt::Replay),
            RequestState::Refreshing => RequestState::Failed(Failure::RefreshFailed),
            state => state,
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, RequestState::Done | RequestState::Failed(_))
    }
}
