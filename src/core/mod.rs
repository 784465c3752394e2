//! Core client machinery: HTTP transport, refresh state machine, routing

pub mod app;
pub mod http;
pub mod retry;
pub mod router;

// Re-export main components for convenience
pub use app::Taskdesk;
pub use http::ApiClient;
pub use retry::{Attempt, Failure, Outcome, RequestState};
pub use router::{guard, Navigation, Route};
