#![forbid(unsafe_code)]

pub mod app_services;
pub mod auth;
pub mod error;
pub mod progress;
pub mod session_store;

pub use course_core::Clock;

pub use app_services::AppServices;
pub use auth::{AuthBackend, AuthGate, SessionListener};
pub use error::{AppServicesError, AuthError, ProgressServiceError, SessionStoreError};
pub use progress::{ProgressStore, ProgressTracker};
pub use session_store::SessionStore;
