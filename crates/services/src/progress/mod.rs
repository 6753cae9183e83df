//! Module completion and bonus unlock state.

pub mod store;
pub mod tracker;

pub use store::{ENROLLMENT_KEY, PROGRESS_KEY, ProgressStore};
pub use tracker::ProgressTracker;
