use std::sync::Arc;

use services::{AuthGate, ProgressTracker};

use crate::platform::LinkOpenerRef;

pub trait UiApp: Send + Sync {
    fn auth_gate(&self) -> Arc<AuthGate>;
    fn progress(&self) -> Arc<ProgressTracker>;
    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    auth_gate: Arc<AuthGate>,
    progress: Arc<ProgressTracker>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            auth_gate: app.auth_gate(),
            progress: app.progress(),
            link_opener: app.link_opener(),
        }
    }

    #[must_use]
    pub fn auth_gate(&self) -> Arc<AuthGate> {
        Arc::clone(&self.auth_gate)
    }

    #[must_use]
    pub fn progress(&self) -> Arc<ProgressTracker> {
        Arc::clone(&self.progress)
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
