use dioxus::prelude::*;
use dioxus_router::{Outlet, Routable, use_navigator, use_route};

use crate::context::AppContext;
use crate::views::{AuthView, DashboardView, ModuleView, NotFoundView};

#[derive(Clone, Debug, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    #[layout(GuardLayout)]
        #[route("/", DashboardView)] Dashboard {},
        #[route("/module/:id", ModuleView)] Module { id: u32 },
        #[route("/auth?:reset", AuthView)] Auth { reset: bool },
    #[end_layout]
    #[route("/:..segments", NotFoundView)] NotFound { segments: Vec<String> },
}

/// Who may see a route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Access {
    /// Only signed-in members.
    Protected,
    /// Only visitors who are not signed in.
    PublicOnly,
    Open,
}

impl Route {
    #[must_use]
    pub fn access(&self) -> Access {
        match self {
            Route::Dashboard {} | Route::Module { .. } => Access::Protected,
            Route::Auth { .. } => Access::PublicOnly,
            Route::NotFound { .. } => Access::Open,
        }
    }
}

/// Where to send the visitor instead of `route`, if anywhere.
#[must_use]
pub fn guard(route: &Route, authenticated: bool) -> Option<Route> {
    match (route.access(), authenticated) {
        (Access::Protected, false) => Some(Route::Auth { reset: false }),
        (Access::PublicOnly, true) => Some(Route::Dashboard {}),
        _ => None,
    }
}

#[component]
fn GuardLayout() -> Element {
    let ctx = use_context::<AppContext>();
    let route = use_route::<Route>();
    let navigator = use_navigator();

    if let Some(target) = guard(&route, ctx.auth_gate().is_authenticated()) {
        navigator.replace(target);
        return rsx! {};
    }

    rsx! {
        div { class: "app",
            Outlet::<Route> {}
        }
    }
}
