use std::sync::Arc;

use chrono::{DateTime, Utc};
use course_core::model::BackendSettings;
use course_core::time::fixed_now;
use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use services::{AppServices, AuthGate, Clock, ProgressStore, ProgressTracker};
use storage::repository::Storage;

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::views::{AuthView, DashboardView, ModuleView, NotFoundView};

struct NoopLinkOpener;

impl UiLinkOpener for NoopLinkOpener {
    fn open_url(&self, _url: &str) {}
}

#[derive(Clone)]
struct TestApp {
    services: AppServices,
}

impl UiApp for TestApp {
    fn auth_gate(&self) -> Arc<AuthGate> {
        self.services.auth_gate()
    }

    fn progress(&self) -> Arc<ProgressTracker> {
        self.services.progress()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        Arc::new(NoopLinkOpener)
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Auth { reset: bool },
    Dashboard,
    Module(u32),
    NotFound(Vec<String>),
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(&app));
    use_context_provider(|| props.view.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    match use_context::<ViewKind>() {
        ViewKind::Auth { reset } => rsx! { AuthView { reset } },
        ViewKind::Dashboard => rsx! { DashboardView {} },
        ViewKind::Module(id) => rsx! { ModuleView { id } },
        ViewKind::NotFound(segments) => rsx! { NotFoundView { segments } },
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub services: AppServices,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub async fn setup_view_harness(view: ViewKind) -> ViewHarness {
    setup_view_harness_with_storage(view, Storage::in_memory()).await
}

/// Like `setup_view_harness`, with the enrollment date written before startup.
pub async fn setup_view_harness_enrolled_at(view: ViewKind, at: DateTime<Utc>) -> ViewHarness {
    let storage = Storage::in_memory();
    ProgressStore::new(Arc::clone(&storage.kv))
        .save_enrollment(at)
        .await
        .expect("seed enrollment");
    setup_view_harness_with_storage(view, storage).await
}

pub async fn setup_view_harness_with_storage(view: ViewKind, storage: Storage) -> ViewHarness {
    let services = AppServices::from_storage(
        &storage,
        Clock::fixed(fixed_now()),
        &BackendSettings::local(),
    )
    .await
    .expect("build services");
    let app = Arc::new(TestApp {
        services: services.clone(),
    });
    let dom = VirtualDom::new_with_props(ViewRouterHarness, ViewHarnessProps { app, view });

    ViewHarness { dom, services }
}
