use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use course_core::model::ModuleId;

use super::scripts::celebrate;
use crate::context::AppContext;
use crate::routes::Route;
use crate::views::ViewError;
use crate::vm::{MaterialVm, ModuleAccess, ModulePageVm, ProgressSummary, module_access};

const COMPLETED_NOTICE: &str = "Módulo concluído! 🎉 Continue progredindo no curso.";

#[component]
pub fn ModuleView(id: u32) -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let progress = ctx.progress();
    let link_opener = ctx.link_opener();
    let module_id = ModuleId::new(id);

    let mut revision = use_signal(|| 0_u32);
    let mut viewing = use_signal(|| None::<MaterialVm>);
    let mut notice = use_signal(|| None::<&'static str>);
    let mut error = use_signal(|| None::<ViewError>);
    let mut saving = use_signal(|| false);

    let on_complete = {
        let progress = progress.clone();
        use_callback(move |()| {
            if saving() {
                return;
            }
            saving.set(true);
            let progress = progress.clone();
            spawn(async move {
                let result = progress.mark_complete(module_id).await;
                saving.set(false);
                match result {
                    Ok(newly_completed) => {
                        error.set(None);
                        notice.set(Some(COMPLETED_NOTICE));
                        *revision.write() += 1;
                        if newly_completed {
                            spawn(celebrate());
                        }
                    }
                    Err(err) => {
                        tracing::warn!(module = %module_id, error = %err, "could not record completion");
                        error.set(Some(ViewError::SaveFailed));
                    }
                }
            });
        })
    };

    let on_download = use_callback(move |url: String| link_opener.open_url(&url));

    // Re-read progress after a completion is recorded.
    let _ = revision();
    let access = module_access(module_id, &ProgressSummary::from_tracker(&progress));

    let page = match access {
        ModuleAccess::Open(page) => page,
        ModuleAccess::Locked { label } => {
            return rsx! {
                div { class: "page module-page",
                    BackBar {}
                    section { class: "card locked-notice",
                        h2 { "🔒 {label}" }
                        p { class: "muted", "O módulo bônus é liberado 7 dias após a sua inscrição." }
                    }
                }
            };
        }
        ModuleAccess::Missing => {
            return rsx! {
                div { class: "page module-page",
                    BackBar {}
                    section { class: "card locked-notice",
                        h2 { "Módulo não encontrado" }
                        Link { class: "btn btn-primary", to: Route::Dashboard {}, "Voltar ao início" }
                    }
                }
            };
        }
    };

    let ModulePageVm {
        heading,
        header_label,
        count_label,
        materials,
        completed,
        ..
    } = page;
    let is_saving = saving();

    rsx! {
        div { class: "page module-page",
            header { class: "topbar",
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| {
                        navigator.push(Route::Dashboard {});
                    },
                    "← Voltar"
                }
                div { class: "topbar-title",
                    h1 { "{heading}" }
                    p { class: "muted", "{header_label}" }
                }
                if completed {
                    span { class: "completed-mark", "✔ Completo" }
                } else {
                    button {
                        class: "btn btn-primary",
                        disabled: is_saving,
                        onclick: move |_| on_complete.call(()),
                        "Concluir"
                    }
                }
            }

            if let Some(message) = notice() {
                p { class: "banner banner-success", role: "status", "{message}" }
            }
            if let Some(err) = error() {
                p { class: "banner banner-error", role: "alert", "{err.message()}" }
            }

            section { class: "card",
                h2 { "{heading}" }
                p { class: "muted", "{count_label}" }
            }

            ul { class: "material-list",
                for (index, material) in materials.into_iter().enumerate() {
                    MaterialRow {
                        key: "{index}",
                        material,
                        on_view: move |material: MaterialVm| viewing.set(Some(material)),
                        on_download,
                    }
                }
            }

            if let Some(material) = viewing() {
                div { class: "viewer-overlay",
                    div { class: "viewer-head",
                        h2 { "{material.title}" }
                        button {
                            class: "btn btn-ghost",
                            aria_label: "Fechar",
                            onclick: move |_| viewing.set(None),
                            "✕"
                        }
                    }
                    iframe {
                        class: "viewer-frame",
                        src: "{material.view_url}",
                        title: "{material.title}",
                        "allow": "autoplay",
                    }
                }
            }
        }
    }
}

#[component]
fn BackBar() -> Element {
    rsx! {
        header { class: "topbar",
            Link { class: "btn btn-ghost", to: Route::Dashboard {}, "← Voltar" }
        }
    }
}

#[component]
fn MaterialRow(
    material: MaterialVm,
    on_view: EventHandler<MaterialVm>,
    on_download: Callback<String>,
) -> Element {
    let for_view = material.clone();
    let download_url = material.download_url.clone();
    rsx! {
        li { class: "card material-row",
            div { class: "material-info",
                h3 { "{material.title}" }
                p { class: "muted", "Conteúdo Premium" }
            }
            div { class: "material-actions",
                button {
                    class: "btn btn-outline",
                    onclick: move |_| on_view.call(for_view.clone()),
                    "Visualizar"
                }
                button {
                    class: "btn btn-primary",
                    onclick: move |_| on_download.call(download_url.clone()),
                    "Download"
                }
            }
        }
    }
}
