use dioxus::prelude::*;
use dioxus_router::{Link, use_navigator};

use crate::context::AppContext;
use crate::routes::Route;
use crate::vm::{BonusCardVm, ModuleCardVm, ProgressSummary, build_dashboard_vm};

#[component]
pub fn DashboardView() -> Element {
    let ctx = use_context::<AppContext>();
    let navigator = use_navigator();
    let gate = ctx.auth_gate();

    let vm = build_dashboard_vm(
        gate.current_profile().as_ref(),
        &ProgressSummary::from_tracker(&ctx.progress()),
    );

    let on_logout = use_callback(move |()| {
        let gate = gate.clone();
        spawn(async move {
            gate.logout().await;
            navigator.replace(Route::Auth { reset: false });
        });
    });

    rsx! {
        div { class: "page dashboard",
            header { class: "topbar",
                span { class: "brand", "Área de Membros" }
                button {
                    class: "btn btn-ghost",
                    onclick: move |_| on_logout.call(()),
                    "Sair"
                }
            }

            section { class: "card progress-card",
                div { class: "progress-head",
                    div {
                        h2 { "Seu Progresso" }
                        p { class: "muted", "{vm.percentage_label}" }
                    }
                    span { class: "badge", "{vm.badge}" }
                }
                div { class: "progress-track",
                    div {
                        class: "progress-fill",
                        style: "width: {vm.percentage}%",
                    }
                }
            }

            div { class: "welcome",
                h2 { "{vm.greeting}" }
                p { class: "muted", "Continue aprendendo e construindo seu negócio de panetones" }
            }

            div { class: "module-grid",
                for card in vm.modules {
                    ModuleCard { key: "{card.id}", card }
                }
            }

            BonusCard { card: vm.bonus }
        }
    }
}

#[component]
fn ModuleCard(card: ModuleCardVm) -> Element {
    let state_class = if card.completed { "card module-card completed" } else { "card module-card" };
    rsx! {
        Link { class: "{state_class}", to: Route::Module { id: card.id },
            div { class: "module-card-head",
                h3 { "{card.label}" }
                if card.completed {
                    span { class: "badge badge-success", "Completo" }
                }
            }
            p { class: "module-title", "{card.title}" }
            p { class: "muted", "{card.subtitle}" }
            div { class: "module-card-foot",
                span { class: "muted", "{card.lessons}" }
                span { class: "btn btn-small", "{card.cta}" }
            }
        }
    }
}

#[component]
fn BonusCard(card: BonusCardVm) -> Element {
    match card.locked_label {
        Some(label) => rsx! {
            section { class: "card bonus-card locked",
                div { class: "bonus-lock",
                    p { class: "bonus-lock-title", "🔒 {label}" }
                    p { class: "muted", "Complete os módulos e aguarde 7 dias" }
                }
                h3 { "{card.title}" }
                p { class: "muted", "{card.subtitle}" }
            }
        },
        None => rsx! {
            Link { class: "card bonus-card", to: Route::Module { id: card.id },
                h3 {
                    "{card.title}"
                    span { class: "badge badge-bonus", "Disponível" }
                }
                p { class: "muted", "{card.subtitle}" }
                span { class: "btn btn-bonus", "Acessar Bônus" }
            }
        },
    }
}
