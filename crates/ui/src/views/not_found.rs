use dioxus::prelude::*;
use dioxus_router::Link;

use crate::routes::Route;

#[component]
pub fn NotFoundView(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    use_hook(|| tracing::warn!(%path, "no route for path"));

    rsx! {
        div { class: "page not-found",
            h1 { "404" }
            p { "Ops! Página não encontrada" }
            Link { class: "btn btn-primary", to: Route::Dashboard {}, "Voltar ao início" }
        }
    }
}
