use dioxus::prelude::*;

use crate::routes::Route;

#[component]
pub fn NotFound(segments: Vec<String>) -> Element {
    let path = format!("/{}", segments.join("/"));
    rsx! {
        div { class: "flex min-h-[60vh] flex-col items-center justify-center gap-3 text-center",
            h1 { class: "text-4xl font-bold text-slate-200", "404" }
            p { class: "text-sm text-slate-400", "Nothing lives at {path}." }
            Link { class: "text-sm text-amber-400 hover:underline", to: Route::Markets {}, "Back to markets" }
        }
    }
}
