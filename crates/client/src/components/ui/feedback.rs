use dioxus::prelude::*;
use wagerdesk_shared::ApiError;

#[component]
pub fn Spinner(#[props(optional)] label: Option<String>) -> Element {
    rsx! {
        div { class: "flex items-center justify-center gap-3 py-10 text-sm text-slate-400",
            span { class: "loading loading-spinner loading-md text-amber-500" }
            if let Some(label) = label {
                span { "{label}" }
            }
        }
    }
}

/// Component-local failure state with a retry action.
#[component]
pub fn ErrorBanner(error: ApiError, on_retry: EventHandler<()>) -> Element {
    let message = error.user_message();
    rsx! {
        div { class: "flex items-center justify-between gap-4 rounded-md border border-rose-900 bg-rose-950/60 px-4 py-3 text-sm text-rose-200",
            span { "{message}" }
            button {
                class: "rounded px-3 py-1 text-xs font-semibold text-rose-100 hover:bg-rose-900",
                onclick: move |_| on_retry.call(()),
                "Retry"
            }
        }
    }
}

#[component]
pub fn EmptyState(message: String) -> Element {
    rsx! {
        p { class: "py-8 text-center text-sm italic text-slate-500", "{message}" }
    }
}
