use dioxus::prelude::*;

#[component]
pub fn Modal(
    open: bool,
    on_close: EventHandler<()>,
    title: String,
    children: Element,
    actions: Option<Element>,
) -> Element {
    if !open {
        return rsx! {};
    }

    rsx! {
        div { class: "fixed inset-0 z-40 flex items-center justify-center",
            // Backdrop to close
            div {
                class: "absolute inset-0 bg-black/60",
                onclick: move |_| on_close.call(()),
            }
            div { class: "relative w-full max-w-lg rounded-lg border border-slate-700 bg-slate-900 shadow-2xl",
                h3 { class: "border-b border-slate-800 px-5 py-3 text-base font-semibold text-slate-100",
                    "{title}"
                }
                div { class: "px-5 py-4", {children} }
                div { class: "flex justify-end gap-2 border-t border-slate-800 px-5 py-3",
                    if let Some(actions) = actions {
                        {actions}
                    }
                    button {
                        class: "rounded-md bg-slate-700 px-4 py-1.5 text-sm text-slate-100 hover:bg-slate-600",
                        onclick: move |_| on_close.call(()),
                        "Close"
                    }
                }
            }
        }
    }
}
