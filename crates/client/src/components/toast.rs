use dioxus::prelude::*;

use crate::timer::sleep_ms;

const TOAST_DISMISS_MS: u32 = 5_000;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ToastKind {
    Success,
    Error,
}

#[derive(Clone, PartialEq, Debug)]
pub struct ToastMessage {
    pub id: u64,
    pub message: String,
    pub kind: ToastKind,
}

/// Shared handle for raising transient notices.
#[derive(Clone, Copy)]
pub struct ToastContext {
    pub message: Signal<Option<ToastMessage>>,
    next_id: Signal<u64>,
}

impl ToastContext {
    pub fn new() -> Self {
        Self {
            message: Signal::new(None),
            next_id: Signal::new(0),
        }
    }

    pub fn show(mut self, kind: ToastKind, message: impl Into<String>) {
        let id = *self.next_id.peek() + 1;
        self.next_id.set(id);
        self.message.set(Some(ToastMessage {
            id,
            message: message.into(),
            kind,
        }));
    }

    pub fn success(self, message: impl Into<String>) {
        self.show(ToastKind::Success, message);
    }

    pub fn error(self, message: impl Into<String>) {
        self.show(ToastKind::Error, message);
    }

    pub fn dismiss(mut self) {
        self.message.set(None);
    }
}

pub fn use_toast() -> ToastContext {
    use_context::<ToastContext>()
}

#[component]
pub fn Toast() -> Element {
    let toast = use_toast();
    let mut message = toast.message;

    // Auto-dismiss; a newer toast keeps its own full timeout.
    use_effect(move || {
        if let Some(shown) = message() {
            spawn(async move {
                sleep_ms(TOAST_DISMISS_MS).await;
                if message.peek().as_ref().map(|m| m.id) == Some(shown.id) {
                    message.set(None);
                }
            });
        }
    });

    let Some(current) = message() else {
        return rsx! {};
    };

    let alert_class = match current.kind {
        ToastKind::Success => "border-emerald-700 bg-emerald-950 text-emerald-100",
        ToastKind::Error => "border-rose-700 bg-rose-950 text-rose-100",
    };

    rsx! {
        div { class: "fixed bottom-4 right-4 z-50 max-w-sm",
            div {
                class: "flex items-start gap-3 rounded-md border px-4 py-3 text-sm shadow-lg {alert_class}",
                role: "alert",
                span { class: "flex-1 break-words", "{current.message}" }
                button {
                    class: "opacity-70 hover:opacity-100",
                    onclick: move |_| toast.dismiss(),
                    "✕"
                }
            }
        }
    }
}
