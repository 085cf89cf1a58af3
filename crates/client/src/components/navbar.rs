use dioxus::prelude::*;

use crate::api_client::ApiClient;
use crate::auth::resolve_identity;
use crate::components::toast::use_toast;
use crate::components::ui::{Button, ButtonVariant};
use crate::config::AppConfig;
use crate::cookies::use_cookies;
use crate::query::QueryCache;
use crate::routes::Route;
use crate::session::use_session;

#[component]
pub fn NavBar(mut balance_open: Signal<bool>) -> Element {
    let cookies = use_cookies();
    let session = use_session();
    let config = use_context::<AppConfig>();
    let cache = use_context::<QueryCache>();
    let toast = use_toast();
    let nav = use_navigator();

    let identity = resolve_identity(&cookies.cookies.read()).ok();
    let status = *session.status.read();
    let (dot_class, dot_title) = if status.is_connected {
        ("bg-emerald-500", "Live")
    } else if status.is_connecting {
        ("bg-amber-400 animate-pulse", "Connecting")
    } else {
        ("bg-slate-600", "Offline")
    };

    let on_logout = move |_: MouseEvent| {
        let client = ApiClient::authorized(&config, &cookies.cookies.peek());
        session.logout(cookies, &cache);
        toast.success("Signed out");
        spawn(async move {
            if let Err(e) = client.logout().await {
                crate::log_debug!("logout call failed: {}", e);
            }
        });
        nav.replace(Route::SignIn {
            from: String::new(),
        });
    };

    rsx! {
        nav { class: "flex items-center gap-6 border-b border-slate-800 bg-slate-900 px-6 py-3",
            Link { class: "text-lg font-bold tracking-tight text-amber-400", to: Route::Markets {}, "WagerDesk" }
            ul { class: "flex items-center gap-4 text-sm text-slate-300",
                li { Link { class: "hover:text-white", active_class: "text-white", to: Route::Markets {}, "Markets" } }
                li {
                    Link {
                        class: "hover:text-white",
                        active_class: "text-white",
                        to: Route::AccountStatement {},
                        "Account statement"
                    }
                }
                li { Link { class: "hover:text-white", active_class: "text-white", to: Route::BetHistory {}, "Bet history" } }
            }
            div { class: "ml-auto flex items-center gap-4 text-sm",
                span { class: "flex items-center gap-2 text-slate-400", title: dot_title,
                    span { class: "h-2 w-2 rounded-full {dot_class}" }
                    if let Some(identity) = &identity {
                        if !identity.login_id.is_empty() {
                            span { class: "text-slate-200", "{identity.login_id}" }
                        }
                        span { class: "rounded bg-slate-800 px-1.5 py-0.5 text-xs", {identity.user_type.label()} }
                    }
                }
                button {
                    class: "rounded-md bg-slate-800 px-3 py-1.5 text-slate-100 hover:bg-slate-700",
                    onclick: move |_| balance_open.set(!balance_open()),
                    "Balance"
                }
                Button {
                    variant: ButtonVariant::Ghost,
                    class: "px-3 py-1.5".to_string(),
                    onclick: on_logout,
                    "Sign out"
                }
            }
        }
    }
}
