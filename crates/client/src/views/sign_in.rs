use dioxus::prelude::*;
use wagerdesk_shared::CookieRole;

use crate::api_client::ApiClient;
use crate::auth::{decode_token, get_user_type, is_authenticated};
use crate::components::ui::{Button, Card, CardBody, CardHeader, InputType, TextInput};
use crate::config::AppConfig;
use crate::cookies::use_cookies;
use crate::query::QueryCache;
use crate::routes::post_login_target;
use crate::session::use_session;

#[component]
pub fn SignIn(from: String) -> Element {
    let cookies = use_cookies();
    let session = use_session();
    let config = use_context::<AppConfig>();
    let cache = use_context::<QueryCache>();
    let nav = use_navigator();

    let role = use_signal(|| CookieRole::Admin);
    let mut user_name = use_signal(String::new);
    let mut password = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);
    let mut is_submitting = use_signal(|| false);

    let mut target = use_signal(|| post_login_target(&from));
    let next = post_login_target(&from);
    if *target.peek() != next {
        target.set(next);
    }

    // Already signed in: skip the form.
    let gate_session = session.clone();
    use_effect(move || {
        if is_authenticated(&cookies.cookies.read()) && !gate_session.is_forced_out() {
            nav.replace(target.peek().clone());
        }
    });

    let role_tab = move |tab: CookieRole, label: &'static str| {
        let class = if role() == tab {
            "flex-1 rounded-md bg-amber-500 px-3 py-1.5 text-sm font-semibold text-slate-950"
        } else {
            "flex-1 rounded-md px-3 py-1.5 text-sm text-slate-300 hover:bg-slate-800"
        };
        rsx! {
            button { class, r#type: "button", onclick: move |_| {
                    let mut role = role;
                    role.set(tab);
                }, "{label}" }
        }
    };

    rsx! {
        div { class: "flex min-h-screen items-center justify-center bg-slate-950 px-4",
            div { class: "w-full max-w-sm",
                Card {
                    CardHeader {
                        title: "Sign in".to_string(),
                        subtitle: Some("WagerDesk administration console".to_string()),
                    }
                    CardBody {
                        div { class: "mb-4 flex gap-1 rounded-lg bg-slate-950 p-1",
                            {role_tab(CookieRole::Admin, "Admin")}
                            {role_tab(CookieRole::TechAdmin, "Tech admin")}
                        }

                        if let Some(e) = error.cloned() {
                            div { class: "mb-4 rounded-md border border-rose-900 bg-rose-950/60 p-3",
                                p { class: "text-sm text-rose-300", "{e}" }
                            }
                        }

                        form {
                            class: "space-y-4",
                            onsubmit: move |e: FormEvent| {
                                e.prevent_default();
                                let config = config.clone();
                                let cache = cache.clone();
                                let session = session.clone();
                                async move {
                                    if is_submitting() {
                                        return;
                                    }

                                    let selected = role();
                                    let name = user_name.read().trim().to_string();
                                    let secret = password.read().clone();
                                    if name.is_empty() || secret.is_empty() {
                                        error.set(Some("Enter your user name and password.".to_string()));
                                        return;
                                    }

                                    is_submitting.set(true);
                                    error.set(None);

                                    let client = ApiClient::new().with_base_url(config.api_base_url.clone());
                                    match client.login(selected, &name, &secret).await {
                                        Ok(res) => {
                                            let accepted = decode_token(&res.token)
                                                .and_then(|decoded| get_user_type(&decoded, selected));
                                            match accepted {
                                                Ok(user_type) => {
                                                    crate::log_info!("signed in as {} ({})", name, user_type);
                                                    cache.clear();
                                                    session.acknowledge_sign_in();
                                                    cookies.set_token(selected, &res.token);
                                                    password.set(String::new());
                                                    nav.replace(target.peek().clone());
                                                }
                                                Err(e) => {
                                                    crate::log_warn!("sign-in token rejected: {}", e);
                                                    error.set(Some(
                                                        "This account cannot use the selected console.".to_string(),
                                                    ));
                                                }
                                            }
                                        }
                                        Err(e) => error.set(Some(e.user_message())),
                                    }
                                    is_submitting.set(false);
                                }
                            },
                            TextInput {
                                label: "User name".to_string(),
                                value: user_name.cloned(),
                                autocomplete: "username".to_string(),
                                oninput: move |e: FormEvent| user_name.set(e.value()),
                            }
                            TextInput {
                                label: "Password".to_string(),
                                value: password.cloned(),
                                input_type: InputType::Password,
                                autocomplete: "current-password".to_string(),
                                oninput: move |e: FormEvent| password.set(e.value()),
                            }
                            Button {
                                class: "w-full".to_string(),
                                r#type: "submit".to_string(),
                                busy: is_submitting(),
                                "Sign in"
                            }
                        }
                    }
                }
            }
        }
    }
}
