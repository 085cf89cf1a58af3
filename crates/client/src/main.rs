//! WagerDesk Client - Main entry point
//!
//! Supports both web (WASM) and desktop platforms.

#![allow(non_snake_case)]

use dioxus::prelude::*;
use wagerdesk_client::components::{Toast, ToastContext};
use wagerdesk_client::cookies::CookieProvider;
use wagerdesk_client::session::SessionProvider;
use wagerdesk_client::{logging, AppConfig, QueryCache, Route};

// Assets
const MAIN_CSS: Asset = asset!("/assets/main.css");

fn main() {
    logging::init();
    dioxus::launch(App);
}

#[component]
fn App() -> Element {
    let config = use_context_provider(AppConfig::resolve);
    use_context_provider(QueryCache::new);
    use_context_provider(ToastContext::new);

    use_hook(move || {
        wagerdesk_client::log_info!(
            "console starting against {} (socket {})",
            config.api_base_url,
            config.socket_url
        );
    });

    rsx! {
        document::Link { rel: "stylesheet", href: MAIN_CSS }

        CookieProvider {
            SessionProvider {
                Router::<Route> {}
            }
        }
        Toast {}
    }
}
