use dioxus::prelude::*;

use crate::auth::is_authenticated;
use crate::components::{BalanceDrawer, NavBar};
use crate::cookies::use_cookies;
use crate::routes::Route;
use crate::session::use_session;

/// Chrome around every console page.
#[component]
pub fn Shell() -> Element {
    let cookies = use_cookies();
    let session = use_session();
    let mut balance_open = use_signal(|| false);

    let signed_in = is_authenticated(&cookies.cookies.read()) && !session.is_forced_out();
    if !signed_in && *balance_open.peek() {
        balance_open.set(false);
    }

    rsx! {
        div { class: "min-h-screen bg-slate-950 text-slate-100",
            if signed_in {
                NavBar { balance_open }
            }
            main { class: "mx-auto max-w-7xl px-6 py-6",
                Outlet::<Route> {}
            }
            if signed_in {
                BalanceDrawer { open: balance_open }
            }
        }
    }
}
