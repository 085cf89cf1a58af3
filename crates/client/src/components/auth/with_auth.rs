use dioxus::prelude::*;

use crate::auth::{sync_gate_allows, SignInRedirect};
use crate::cookies::use_cookies;
use crate::routes::Route;
use crate::session::use_session;

/// Synchronous gate verdict for the current render.
///
/// Schedules a redirect to the sign-in page when the viewer is not
/// authorized. Never touches the realtime session.
pub fn use_sync_auth() -> bool {
    let nav = use_navigator();
    let route = use_route::<Route>();
    use_sync_gate(route.to_string(), move |target| {
        nav.replace(Route::SignIn { from: target.from });
    })
}

/// Verdict for the page at `path`, computed during render.
///
/// `redirect` is called after a render that turned the viewer away.
pub fn use_sync_gate(path: String, mut redirect: impl FnMut(SignInRedirect) + 'static) -> bool {
    let cookies = use_cookies();
    let session = use_session();

    let allowed = sync_gate_allows(&cookies.cookies.read(), session.is_forced_out());

    let mut current_path = use_signal(|| path.clone());
    if *current_path.peek() != path {
        current_path.set(path);
    }
    let mut verdict = use_signal(|| allowed);
    if *verdict.peek() != allowed {
        verdict.set(allowed);
    }

    use_effect(move || {
        if !verdict() {
            redirect(SignInRedirect::new(current_path.peek().clone()));
        }
    });

    allowed
}

/// Define a route component that renders `$page` only for authorized viewers.
///
/// Unauthorized viewers get an empty render followed by a redirect.
///
/// ```text
/// with_auth!(pub BetHistory => BetHistoryPage);
/// ```
#[macro_export]
macro_rules! with_auth {
    ($(#[$meta:meta])* $vis:vis $name:ident => $page:ident) => {
        $(#[$meta])*
        #[::dioxus::prelude::component]
        $vis fn $name() -> ::dioxus::prelude::Element {
            if !$crate::components::auth::use_sync_auth() {
                return ::dioxus::prelude::rsx! {};
            }
            ::dioxus::prelude::rsx! { $page {} }
        }
    };
}
