use dioxus::prelude::*;

use crate::auth::{plan_gate, GateState, SignInRedirect};
use crate::cookies::use_cookies;
use crate::routes::Route;
use crate::session::use_session;

/// Route guard that also opens the realtime session.
///
/// Shows a spinner while checking, redirects to the sign-in page when the
/// cookies do not authorize the viewer, and renders `children` otherwise.
///
/// ```text
/// #[component]
/// pub fn Markets() -> Element {
///     rsx! { RequireAuth { MarketsPage {} } }
/// }
/// ```
#[component]
pub fn RequireAuth(children: Element) -> Element {
    let nav = use_navigator();
    let route = use_route::<Route>();

    let state = use_auth_gate(route.to_string(), move |target| {
        nav.replace(Route::SignIn { from: target.from });
    });

    match state {
        GateState::Checking => rsx! {
            div { class: "flex min-h-[50vh] items-center justify-center",
                span { class: "loading loading-spinner loading-lg text-amber-500" }
            }
        },
        // Will redirect via effect
        GateState::Unauthorized => rsx! {},
        GateState::Authorized => children,
    }
}

/// Gate state for the page at `path`.
///
/// Re-plans whenever the cookies change, opens the session for authorized
/// viewers and calls `redirect` once the viewer is turned away. A forced
/// logout demotes an authorized view; the notice itself is raised by the
/// session provider.
pub fn use_auth_gate(path: String, mut redirect: impl FnMut(SignInRedirect) + 'static) -> GateState {
    let cookies = use_cookies();
    let session = use_session();

    let mut state = use_signal(|| GateState::Checking);
    let mut pending = use_signal(|| None::<SignInRedirect>);

    let mut current_path = use_signal(|| path.clone());
    if *current_path.peek() != path {
        current_path.set(path);
    }

    let gate_session = session.clone();
    use_effect(move || {
        let snapshot = cookies.cookies.read().clone();
        state.set(GateState::Checking);

        let forced_out = gate_session.forced_logout.peek().is_some();
        let plan = plan_gate(&snapshot, &current_path.peek(), forced_out);

        if let Some(identity) = plan.connect {
            let socket = gate_session.session.clone();
            // Outlives this gate so navigating between pages keeps the channel.
            dioxus::dioxus_core::spawn_forever(async move {
                if let Err(e) = socket.connect(&identity.login_id, identity.user_type).await {
                    crate::log_warn!("auth gate: session connect failed: {}", e);
                }
            });
        }

        pending.set(plan.redirect);
        state.set(plan.state);
    });

    let forced_logout = session.forced_logout;
    use_effect(move || {
        if forced_logout.read().is_none() || *state.peek() == GateState::Unauthorized {
            return;
        }
        pending.set(Some(SignInRedirect::new(current_path.peek().clone())));
        state.set(GateState::Unauthorized);
    });

    use_effect(move || {
        if state() != GateState::Unauthorized {
            return;
        }
        if let Some(target) = pending.peek().clone() {
            crate::log_debug!("auth gate: redirecting to {}", target.href());
            redirect(target);
        }
    });

    state()
}
