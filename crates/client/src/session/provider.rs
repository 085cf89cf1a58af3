use std::rc::Rc;

use dioxus::prelude::*;
use wagerdesk_shared::ForceLogoutEvent;

use super::{ConnectionStatus, SocketSession, WsConnector};
use crate::auth::force_logout_notice;
use crate::components::toast::{use_toast, ToastContext};
use crate::config::AppConfig;
use crate::cookies::{use_cookies, CookieContext};
use crate::query::QueryCache;

/// Session handle plus the signals gates and the navbar render from.
#[derive(Clone)]
pub struct SessionContext {
    pub session: SocketSession,
    /// Last forced logout not yet cleared by a sign-in.
    pub forced_logout: Signal<Option<ForceLogoutEvent>>,
    pub status: Signal<ConnectionStatus>,
}

impl SessionContext {
    /// Wrap `session` and route its callbacks into fresh signals.
    ///
    /// A forced logout clears the tokens and the query cache, then shows a
    /// toast before the signal flips.
    pub fn new(
        session: SocketSession,
        cookies: CookieContext,
        cache: QueryCache,
        toast: ToastContext,
    ) -> Self {
        let status = Signal::new(ConnectionStatus::default());
        session.on_state_change(move |next| {
            let mut status = status;
            status.set(next);
        });

        let forced_logout = Signal::new(None::<ForceLogoutEvent>);
        session.on_force_logout(move |event| {
            crate::log_warn!("session: server ended the session: {}", event.reason);
            cookies.clear_tokens();
            cache.clear();
            toast.error(force_logout_notice(&event));
            let mut forced_logout = forced_logout;
            forced_logout.set(Some(event));
        });

        Self {
            session,
            forced_logout,
            status,
        }
    }

    pub fn is_forced_out(&self) -> bool {
        self.forced_logout.read().is_some()
    }

    /// User-initiated sign-out.
    pub fn logout(&self, cookies: CookieContext, cache: &QueryCache) {
        self.session.disconnect();
        cookies.clear_tokens();
        cache.clear();
        crate::log_info!("session: signed out");
    }

    /// Forget a forced logout once the viewer has signed in again.
    pub fn acknowledge_sign_in(&self) {
        let mut forced = self.forced_logout;
        if forced.peek().is_some() {
            forced.set(None);
        }
    }
}

/// Owns the app's single [`SocketSession`] and its forced-logout registration.
///
/// A forced logout is announced here, once, whichever gate is mounted.
#[component]
pub fn SessionProvider(children: Element) -> Element {
    let config = use_context::<AppConfig>();
    let cache = use_context::<QueryCache>();
    let toast = use_toast();
    let cookies = use_cookies();

    let ctx = use_context_provider(move || {
        let session = SocketSession::new(config.socket_url.clone(), Rc::new(WsConnector));
        SessionContext::new(session, cookies, cache, toast)
    });

    // A token removed elsewhere (another tab, manual clear) ends the channel too.
    let session = ctx.session.clone();
    use_effect(move || {
        if cookies.cookies.read().active_token().is_none() {
            session.disconnect();
        }
    });

    children
}

pub fn use_session() -> SessionContext {
    use_context::<SessionContext>()
}
