//! Cookie store.
//!
//! - Web: `document.cookie`
//! - Desktop: a JSON jar in the platform config directory:
//!   - Linux: `~/.config/wagerdesk/cookies.json`
//!   - macOS: `~/Library/Application Support/wagerdesk/cookies.json`
//!   - Windows: `%APPDATA%\wagerdesk\cookies.json`
//!
//! Components read cookies through [`CookieContext`], whose signal changes
//! whenever a cookie is written through it or the store changes underneath.

use std::rc::Rc;

use dioxus::prelude::*;
use wagerdesk_shared::{AuthCookies, CookieRole, POPUP_COOKIE};

use crate::timer::sleep_ms;

/// Lifetime given to cookies the console writes.
const COOKIE_MAX_AGE_SECS: u32 = 60 * 60 * 24;

/// How often the store is re-read for changes made elsewhere (other tabs).
const COOKIE_POLL_MS: u32 = 2_000;

/// Split a `Cookie`-style header (`a=1; b=2`) into trimmed pairs.
pub fn parse_cookie_header(header: &str) -> Vec<(String, String)> {
    header
        .split(';')
        .filter_map(|part| {
            let (name, value) = part.split_once('=')?;
            let name = name.trim();
            if name.is_empty() {
                return None;
            }
            let value = urlencoding::decode(value.trim())
                .map(|v| v.into_owned())
                .unwrap_or_else(|_| value.trim().to_string());
            Some((name.to_string(), value))
        })
        .collect()
}

pub fn cookies_from_header(header: &str) -> AuthCookies {
    let pairs = parse_cookie_header(header);
    AuthCookies::from_pairs(pairs.iter().map(|(n, v)| (n.as_str(), v.as_str())))
}

/// `document.cookie` assignment that writes `value`, or expires the cookie on `None`.
pub fn set_cookie_string(name: &str, value: Option<&str>) -> String {
    match value {
        Some(value) => format!(
            "{name}={}; path=/; max-age={COOKIE_MAX_AGE_SECS}; SameSite=Lax",
            urlencoding::encode(value)
        ),
        None => format!("{name}=; path=/; max-age=0; SameSite=Lax"),
    }
}

// =========================================
// Web (WASM) implementation
// =========================================

#[cfg(target_arch = "wasm32")]
mod store {
    use wasm_bindgen::JsCast;
    use wagerdesk_shared::AuthCookies;

    use super::{cookies_from_header, set_cookie_string};

    fn document() -> Option<web_sys::HtmlDocument> {
        web_sys::window()?.document()?.dyn_into().ok()
    }

    pub fn load() -> AuthCookies {
        document()
            .and_then(|doc| doc.cookie().ok())
            .map(|header| cookies_from_header(&header))
            .unwrap_or_default()
    }

    pub fn write(name: &str, value: Option<&str>) {
        let Some(doc) = document() else {
            return;
        };
        if let Err(e) = doc.set_cookie(&set_cookie_string(name, value)) {
            crate::log_error!("cookies: failed to write {}: {:?}", name, e);
        }
    }
}

// =========================================
// Desktop (native) implementation
// =========================================

#[cfg(not(target_arch = "wasm32"))]
mod store {
    use std::path::PathBuf;

    use anyhow::Context as _;
    use wagerdesk_shared::{AuthCookies, ADMIN_COOKIE, POPUP_COOKIE, TECH_ADMIN_COOKIE};

    fn jar_path() -> anyhow::Result<PathBuf> {
        let dir = dirs::config_dir()
            .context("no config directory on this platform")?
            .join("wagerdesk");
        if !dir.exists() {
            std::fs::create_dir_all(&dir)
                .with_context(|| format!("creating {}", dir.display()))?;
        }
        Ok(dir.join("cookies.json"))
    }

    fn read_jar() -> anyhow::Result<AuthCookies> {
        let path = jar_path()?;
        if !path.exists() {
            return Ok(AuthCookies::default());
        }
        let json = std::fs::read_to_string(&path)
            .with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    fn write_jar(cookies: &AuthCookies) -> anyhow::Result<()> {
        let path = jar_path()?;
        let json = serde_json::to_string_pretty(cookies)?;
        std::fs::write(&path, json).with_context(|| format!("writing {}", path.display()))
    }

    /// Set or clear cookie `name` in `cookies`. Unknown names are ignored.
    pub(super) fn apply(cookies: &mut AuthCookies, name: &str, value: Option<&str>) -> bool {
        match name {
            ADMIN_COOKIE => cookies.admin = value.map(str::to_string),
            TECH_ADMIN_COOKIE => cookies.tech_admin = value.map(str::to_string),
            POPUP_COOKIE => cookies.has_popup_been_shown = value.map(|v| v == "true"),
            _ => return false,
        }
        true
    }

    pub fn load() -> AuthCookies {
        read_jar().unwrap_or_else(|e| {
            crate::log_warn!("cookies: {:#}", e);
            AuthCookies::default()
        })
    }

    pub fn write(name: &str, value: Option<&str>) {
        let mut cookies = load();
        if !apply(&mut cookies, name, value) {
            return;
        }
        if let Err(e) = write_jar(&cookies) {
            crate::log_error!("cookies: {:#}", e);
        }
    }
}

/// Where cookies are persisted.
pub trait CookieStore {
    fn load(&self) -> AuthCookies;
    /// Write cookie `name`, or expire it on `None`.
    fn write(&self, name: &str, value: Option<&str>);
}

/// `document.cookie` on the web, the JSON jar on desktop.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlatformCookies;

impl CookieStore for PlatformCookies {
    fn load(&self) -> AuthCookies {
        store::load()
    }

    fn write(&self, name: &str, value: Option<&str>) {
        store::write(name, value)
    }
}

/// Reactive view of the auth cookies.
#[derive(Clone, Copy)]
pub struct CookieContext {
    pub cookies: Signal<AuthCookies>,
    store: CopyValue<Rc<dyn CookieStore>>,
}

impl CookieContext {
    /// Snapshot `store` into a signal owned by the calling component.
    pub fn new(store: Rc<dyn CookieStore>) -> Self {
        Self {
            cookies: Signal::new(store.load()),
            store: CopyValue::new(store),
        }
    }

    /// Store `token` under `role` and clear the other role's token.
    pub fn set_token(mut self, role: CookieRole, token: &str) {
        let store = self.store.cloned();
        for other in CookieRole::ALL {
            if other != role {
                store.write(other.cookie_name(), None);
            }
        }
        store.write(role.cookie_name(), Some(token));
        self.cookies.set(store.load());
    }

    pub fn clear_tokens(mut self) {
        let store = self.store.cloned();
        for role in CookieRole::ALL {
            store.write(role.cookie_name(), None);
        }
        self.cookies.set(store.load());
    }

    pub fn mark_popup_shown(mut self) {
        let store = self.store.cloned();
        store.write(POPUP_COOKIE, Some("true"));
        self.cookies.set(store.load());
    }

    /// Re-read the store; the signal only changes when the cookies did.
    pub fn refresh(mut self) {
        let current = self.store.cloned().load();
        if *self.cookies.peek() != current {
            self.cookies.set(current);
        }
    }
}

#[component]
pub fn CookieProvider(children: Element) -> Element {
    let ctx = use_context_provider(|| CookieContext::new(Rc::new(PlatformCookies)));

    use_future(move || async move {
        loop {
            sleep_ms(COOKIE_POLL_MS).await;
            ctx.refresh();
        }
    });

    children
}

pub fn use_cookies() -> CookieContext {
    use_context::<CookieContext>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_document_cookie_string() {
        let cookies = cookies_from_header("theme=dark; Admin=abc.def.ghi;hasPopupBeenShown=true");
        assert_eq!(cookies.admin.as_deref(), Some("abc.def.ghi"));
        assert_eq!(cookies.tech_admin, None);
        assert_eq!(cookies.has_popup_been_shown, Some(true));
    }

    #[test]
    fn skips_nameless_and_valueless_parts() {
        let pairs = parse_cookie_header("; =x; flag; a = 1 ");
        assert_eq!(pairs, vec![("a".to_string(), "1".to_string())]);
    }

    #[test]
    fn decodes_percent_encoded_values() {
        let cookies = cookies_from_header("TechAdmin=a%2Eb.c");
        assert_eq!(cookies.tech_admin.as_deref(), Some("a.b.c"));
    }

    #[test]
    fn cookie_assignment_strings() {
        assert_eq!(
            set_cookie_string("Admin", Some("t.k.n")),
            "Admin=t.k.n; path=/; max-age=86400; SameSite=Lax"
        );
        assert_eq!(
            set_cookie_string("Admin", None),
            "Admin=; path=/; max-age=0; SameSite=Lax"
        );
    }

    #[test]
    fn jar_updates_only_known_cookies() {
        let mut cookies = AuthCookies::with_token(CookieRole::Admin, "a.b.c");
        assert!(store::apply(&mut cookies, "TechAdmin", Some("t.k.n")));
        assert!(store::apply(&mut cookies, "Admin", None));
        assert!(store::apply(&mut cookies, "hasPopupBeenShown", Some("true")));
        assert!(!store::apply(&mut cookies, "theme", Some("dark")));
        assert_eq!(cookies.admin, None);
        assert_eq!(cookies.tech_admin.as_deref(), Some("t.k.n"));
        assert_eq!(cookies.has_popup_been_shown, Some(true));
    }

    #[test]
    fn cleared_cookie_reads_back_as_unauthenticated() {
        let cookies = cookies_from_header("Admin=; TechAdmin=undefined");
        assert_eq!(cookies.active_token(), None);
    }
}
