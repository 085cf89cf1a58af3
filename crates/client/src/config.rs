//! Runtime configuration for the console.
//!
//! Values are baked in at build time through `WAGERDESK_API_URL` and
//! `WAGERDESK_SOCKET_URL`. When unset, the browser build talks to its own
//! origin and the desktop build to a local backend.

#[cfg(not(target_arch = "wasm32"))]
const LOCAL_BACKEND: &str = "http://localhost:5000";

pub const SIGN_IN_PATH: &str = "/sign-in";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Base URL for REST calls, without a trailing slash.
    pub api_base_url: String,
    /// WebSocket endpoint of the session channel.
    pub socket_url: String,
}

impl AppConfig {
    pub fn new(api_base_url: impl Into<String>, socket_url: impl Into<String>) -> Self {
        Self {
            api_base_url: api_base_url.into().trim_end_matches('/').to_string(),
            socket_url: socket_url.into(),
        }
    }

    pub fn resolve() -> Self {
        let api = option_env!("WAGERDESK_API_URL")
            .map(str::to_string)
            .unwrap_or_else(default_origin);
        let socket = option_env!("WAGERDESK_SOCKET_URL")
            .map(str::to_string)
            .unwrap_or_else(|| format!("{}/session", http_to_ws(&api)));
        Self::new(api, socket)
    }
}

/// Convert an HTTP(S) base into the matching WS(S) scheme.
pub fn http_to_ws(url: &str) -> String {
    let url = url.trim_end_matches('/');
    if let Some(rest) = url.strip_prefix("https://") {
        format!("wss://{rest}")
    } else if let Some(rest) = url.strip_prefix("http://") {
        format!("ws://{rest}")
    } else {
        url.to_string()
    }
}

#[cfg(target_arch = "wasm32")]
fn default_origin() -> String {
    web_sys::window()
        .and_then(|w| w.location().origin().ok())
        .unwrap_or_else(|| "http://localhost".to_string())
}

#[cfg(not(target_arch = "wasm32"))]
fn default_origin() -> String {
    LOCAL_BACKEND.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_loses_trailing_slash() {
        let config = AppConfig::new("https://api.example.com/", "wss://api.example.com/session");
        assert_eq!(config.api_base_url, "https://api.example.com");
    }

    #[test]
    fn ws_scheme_follows_http_scheme() {
        assert_eq!(http_to_ws("https://a.example/"), "wss://a.example");
        assert_eq!(http_to_ws("http://localhost:5000"), "ws://localhost:5000");
    }
}
