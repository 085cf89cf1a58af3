//! Cross-platform logging.
//!
//! The `log_*!` macros format once and hand the message to [`emit`], which
//! routes it to `web_sys::console` in the browser and to `tracing` on native
//! builds.

use std::sync::Once;

static INIT: Once = Once::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Error,
    Warn,
    Info,
    Debug,
}

/// Install the native `tracing` subscriber. Safe to call more than once.
///
/// The filter comes from `RUST_LOG` and defaults to `wagerdesk_client=debug`.
/// In the browser the console needs no setup, so this is a no-op there.
pub fn init() {
    INIT.call_once(|| {
        #[cfg(not(target_arch = "wasm32"))]
        {
            use tracing_subscriber::EnvFilter;
            let _ = tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env()
                        .unwrap_or_else(|_| EnvFilter::new("wagerdesk_client=debug")),
                )
                .try_init();
        }
    });
}

#[cfg(target_arch = "wasm32")]
pub fn emit(level: Level, msg: &str) {
    let value: wasm_bindgen::JsValue = msg.into();
    match level {
        Level::Error => web_sys::console::error_1(&value),
        Level::Warn => web_sys::console::warn_1(&value),
        Level::Info => web_sys::console::log_1(&value),
        Level::Debug => web_sys::console::debug_1(&value),
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub fn emit(level: Level, msg: &str) {
    match level {
        Level::Error => tracing::error!("{}", msg),
        Level::Warn => tracing::warn!("{}", msg),
        Level::Info => tracing::info!("{}", msg),
        Level::Debug => tracing::debug!("{}", msg),
    }
}

#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Info, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Error, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Warn, &format!($($arg)*))
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($arg:tt)*) => {
        $crate::logging::emit($crate::logging::Level::Debug, &format!($($arg)*))
    };
}
