//! WagerDesk Client - Dioxus admin console
//!
//! This crate contains the web/desktop client for the WagerDesk betting
//! back office: route gates, the realtime session channel, the request
//! cache and the console pages.

pub mod logging;

pub mod api_client;
pub mod auth;
pub mod config;
pub mod cookies;
pub mod format;
pub mod query;
pub mod session;
pub mod timer;

pub mod components;
pub mod hooks;
pub mod routes;
pub mod views;

pub use api_client::ApiClient;
pub use config::AppConfig;
pub use query::QueryCache;
pub use routes::Route;
pub use session::{SessionContext, SocketSession};
