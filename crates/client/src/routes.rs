//! Application routing configuration.

use dioxus::prelude::*;

use crate::views::{AccountStatement, BetHistory, Markets, NotFound, Shell, SignIn};

// Router configuration
#[derive(Debug, Clone, Routable, PartialEq)]
#[rustfmt::skip]
pub enum Route {
    // `from` is where the viewer was headed before being sent here
    #[route("/sign-in?:from")]
    SignIn { from: String },

    #[layout(Shell)]
        #[route("/")]
        Markets {},
        #[route("/reports/account-statement")]
        AccountStatement {},
        #[route("/reports/bet-history")]
        BetHistory {},
    #[end_layout]

    #[route("/:..segments")]
    NotFound { segments: Vec<String> },
}

/// Where to go after signing in. Anything that is not a console page lands on the markets.
pub fn post_login_target(from: &str) -> Route {
    let from = from.trim();
    if from.is_empty() {
        return Route::Markets {};
    }
    let decoded = urlencoding::decode(from)
        .map(|s| s.into_owned())
        .unwrap_or_else(|_| from.to_string());
    match decoded.parse::<Route>() {
        Ok(Route::SignIn { .. }) | Ok(Route::NotFound { .. }) | Err(_) => Route::Markets {},
        Ok(route) => route,
    }
}
