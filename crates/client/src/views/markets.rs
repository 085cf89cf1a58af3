use dioxus::prelude::*;
use wagerdesk_shared::{CasinoGame, LiveOdds, MarketStatus, Runner, Sport};

use crate::components::ui::{Card, CardBody, CardHeader, EmptyState, ErrorBanner, Spinner};
use crate::components::RequireAuth;
use crate::cookies::use_cookies;
use crate::format::{odds, timestamp};
use crate::hooks::{use_casino_games, use_cricket_tree, use_live_odds};

/// Landing page: cricket markets and the casino lobby.
#[component]
pub fn Markets() -> Element {
    rsx! {
        RequireAuth { MarketsPage {} }
    }
}

#[component]
fn MarketsPage() -> Element {
    let selected_match = use_signal(|| None::<String>);

    rsx! {
        WelcomeNotice {}
        div { class: "grid gap-6 lg:grid-cols-[20rem_1fr]",
            CricketTree { selected_match }
            div { class: "space-y-6",
                if let Some(match_id) = selected_match() {
                    LiveOddsPanel { match_id }
                } else {
                    Card {
                        CardBody {
                            EmptyState { message: "Pick a match to see live odds.".to_string() }
                        }
                    }
                }
                CasinoGames {}
            }
        }
    }
}

/// One-time greeting, remembered through the `hasPopupBeenShown` cookie.
#[component]
fn WelcomeNotice() -> Element {
    let cookies = use_cookies();
    if cookies.cookies.read().has_popup_been_shown == Some(true) {
        return rsx! {};
    }

    rsx! {
        div { class: "mb-6 flex items-center justify-between gap-4 rounded-md border border-amber-800 bg-amber-950/50 px-4 py-3 text-sm text-amber-100",
            span { "Welcome back. Balances and reports reflect settled markets only; open exposure is shown in the balance drawer." }
            button {
                class: "rounded px-3 py-1 text-xs font-semibold hover:bg-amber-900",
                onclick: move |_| cookies.mark_popup_shown(),
                "Got it"
            }
        }
    }
}

#[component]
fn CricketTree(selected_match: Signal<Option<String>>) -> Element {
    let tree = use_cricket_tree();

    let body = match (tree.data(), tree.error()) {
        (_, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| tree.refetch() }
        },
        (Some(sports), None) if sports.is_empty() => rsx! {
            EmptyState { message: "No cricket events scheduled.".to_string() }
        },
        (Some(sports), None) => rsx! {
            for sport in sports {
                SportBranch { key: "{sport.id}", sport, selected_match }
            }
        },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        Card {
            CardHeader { title: "Cricket".to_string() }
            CardBody { class: "max-h-[70vh] overflow-y-auto".to_string(), {body} }
        }
    }
}

#[component]
fn SportBranch(sport: Sport, mut selected_match: Signal<Option<String>>) -> Element {
    rsx! {
        div { class: "space-y-3",
            for competition in sport.competitions {
                div { key: "{competition.id}",
                    h3 { class: "mb-1 text-xs font-semibold uppercase tracking-wide text-slate-400",
                        "{competition.name}"
                    }
                    ul { class: "space-y-0.5",
                        for summary in competition.matches {
                            li { key: "{summary.id}",
                                button {
                                    class: if selected_match.read().as_deref() == Some(summary.id.as_str()) {
                                        "flex w-full items-center justify-between rounded px-2 py-1.5 text-left text-sm bg-slate-800 text-white"
                                    } else {
                                        "flex w-full items-center justify-between rounded px-2 py-1.5 text-left text-sm text-slate-300 hover:bg-slate-800/60"
                                    },
                                    onclick: {
                                        let id = summary.id.clone();
                                        move |_| selected_match.set(Some(id.clone()))
                                    },
                                    span { class: "truncate", "{summary.name}" }
                                    if summary.in_play {
                                        span { class: "ml-2 rounded bg-emerald-600 px-1.5 text-[10px] font-bold uppercase text-white", "Live" }
                                    } else {
                                        span { class: "ml-2 text-[11px] text-slate-500", {timestamp(&summary.start_time)} }
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn LiveOddsPanel(match_id: String) -> Element {
    // Track the prop so the odds query re-runs when another match is picked
    let mut tracked_match = use_signal(|| match_id.clone());
    if *tracked_match.peek() != match_id {
        tracked_match.set(match_id.clone());
    }

    let odds_query = use_live_odds(tracked_match.into());

    let body = match (odds_query.data(), odds_query.error()) {
        (Some(live), _) => rsx! { OddsTable { live } },
        (None, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| odds_query.refetch() }
        },
        (None, None) => rsx! { Spinner { label: "Loading odds".to_string() } },
    };

    rsx! {
        Card {
            CardHeader {
                title: "Live odds".to_string(),
                subtitle: Some("Refreshes every 5 seconds".to_string()),
            }
            CardBody { {body} }
        }
    }
}

#[component]
fn OddsTable(live: LiveOdds) -> Element {
    if live.markets.is_empty() {
        return rsx! {
            EmptyState { message: "No markets are open for this match.".to_string() }
        };
    }

    rsx! {
        div { class: "space-y-5",
            for market in live.markets {
                div { key: "{market.id}",
                    div { class: "mb-2 flex items-center justify-between",
                        h3 { class: "text-sm font-semibold text-slate-200", "{market.name}" }
                        span { class: "text-xs uppercase text-slate-500", {status_label(market.status)} }
                    }
                    table { class: "w-full text-sm",
                        thead {
                            tr { class: "text-xs text-slate-500",
                                th { class: "py-1 text-left font-normal", "Runner" }
                                th { class: "w-20 py-1 text-center font-normal", "Back" }
                                th { class: "w-20 py-1 text-center font-normal", "Lay" }
                            }
                        }
                        tbody {
                            for runner in market.runners {
                                RunnerRow { key: "{runner.id}", runner, suspended: market.status != MarketStatus::Open }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn status_label(status: MarketStatus) -> &'static str {
    match status {
        MarketStatus::Open => "Open",
        MarketStatus::Suspended => "Suspended",
        MarketStatus::Closed => "Closed",
    }
}

#[component]
fn RunnerRow(runner: Runner, suspended: bool) -> Element {
    let back = runner.best_back().map(|p| odds(p.price)).unwrap_or_else(|| "-".to_string());
    let lay = runner.best_lay().map(|p| odds(p.price)).unwrap_or_else(|| "-".to_string());
    let dim = if suspended { "opacity-40" } else { "" };

    rsx! {
        tr { class: "border-t border-slate-800 {dim}",
            td { class: "py-1.5 text-slate-200", "{runner.name}" }
            td { class: "py-1.5",
                div { class: "rounded bg-sky-900/70 py-1 text-center font-mono text-sky-100", "{back}" }
            }
            td { class: "py-1.5",
                div { class: "rounded bg-rose-900/70 py-1 text-center font-mono text-rose-100", "{lay}" }
            }
        }
    }
}

#[component]
fn CasinoGames() -> Element {
    let games = use_casino_games();

    let body = match (games.data(), games.error()) {
        (_, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| games.refetch() }
        },
        (Some(list), None) if list.is_empty() => rsx! {
            EmptyState { message: "No casino tables are available.".to_string() }
        },
        (Some(list), None) => rsx! {
            div { class: "grid grid-cols-2 gap-3 sm:grid-cols-3 xl:grid-cols-4",
                for game in list {
                    GameTile { key: "{game.id}", game }
                }
            }
        },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        Card {
            CardHeader { title: "Casino".to_string() }
            CardBody { {body} }
        }
    }
}

#[component]
fn GameTile(game: CasinoGame) -> Element {
    rsx! {
        div { class: "overflow-hidden rounded-md border border-slate-800 bg-slate-950",
            if let Some(src) = &game.thumbnail {
                img { class: "aspect-video w-full object-cover", src: "{src}", alt: "{game.name}" }
            } else {
                div { class: "flex aspect-video items-center justify-center bg-slate-800 text-xs text-slate-500",
                    "{game.category}"
                }
            }
            div { class: "flex items-center justify-between px-2 py-1.5",
                div { class: "min-w-0",
                    p { class: "truncate text-sm text-slate-100", "{game.name}" }
                    p { class: "truncate text-[11px] text-slate-500", "{game.provider}" }
                }
                if game.is_live {
                    span { class: "h-2 w-2 flex-shrink-0 rounded-full bg-emerald-500", title: "Live dealer" }
                }
            }
        }
    }
}
