use dioxus::prelude::*;

use super::modal::Modal;
use super::ui::{ErrorBanner, Spinner};
use crate::format::{money, pnl_class, timestamp};
use crate::hooks::use_bet_result;

/// Settlement details for one bet, fetched when opened.
#[component]
pub fn ResultModal(bet_id: ReadSignal<String>, on_close: EventHandler<()>) -> Element {
    let result = use_bet_result(bet_id);

    let body = match (result.data(), result.error()) {
        (Some(detail), _) => {
            let winner = detail.winner.clone().unwrap_or_else(|| "Not declared".to_string());
            let declared = detail
                .declared_at
                .as_ref()
                .map(timestamp)
                .unwrap_or_else(|| "-".to_string());
            rsx! {
                dl { class: "grid grid-cols-2 gap-x-4 gap-y-2 text-sm",
                    dt { class: "text-slate-400", "Event" }
                    dd { class: "text-slate-100", "{detail.event_name}" }
                    dt { class: "text-slate-400", "Market" }
                    dd { class: "text-slate-100", "{detail.market_name}" }
                    dt { class: "text-slate-400", "Winner" }
                    dd { class: "font-semibold text-amber-400", "{winner}" }
                    dt { class: "text-slate-400", "Declared" }
                    dd { class: "text-slate-100", "{declared}" }
                    dt { class: "text-slate-400", "Stake" }
                    dd { class: "text-slate-100", {money(detail.stake)} }
                    dt { class: "text-slate-400", "Profit / loss" }
                    dd { class: pnl_class(detail.profit_loss), {money(detail.profit_loss)} }
                    dt { class: "text-slate-400", "Commission" }
                    dd { class: "text-slate-100", {money(detail.commission)} }
                }
            }
        }
        (None, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| result.refetch() }
        },
        (None, None) => rsx! {
            Spinner { label: "Loading result".to_string() }
        },
    };

    rsx! {
        Modal {
            open: true,
            on_close,
            title: format!("Result for bet {}", bet_id.read()),
            {body}
        }
    }
}
