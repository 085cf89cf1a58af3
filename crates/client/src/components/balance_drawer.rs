use dioxus::prelude::*;
use wagerdesk_shared::BalanceSummary;

use super::ui::{Button, ButtonVariant, ErrorBanner, Spinner};
use crate::format::{money, pnl_class};
use crate::hooks::use_balance;

/// Slide-in balance summary. The figures are fetched each time it opens.
#[component]
pub fn BalanceDrawer(mut open: Signal<bool>) -> Element {
    if !open() {
        return rsx! {};
    }

    rsx! {
        div { class: "fixed inset-0 z-30",
            div {
                class: "absolute inset-0 bg-black/40",
                onclick: move |_| open.set(false),
            }
            aside { class: "absolute right-0 top-0 flex h-full w-80 flex-col border-l border-slate-800 bg-slate-900 shadow-2xl",
                header { class: "flex items-center justify-between border-b border-slate-800 px-5 py-4",
                    h2 { class: "text-base font-semibold text-slate-100", "Balance" }
                    button {
                        class: "text-slate-400 hover:text-white",
                        onclick: move |_| open.set(false),
                        "✕"
                    }
                }
                BalancePanel {}
            }
        }
    }
}

#[component]
fn BalancePanel() -> Element {
    let balance = use_balance();

    let content = match (balance.data(), balance.error()) {
        (_, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| balance.refetch() }
        },
        (Some(summary), None) => rsx! {
            BalanceFigures { summary }
        },
        (None, None) => rsx! {
            Spinner { label: "Fetching balance".to_string() }
        },
    };

    rsx! {
        div { class: "flex-1 overflow-y-auto px-5 py-4", {content} }
        footer { class: "border-t border-slate-800 px-5 py-3",
            Button {
                class: "w-full".to_string(),
                variant: ButtonVariant::Secondary,
                busy: balance.loading(),
                onclick: move |_| balance.refetch(),
                "Refresh"
            }
        }
    }
}

#[component]
fn BalanceFigures(summary: BalanceSummary) -> Element {
    let rows = [
        ("Current balance", summary.current_balance, false),
        ("Available balance", summary.available_balance, false),
        ("Exposure", summary.exposure, false),
        ("Credit reference", summary.credit_reference, false),
        ("Downline balance", summary.downline_balance, false),
        ("Profit / loss", summary.profit_loss, true),
    ];

    rsx! {
        dl { class: "space-y-3",
            for (label, amount, signed) in rows {
                div { key: "{label}", class: "flex items-baseline justify-between",
                    dt { class: "text-xs uppercase tracking-wide text-slate-400", "{label}" }
                    dd {
                        class: format!(
                            "font-mono text-sm {}",
                            if signed { pnl_class(amount) } else { "text-slate-100" },
                        ),
                        {money(amount)}
                    }
                }
            }
        }
    }
}
