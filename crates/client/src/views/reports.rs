use chrono::{Duration, NaiveDate, Utc};
use dioxus::prelude::*;
use wagerdesk_shared::{AccountStatementEntry, BetHistoryEntry, BetStatus, ReportRange};

use crate::components::ui::{Card, CardBody, CardHeader, EmptyState, ErrorBanner, InputType, Spinner, TextInput};
use crate::components::ResultModal;
use crate::format::{money, odds, pnl_class, timestamp};
use crate::hooks::{use_account_statement, use_bet_history};

const DEFAULT_RANGE_DAYS: i64 = 7;

/// The last `days` calendar days up to and including `today`.
pub fn trailing_range(today: NaiveDate, days: i64) -> ReportRange {
    ReportRange {
        from: today - Duration::days(days.max(1) - 1),
        to: today,
    }
}

fn default_range() -> ReportRange {
    trailing_range(Utc::now().date_naive(), DEFAULT_RANGE_DAYS)
}

/// Apply a date typed into one end of the range. Unparseable input is ignored.
pub fn with_bound(range: ReportRange, value: &str, is_from: bool) -> ReportRange {
    let Ok(date) = NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d") else {
        return range;
    };
    let updated = if is_from {
        ReportRange { from: date, ..range }
    } else {
        ReportRange { to: date, ..range }
    };
    updated.normalized()
}

crate::with_auth!(
    /// Ledger of credits and debits on the signed-in account.
    pub AccountStatement => AccountStatementPage
);

crate::with_auth!(
    /// Settled and open bets placed under the signed-in account.
    pub BetHistory => BetHistoryPage
);

#[component]
fn DateRangeFilter(mut range: Signal<ReportRange>) -> Element {
    let current = range();
    let from = current.from.format("%Y-%m-%d").to_string();
    let to = current.to.format("%Y-%m-%d").to_string();

    rsx! {
        div { class: "flex items-end gap-2",
            TextInput {
                class: "w-36".to_string(),
                label: "From".to_string(),
                input_type: InputType::Date,
                value: from,
                oninput: move |e: FormEvent| {
                    let next = with_bound(range(), &e.value(), true);
                    range.set(next);
                },
            }
            TextInput {
                class: "w-36".to_string(),
                label: "To".to_string(),
                input_type: InputType::Date,
                value: to,
                oninput: move |e: FormEvent| {
                    let next = with_bound(range(), &e.value(), false);
                    range.set(next);
                },
            }
        }
    }
}

#[component]
fn AccountStatementPage() -> Element {
    let range = use_signal(default_range);
    let statement = use_account_statement(range.into());

    let body = match (statement.data(), statement.error()) {
        (_, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| statement.refetch() }
        },
        (Some(entries), None) if entries.is_empty() => rsx! {
            EmptyState { message: "No transactions in this period.".to_string() }
        },
        (Some(entries), None) => rsx! { StatementTable { entries } },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        Card {
            CardHeader {
                title: "Account statement".to_string(),
                actions: rsx! { DateRangeFilter { range } },
            }
            CardBody { {body} }
        }
    }
}

#[component]
fn StatementTable(entries: Vec<AccountStatementEntry>) -> Element {
    rsx! {
        table { class: "w-full text-sm",
            thead {
                tr { class: "text-left text-xs text-slate-500",
                    th { class: "py-2 font-normal", "Date" }
                    th { class: "py-2 font-normal", "Description" }
                    th { class: "py-2 text-right font-normal", "Credit" }
                    th { class: "py-2 text-right font-normal", "Debit" }
                    th { class: "py-2 text-right font-normal", "Balance" }
                }
            }
            tbody {
                for entry in entries {
                    tr { key: "{entry.id}", class: "border-t border-slate-800",
                        td { class: "py-2 text-slate-400", {timestamp(&entry.created_at)} }
                        td { class: "py-2 text-slate-200", "{entry.description}" }
                        td { class: "py-2 text-right font-mono text-emerald-400",
                            if entry.credit > 0.0 { {money(entry.credit)} }
                        }
                        td { class: "py-2 text-right font-mono text-rose-400",
                            if entry.debit > 0.0 { {money(entry.debit)} }
                        }
                        td { class: "py-2 text-right font-mono text-slate-100", {money(entry.balance)} }
                    }
                }
            }
        }
    }
}

#[component]
fn BetHistoryPage() -> Element {
    let range = use_signal(default_range);
    let history = use_bet_history(range.into());
    let mut selected_bet = use_signal(|| None::<String>);

    let body = match (history.data(), history.error()) {
        (_, Some(error)) => rsx! {
            ErrorBanner { error, on_retry: move |_| history.refetch() }
        },
        (Some(bets), None) if bets.is_empty() => rsx! {
            EmptyState { message: "No bets in this period.".to_string() }
        },
        (Some(bets), None) => rsx! {
            BetTable { bets, on_select: move |bet_id| selected_bet.set(Some(bet_id)) }
        },
        (None, None) => rsx! { Spinner {} },
    };

    rsx! {
        Card {
            CardHeader {
                title: "Bet history".to_string(),
                subtitle: Some("Select a settled bet to see its result".to_string()),
                actions: rsx! { DateRangeFilter { range } },
            }
            CardBody { {body} }
        }
        if let Some(bet_id) = selected_bet() {
            ResultModal { bet_id, on_close: move |_| selected_bet.set(None) }
        }
    }
}

fn status_badge(status: BetStatus) -> (&'static str, &'static str) {
    match status {
        BetStatus::Pending => ("Pending", "bg-slate-700 text-slate-200"),
        BetStatus::Won => ("Won", "bg-emerald-800 text-emerald-100"),
        BetStatus::Lost => ("Lost", "bg-rose-800 text-rose-100"),
        BetStatus::Void => ("Void", "bg-slate-800 text-slate-400"),
    }
}

#[component]
fn BetTable(bets: Vec<BetHistoryEntry>, on_select: EventHandler<String>) -> Element {
    rsx! {
        table { class: "w-full text-sm",
            thead {
                tr { class: "text-left text-xs text-slate-500",
                    th { class: "py-2 font-normal", "Placed" }
                    th { class: "py-2 font-normal", "Event" }
                    th { class: "py-2 font-normal", "Selection" }
                    th { class: "py-2 text-right font-normal", "Odds" }
                    th { class: "py-2 text-right font-normal", "Stake" }
                    th { class: "py-2 text-right font-normal", "P/L" }
                    th { class: "py-2 text-center font-normal", "Status" }
                }
            }
            tbody {
                for bet in bets {
                    BetRow { key: "{bet.bet_id}", bet, on_select }
                }
            }
        }
    }
}

#[component]
fn BetRow(bet: BetHistoryEntry, on_select: EventHandler<String>) -> Element {
    let (label, badge) = status_badge(bet.status);
    let settled = bet.status != BetStatus::Pending;
    let row_class = if settled {
        "cursor-pointer border-t border-slate-800 hover:bg-slate-800/50"
    } else {
        "border-t border-slate-800"
    };
    let bet_id = bet.bet_id.clone();

    rsx! {
        tr {
            class: row_class,
            onclick: move |_| {
                if settled {
                    on_select.call(bet_id.clone());
                }
            },
            td { class: "py-2 text-slate-400", {timestamp(&bet.placed_at)} }
            td { class: "py-2",
                p { class: "text-slate-200", "{bet.event_name}" }
                p { class: "text-xs text-slate-500", "{bet.market_name}" }
            }
            td { class: "py-2 text-slate-200", "{bet.selection}" }
            td { class: "py-2 text-right font-mono", {odds(bet.odds)} }
            td { class: "py-2 text-right font-mono", {money(bet.stake)} }
            td { class: "py-2 text-right font-mono {pnl_class(bet.profit_loss)}", {money(bet.profit_loss)} }
            td { class: "py-2 text-center",
                span { class: "rounded px-2 py-0.5 text-xs {badge}", "{label}" }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn trailing_range_is_inclusive_of_today() {
        let range = trailing_range(date("2024-03-10"), 7);
        assert_eq!(range.from, date("2024-03-04"));
        assert_eq!(range.to, date("2024-03-10"));
        assert_eq!(trailing_range(date("2024-03-10"), 0).from, date("2024-03-10"));
    }

    #[test]
    fn typed_bounds_update_and_normalize() {
        let range = trailing_range(date("2024-03-10"), 7);
        let moved = with_bound(range, "2024-03-01", true);
        assert_eq!(moved.from, date("2024-03-01"));

        let swapped = with_bound(range, "2024-02-01", false);
        assert_eq!(swapped.from, date("2024-02-01"));
        assert_eq!(swapped.to, date("2024-03-04"));

        assert_eq!(with_bound(range, "", true), range);
        assert_eq!(with_bound(range, "03/01/2024", false), range);
    }
}
