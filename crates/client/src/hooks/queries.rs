use dioxus::prelude::*;
use wagerdesk_shared::{
    AccountStatementEntry, BalanceSummary, BetHistoryEntry, BetResultDetail, CasinoGame, LiveOdds,
    ReportRange, Sport,
};

use crate::api_client::ApiClient;
use crate::auth::get_decoded_token_data;
use crate::config::AppConfig;
use crate::cookies::use_cookies;
use crate::query::{use_polling, use_query, QueryHandle, QueryKey, QueryOptions};

pub const BALANCE: &str = "user/balance";
pub const CASINO_GAMES: &str = "casino/games";
pub const CRICKET_TREE: &str = "cricket/tree";
pub const LIVE_ODDS: &str = "cricket/odds";
pub const ACCOUNT_STATEMENT: &str = "reports/account-statement";
pub const BET_HISTORY: &str = "reports/bet-history";
pub const BET_RESULT: &str = "reports/result";

const CASINO_STALE_MS: u32 = 5 * 60 * 1000;
const TREE_STALE_MS: u32 = 2 * 60 * 1000;
const ODDS_STALE_MS: u32 = 2_000;
const REPORT_STALE_MS: u32 = 60_000;

/// Live odds are refetched this often while the panel is open.
pub const LIVE_ODDS_POLL_MS: u32 = 5_000;

/// Client for the active token and the user id its responses are cached under.
struct Caller {
    client: ApiClient,
    owner: String,
}

// Reads the cookie signal, so every query re-runs when the token changes.
fn use_caller() -> impl Fn() -> Caller + 'static {
    let config = use_context::<AppConfig>();
    let cookies = use_cookies();
    move || {
        let cookies = cookies.cookies.read();
        Caller {
            client: ApiClient::authorized(&config, &cookies),
            owner: get_decoded_token_data(&cookies)
                .map(|decoded| decoded.user.user_id)
                .unwrap_or_default(),
        }
    }
}

/// Balance for the drawer. Never served from cache.
pub fn use_balance() -> QueryHandle<BalanceSummary> {
    let caller = use_caller();
    use_query(QueryOptions::no_cache().with_retries(1), move || {
        let Caller { client, owner } = caller();
        (QueryKey::resource(BALANCE).for_owner(owner), move || {
            let client = client.clone();
            async move { client.balance().await }
        })
    })
}

pub fn use_casino_games() -> QueryHandle<Vec<CasinoGame>> {
    let caller = use_caller();
    use_query(QueryOptions::fresh_for(CASINO_STALE_MS), move || {
        let Caller { client, owner } = caller();
        (QueryKey::resource(CASINO_GAMES).for_owner(owner), move || {
            let client = client.clone();
            async move { client.casino_games().await }
        })
    })
}

pub fn use_cricket_tree() -> QueryHandle<Vec<Sport>> {
    let caller = use_caller();
    use_query(QueryOptions::fresh_for(TREE_STALE_MS), move || {
        let Caller { client, owner } = caller();
        (QueryKey::resource(CRICKET_TREE).for_owner(owner), move || {
            let client = client.clone();
            async move { client.cricket_tree().await }
        })
    })
}

/// Odds for the selected match, polled while mounted.
pub fn use_live_odds(match_id: ReadSignal<String>) -> QueryHandle<LiveOdds> {
    let caller = use_caller();
    let odds = use_query(QueryOptions::fresh_for(ODDS_STALE_MS).with_retries(0), move || {
        let Caller { client, owner } = caller();
        let match_id = match_id.cloned();
        (QueryKey::new(LIVE_ODDS, match_id.clone()).for_owner(owner), move || {
            let client = client.clone();
            let match_id = match_id.clone();
            async move { client.live_odds(&match_id).await }
        })
    });
    use_polling(odds, LIVE_ODDS_POLL_MS);
    odds
}

pub fn use_account_statement(
    range: ReadSignal<ReportRange>,
) -> QueryHandle<Vec<AccountStatementEntry>> {
    let caller = use_caller();
    use_query(QueryOptions::fresh_for(REPORT_STALE_MS), move || {
        let Caller { client, owner } = caller();
        let range = range.cloned();
        (QueryKey::new(ACCOUNT_STATEMENT, range.to_query()).for_owner(owner), move || {
            let client = client.clone();
            async move { client.account_statement(range).await }
        })
    })
}

pub fn use_bet_history(range: ReadSignal<ReportRange>) -> QueryHandle<Vec<BetHistoryEntry>> {
    let caller = use_caller();
    use_query(QueryOptions::fresh_for(REPORT_STALE_MS), move || {
        let Caller { client, owner } = caller();
        let range = range.cloned();
        (QueryKey::new(BET_HISTORY, range.to_query()).for_owner(owner), move || {
            let client = client.clone();
            async move { client.bet_history(range).await }
        })
    })
}

/// Settled result of one bet. Results do not change once declared.
pub fn use_bet_result(bet_id: ReadSignal<String>) -> QueryHandle<BetResultDetail> {
    let caller = use_caller();
    use_query(QueryOptions::fresh_for(REPORT_STALE_MS), move || {
        let Caller { client, owner } = caller();
        let bet_id = bet_id.cloned();
        (QueryKey::new(BET_RESULT, bet_id.clone()).for_owner(owner), move || {
            let client = client.clone();
            let bet_id = bet_id.clone();
            async move { client.bet_result(&bet_id).await }
        })
    })
}
