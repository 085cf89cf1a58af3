//! Shared data models for the WagerDesk console.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::TokenError;

// --- Cookies ---

pub const ADMIN_COOKIE: &str = "Admin";
pub const TECH_ADMIN_COOKIE: &str = "TechAdmin";
pub const POPUP_COOKIE: &str = "hasPopupBeenShown";

/// Placeholder some login flows write instead of clearing the cookie.
pub const UNSET_TOKEN: &str = "undefined";

/// The cookie key a token lives under. The key doubles as a role selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CookieRole {
    Admin,
    TechAdmin,
}

impl CookieRole {
    pub const ALL: [CookieRole; 2] = [CookieRole::Admin, CookieRole::TechAdmin];

    pub fn cookie_name(self) -> &'static str {
        match self {
            CookieRole::Admin => ADMIN_COOKIE,
            CookieRole::TechAdmin => TECH_ADMIN_COOKIE,
        }
    }

    /// Value the login endpoint expects in `loginType`.
    pub fn login_type(self) -> &'static str {
        match self {
            CookieRole::Admin => "admin",
            CookieRole::TechAdmin => "techAdmin",
        }
    }
}

impl fmt::Display for CookieRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cookie_name())
    }
}

/// Auth-relevant cookies as read from the cookie store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthCookies {
    #[serde(rename = "Admin", default, skip_serializing_if = "Option::is_none")]
    pub admin: Option<String>,
    #[serde(rename = "TechAdmin", default, skip_serializing_if = "Option::is_none")]
    pub tech_admin: Option<String>,
    #[serde(
        rename = "hasPopupBeenShown",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub has_popup_been_shown: Option<bool>,
}

impl AuthCookies {
    /// Build from raw `name=value` pairs. Unknown names are ignored.
    pub fn from_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut cookies = Self::default();
        for (name, value) in pairs {
            match name {
                ADMIN_COOKIE => cookies.admin = Some(value.to_string()),
                TECH_ADMIN_COOKIE => cookies.tech_admin = Some(value.to_string()),
                POPUP_COOKIE => cookies.has_popup_been_shown = Some(value == "true"),
                _ => {}
            }
        }
        cookies
    }

    pub fn with_token(role: CookieRole, token: impl Into<String>) -> Self {
        let mut cookies = Self::default();
        cookies.set_token(role, Some(token.into()));
        cookies
    }

    pub fn set_token(&mut self, role: CookieRole, token: Option<String>) {
        match role {
            CookieRole::Admin => self.admin = token,
            CookieRole::TechAdmin => self.tech_admin = token,
        }
    }

    /// The token under `role`, if it is non-empty and not the unset placeholder.
    pub fn token_for(&self, role: CookieRole) -> Option<&str> {
        let raw = match role {
            CookieRole::Admin => self.admin.as_deref(),
            CookieRole::TechAdmin => self.tech_admin.as_deref(),
        }?;
        let token = raw.trim();
        if token.is_empty() || token == UNSET_TOKEN {
            None
        } else {
            Some(token)
        }
    }

    /// The usable token and the key it was found under. `Admin` wins when both are set.
    pub fn active_token(&self) -> Option<(CookieRole, &str)> {
        CookieRole::ALL
            .into_iter()
            .find_map(|role| self.token_for(role).map(|token| (role, token)))
    }
}

// --- Roles ---

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UserType {
    TechAdmin,
    SuperAdmin,
    Admin,
    SuperMaster,
    Master,
    Agent,
    Expert,
}

impl UserType {
    pub fn as_str(self) -> &'static str {
        match self {
            UserType::TechAdmin => "techAdmin",
            UserType::SuperAdmin => "superAdmin",
            UserType::Admin => "admin",
            UserType::SuperMaster => "superMaster",
            UserType::Master => "master",
            UserType::Agent => "agent",
            UserType::Expert => "expert",
        }
    }

    /// Cookie key a session of this role is stored under.
    pub fn cookie_role(self) -> CookieRole {
        match self {
            UserType::TechAdmin => CookieRole::TechAdmin,
            _ => CookieRole::Admin,
        }
    }

    /// Role assumed when the token carries no role field at all.
    pub fn default_for(role: CookieRole) -> Self {
        match role {
            CookieRole::Admin => UserType::Admin,
            CookieRole::TechAdmin => UserType::TechAdmin,
        }
    }

    /// Human label used in the navbar.
    pub fn label(self) -> &'static str {
        match self {
            UserType::TechAdmin => "Tech Admin",
            UserType::SuperAdmin => "Super Admin",
            UserType::Admin => "Admin",
            UserType::SuperMaster => "Super Master",
            UserType::Master => "Master",
            UserType::Agent => "Agent",
            UserType::Expert => "Expert",
        }
    }
}

impl FromStr for UserType {
    type Err = TokenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "techadmin" => Ok(UserType::TechAdmin),
            "superadmin" => Ok(UserType::SuperAdmin),
            "admin" => Ok(UserType::Admin),
            "supermaster" => Ok(UserType::SuperMaster),
            "master" => Ok(UserType::Master),
            "agent" => Ok(UserType::Agent),
            "expert" => Ok(UserType::Expert),
            _ => Err(TokenError::UnknownRole(s.to_string())),
        }
    }
}

impl fmt::Display for UserType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// --- Token payload ---

/// Claims carried in the payload segment of an auth token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecodedToken {
    pub user: TokenUser,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUser {
    #[serde(rename = "userId", deserialize_with = "string_or_number")]
    pub user_id: String,
    #[serde(rename = "userType", default, skip_serializing_if = "Option::is_none")]
    pub user_type: Option<String>,
    /// Older tokens carry the role here instead of `userType`.
    #[serde(rename = "roleName", default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
    #[serde(rename = "PersonalDetails")]
    pub personal_details: PersonalDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalDetails {
    #[serde(rename = "loginId")]
    pub login_id: String,
}

/// Who the current session belongs to, resolved from a decoded token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Identity {
    pub user_id: String,
    pub login_id: String,
    pub user_type: UserType,
    pub cookie_role: CookieRole,
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, found {other}"
        ))),
    }
}

// --- Auth endpoints ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub user_name: String,
    pub password: String,
    pub login_type: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    #[serde(default)]
    pub user_type: Option<String>,
}

// --- Balances ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct BalanceSummary {
    pub current_balance: f64,
    #[serde(default)]
    pub exposure: f64,
    #[serde(default)]
    pub available_balance: f64,
    #[serde(default)]
    pub credit_reference: f64,
    #[serde(default)]
    pub profit_loss: f64,
    #[serde(default)]
    pub downline_balance: f64,
}

// --- Casino ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CasinoGame {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub provider: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub is_live: bool,
}

// --- Cricket market tree ---

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Sport {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub competitions: Vec<Competition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Competition {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub matches: Vec<MatchSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MatchSummary {
    pub id: String,
    pub name: String,
    pub start_time: DateTime<Utc>,
    #[serde(default)]
    pub in_play: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LiveOdds {
    pub match_id: String,
    #[serde(default)]
    pub markets: Vec<Market>,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum MarketStatus {
    Open,
    Suspended,
    Closed,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Market {
    pub id: String,
    pub name: String,
    pub status: MarketStatus,
    #[serde(default)]
    pub runners: Vec<Runner>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Runner {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub back: Vec<PriceSize>,
    #[serde(default)]
    pub lay: Vec<PriceSize>,
}

impl Runner {
    pub fn best_back(&self) -> Option<&PriceSize> {
        self.back
            .iter()
            .max_by(|a, b| a.price.total_cmp(&b.price))
    }

    pub fn best_lay(&self) -> Option<&PriceSize> {
        self.lay
            .iter()
            .min_by(|a, b| a.price.total_cmp(&b.price))
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct PriceSize {
    pub price: f64,
    pub size: f64,
}

// --- Reports ---

/// Inclusive date range for report queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl ReportRange {
    /// `from` and `to` swapped if they were given in the wrong order.
    pub fn normalized(self) -> Self {
        if self.from <= self.to {
            self
        } else {
            Self {
                from: self.to,
                to: self.from,
            }
        }
    }

    pub fn to_query(self) -> String {
        let range = self.normalized();
        format!(
            "from={}&to={}",
            range.from.format("%Y-%m-%d"),
            range.to.format("%Y-%m-%d")
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AccountStatementEntry {
    pub id: String,
    pub created_at: DateTime<Utc>,
    pub description: String,
    #[serde(default)]
    pub credit: f64,
    #[serde(default)]
    pub debit: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum BetStatus {
    Pending,
    Won,
    Lost,
    Void,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetHistoryEntry {
    pub bet_id: String,
    pub event_name: String,
    pub market_name: String,
    pub selection: String,
    pub odds: f64,
    pub stake: f64,
    #[serde(default)]
    pub profit_loss: f64,
    pub status: BetStatus,
    pub placed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct BetResultDetail {
    pub bet_id: String,
    pub event_name: String,
    pub market_name: String,
    #[serde(default)]
    pub winner: Option<String>,
    #[serde(default)]
    pub declared_at: Option<DateTime<Utc>>,
    pub stake: f64,
    pub profit_loss: f64,
    #[serde(default)]
    pub commission: f64,
}
