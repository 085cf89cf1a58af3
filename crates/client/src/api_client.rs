//! HTTP API client for the console backend.

use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use serde::Serialize;
use wagerdesk_shared::{
    AccountStatementEntry, ApiEnvelope, ApiError, AuthCookies, BalanceSummary, BetHistoryEntry,
    BetResultDetail, CasinoGame, CookieRole, LiveOdds, LoginRequest, LoginResponse, ReportRange,
    Sport,
};

use crate::auth::bearer_token;
use crate::config::AppConfig;

/// HTTP client for envelope-wrapped REST calls.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

impl ApiClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
            base_url: String::new(),
            token: None,
        }
    }

    /// Client for `config`'s backend, carrying the active cookie token if any.
    pub fn authorized(config: &AppConfig, cookies: &AuthCookies) -> Self {
        Self::new()
            .with_base_url(config.api_base_url.clone())
            .with_bearer(bearer_token(cookies))
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.token = token;
        self
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }
        if self.base_url.is_empty() {
            if path.starts_with('/') {
                path.to_string()
            } else {
                format!("/{path}")
            }
        } else {
            let base = self.base_url.trim_end_matches('/');
            let path = path.trim_start_matches('/');
            format!("{base}/{path}")
        }
    }

    fn authorize(&self, rb: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => rb.bearer_auth(token),
            None => rb,
        }
    }

    async fn send(&self, rb: RequestBuilder) -> Result<String, ApiError> {
        let resp = self
            .authorize(rb)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = resp.status().as_u16();
        let is_success = resp.status().is_success();
        let text = resp
            .text()
            .await
            .map_err(|e| ApiError::Network(format!("failed to read body: {e}")))?;

        if !is_success {
            return Err(ApiError::Http { status, body: text });
        }
        Ok(text)
    }

    /// GET `path` and unwrap the envelope.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let text = self.send(self.client.get(self.url(path))).await?;
        parse_envelope(&text)
    }

    /// POST a JSON body to `path` and unwrap the envelope.
    pub async fn post<TReq: Serialize, TRes: DeserializeOwned>(
        &self,
        path: &str,
        body: &TReq,
    ) -> Result<TRes, ApiError> {
        let text = self.send(self.client.post(self.url(path)).json(body)).await?;
        parse_envelope(&text)
    }

    /// POST where only the envelope's verdict matters.
    pub async fn post_ack<TReq: Serialize>(&self, path: &str, body: &TReq) -> Result<(), ApiError> {
        let text = self.send(self.client.post(self.url(path)).json(body)).await?;
        let envelope: ApiEnvelope<serde_json::Value> =
            serde_json::from_str(&text).map_err(|e| ApiError::Deserialize(e.to_string()))?;
        if envelope.is_ok() {
            Ok(())
        } else {
            Err(ApiError::Rejected {
                message: envelope
                    .message
                    .unwrap_or_else(|| "Request was rejected".to_string()),
            })
        }
    }

    // --- Endpoints ---

    pub async fn login(
        &self,
        role: CookieRole,
        user_name: &str,
        password: &str,
    ) -> Result<LoginResponse, ApiError> {
        let body = LoginRequest {
            user_name: user_name.trim().to_string(),
            password: password.to_string(),
            login_type: role.login_type().to_string(),
        };
        self.post("/auth/login", &body).await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.post_ack("/auth/logout", &serde_json::json!({})).await
    }

    pub async fn balance(&self) -> Result<BalanceSummary, ApiError> {
        self.get("/user/balance").await
    }

    pub async fn casino_games(&self) -> Result<Vec<CasinoGame>, ApiError> {
        self.get("/casino/games").await
    }

    pub async fn cricket_tree(&self) -> Result<Vec<Sport>, ApiError> {
        self.get("/cricket/tree").await
    }

    pub async fn live_odds(&self, match_id: &str) -> Result<LiveOdds, ApiError> {
        self.get(&format!(
            "/cricket/match/{}/odds",
            urlencoding::encode(match_id)
        ))
        .await
    }

    pub async fn account_statement(
        &self,
        range: ReportRange,
    ) -> Result<Vec<AccountStatementEntry>, ApiError> {
        self.get(&format!("/reports/account-statement?{}", range.to_query()))
            .await
    }

    pub async fn bet_history(&self, range: ReportRange) -> Result<Vec<BetHistoryEntry>, ApiError> {
        self.get(&format!("/reports/bet-history?{}", range.to_query()))
            .await
    }

    pub async fn bet_result(&self, bet_id: &str) -> Result<BetResultDetail, ApiError> {
        self.get(&format!("/reports/result/{}", urlencoding::encode(bet_id)))
            .await
    }
}

/// Decode an envelope body and return its payload.
pub fn parse_envelope<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
    let envelope: ApiEnvelope<T> =
        serde_json::from_str(text).map_err(|e| ApiError::Deserialize(e.to_string()))?;
    envelope.into_result()
}
