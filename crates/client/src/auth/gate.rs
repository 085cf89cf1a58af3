//! Authorization decision shared by both route gates.
//!
//! [`RequireAuth`](crate::components::auth::RequireAuth) and the
//! [`with_auth!`](crate::with_auth) wrapper render differently (loading state
//! vs. nothing), but both reach their verdict through [`authorize`].

use wagerdesk_shared::{AuthCookies, ForceLogoutEvent, Identity, TokenError};

use super::predicate::resolve_identity;
use crate::config::SIGN_IN_PATH;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateState {
    Checking,
    Authorized,
    Unauthorized,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DenyReason {
    MissingToken,
    MalformedToken(TokenError),
    ForcedLogout,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthDecision {
    Authorized(Identity),
    Unauthorized(DenyReason),
}

impl AuthDecision {
    pub fn is_authorized(&self) -> bool {
        matches!(self, AuthDecision::Authorized(_))
    }

    pub fn state(&self) -> GateState {
        if self.is_authorized() {
            GateState::Authorized
        } else {
            GateState::Unauthorized
        }
    }
}

/// Decide whether the viewer may see protected content.
///
/// A forced logout overrides whatever the cookies say until the viewer signs
/// in again.
pub fn authorize(cookies: &AuthCookies, forced_out: bool) -> AuthDecision {
    if forced_out {
        return AuthDecision::Unauthorized(DenyReason::ForcedLogout);
    }
    match resolve_identity(cookies) {
        Ok(identity) => AuthDecision::Authorized(identity),
        Err(TokenError::Missing) => AuthDecision::Unauthorized(DenyReason::MissingToken),
        Err(e) => AuthDecision::Unauthorized(DenyReason::MalformedToken(e)),
    }
}

/// Where an unauthorized viewer is sent, and where they came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignInRedirect {
    pub to: &'static str,
    pub from: String,
}

impl SignInRedirect {
    pub fn new(from: impl Into<String>) -> Self {
        Self {
            to: SIGN_IN_PATH,
            from: from.into(),
        }
    }

    pub fn href(&self) -> String {
        format!("{}?from={}", self.to, urlencoding::encode(&self.from))
    }
}

/// Everything the component gate does after one cookie evaluation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GatePlan {
    pub state: GateState,
    pub redirect: Option<SignInRedirect>,
    /// Identity to open the realtime session for. `None` when the token
    /// carries no login id: the viewer is still let in, without a socket.
    pub connect: Option<Identity>,
}

pub fn plan_gate(cookies: &AuthCookies, path: &str, forced_out: bool) -> GatePlan {
    match authorize(cookies, forced_out) {
        AuthDecision::Authorized(identity) => {
            let connect = if identity.login_id.trim().is_empty() {
                crate::log_debug!("auth gate: token has no login id, skipping session");
                None
            } else {
                Some(identity)
            };
            GatePlan {
                state: GateState::Authorized,
                redirect: None,
                connect,
            }
        }
        AuthDecision::Unauthorized(reason) => {
            if let DenyReason::MalformedToken(e) = &reason {
                crate::log_debug!("auth gate: rejecting token: {}", e);
            }
            GatePlan {
                state: GateState::Unauthorized,
                redirect: Some(SignInRedirect::new(path)),
                connect: None,
            }
        }
    }
}

/// Verdict of the synchronous wrapper: render or render nothing.
pub fn sync_gate_allows(cookies: &AuthCookies, forced_out: bool) -> bool {
    authorize(cookies, forced_out).is_authorized()
}

/// Text of the notice shown after the server ends the session.
pub fn force_logout_notice(event: &ForceLogoutEvent) -> String {
    format!("You have been logged out: {}", event.reason)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::fixtures::*;
    use wagerdesk_shared::{CookieRole, UserType};

    #[test]
    fn empty_cookies_redirect_with_origin_and_no_connect() {
        let plan = plan_gate(&AuthCookies::default(), "/reports/bet-history", false);
        assert_eq!(plan.state, GateState::Unauthorized);
        assert_eq!(plan.connect, None);
        let redirect = plan.redirect.unwrap();
        assert_eq!(redirect.to, "/sign-in");
        assert_eq!(redirect.from, "/reports/bet-history");
        assert_eq!(redirect.href(), "/sign-in?from=%2Freports%2Fbet-history");
    }

    #[test]
    fn valid_master_token_authorizes_and_plans_connect() {
        let cookies = AuthCookies::with_token(CookieRole::Admin, MASTER_TOKEN);
        let plan = plan_gate(&cookies, "/", false);
        assert_eq!(plan.state, GateState::Authorized);
        assert_eq!(plan.redirect, None);
        let identity = plan.connect.unwrap();
        assert_eq!(identity.login_id, "master01");
        assert_eq!(identity.user_type, UserType::Master);
    }

    #[test]
    fn forced_logout_overrides_valid_cookies() {
        let cookies = AuthCookies::with_token(CookieRole::Admin, MASTER_TOKEN);
        assert_eq!(
            authorize(&cookies, true),
            AuthDecision::Unauthorized(DenyReason::ForcedLogout)
        );
        assert!(!sync_gate_allows(&cookies, true));
        let plan = plan_gate(&cookies, "/", true);
        assert_eq!(plan.state, GateState::Unauthorized);
        assert!(plan.connect.is_none());
    }

    #[test]
    fn malformed_token_redirects() {
        let cookies = AuthCookies::with_token(CookieRole::Admin, "garbage");
        let plan = plan_gate(&cookies, "/", false);
        assert_eq!(plan.state, GateState::Unauthorized);
        assert!(plan.redirect.is_some());
        assert!(matches!(
            authorize(&cookies, false),
            AuthDecision::Unauthorized(DenyReason::MalformedToken(TokenError::Segments(1)))
        ));
    }

    #[test]
    fn blank_login_id_authorizes_without_connect() {
        let cookies = AuthCookies::with_token(CookieRole::Admin, EMPTY_LOGIN_TOKEN);
        let plan = plan_gate(&cookies, "/", false);
        assert_eq!(plan.state, GateState::Authorized);
        assert_eq!(plan.redirect, None);
        assert_eq!(plan.connect, None);
        assert!(sync_gate_allows(&cookies, false));
    }

    #[test]
    fn notice_contains_server_reason() {
        let notice = force_logout_notice(&ForceLogoutEvent {
            reason: "duplicate session".to_string(),
        });
        assert!(notice.contains("duplicate session"));
    }
}
