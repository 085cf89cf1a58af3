//! Cookie-based authentication checks.

use wagerdesk_shared::{AuthCookies, CookieRole, DecodedToken, Identity, TokenError, UserType};

use super::token::decode_token;

/// Whether the cookies carry a usable, decodable token.
///
/// A stale but well-formed token still counts: expiry and signature are
/// enforced by the backend on the next API call.
pub fn is_authenticated(cookies: &AuthCookies) -> bool {
    resolve_identity(cookies).is_ok()
}

/// Decoded claims of the active token, or `None` when missing or malformed.
pub fn get_decoded_token_data(cookies: &AuthCookies) -> Option<DecodedToken> {
    let (_, token) = cookies.active_token()?;
    decode_token(token).ok()
}

/// Role carried by `decoded`, checked against the cookie it came from.
///
/// `userType` is read first, then `roleName`. A token with neither takes the
/// default role of its cookie.
pub fn get_user_type(decoded: &DecodedToken, cookie: CookieRole) -> Result<UserType, TokenError> {
    let raw = decoded
        .user
        .user_type
        .as_deref()
        .or(decoded.user.role_name.as_deref())
        .map(str::trim)
        .filter(|s| !s.is_empty());

    let user_type = match raw {
        Some(raw) => raw.parse::<UserType>()?,
        None => UserType::default_for(cookie),
    };

    if user_type.cookie_role() != cookie {
        return Err(TokenError::RoleMismatch { cookie, user_type });
    }
    Ok(user_type)
}

/// Full identity behind the cookies, or the reason there is none.
pub fn resolve_identity(cookies: &AuthCookies) -> Result<Identity, TokenError> {
    let (cookie_role, token) = cookies.active_token().ok_or(TokenError::Missing)?;
    let decoded = decode_token(token)?;
    let user_type = get_user_type(&decoded, cookie_role)?;
    Ok(Identity {
        user_id: decoded.user.user_id,
        login_id: decoded.user.personal_details.login_id,
        user_type,
        cookie_role,
    })
}

/// Raw token for the `Authorization` header.
pub fn bearer_token(cookies: &AuthCookies) -> Option<String> {
    cookies.active_token().map(|(_, token)| token.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::fixtures::*;

    fn cookies(admin: Option<&str>, tech_admin: Option<&str>) -> AuthCookies {
        AuthCookies {
            admin: admin.map(str::to_string),
            tech_admin: tech_admin.map(str::to_string),
            has_popup_been_shown: None,
        }
    }

    #[test]
    fn absent_blank_or_placeholder_tokens_are_unauthenticated() {
        let unusable = [None, Some(""), Some("   "), Some("undefined")];
        for admin in unusable {
            for tech in unusable {
                let c = cookies(admin, tech);
                assert!(!is_authenticated(&c), "{c:?} should be unauthenticated");
                assert_eq!(get_decoded_token_data(&c), None);
            }
        }
    }

    #[test]
    fn admin_cookie_yields_admin_side_role() {
        let c = cookies(Some(MASTER_TOKEN), None);
        assert!(is_authenticated(&c));
        let decoded = get_decoded_token_data(&c).unwrap();
        let role = get_user_type(&decoded, CookieRole::Admin).unwrap();
        assert_eq!(role, UserType::Master);
        assert_eq!(role.cookie_role(), CookieRole::Admin);
    }

    #[test]
    fn tech_admin_cookie_yields_tech_admin_role() {
        let c = cookies(None, Some(TECH_ADMIN_TOKEN));
        assert!(is_authenticated(&c));
        let identity = resolve_identity(&c).unwrap();
        assert_eq!(identity.user_type, UserType::TechAdmin);
        assert_eq!(identity.cookie_role, CookieRole::TechAdmin);
        assert_eq!(identity.login_id, "tech.ops");
    }

    #[test]
    fn missing_role_defaults_from_cookie() {
        let admin = resolve_identity(&cookies(Some(NO_ROLE_TOKEN), None)).unwrap();
        assert_eq!(admin.user_type, UserType::Admin);
        let tech = resolve_identity(&cookies(None, Some(NO_ROLE_TOKEN))).unwrap();
        assert_eq!(tech.user_type, UserType::TechAdmin);
    }

    #[test]
    fn empty_login_id_is_still_authenticated() {
        let c = cookies(Some(EMPTY_LOGIN_TOKEN), None);
        assert!(is_authenticated(&c));
        assert_eq!(get_decoded_token_data(&c).map(|d| d.user.user_id), Some("u-10".to_string()));
        let identity = resolve_identity(&c).unwrap();
        assert_eq!(identity.user_type, UserType::Agent);
        assert_eq!(identity.login_id, "");
    }

    #[test]
    fn role_contradicting_cookie_fails_closed() {
        let c = cookies(Some(TECH_ADMIN_TOKEN), None);
        assert!(!is_authenticated(&c));
        assert_eq!(
            resolve_identity(&c),
            Err(TokenError::RoleMismatch {
                cookie: CookieRole::Admin,
                user_type: UserType::TechAdmin,
            })
        );
    }

    #[test]
    fn malformed_token_is_unauthenticated() {
        let c = cookies(Some("eyJhbGciOiJIUzI1NiJ9.%%%.sig"), None);
        assert!(!is_authenticated(&c));
        assert!(get_decoded_token_data(&c).is_none());

        let unknown_role = cookies(Some(BAD_ROLE_TOKEN), None);
        assert!(get_decoded_token_data(&unknown_role).is_some());
        assert!(!is_authenticated(&unknown_role));
    }
}
