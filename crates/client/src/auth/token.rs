//! Token payload decoding.
//!
//! Tokens are JWT compact strings. Only the middle segment is read; the
//! signature and expiry are the backend's concern.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use wagerdesk_shared::{DecodedToken, TokenError};

/// Decode the claims carried by `token`.
pub fn decode_token(token: &str) -> Result<DecodedToken, TokenError> {
    let token = token.trim();
    if token.is_empty() {
        return Err(TokenError::Missing);
    }

    let segments: Vec<&str> = token.split('.').collect();
    if segments.len() != 3 {
        return Err(TokenError::Segments(segments.len()));
    }

    let payload = decode_segment(segments[1])?;
    serde_json::from_slice(&payload).map_err(|e| TokenError::Json(e.to_string()))
}

// Some issuers pad or use the standard alphabet; normalise to unpadded base64url.
fn decode_segment(segment: &str) -> Result<Vec<u8>, TokenError> {
    let normalized: String = segment
        .trim_end_matches('=')
        .chars()
        .map(|c| match c {
            '+' => '-',
            '/' => '_',
            other => other,
        })
        .collect();
    URL_SAFE_NO_PAD
        .decode(normalized.as_bytes())
        .map_err(|e| TokenError::Base64(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::fixtures::*;

    #[test]
    fn decodes_known_good_master_token() {
        let decoded = decode_token(MASTER_TOKEN).unwrap();
        assert_eq!(decoded.user.user_id, "a1b2c3");
        assert_eq!(decoded.user.user_type.as_deref(), Some("master"));
        assert_eq!(decoded.user.personal_details.login_id, "master01");
        assert_eq!(decoded.exp, Some(1_900_000_000));
    }

    #[test]
    fn numeric_user_id_and_fallback_role_field() {
        let decoded = decode_token(TECH_ADMIN_TOKEN).unwrap();
        assert_eq!(decoded.user.user_id, "7");
        assert_eq!(decoded.user.user_type, None);
        assert_eq!(decoded.user.role_name.as_deref(), Some("techAdmin"));
        assert_eq!(decoded.user.personal_details.login_id, "tech.ops");
    }

    #[test]
    fn padded_payload_is_accepted() {
        let mut parts: Vec<String> = MASTER_TOKEN.split('.').map(str::to_string).collect();
        parts[1].push_str("==");
        let padded = parts.join(".");
        assert!(decode_token(&padded).is_ok());
    }

    #[test]
    fn malformed_tokens_fail_closed() {
        assert_eq!(decode_token(""), Err(TokenError::Missing));
        assert_eq!(decode_token("not-a-token"), Err(TokenError::Segments(1)));
        assert!(matches!(decode_token("a.%%%.c"), Err(TokenError::Base64(_))));
        // "bm90IGpzb24" is base64url for "not json"
        assert!(matches!(decode_token("a.bm90IGpzb24.c"), Err(TokenError::Json(_))));
    }

    #[test]
    fn empty_login_id_still_decodes() {
        let decoded = decode_token(EMPTY_LOGIN_TOKEN).unwrap();
        assert_eq!(decoded.user.user_id, "u-10");
        assert_eq!(decoded.user.personal_details.login_id, "");
    }
}
