//! Wire formats for the REST envelope and the realtime session channel.

use serde::{Deserialize, Serialize};

use crate::error::ApiError;

/// Envelope every REST endpoint wraps its payload in.
///
/// Older endpoints report success in `status`, newer ones in `success`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiEnvelope<T> {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    pub data: Option<T>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_ok(&self) -> bool {
        self.status.or(self.success).unwrap_or(false)
    }

    /// Unwrap the payload, turning a `false` flag or a missing payload into an error.
    pub fn into_result(self) -> Result<T, ApiError> {
        if !self.is_ok() {
            return Err(ApiError::Rejected {
                message: self
                    .message
                    .unwrap_or_else(|| "Request was rejected".to_string()),
            });
        }
        self.data
            .ok_or_else(|| ApiError::Deserialize("envelope has no data".to_string()))
    }
}

// --- Realtime channel ---

pub const EVENT_USER_LOGIN_STATUS: &str = "userLoginStatus";
pub const EVENT_FORCE_LOGOUT: &str = "forceLogout";

/// Raw frame as sent by the socket server: `{"event": "...", "data": {...}}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SocketFrame {
    pub event: String,
    #[serde(default)]
    pub data: serde_json::Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PresenceStatus {
    Online,
    Offline,
}

/// Forced termination pushed by the server (admin kick, duplicate session).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForceLogoutEvent {
    pub reason: String,
}

/// Inbound events the console reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ServerEvent {
    UserLoginStatus {
        user_id: String,
        status: PresenceStatus,
    },
    ForceLogout(ForceLogoutEvent),
}

impl ServerEvent {
    /// Parse a text frame. Unknown event names yield `Ok(None)`.
    pub fn parse(text: &str) -> Result<Option<Self>, serde_json::Error> {
        let frame: SocketFrame = serde_json::from_str(text)?;
        Ok(Self::from_frame(&frame))
    }

    pub fn from_frame(frame: &SocketFrame) -> Option<Self> {
        match frame.event.as_str() {
            EVENT_USER_LOGIN_STATUS => {
                let user_id = id_value(frame.data.get("userId")?)?;
                let status = presence_value(frame.data.get("status"));
                Some(ServerEvent::UserLoginStatus { user_id, status })
            }
            EVENT_FORCE_LOGOUT => {
                let reason = frame
                    .data
                    .get("reason")
                    .and_then(|r| r.as_str())
                    .filter(|r| !r.trim().is_empty())
                    .unwrap_or("Your session was ended by the server")
                    .to_string();
                Some(ServerEvent::ForceLogout(ForceLogoutEvent { reason }))
            }
            _ => None,
        }
    }
}

fn id_value(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) if !s.is_empty() => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn presence_value(value: Option<&serde_json::Value>) -> PresenceStatus {
    match value {
        Some(serde_json::Value::Bool(true)) => PresenceStatus::Online,
        Some(serde_json::Value::String(s))
            if s.eq_ignore_ascii_case("online") || s.eq_ignore_ascii_case("login") =>
        {
            PresenceStatus::Online
        }
        _ => PresenceStatus::Offline,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_accepts_either_flag() {
        let a: ApiEnvelope<u32> = serde_json::from_str(r#"{"status":true,"data":7}"#).unwrap();
        let b: ApiEnvelope<u32> = serde_json::from_str(r#"{"success":true,"data":8}"#).unwrap();
        assert_eq!(a.into_result().unwrap(), 7);
        assert_eq!(b.into_result().unwrap(), 8);
    }

    #[test]
    fn rejected_envelope_carries_message() {
        let env: ApiEnvelope<u32> =
            serde_json::from_str(r#"{"success":false,"message":"Market closed"}"#).unwrap();
        assert_eq!(
            env.into_result(),
            Err(ApiError::Rejected {
                message: "Market closed".to_string()
            })
        );
    }

    #[test]
    fn envelope_without_data_needs_no_default_payload() {
        #[derive(Debug, Deserialize, PartialEq)]
        struct Ticket {
            id: u32,
        }

        let empty: ApiEnvelope<Ticket> = serde_json::from_str(r#"{"status":true}"#).unwrap();
        assert!(matches!(empty.into_result(), Err(ApiError::Deserialize(_))));

        let full: ApiEnvelope<Ticket> =
            serde_json::from_str(r#"{"status":true,"data":{"id":3}}"#).unwrap();
        assert_eq!(full.into_result(), Ok(Ticket { id: 3 }));
    }

    #[test]
    fn parses_force_logout() {
        let event = ServerEvent::parse(r#"{"event":"forceLogout","data":{"reason":"duplicate session"}}"#)
            .unwrap();
        assert_eq!(
            event,
            Some(ServerEvent::ForceLogout(ForceLogoutEvent {
                reason: "duplicate session".to_string()
            }))
        );
    }

    #[test]
    fn parses_login_status_with_numeric_id() {
        let event =
            ServerEvent::parse(r#"{"event":"userLoginStatus","data":{"userId":42,"status":true}}"#)
                .unwrap();
        assert_eq!(
            event,
            Some(ServerEvent::UserLoginStatus {
                user_id: "42".to_string(),
                status: PresenceStatus::Online
            })
        );
    }

    #[test]
    fn unknown_events_are_skipped() {
        assert_eq!(ServerEvent::parse(r#"{"event":"matchOddsUpdate","data":{}}"#).unwrap(), None);
        assert!(ServerEvent::parse("not json").is_err());
    }
}
