// Route gates

pub mod require_auth;
pub mod with_auth;

pub use require_auth::{use_auth_gate, RequireAuth};
pub use with_auth::{use_sync_auth, use_sync_gate};
