//! Shared types for the WagerDesk admin console and its REST/socket collaborators.

pub mod error;
pub mod models;
pub mod protocol;

pub use error::*;
pub use models::*;
pub use protocol::*;
