mod markets;
mod not_found;
mod reports;
mod shell;
mod sign_in;

pub use markets::*;
pub use not_found::*;
pub use reports::*;
pub use shell::*;
pub use sign_in::*;
