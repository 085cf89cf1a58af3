pub mod auth;
pub mod balance_drawer;
pub mod modal;
pub mod navbar;
pub mod result_modal;
pub mod toast;
pub mod ui;

pub use auth::{use_sync_auth, RequireAuth};
pub use balance_drawer::BalanceDrawer;
pub use modal::Modal;
pub use navbar::NavBar;
pub use result_modal::ResultModal;
pub use toast::{use_toast, Toast, ToastContext, ToastKind, ToastMessage};
