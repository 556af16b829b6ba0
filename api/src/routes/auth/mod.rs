//! Authentication route handlers
//!
//! - Password login
//! - Access token refresh
//! - Refresh token revocation
//! - Current session lookup

pub mod login;
pub mod refresh;
pub mod revoke;
pub mod session;

pub use login::login;
pub use refresh::refresh;
pub use revoke::revoke;
pub use session::session_info;
