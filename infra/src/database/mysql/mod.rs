//! MySQL store implementations

mod token_repository_impl;
mod user_repository_impl;

pub use token_repository_impl::MySqlRefreshTokenStore;
pub use user_repository_impl::MySqlUserDirectory;

use chirpy_core::errors::DomainError;

/// Map a driver failure to the store-unavailable error the session core expects
pub(crate) fn store_error(context: &str, e: sqlx::Error) -> DomainError {
    tracing::error!(error = %e, "{}", context);
    DomainError::StoreUnavailable {
        message: format!("{}: {}", context, e),
    }
}

/// Map a column decoding failure
pub(crate) fn column_error(column: &str, e: impl std::fmt::Display) -> DomainError {
    DomainError::Internal {
        message: format!("Failed to read column {}: {}", column, e),
    }
}
