use actix_web::{web, HttpResponse};

use chirpy_core::repositories::{RefreshTokenStore, UserDirectory};
use chirpy_shared::{error_codes, ErrorResponse};

use crate::app::AppState;
use crate::dto::ResetResponse;
use crate::handlers::error::ApiError;

/// Handler for POST /admin/reset
///
/// Deletes every refresh token. Only answered in development; any other
/// environment gets 403.
pub async fn reset<U, T>(state: web::Data<AppState<U, T>>) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    if !state.environment.allows_maintenance() {
        log::warn!("Reset refused in {} environment", state.environment);
        return Ok(HttpResponse::Forbidden().json(ErrorResponse::new(
            error_codes::FORBIDDEN,
            "Reset is only allowed in development",
        )));
    }

    let removed = state.session_manager.reset_all().await?;
    log::warn!("Reset removed {} refresh tokens", removed);

    Ok(HttpResponse::Ok().json(ResetResponse { removed }))
}
