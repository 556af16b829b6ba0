use actix_web::{web, HttpRequest, HttpResponse};

use chirpy_core::repositories::{RefreshTokenStore, UserDirectory};
use chirpy_core::services::extract_bearer_token;

use crate::app::AppState;
use crate::handlers::error::ApiError;
use crate::middleware::auth::RequestHeaders;

/// Handler for POST /api/revoke
///
/// Revokes the refresh token sent as the bearer credential. Revoking a token
/// twice succeeds both times.
///
/// ## Success (204 No Content)
///
/// ## Errors
/// - 401 Unauthorized: Missing or unknown refresh token
/// - 503 Service Unavailable: Token store unreachable
pub async fn revoke<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    let refresh_token = extract_bearer_token(&RequestHeaders(req.headers()))?;
    state.session_manager.revoke_session(&refresh_token).await?;

    Ok(HttpResponse::NoContent().finish())
}
