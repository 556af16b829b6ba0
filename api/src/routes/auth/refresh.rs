use actix_web::{web, HttpRequest, HttpResponse};

use chirpy_core::repositories::{RefreshTokenStore, UserDirectory};
use chirpy_core::services::extract_bearer_token;

use crate::app::AppState;
use crate::dto::RefreshResponse;
use crate::handlers::error::ApiError;
use crate::middleware::auth::RequestHeaders;

/// Handler for POST /api/refresh
///
/// Exchanges the refresh token in `Authorization: Bearer <token>` for a new
/// access token. The refresh token itself is not rotated.
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "token": "eyJ..."
/// }
/// ```
///
/// ## Errors
/// - 401 Unauthorized: Missing, unknown, expired or revoked refresh token
/// - 503 Service Unavailable: Token store unreachable
pub async fn refresh<U, T>(
    req: HttpRequest,
    state: web::Data<AppState<U, T>>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    let refresh_token = extract_bearer_token(&RequestHeaders(req.headers()))?;
    let grant = state.session_manager.refresh(&refresh_token).await?;

    Ok(HttpResponse::Ok().json(RefreshResponse {
        token: grant.access_token,
    }))
}
