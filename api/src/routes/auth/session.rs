use actix_web::HttpResponse;

use crate::dto::SessionInfoResponse;
use crate::middleware::auth::AuthContext;

/// Handler for GET /api/session
///
/// Runs behind [`JwtAuth`](crate::middleware::auth::JwtAuth) and reports the
/// user the access token was issued to.
pub async fn session_info(auth: AuthContext) -> HttpResponse {
    HttpResponse::Ok().json(SessionInfoResponse {
        user_id: auth.user_id,
    })
}
