use actix_web::{web, HttpResponse};
use validator::Validate;

use chirpy_core::repositories::{RefreshTokenStore, UserDirectory};

use crate::app::AppState;
use crate::dto::{LoginRequest, LoginResponse};
use crate::handlers::error::{validation_error, ApiError};

/// Handler for POST /api/login
///
/// # Request Body
///
/// ```json
/// {
///     "email": "walt@breakingbad.com",
///     "password": "04234"
/// }
/// ```
///
/// # Response
///
/// ## Success (200 OK)
/// ```json
/// {
///     "id": "5f2d...",
///     "created_at": "2024-06-01T00:00:00Z",
///     "updated_at": "2024-06-01T00:00:00Z",
///     "email": "walt@breakingbad.com",
///     "is_chirpy_red": false,
///     "token": "eyJ...",
///     "refresh_token": "56aa..."
/// }
/// ```
///
/// ## Errors
/// - 400 Bad Request: Malformed email or empty password
/// - 401 Unauthorized: Unknown email or wrong password
/// - 503 Service Unavailable: User directory or token store unreachable
pub async fn login<U, T>(
    state: web::Data<AppState<U, T>>,
    request: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    let request = request.into_inner();
    request.validate().map_err(validation_error)?;

    let session = state
        .session_manager
        .login(&request.email, &request.password)
        .await?;

    log::info!("User {} logged in", session.user.id);
    Ok(HttpResponse::Ok().json(LoginResponse::from(session)))
}
