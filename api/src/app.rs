//! Application state and factory
//!
//! This module holds the state shared by every worker and provides the
//! factory for creating the Actix-web application.

use std::sync::Arc;

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    middleware::Logger,
    web, App, Error,
};

use chirpy_core::errors::DomainError;
use chirpy_core::repositories::{RefreshTokenStore, UserDirectory};
use chirpy_core::services::SessionManager;
use chirpy_shared::{CorsConfig, Environment};

use crate::handlers::error::ApiError;
use crate::middleware::{
    auth::{Authenticator, JwtAuth},
    cors::create_cors,
};
use crate::routes::{
    admin::reset,
    auth::{login, refresh, revoke, session_info},
    health::{health_check, not_found},
};

/// Default upper bound on JSON request bodies
pub const DEFAULT_JSON_LIMIT: usize = 64 * 1024;

/// Application state that holds shared services
pub struct AppState<U, T>
where
    U: UserDirectory,
    T: RefreshTokenStore,
{
    pub session_manager: Arc<SessionManager<U, T>>,
    pub environment: Environment,
}

impl<U, T> AppState<U, T>
where
    U: UserDirectory,
    T: RefreshTokenStore,
{
    pub fn new(session_manager: SessionManager<U, T>, environment: Environment) -> Self {
        Self {
            session_manager: Arc::new(session_manager),
            environment,
        }
    }
}

/// Create and configure the application with all dependencies
pub fn create_app<U, T>(
    app_state: web::Data<AppState<U, T>>,
    cors: &CorsConfig,
    json_limit: usize,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    let authenticator: Arc<dyn Authenticator> = app_state.session_manager.clone();

    App::new()
        .app_data(app_state)
        .app_data(json_config(json_limit))
        // Last wrap runs first: CORS, then request logging
        .wrap(Logger::default())
        .wrap(create_cors(cors))
        .service(
            web::scope("/api")
                .route("/healthz", web::get().to(health_check))
                .route("/login", web::post().to(login::<U, T>))
                .route("/refresh", web::post().to(refresh::<U, T>))
                .route("/revoke", web::post().to(revoke::<U, T>))
                .service(
                    web::resource("/session")
                        .wrap(JwtAuth::new(authenticator))
                        .route(web::get().to(session_info)),
                ),
        )
        .service(web::scope("/admin").route("/reset", web::post().to(reset::<U, T>)))
        .default_service(web::route().to(not_found))
}

/// JSON extractor settings; malformed bodies become a 400 in the standard shape
fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            log::debug!("Rejected request body: {}", err);
            ApiError(DomainError::Validation {
                message: "request body must be valid JSON".to_string(),
            })
            .into()
        })
}
