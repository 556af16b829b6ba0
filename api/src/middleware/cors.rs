//! CORS middleware configuration for cross-origin requests.
//!
//! Development accepts any origin. Every other environment accepts only the
//! origins listed in `CORS_ALLOWED_ORIGINS`.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use chirpy_shared::CorsConfig;

/// Creates a CORS middleware instance from the loaded configuration.
pub fn create_cors(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
        ])
        .max_age(config.max_age);

    if config.allows_any_origin() {
        log::info!("Configuring permissive CORS");
        return cors.allow_any_origin();
    }

    config
        .allowed_origins
        .iter()
        .fold(cors, |cors, origin| {
            log::info!("Adding allowed origin: {}", origin);
            cors.allowed_origin(origin)
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::StatusCode, test, web, App, HttpResponse};

    async fn preflight_status(config: CorsConfig, origin: &str) -> StatusCode {
        let app = test::init_service(
            App::new()
                .wrap(create_cors(&config))
                .route("/api/healthz", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::default()
            .method(Method::OPTIONS)
            .uri("/api/healthz")
            .insert_header((header::ORIGIN, origin))
            .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "GET"))
            .to_request();

        match test::try_call_service(&app, req).await {
            Ok(resp) => resp.status(),
            Err(err) => err.as_response_error().status_code(),
        }
    }

    #[actix_web::test]
    async fn test_development_cors_accepts_any_origin() {
        let status = preflight_status(CorsConfig::development(), "https://anywhere.test").await;
        assert_eq!(status, StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_restricted_cors_rejects_unknown_origin() {
        let config = CorsConfig {
            allowed_origins: vec!["https://chirpy.test".to_string()],
            max_age: 600,
        };
        assert_eq!(
            preflight_status(config.clone(), "https://chirpy.test").await,
            StatusCode::OK
        );
        assert_ne!(
            preflight_status(config, "https://evil.test").await,
            StatusCode::OK
        );
    }
}
