use actix_web::HttpResponse;

/// Readiness check for GET /api/healthz
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/plain; charset=utf-8")
        .body("OK")
}

/// Default 404 handler
pub async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(chirpy_shared::ErrorResponse::new(
        chirpy_shared::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
