//! Integration tests for bearer authentication middleware

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::{http::StatusCode, test, web, App, HttpResponse};
    use serde_json::Value;
    use uuid::Uuid;

    use chirpy_api::middleware::auth::{AuthContext, Authenticator, JwtAuth};
    use chirpy_core::errors::{AuthError, DomainResult};
    use chirpy_core::repositories::{InMemoryRefreshTokenStore, InMemoryUserDirectory};
    use chirpy_core::services::{
        extract_bearer_token, AccessTokenCodec, HeaderSource, SessionConfig, SessionManager,
    };

    /// Accepts exactly one bearer token
    struct FixedAuthenticator {
        token: &'static str,
        user_id: Uuid,
    }

    impl Authenticator for FixedAuthenticator {
        fn authenticate(&self, headers: &dyn HeaderSource) -> DomainResult<Uuid> {
            match extract_bearer_token(headers) {
                Ok(token) if token == self.token => Ok(self.user_id),
                _ => Err(AuthError::Unauthorized.into()),
            }
        }
    }

    async fn protected_handler(auth: AuthContext) -> HttpResponse {
        HttpResponse::Ok().json(serde_json::json!({ "user_id": auth.user_id }))
    }

    #[actix_web::test]
    async fn test_middleware_requires_auth_header() {
        let authenticator = Arc::new(FixedAuthenticator {
            token: "letmein",
            user_id: Uuid::new_v4(),
        });
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(authenticator))
                .route("/protected", web::get().to(protected_handler)),
        )
        .await;

        let req = test::TestRequest::get().uri("/protected").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "UNAUTHORIZED");
        assert_eq!(body["message"], "Unauthorized");
    }

    #[actix_web::test]
    async fn test_middleware_injects_auth_context() {
        let user_id = Uuid::new_v4();
        let authenticator = Arc::new(FixedAuthenticator {
            token: "letmein",
            user_id,
        });
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(authenticator))
                .route("/protected", web::get().to(protected_handler)),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer letmein"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["user_id"], user_id.to_string());
    }

    #[actix_web::test]
    async fn test_middleware_with_session_manager() {
        let codec = AccessTokenCodec::new(b"middleware-secret");
        let manager = SessionManager::new(
            Arc::new(InMemoryUserDirectory::new()),
            Arc::new(InMemoryRefreshTokenStore::new()),
            codec.clone(),
            SessionConfig::default(),
        );
        let app = test::init_service(
            App::new()
                .wrap(JwtAuth::new(Arc::new(manager)))
                .route("/protected", web::get().to(protected_handler)),
        )
        .await;

        let user_id = Uuid::new_v4();
        let token = codec.create(user_id, chrono::Duration::hours(1)).unwrap();
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let expired = codec.create(user_id, chrono::Duration::hours(-1)).unwrap();
        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", format!("Bearer {}", expired)))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let req = test::TestRequest::get()
            .uri("/protected")
            .insert_header(("Authorization", "Bearer invalid-token"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_auth_context_extractor() {
        let app = test::init_service(
            App::new().route("/protected", web::get().to(protected_handler)),
        )
        .await;

        // Request without auth context should fail
        let req = test::TestRequest::get().uri("/protected").to_request();

        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }
}
