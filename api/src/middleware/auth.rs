//! Bearer authentication middleware for protecting API endpoints.
//!
//! The middleware hands the request headers to an [`Authenticator`], and on
//! success injects an [`AuthContext`] into the request extensions. Failures
//! are answered with the fixed 401 body before the wrapped service runs.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::ErrorUnauthorized,
    http::header::HeaderMap,
    Error, FromRequest, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
    task::{Context, Poll},
};
use uuid::Uuid;

use chirpy_core::{
    errors::DomainResult,
    repositories::{RefreshTokenStore, UserDirectory},
    services::{HeaderSource, SessionManager},
};

use crate::handlers::error::ApiError;

/// Borrowed actix-web headers exposed to the core credential parser
pub struct RequestHeaders<'a>(pub &'a HeaderMap);

impl HeaderSource for RequestHeaders<'_> {
    fn header_value(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(|value| value.to_str().ok())
    }
}

/// Resolves the user behind a request's credentials
pub trait Authenticator: Send + Sync {
    fn authenticate(&self, headers: &dyn HeaderSource) -> DomainResult<Uuid>;
}

impl<U, T> Authenticator for SessionManager<U, T>
where
    U: UserDirectory + 'static,
    T: RefreshTokenStore + 'static,
{
    fn authenticate(&self, headers: &dyn HeaderSource) -> DomainResult<Uuid> {
        SessionManager::authenticate(self, headers)
    }
}

/// User authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    /// Subject of the verified access token
    pub user_id: Uuid,
}

/// Bearer authentication middleware factory
#[derive(Clone)]
pub struct JwtAuth {
    authenticator: Arc<dyn Authenticator>,
}

impl JwtAuth {
    pub fn new(authenticator: Arc<dyn Authenticator>) -> Self {
        Self { authenticator }
    }
}

impl<S, B> Transform<S, ServiceRequest> for JwtAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtAuthMiddleware {
            service: Rc::new(service),
            authenticator: Arc::clone(&self.authenticator),
        }))
    }
}

/// Bearer authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    authenticator: Arc<dyn Authenticator>,
}

impl<S, B> Service<ServiceRequest> for JwtAuthMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);
        let outcome = self
            .authenticator
            .authenticate(&RequestHeaders(req.headers()));

        Box::pin(async move {
            match outcome {
                Ok(user_id) => {
                    req.extensions_mut().insert(AuthContext { user_id });
                    let response = service.call(req).await?;
                    Ok(response.map_into_left_body())
                }
                Err(error) => {
                    let response = ApiError::from(error).error_response();
                    Ok(req.into_response(response).map_into_right_body())
                }
            }
        })
    }
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| ErrorUnauthorized("Unauthorized"));

        ready(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;
    use chirpy_core::services::extract_bearer_token;

    #[test]
    fn test_request_headers_feed_bearer_extraction() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(&RequestHeaders(req.headers())),
            Ok("test_token_123".to_string())
        );

        let req = TestRequest::default()
            .insert_header(("authorization", "test_token_123"))
            .to_srv_request();
        assert!(extract_bearer_token(&RequestHeaders(req.headers())).is_err());

        let req = TestRequest::default().to_srv_request();
        assert!(RequestHeaders(req.headers())
            .header_value("Authorization")
            .is_none());
    }
}
