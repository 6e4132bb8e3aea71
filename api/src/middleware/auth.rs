//! JWT authentication middleware for protecting API endpoints.
//!
//! The middleware reads `Authorization: Bearer <token>`, verifies it as an
//! access token and stores an [`AuthContext`] in the request extensions.
//! Verification goes through the [`AccessTokenVerifier`] registered as app
//! data, so the middleware itself stays free of repository generics.

use actix_web::{
    body::EitherBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    error::InternalError,
    http::header::{HeaderMap, AUTHORIZATION},
    web, Error, FromRequest, HttpMessage, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    task::{Context, Poll},
};

use craiyon_core::{AuthError, DomainError, TokenRepository, TokenService};

use crate::handlers::handle_domain_error;

/// User authentication context injected into requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: i64,
}

/// Access token verification as seen by the HTTP layer
pub trait AccessTokenVerifier: Send + Sync {
    fn verify_access_token(&self, token: &str) -> Result<i64, DomainError>;
}

impl<R: TokenRepository> AccessTokenVerifier for TokenService<R> {
    fn verify_access_token(&self, token: &str) -> Result<i64, DomainError> {
        TokenService::verify_access_token(self, token)
    }
}

/// JWT authentication middleware factory
#[derive(Debug, Clone, Copy)]
pub struct JwtAuth {
    required: bool,
}

impl JwtAuth {
    /// Reject requests without a valid access token
    pub fn required() -> Self {
        Self { required: true }
    }

    /// Attach the user when a valid token is present, otherwise continue anonymously
    pub fn optional() -> Self {
        Self { required: false }
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
            required: self.required,
        }))
    }
}

/// JWT authentication middleware service
pub struct JwtAuthMiddleware<S> {
    service: Rc<S>,
    required: bool,
}

/// Answers the request with the error envelope instead of calling the handler
fn reject<B>(req: ServiceRequest, error: DomainError) -> ServiceResponse<EitherBody<B>> {
    req.into_response(handle_domain_error(error))
        .map_into_right_body()
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
        let required = self.required;

        Box::pin(async move {
            let verified = match extract_bearer_token(req.headers()) {
                None if required => return Ok(reject(req, AuthError::MissingToken.into())),
                None => None,
                Some(token) => {
                    let Some(verifier) = req.app_data::<web::Data<dyn AccessTokenVerifier>>()
                    else {
                        let error = DomainError::internal("Access token verifier not configured");
                        return Ok(reject(req, error));
                    };

                    match verifier.verify_access_token(&token) {
                        Ok(user_id) => Some(user_id),
                        Err(e) if required => return Ok(reject(req, e)),
                        Err(e) => {
                            log::debug!("Ignoring invalid token on optional route: {}", e);
                            None
                        }
                    }
                }
            };

            if let Some(user_id) = verified {
                req.extensions_mut().insert(AuthContext { user_id });
            }

            service.call(req).await.map(ServiceResponse::map_into_left_body)
        })
    }
}

/// Extracts the Bearer token from the Authorization header
pub fn extract_bearer_token(headers: &HeaderMap) -> Option<String> {
    headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
}

/// Extractor for required authentication
impl FromRequest for AuthContext {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let result: Result<Self, Error> = req
            .extensions()
            .get::<AuthContext>()
            .copied()
            .ok_or_else(|| {
                let error: DomainError = AuthError::MissingToken.into();
                InternalError::from_response(error.to_string(), handle_domain_error(error)).into()
            });

        ready(result)
    }
}

/// Extractor for optional authentication
pub struct OptionalAuth(pub Option<AuthContext>);

impl OptionalAuth {
    pub fn user_id(&self) -> Option<i64> {
        self.0.map(|ctx| ctx.user_id)
    }
}

impl FromRequest for OptionalAuth {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut actix_web::dev::Payload) -> Self::Future {
        let auth = req.extensions().get::<AuthContext>().copied();
        ready(Ok(OptionalAuth(auth)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;

    #[::core::prelude::v1::test]
    fn test_extract_bearer_token() {
        let req = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer test_token_123"))
            .to_srv_request();
        assert_eq!(
            extract_bearer_token(req.headers()),
            Some("test_token_123".to_string())
        );

        let req_no_bearer = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "test_token_123"))
            .to_srv_request();
        assert_eq!(extract_bearer_token(req_no_bearer.headers()), None);

        let req_empty = test::TestRequest::default()
            .insert_header((AUTHORIZATION, "Bearer "))
            .to_srv_request();
        assert_eq!(extract_bearer_token(req_empty.headers()), None);

        let req_no_header = test::TestRequest::default().to_srv_request();
        assert_eq!(extract_bearer_token(req_no_header.headers()), None);
    }
}
