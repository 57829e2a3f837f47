use actix_web::{
    body::BoxBody,
    dev::{Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    web, Error, HttpMessage, HttpRequest, ResponseError,
};
use futures_util::future::{ok, LocalBoxFuture, Ready};
use std::{rc::Rc, task::{Context, Poll}};

use uuid::Uuid;

use crate::{
    constants::{ADMIN_PREFIX, MEDIA_ROUTE_PREFIX},
    entities::{token::Claims, user::AppRole},
    errors::AuthError,
    repositories::{token::TokenServiceRepository, user::UserRepository},
    AppState,
};

/// Decodes bearer tokens on every non-public route and stores the claims
/// in the request extensions.
pub struct AuthMiddleware;

impl<S> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type InitError = ();
    type Transform = AuthMiddlewareService<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ok(AuthMiddlewareService {
            service: Rc::new(service),
        })
    }
}

pub struct AuthMiddlewareService<S> {
    service: Rc<S>,
}

impl<S> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<BoxBody>, Error = Error> + 'static,
{
    type Response = ServiceResponse<BoxBody>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.service.poll_ready(ctx)
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        Box::pin(async move {
            if is_public_route(req.path(), req.method().as_str()) {
                return service.call(req).await;
            }

            let claims = match authenticate(&req).await {
                Ok(claims) => claims,
                Err(e) => {
                    tracing::warn!(path = %req.path(), "Authentication failed: {}", e);
                    return Ok(req.into_response(e.error_response()));
                }
            };

            if req.path().starts_with(ADMIN_PREFIX) && !claims.is_admin() {
                tracing::warn!(path = %req.path(), user = %claims.sub, "Admin access required");
                let forbidden = AuthError::Forbidden("Admin access required".into());
                return Ok(req.into_response(forbidden.error_response()));
            }

            if needs_fresh_role_check(req.path(), req.method().as_str()) {
                if let Err(e) = confirm_admin_role(&req, &claims).await {
                    tracing::warn!(path = %req.path(), user = %claims.sub, "Admin write refused: {}", e);
                    return Ok(req.into_response(e.error_response()));
                }
            }

            req.extensions_mut().insert(claims);
            service.call(req).await
        })
    }
}

async fn authenticate(req: &ServiceRequest) -> Result<Claims, AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or_else(|| {
            tracing::error!("AppState missing in middleware");
            AuthError::MissingJwtService
        })?;

    let token = bearer_token(req.request()).ok_or(AuthError::MissingCredentials)?;
    let claims = state.auth_handler.token_service.decode_jwt(&token)?.claims;

    match state.auth_handler.token_service.is_access_revoked(&token).await {
        Ok(true) => Err(AuthError::TokenRevoked),
        Ok(false) => Ok(claims),
        Err(e) => {
            tracing::error!("Deny-list lookup failed, accepting token: {}", e);
            Ok(claims)
        }
    }
}

/// Admin writes re-check the role in the database; token roles alone only
/// cover reads.
pub fn needs_fresh_role_check(path: &str, method: &str) -> bool {
    path.starts_with(ADMIN_PREFIX) && !matches!(method, "GET" | "HEAD" | "OPTIONS")
}

async fn confirm_admin_role(req: &ServiceRequest, claims: &Claims) -> Result<(), AuthError> {
    let state = req.app_data::<web::Data<AppState>>()
        .ok_or(AuthError::MissingJwtService)?;
    let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::InvalidUserId)?;

    match state.auth_handler.user_repo.has_role(&user_id, AppRole::Admin).await {
        Ok(true) => Ok(()),
        Ok(false) => Err(AuthError::Forbidden("Admin role revoked".into())),
        Err(e) => {
            tracing::error!(%user_id, "Role lookup failed, refusing admin write: {}", e);
            Err(AuthError::Forbidden("Admin role could not be verified".into()))
        }
    }
}

pub fn is_public_route(path: &str, method: &str) -> bool {
    if method == "OPTIONS" {
        return true;
    }

    if matches!(
        (path, method),
        ("/", "GET") |
        ("/api/v1/auth/refresh-token", "POST") |
        ("/api/v1/auth/login", "POST") |
        ("/api/v1/auth/register", "POST")
    ) {
        return true;
    }

    method == "GET" && (
        path.starts_with(MEDIA_ROUTE_PREFIX)
            || path.starts_with("/api/v1/content/")
            || path.starts_with("/api/v1/posts")
            || path.starts_with("/api/v1/pages/")
            || path.starts_with("/api/v1/projects")
            || path.starts_with("/api/v1/settings/")
    )
}

/// Token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| {
            let parts: Vec<&str> = header.split_whitespace().collect();
            if parts.len() == 2 && parts[0].eq_ignore_ascii_case("bearer") {
                Some(parts[1].to_string())
            } else {
                None
            }
        })
}
