//! Bearer authentication for organizer routes.
//!
//! Verifies the `Authorization: Bearer <jwt>` header against the state's
//! [`SecurityConfig`](crate::state::security_config::SecurityConfig) and
//! stores the [`Claims`] in request extensions. Wrapped around `/api/games`
//! only; the participant join endpoint is anonymous.

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::jwt::{verify_access_token, Claims};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let Some(app_state) = req.app_data::<web::Data<AppState>>().cloned() else {
            return Box::pin(async {
                Err(AppError::internal("AppState not available").into())
            });
        };

        let claims = bearer_token(req.headers().get(header::AUTHORIZATION))
            .and_then(|token| verify_access_token(token, &app_state.security));

        match claims {
            Ok(claims) => {
                req.extensions_mut().insert::<Claims>(claims);
                Box::pin(self.service.call(req))
            }
            Err(err) => {
                security::auth_rejected(err.code().as_str());
                Box::pin(async move { Err(err.into()) })
            }
        }
    }
}

/// Token part of a `Bearer` authorization header.
fn bearer_token(value: Option<&header::HeaderValue>) -> Result<&str, AppError> {
    let raw = value
        .ok_or_else(AppError::unauthorized_missing_bearer)?
        .to_str()
        .map_err(|_| AppError::unauthorized_missing_bearer())?;

    let mut parts = raw.split_whitespace();
    match (parts.next(), parts.next(), parts.next()) {
        (Some(scheme), Some(token), None) if scheme.eq_ignore_ascii_case("bearer") => Ok(token),
        _ => Err(AppError::unauthorized_missing_bearer()),
    }
}
