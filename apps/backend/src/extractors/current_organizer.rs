use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};
use futures_util::future::{ready, Ready};
use serde::{Deserialize, Serialize};

use crate::auth::jwt::Claims;
use crate::error::AppError;

/// The authenticated organizer, taken from the claims `JwtExtract` stored in
/// request extensions. No database lookup: the subject is the owner key.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CurrentOrganizer {
    pub sub: String,
    pub email: Option<String>,
}

impl From<Claims> for CurrentOrganizer {
    fn from(claims: Claims) -> Self {
        Self {
            sub: claims.sub,
            email: claims.email,
        }
    }
}

impl FromRequest for CurrentOrganizer {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let organizer = req
            .extensions()
            .get::<Claims>()
            .cloned()
            .map(CurrentOrganizer::from)
            .ok_or_else(AppError::unauthorized_missing_bearer);
        ready(organizer)
    }
}
