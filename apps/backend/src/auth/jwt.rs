//! HS256 bearer tokens issued by the auth provider.

use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::error::AppError;
use crate::state::security_config::SecurityConfig;

/// Lifetime of tokens minted by [`mint_access_token`].
pub const ACCESS_TOKEN_TTL_SECS: i64 = 60 * 60;

/// Claims the backend reads from an organizer token. Stored in request
/// extensions by `JwtExtract`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Claims {
    /// Auth subject; becomes `games.owner_sub`
    pub sub: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default)]
    pub iat: i64,
    pub exp: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aud: Option<String>,
}

/// Mint a token the way the auth provider would. Used by tests and local tooling.
pub fn mint_access_token(
    sub: &str,
    email: Option<&str>,
    now: SystemTime,
    security: &SecurityConfig,
) -> Result<String, AppError> {
    let iat = now
        .duration_since(UNIX_EPOCH)
        .map_err(|_| AppError::internal("System clock before UNIX epoch"))?
        .as_secs() as i64;

    let claims = Claims {
        sub: sub.to_string(),
        email: email.map(str::to_string),
        iat,
        exp: iat + ACCESS_TOKEN_TTL_SECS,
        aud: security.audience.clone(),
    };

    encode(
        &Header::new(security.algorithm),
        &claims,
        &EncodingKey::from_secret(&security.jwt_secret),
    )
    .map_err(|e| AppError::internal(format!("Failed to encode JWT: {e}")))
}

/// Verify signature, algorithm, expiry and (when configured) audience.
pub fn verify_access_token(token: &str, security: &SecurityConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(security.algorithm);
    validation.set_required_spec_claims(&["exp", "sub"]);
    match &security.audience {
        Some(aud) => validation.set_audience(&[aud.as_str()]),
        None => validation.validate_aud = false,
    }

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(&security.jwt_secret),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        ErrorKind::ExpiredSignature => AppError::unauthorized_expired_jwt(),
        _ => AppError::unauthorized_invalid_jwt(),
    })?;

    if claims.sub.trim().is_empty() {
        return Err(AppError::unauthorized_invalid_jwt());
    }
    Ok(claims)
}
