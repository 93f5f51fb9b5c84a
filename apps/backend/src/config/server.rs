use std::env;

use super::db::must_var;
use super::join_codes::parse_var;
use crate::error::AppError;

pub const DEFAULT_JOIN_RATE_LIMIT_PER_MINUTE: u64 = 30;

/// Process-level settings for the HTTP server binary.
#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    /// Expected `aud` claim, if tokens carry one
    pub jwt_audience: Option<String>,
    pub join_rate_limit_per_minute: u64,
}

impl ServerSettings {
    pub fn from_env() -> Result<Self, AppError> {
        let host = env::var("BACKEND_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = parse_var("BACKEND_PORT", 3001u16)?;
        let jwt_secret = must_var("BACKEND_JWT_SECRET")?;
        if jwt_secret.trim().is_empty() {
            return Err(AppError::config("BACKEND_JWT_SECRET must not be empty"));
        }
        let jwt_audience = env::var("BACKEND_JWT_AUDIENCE")
            .ok()
            .filter(|a| !a.trim().is_empty());
        let join_rate_limit_per_minute =
            parse_var("JOIN_RATE_LIMIT_PER_MINUTE", DEFAULT_JOIN_RATE_LIMIT_PER_MINUTE)?;
        if join_rate_limit_per_minute == 0 {
            return Err(AppError::config("JOIN_RATE_LIMIT_PER_MINUTE must be at least 1"));
        }

        Ok(Self {
            host,
            port,
            jwt_secret,
            jwt_audience,
            join_rate_limit_per_minute,
        })
    }
}
