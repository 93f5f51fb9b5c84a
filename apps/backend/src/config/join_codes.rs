//! Join code allocation settings.

use std::env;
use std::str::FromStr;

use crate::error::AppError;
use crate::utils::join_code::{DEFAULT_CODE_LENGTH, MAX_CODE_LENGTH};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JoinCodeSettings {
    /// Symbols per code, `1..=MAX_CODE_LENGTH`
    pub length: usize,
    /// Generator draws (and bind attempts) before allocation gives up
    pub max_attempts: u32,
}

impl Default for JoinCodeSettings {
    fn default() -> Self {
        Self {
            length: DEFAULT_CODE_LENGTH,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl JoinCodeSettings {
    pub fn new(length: usize, max_attempts: u32) -> Result<Self, AppError> {
        if !(1..=MAX_CODE_LENGTH).contains(&length) {
            return Err(AppError::config(format!(
                "JOIN_CODE_LENGTH must be between 1 and {MAX_CODE_LENGTH}, got {length}"
            )));
        }
        if max_attempts == 0 {
            return Err(AppError::config("JOIN_CODE_MAX_ATTEMPTS must be at least 1"));
        }
        Ok(Self {
            length,
            max_attempts,
        })
    }

    /// Reads `JOIN_CODE_LENGTH` and `JOIN_CODE_MAX_ATTEMPTS`, defaulting when unset.
    pub fn from_env() -> Result<Self, AppError> {
        let defaults = Self::default();
        let length = parse_var("JOIN_CODE_LENGTH", defaults.length)?;
        let max_attempts = parse_var("JOIN_CODE_MAX_ATTEMPTS", defaults.max_attempts)?;
        Self::new(length, max_attempts)
    }
}

/// Parse an optional numeric environment variable.
pub fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| AppError::config(format!("{name} must be a number, got '{raw}'"))),
        _ => Ok(default),
    }
}
