//! Error codes for the Joli backend API.
//!
//! Every code that can appear in a problem-details response lives here.
//! Add new codes here; never pass ad-hoc strings as error codes.

use core::fmt;

/// Centralized error codes. Each variant maps to the SCREAMING_SNAKE_CASE
/// string that appears in the `code` field of HTTP error responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Access denied
    Forbidden,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Join code is malformed (wrong length or characters)
    InvalidJoinCode,
    /// Requested lifecycle transition is not allowed
    InvalidStatusTransition,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Resource Not Found
    /// Game not found (or not visible to the caller)
    GameNotFound,
    /// General not found error
    NotFound,

    // Business Logic Conflicts
    /// Join code already bound to another game
    JoinCodeConflict,
    /// No free join code found within the attempt budget
    JoinCodeExhausted,
    /// Game is completed or cancelled
    GameClosed,
    /// Game status changed concurrently
    StatusChanged,
    /// Unique constraint violation with no more specific mapping
    UniqueViolation,
    /// Generic conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Every variant, for exhaustiveness checks in tests.
    pub const ALL: &'static [ErrorCode] = &[
        Self::Unauthorized,
        Self::UnauthorizedMissingBearer,
        Self::UnauthorizedInvalidJwt,
        Self::UnauthorizedExpiredJwt,
        Self::Forbidden,
        Self::InvalidGameId,
        Self::InvalidJoinCode,
        Self::InvalidStatusTransition,
        Self::ValidationError,
        Self::BadRequest,
        Self::GameNotFound,
        Self::NotFound,
        Self::JoinCodeConflict,
        Self::JoinCodeExhausted,
        Self::GameClosed,
        Self::StatusChanged,
        Self::UniqueViolation,
        Self::Conflict,
        Self::DbError,
        Self::DbUnavailable,
        Self::DbTimeout,
        Self::Internal,
        Self::ConfigError,
    ];

    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::Forbidden => "FORBIDDEN",

            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidJoinCode => "INVALID_JOIN_CODE",
            Self::InvalidStatusTransition => "INVALID_STATUS_TRANSITION",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",

            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",

            Self::JoinCodeConflict => "JOIN_CODE_CONFLICT",
            Self::JoinCodeExhausted => "JOIN_CODE_EXHAUSTED",
            Self::GameClosed => "GAME_CLOSED",
            Self::StatusChanged => "STATUS_CHANGED",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::Conflict => "CONFLICT",

            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
