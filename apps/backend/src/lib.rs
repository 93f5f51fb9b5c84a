#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod adapters;
pub mod auth;
pub mod config;
pub mod db;
pub mod entities;
pub mod error;
pub mod errors;
pub mod extractors;
pub mod infra;
pub mod logging;
pub mod middleware;
pub mod repos;
pub mod routes;
pub mod services;
pub mod state;
pub mod utils;
pub mod web;

pub use auth::jwt::{mint_access_token, verify_access_token, Claims};
pub use config::db::{db_url, DbProfile};
pub use config::join_codes::JoinCodeSettings;
pub use error::AppError;
pub use errors::{DomainError, ErrorCode};
pub use extractors::{CurrentOrganizer, GameId, ValidatedJson};
pub use infra::db::connect_db;
pub use infra::state::build_state;
pub use middleware::{
    cors_middleware, JwtExtract, RequestTrace, SecurityHeaders, StructuredLogger, TraceSpan,
};
pub use state::app_state::AppState;
pub use state::security_config::SecurityConfig;
pub use utils::join_code::JoinCode;

#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    backend_test_support::logging::init();
}
