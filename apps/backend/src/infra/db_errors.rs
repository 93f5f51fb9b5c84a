//! SeaORM -> DomainError translation.
//!
//! Adapters return `sea_orm::DbErr`; this is the single place it becomes a
//! `DomainError`. Raw driver text is logged redacted and never returned.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::adapters::games_sea::{GAME_NOT_FOUND_PREFIX, STATUS_CHANGED_PREFIX};
use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::web::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
}

/// Postgres names the constraint, SQLite names `table.column`.
fn is_join_code_violation(msg: &str) -> bool {
    msg.contains("games_join_code_key")
        || msg.contains("games.join_code")
        || msg.contains("(join_code)")
}

/// Translate a `DbErr` into a `DomainError` with sanitized detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::Custom(msg) if msg.starts_with(GAME_NOT_FOUND_PREFIX) => {
            let id = &msg[GAME_NOT_FOUND_PREFIX.len()..];
            return DomainError::not_found(NotFoundKind::Game, format!("Game {id} not found"));
        }
        DbErr::Custom(msg) if msg.starts_with(STATUS_CHANGED_PREFIX) => {
            #[derive(serde::Deserialize)]
            struct Changed {
                expected: String,
                actual: String,
            }

            let payload = &msg[STATUS_CHANGED_PREFIX.len()..];
            return match serde_json::from_str::<Changed>(payload) {
                Ok(c) => {
                    warn!(
                        trace_id = %trace_id,
                        expected = %c.expected,
                        actual = %c.actual,
                        "Status changed concurrently"
                    );
                    DomainError::conflict(
                        ConflictKind::StatusChanged,
                        format!(
                            "Game status changed concurrently (expected {}, now {})",
                            c.expected, c.actual
                        ),
                    )
                }
                Err(_) => DomainError::conflict(
                    ConflictKind::StatusChanged,
                    "Game status changed concurrently",
                ),
            };
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            let raw = e.to_string();
            warn!(trace_id = %trace_id, raw_error = %Redacted(&raw), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    let msg = e.to_string();

    if is_unique_violation(&msg) {
        if is_join_code_violation(&msg) {
            // Expected under contention; the allocator retries.
            warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Join code unique violation");
            return DomainError::conflict(
                ConflictKind::JoinCodeConflict,
                "Join code already bound to another game",
            );
        }
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unique constraint violation");
        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if msg.contains("timeout") || msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&msg), "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}

impl From<DbErr> for DomainError {
    fn from(e: DbErr) -> Self {
        map_db_err(e)
    }
}
