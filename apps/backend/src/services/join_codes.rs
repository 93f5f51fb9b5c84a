//! Join code allocation, binding and redemption.
//!
//! Allocation draws random codes and checks each against storage. The unique
//! constraint on `games.join_code` is the final arbiter: a bind that loses a
//! race is rolled back to its savepoint and the loop draws again. Checks and
//! bind retries spend the same attempt budget.

use rand::Rng;
use sea_orm::{ConnectionTrait, TransactionTrait};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::config::join_codes::JoinCodeSettings;
use crate::entities::games::GameStatus;
use crate::errors::domain::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
use crate::logging::security;
use crate::repos::games;
use crate::services::games::require_owned_game;
use crate::utils::join_code::{
    generate_join_code_with, is_valid_format_len, normalize_candidate, JoinCode,
    DEFAULT_CODE_LENGTH,
};

/// Participant-facing message for both never-issued and inactive codes.
pub const GAME_NOT_FOUND_DETAIL: &str = "Game not found or no longer active";

#[derive(Debug, Error)]
pub enum AllocationError {
    /// Every draw collided with a code already in use.
    #[error("no free join code after {attempts} attempts")]
    Exhausted { attempts: u32 },
    #[error(transparent)]
    Store(#[from] DomainError),
}

impl From<AllocationError> for DomainError {
    fn from(e: AllocationError) -> Self {
        match e {
            AllocationError::Exhausted { attempts } => DomainError::conflict(
                ConflictKind::JoinCodeExhausted,
                format!("Could not allocate a free join code after {attempts} attempts; try again"),
            ),
            AllocationError::Store(inner) => inner,
        }
    }
}

/// Draw codes until one is unused by every game, at most `max_attempts` times.
///
/// Makes exactly `max_attempts` draws before returning `Exhausted`.
pub async fn allocate_unique_code<C, R>(
    conn: &C,
    rng: &mut R,
    length: usize,
    max_attempts: u32,
) -> Result<JoinCode, AllocationError>
where
    C: ConnectionTrait + Send + Sync,
    R: Rng + ?Sized,
{
    for attempt in 1..=max_attempts {
        let code = generate_join_code_with(rng, length);
        if !games::code_in_use(conn, &code).await? {
            debug!(attempts = attempt, "join code allocated");
            return Ok(code);
        }
        debug!(attempt, code = %code.masked(), "join code collision");
    }

    warn!(attempts = max_attempts, "join code allocation exhausted");
    Err(AllocationError::Exhausted {
        attempts: max_attempts,
    })
}

/// Allocate a code and bind it to `game_id`, retrying bind conflicts.
///
/// Each bind runs in a nested transaction (a savepoint when `conn` is itself
/// a transaction) so a unique violation does not poison the caller's work.
pub async fn allocate_and_bind<C, R>(
    conn: &C,
    rng: &mut R,
    game_id: i64,
    length: usize,
    max_attempts: u32,
) -> Result<JoinCode, AllocationError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
    R: Rng + ?Sized,
{
    let mut attempts = 0;
    while attempts < max_attempts {
        attempts += 1;
        let code = generate_join_code_with(rng, length);

        if games::code_in_use(conn, &code).await? {
            debug!(game_id, attempt = attempts, "join code collision");
            continue;
        }

        let savepoint = conn.begin().await.map_err(DomainError::from)?;
        match games::bind_join_code(&savepoint, game_id, &code).await {
            Ok(()) => {
                savepoint.commit().await.map_err(DomainError::from)?;
                info!(game_id, attempts, code = %code.masked(), "join code bound");
                return Ok(code);
            }
            Err(e) if e.is_join_code_conflict() => {
                // A failed rollback leaves the outer transaction unusable.
                savepoint.rollback().await.map_err(DomainError::from)?;
                warn!(game_id, attempt = attempts, "join code bind conflict; retrying");
            }
            Err(e) => {
                let _ = savepoint.rollback().await;
                return Err(e.into());
            }
        }
    }

    warn!(game_id, attempts, "join code allocation exhausted");
    Err(AllocationError::Exhausted { attempts })
}

/// Look up the active game holding `candidate` (default code length).
///
/// Input is trimmed and uppercased first. Malformed input returns `None`
/// without touching storage.
pub async fn resolve<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    candidate: &str,
) -> Result<Option<i64>, DomainError> {
    resolve_len(conn, candidate, DEFAULT_CODE_LENGTH).await
}

/// [`resolve`] for a configured code length.
pub async fn resolve_len<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    candidate: &str,
    length: usize,
) -> Result<Option<i64>, DomainError> {
    let normalized = normalize_candidate(candidate);
    let Some(code) = JoinCode::parse(&normalized, length) else {
        return Ok(None);
    };
    let game = games::find_active_by_join_code(conn, &code).await?;
    Ok(game.map(|g| g.id))
}

/// Expose a game for participant join, replacing any code it already has.
pub async fn issue_code<C, R>(
    conn: &C,
    rng: &mut R,
    settings: JoinCodeSettings,
    owner_sub: &str,
    game_id: i64,
) -> Result<JoinCode, DomainError>
where
    C: ConnectionTrait + TransactionTrait + Send + Sync,
    R: Rng + ?Sized,
{
    let game = require_owned_game(conn, owner_sub, game_id).await?;

    if !matches!(game.status, GameStatus::Draft | GameStatus::Active) {
        return Err(DomainError::conflict(
            ConflictKind::GameClosed,
            format!("Game {game_id} is closed and cannot take a join code"),
        ));
    }

    let code =
        allocate_and_bind(conn, rng, game_id, settings.length, settings.max_attempts).await?;
    Ok(code)
}

/// Remove the game's code. Revoking when there is none succeeds.
pub async fn revoke_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    game_id: i64,
) -> Result<(), DomainError> {
    let game = require_owned_game(conn, owner_sub, game_id).await?;
    games::unbind_join_code(conn, game_id).await?;
    if game.join_code.is_some() {
        info!(game_id, "join code revoked");
    }
    Ok(())
}

/// Participant redemption: normalize, validate, resolve.
///
/// `InvalidJoinCode` for malformed input; `NotFound(Game)` for codes that are
/// unknown or bound to a game that is not active.
pub async fn join<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    settings: JoinCodeSettings,
    raw: &str,
) -> Result<i64, DomainError> {
    let normalized = normalize_candidate(raw);
    if !is_valid_format_len(&normalized, settings.length) {
        security::join_miss("invalid_format", &normalized);
        return Err(DomainError::validation(
            ValidationKind::InvalidJoinCode,
            format!(
                "Join codes are {} characters using letters and digits 2-9",
                settings.length
            ),
        ));
    }

    match resolve_len(conn, &normalized, settings.length).await? {
        Some(game_id) => {
            info!(game_id, "participant join resolved");
            Ok(game_id)
        }
        None => {
            security::join_miss("not_found", &normalized);
            Err(DomainError::not_found(NotFoundKind::Game, GAME_NOT_FOUND_DETAIL))
        }
    }
}
