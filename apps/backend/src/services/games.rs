//! Organizer-facing game record operations.

use sea_orm::ConnectionTrait;
use tracing::info;

use crate::adapters::games_sea::status_str;
use crate::entities::games::GameStatus;
use crate::errors::domain::{DomainError, ValidationKind};
use crate::repos::games::{self, Game};

/// Longest accepted game name, in characters.
pub const MAX_NAME_CHARS: usize = 120;

/// Organizer lifecycle moves. Same-status requests are handled before this.
pub fn can_transition(from: GameStatus, to: GameStatus) -> bool {
    matches!(
        (from, to),
        (GameStatus::Draft, GameStatus::Active)
            | (GameStatus::Draft, GameStatus::Cancelled)
            | (GameStatus::Active, GameStatus::Completed)
            | (GameStatus::Active, GameStatus::Cancelled)
    )
}

/// Load a game the caller owns. Someone else's game is `Forbidden`.
pub async fn require_owned_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games::require_game(conn, game_id).await?;
    if !game.is_owned_by(owner_sub) {
        return Err(DomainError::forbidden(format!(
            "Game {game_id} belongs to another organizer"
        )));
    }
    Ok(game)
}

/// Insert a `draft` game with no join code.
pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    name: Option<String>,
) -> Result<Game, DomainError> {
    let name = match name.map(|n| n.trim().to_string()) {
        Some(n) if n.is_empty() => None,
        Some(n) if n.chars().count() > MAX_NAME_CHARS => {
            return Err(DomainError::validation_other(format!(
                "Game name must be at most {MAX_NAME_CHARS} characters"
            )));
        }
        other => other,
    };

    let game = games::create_game(conn, owner_sub, name).await?;
    info!(game_id = game.id, "game created");
    Ok(game)
}

pub async fn get_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    game_id: i64,
) -> Result<Game, DomainError> {
    require_owned_game(conn, owner_sub, game_id).await
}

/// Apply a lifecycle transition. The join code is left untouched.
pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    game_id: i64,
    next: GameStatus,
) -> Result<Game, DomainError> {
    let game = require_owned_game(conn, owner_sub, game_id).await?;

    if game.status == next {
        return Ok(game);
    }

    if !can_transition(game.status, next) {
        return Err(DomainError::validation(
            ValidationKind::InvalidStatusTransition,
            format!(
                "Cannot move game from {} to {}",
                status_str(game.status),
                status_str(next)
            ),
        ));
    }

    let updated = games::set_status(conn, game_id, game.status, next).await?;
    info!(game_id, from = ?game.status, to = ?next, "game status changed");
    Ok(updated)
}
