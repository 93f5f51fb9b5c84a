//! Game repository functions for the domain layer.

use sea_orm::ConnectionTrait;
use time::OffsetDateTime;

use crate::adapters::games_sea as games_adapter;
use crate::entities::games::{self, GameStatus};
use crate::errors::domain::DomainError;
use crate::utils::join_code::JoinCode;

/// Game as the services see it.
#[derive(Debug, Clone, PartialEq)]
pub struct Game {
    pub id: i64,
    pub owner_sub: String,
    pub name: Option<String>,
    pub status: GameStatus,
    pub join_code: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

impl Game {
    pub fn is_owned_by(&self, sub: &str) -> bool {
        self.owner_sub == sub
    }
}

impl From<games::Model> for Game {
    fn from(m: games::Model) -> Self {
        Self {
            id: m.id,
            owner_sub: m.owner_sub,
            name: m.name,
            status: m.status,
            join_code: m.join_code,
            created_at: m.created_at,
            updated_at: m.updated_at,
        }
    }
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    owner_sub: &str,
    name: Option<String>,
) -> Result<Game, DomainError> {
    let mut dto = games_adapter::GameCreate::new(owner_sub);
    if let Some(name) = name {
        dto = dto.with_name(name);
    }
    let game = games_adapter::create_game(conn, dto).await?;
    Ok(Game::from(game))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_id(conn, game_id).await?;
    Ok(game.map(Game::from))
}

/// Load a game or fail with `NotFound(Game)`.
pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Game, DomainError> {
    let game = games_adapter::require_game(conn, game_id).await?;
    Ok(Game::from(game))
}

/// Uniqueness check: is `code` held by any game, whatever its status?
pub async fn code_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &JoinCode,
) -> Result<bool, DomainError> {
    Ok(games_adapter::code_in_use(conn, code.as_str()).await?)
}

/// Assign `code` to the game.
///
/// Errors: `NotFound(Game)` for a missing row, `Conflict(JoinCodeConflict)`
/// when another game already holds the code, `Infra` otherwise.
pub async fn bind_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    code: &JoinCode,
) -> Result<(), DomainError> {
    games_adapter::set_join_code(conn, game_id, Some(code.as_str())).await?;
    Ok(())
}

/// Clear the game's code. Clearing an absent code succeeds.
pub async fn unbind_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<(), DomainError> {
    games_adapter::set_join_code(conn, game_id, None).await?;
    Ok(())
}

/// The game bound to `code`, only if it is `active`.
pub async fn find_active_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &JoinCode,
) -> Result<Option<Game>, DomainError> {
    let game =
        games_adapter::find_by_join_code_and_status(conn, code.as_str(), GameStatus::Active)
            .await?;
    Ok(game.map(Game::from))
}

/// The game bound to `code` in any status.
pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<Game>, DomainError> {
    let game = games_adapter::find_by_join_code(conn, code).await?;
    Ok(game.map(Game::from))
}

/// Move the game from `expected` to `next` atomically.
///
/// Fails with `Conflict(StatusChanged)` if the stored status is no longer `expected`.
pub async fn set_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected: GameStatus,
    next: GameStatus,
) -> Result<Game, DomainError> {
    let game = games_adapter::update_status(conn, game_id, expected, next).await?;
    Ok(Game::from(game))
}
