//! SeaORM adapter for the games table - generic over ConnectionTrait.

use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, Set,
};

use crate::entities::games::{self, GameStatus};

pub mod dto;

pub use dto::GameCreate;

// Adapter functions return DbErr; the repos layer maps to DomainError.

/// Prefix of the `DbErr::Custom` payload for a missing game row.
pub const GAME_NOT_FOUND_PREFIX: &str = "GAME_NOT_FOUND:";
/// Prefix of the `DbErr::Custom` payload for a lost status compare-and-set.
pub const STATUS_CHANGED_PREFIX: &str = "STATUS_CHANGED:";

fn game_not_found(game_id: i64) -> DbErr {
    DbErr::Custom(format!("{GAME_NOT_FOUND_PREFIX}{game_id}"))
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find_by_id(game_id).one(conn).await
}

pub async fn require_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
) -> Result<games::Model, DbErr> {
    find_by_id(conn, game_id)
        .await?
        .ok_or_else(|| game_not_found(game_id))
}

pub async fn create_game<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: GameCreate,
) -> Result<games::Model, DbErr> {
    let now = time::OffsetDateTime::now_utc();
    games::ActiveModel {
        id: NotSet,
        owner_sub: Set(dto.owner_sub),
        name: Set(dto.name),
        status: Set(GameStatus::Draft),
        join_code: Set(None),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await
}

/// True if any game row, in any status, holds `code`.
pub async fn code_in_use<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<bool, DbErr> {
    let n = games::Entity::find()
        .filter(games::Column::JoinCode.eq(code))
        .count(conn)
        .await?;
    Ok(n > 0)
}

/// Single-row write of `join_code`. A unique violation surfaces as the raw DbErr.
pub async fn set_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    code: Option<&str>,
) -> Result<(), DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = games::Entity::update_many()
        .col_expr(
            games::Column::JoinCode,
            Expr::value(code.map(str::to_string)),
        )
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(game_id))
        .exec(conn)
        .await?;

    // Both backends count matched rows, so clearing an already-null code still reports 1.
    if result.rows_affected == 0 {
        return Err(game_not_found(game_id));
    }
    Ok(())
}

pub async fn find_by_join_code<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find()
        .filter(games::Column::JoinCode.eq(code))
        .one(conn)
        .await
}

pub async fn find_by_join_code_and_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    code: &str,
    status: GameStatus,
) -> Result<Option<games::Model>, DbErr> {
    games::Entity::find()
        .filter(games::Column::JoinCode.eq(code))
        .filter(games::Column::Status.eq(status))
        .one(conn)
        .await
}

/// Compare-and-set on `status`, then refetch.
///
/// Zero affected rows means the game is gone or its status is no longer
/// `expected`; the two are told apart by a follow-up read.
pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    game_id: i64,
    expected: GameStatus,
    next: GameStatus,
) -> Result<games::Model, DbErr> {
    let now = time::OffsetDateTime::now_utc();
    let result = games::Entity::update_many()
        .col_expr(games::Column::Status, Expr::value(next))
        .col_expr(games::Column::UpdatedAt, Expr::value(now))
        .filter(games::Column::Id.eq(game_id))
        .filter(games::Column::Status.eq(expected))
        .exec(conn)
        .await?;

    if result.rows_affected == 0 {
        return match find_by_id(conn, game_id).await? {
            Some(current) => Err(DbErr::Custom(format!(
                "{STATUS_CHANGED_PREFIX}{{\"expected\":\"{}\",\"actual\":\"{}\"}}",
                status_str(expected),
                status_str(current.status)
            ))),
            None => Err(game_not_found(game_id)),
        };
    }

    require_game(conn, game_id).await
}

pub fn status_str(status: GameStatus) -> &'static str {
    match status {
        GameStatus::Draft => "draft",
        GameStatus::Active => "active",
        GameStatus::Completed => "completed",
        GameStatus::Cancelled => "cancelled",
    }
}
