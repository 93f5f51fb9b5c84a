//! Bind conflicts that slip past the uniqueness check.
//!
//! A SQLite trigger rejects chosen codes at bind time with the same message
//! as the unique index, standing in for a concurrent request that claimed the
//! code between the check and the write.

use joli_backend::error::AppError;
use joli_backend::repos::games;
use joli_backend::services::join_codes::{allocate_and_bind, AllocationError};
use joli_backend::utils::join_code::{generate_join_code_with, JoinCode};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use sea_orm::{ConnectionTrait, TransactionTrait};

use crate::support::build_test_state;
use crate::support::factory::create_game;

const SEED: u64 = 0x5EED;

fn seeded_draws(n: usize) -> Vec<JoinCode> {
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let draws: Vec<_> = (0..n).map(|_| generate_join_code_with(&mut rng, 6)).collect();
    for (i, c) in draws.iter().enumerate() {
        assert!(!draws[..i].contains(c), "seeded draws repeat: {draws:?}");
    }
    draws
}

/// Make binds of `codes` fail like a lost unique race.
async fn reject_binds_of<C: ConnectionTrait>(conn: &C, codes: &[JoinCode]) -> Result<(), AppError> {
    let list = codes
        .iter()
        .map(|c| format!("'{}'", c.as_str()))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "CREATE TRIGGER reject_join_codes BEFORE UPDATE OF join_code ON games \
         FOR EACH ROW WHEN NEW.join_code IN ({list}) \
         BEGIN SELECT RAISE(ABORT, 'UNIQUE constraint failed: games.join_code'); END"
    );
    conn.execute_unprepared(&sql).await?;
    Ok(())
}

#[tokio::test]
async fn bind_conflict_retries_with_the_next_draw() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let draws = seeded_draws(3);
    reject_binds_of(db, &draws[..2]).await?;
    let game = create_game(db, "owner").await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let bound = allocate_and_bind(db, &mut rng, game.id, 6, 10).await.unwrap();

    assert_eq!(bound, draws[2]);
    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.join_code.as_deref(), Some(draws[2].as_str()));
    Ok(())
}

#[tokio::test]
async fn bind_conflicts_spend_the_attempt_budget() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let draws = seeded_draws(2);
    reject_binds_of(db, &draws).await?;
    let game = create_game(db, "owner").await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let err = allocate_and_bind(db, &mut rng, game.id, 6, 2).await.unwrap_err();

    assert!(matches!(err, AllocationError::Exhausted { attempts: 2 }), "got {err:?}");
    assert_eq!(games::require_game(db, game.id).await?.join_code, None);
    Ok(())
}

#[tokio::test]
async fn bind_conflict_inside_a_transaction_keeps_it_usable() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let draws = seeded_draws(3);
    reject_binds_of(db, &draws[..2]).await?;
    let game = create_game(db, "owner").await?;

    let txn = db.begin().await?;
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let bound = allocate_and_bind(&txn, &mut rng, game.id, 6, 10).await.unwrap();
    assert_eq!(bound, draws[2]);

    // Rolled-back savepoints leave the outer transaction open.
    assert!(games::code_in_use(&txn, &draws[2]).await?);
    assert!(!games::code_in_use(&txn, &draws[0]).await?);
    txn.commit().await?;

    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.join_code.as_deref(), Some(draws[2].as_str()));
    Ok(())
}
