//! Allocation budget, bind retry and uniqueness under contention.

use futures_util::future::join_all;
use joli_backend::config::join_codes::JoinCodeSettings;
use joli_backend::entities::games::GameStatus;
use joli_backend::error::AppError;
use joli_backend::errors::domain::{ConflictKind, DomainError};
use joli_backend::repos::games;
use joli_backend::services::join_codes::{
    allocate_and_bind, allocate_unique_code, issue_code, AllocationError,
};
use joli_backend::utils::join_code::{generate_join_code_with, CODE_ALPHABET};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::support::build_test_state;
use crate::support::factory::{code, create_game, create_game_in, game_with_code, hold_symbol};

const SEED: u64 = 0x1011;

#[tokio::test]
async fn exhausts_after_exactly_max_attempts() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    // Pre-seed the first ten draws of the seeded sequence.
    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let draws: Vec<_> = (0..11).map(|_| generate_join_code_with(&mut rng, 6)).collect();
    for (i, c) in draws.iter().take(10).enumerate() {
        game_with_code(db, &format!("owner-{i}"), c, GameStatus::Draft).await?;
    }

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let err = allocate_unique_code(db, &mut rng, 6, 10).await.unwrap_err();
    assert!(matches!(err, AllocationError::Exhausted { attempts: 10 }), "got {err:?}");

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let allocated = allocate_unique_code(db, &mut rng, 6, 11).await.unwrap();
    assert_eq!(allocated, draws[10]);
    Ok(())
}

#[tokio::test]
async fn allocation_never_returns_a_held_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    // Length 1: hold every symbol but one.
    let free = 'Q';
    for (i, &b) in CODE_ALPHABET.iter().enumerate() {
        if b as char != free {
            hold_symbol(db, &format!("o{i}"), b).await?;
        }
    }

    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let got = allocate_unique_code(db, &mut rng, 1, 500).await.unwrap();
    assert_eq!(got.as_str(), "Q");
    Ok(())
}

#[tokio::test]
async fn allocate_and_bind_assigns_the_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let game = create_game(db, "owner").await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let bound = allocate_and_bind(db, &mut rng, game.id, 6, 10).await.unwrap();

    let stored = games::require_game(db, game.id).await?;
    assert_eq!(stored.join_code.as_deref(), Some(bound.as_str()));
    Ok(())
}

#[tokio::test]
async fn full_keyspace_exhausts_bind() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    for (i, &b) in CODE_ALPHABET.iter().enumerate() {
        hold_symbol(db, &format!("o{i}"), b).await?;
    }
    let game = create_game(db, "late").await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let err = allocate_and_bind(db, &mut rng, game.id, 1, 25).await.unwrap_err();
    assert!(matches!(err, AllocationError::Exhausted { attempts: 25 }), "got {err:?}");

    let mapped = DomainError::from(err);
    assert!(matches!(mapped, DomainError::Conflict(ConflictKind::JoinCodeExhausted, _)));
    Ok(())
}

#[tokio::test]
async fn concurrent_binds_never_share_a_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    const FREE: usize = 3;
    const CALLERS: usize = 8;

    // Leave the last FREE symbols unclaimed.
    let held = CODE_ALPHABET.len() - FREE;
    for (i, &b) in CODE_ALPHABET.iter().take(held).enumerate() {
        hold_symbol(db, &format!("seed-{i}"), b).await?;
    }

    let mut targets = Vec::new();
    for i in 0..CALLERS {
        targets.push(create_game(db, &format!("caller-{i}")).await?.id);
    }

    let results = join_all(targets.iter().enumerate().map(|(i, &game_id)| async move {
        let mut rng = ChaCha8Rng::seed_from_u64(1_000 + i as u64);
        allocate_and_bind(db, &mut rng, game_id, 1, 200).await
    }))
    .await;

    let mut won: Vec<String> = Vec::new();
    for r in results {
        match r {
            Ok(c) => won.push(c.into_inner()),
            Err(AllocationError::Exhausted { .. }) => {}
            Err(other) => panic!("unexpected allocation error: {other:?}"),
        }
    }

    assert!(won.len() <= FREE, "more winners than free codes: {won:?}");
    assert!(!won.is_empty());
    let mut distinct = won.clone();
    distinct.sort();
    distinct.dedup();
    assert_eq!(distinct.len(), won.len(), "duplicate codes handed out: {won:?}");
    Ok(())
}

#[tokio::test]
async fn issue_replaces_an_existing_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let old = code("PQR222");
    let game = game_with_code(db, "owner", &old, GameStatus::Active).await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let new = issue_code(db, &mut rng, JoinCodeSettings::default(), "owner", game.id).await?;

    assert_ne!(new, old);
    assert!(!games::code_in_use(db, &old).await?);
    assert!(games::code_in_use(db, &new).await?);
    Ok(())
}

#[tokio::test]
async fn issue_refuses_closed_games() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    for status in [GameStatus::Completed, GameStatus::Cancelled] {
        let game = create_game_in(db, "owner", status).await?;
        let mut rng = ChaCha8Rng::seed_from_u64(SEED);
        let err = issue_code(db, &mut rng, JoinCodeSettings::default(), "owner", game.id)
            .await
            .unwrap_err();
        assert!(
            matches!(err, DomainError::Conflict(ConflictKind::GameClosed, _)),
            "{status:?}: {err:?}"
        );
    }
    Ok(())
}

#[tokio::test]
async fn issue_refuses_other_owners() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let game = create_game(db, "owner").await?;

    let mut rng = ChaCha8Rng::seed_from_u64(SEED);
    let err = issue_code(db, &mut rng, JoinCodeSettings::default(), "intruder", game.id)
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(_)), "got {err:?}");
    assert_eq!(games::require_game(db, game.id).await?.join_code, None);
    Ok(())
}
