use joli_backend::entities::games::GameStatus;
use joli_backend::error::AppError;
use joli_backend::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use joli_backend::services::games::{create_game, get_game, set_status, MAX_NAME_CHARS};

use crate::support::build_test_state;
use crate::support::factory::{code, game_with_code};

#[tokio::test]
async fn create_trims_and_drops_blank_names() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    let named = create_game(db, "owner", Some("  Pub quiz  ".into())).await?;
    assert_eq!(named.name.as_deref(), Some("Pub quiz"));
    assert_eq!(named.status, GameStatus::Draft);
    assert_eq!(named.join_code, None);

    let blank = create_game(db, "owner", Some("   ".into())).await?;
    assert_eq!(blank.name, None);
    Ok(())
}

#[tokio::test]
async fn create_rejects_long_names() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();

    let err = create_game(db, "owner", Some("x".repeat(MAX_NAME_CHARS + 1)))
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Validation(ValidationKind::Other, _)), "got {err:?}");
    Ok(())
}

#[tokio::test]
async fn get_is_owner_only() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let g = create_game(db, "owner", None).await?;

    assert_eq!(get_game(db, "owner", g.id).await?.id, g.id);
    assert!(matches!(
        get_game(db, "other", g.id).await.unwrap_err(),
        DomainError::Forbidden(_)
    ));
    assert!(matches!(
        get_game(db, "owner", g.id + 1000).await.unwrap_err(),
        DomainError::NotFound(NotFoundKind::Game, _)
    ));
    Ok(())
}

#[tokio::test]
async fn lifecycle_follows_the_transition_table() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let g = create_game(db, "owner", None).await?;

    let err = set_status(db, "owner", g.id, GameStatus::Completed)
        .await
        .unwrap_err();
    assert!(
        matches!(err, DomainError::Validation(ValidationKind::InvalidStatusTransition, _)),
        "got {err:?}"
    );

    let active = set_status(db, "owner", g.id, GameStatus::Active).await?;
    assert_eq!(active.status, GameStatus::Active);

    // Same status is a no-op.
    let again = set_status(db, "owner", g.id, GameStatus::Active).await?;
    assert_eq!(again.status, GameStatus::Active);

    let done = set_status(db, "owner", g.id, GameStatus::Completed).await?;
    assert_eq!(done.status, GameStatus::Completed);

    let err = set_status(db, "owner", g.id, GameStatus::Active).await.unwrap_err();
    assert!(matches!(
        err,
        DomainError::Validation(ValidationKind::InvalidStatusTransition, _)
    ));
    Ok(())
}

#[tokio::test]
async fn status_change_keeps_the_code() -> Result<(), AppError> {
    let state = build_test_state().await?;
    let db = state.db().unwrap();
    let g = game_with_code(db, "owner", &code("KEP234"), GameStatus::Active).await?;

    let done = set_status(db, "owner", g.id, GameStatus::Completed).await?;
    assert_eq!(done.join_code.as_deref(), Some("KEP234"));
    Ok(())
}
