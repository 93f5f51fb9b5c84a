//! Database bootstrap: connect, migrate, re-migrate.

use joli_backend::config::db::DbProfile;
use joli_backend::error::AppError;
use joli_backend::infra::db::{bootstrap_db, connect_db};
use migration::{count_applied_migrations, get_latest_migration_version, migrate};

#[tokio::test]
async fn bootstrap_applies_all_migrations() -> Result<(), AppError> {
    let conn = bootstrap_db(DbProfile::InMemory).await?;

    assert_eq!(count_applied_migrations(&conn).await?, 1);
    let latest = get_latest_migration_version(&conn).await?;
    assert_eq!(latest.as_deref(), Some("m20251016_000001_init"));
    Ok(())
}

#[tokio::test]
async fn migrate_up_is_idempotent() -> Result<(), AppError> {
    let conn = bootstrap_db(DbProfile::InMemory).await?;

    migrate(&conn).await?;
    assert_eq!(count_applied_migrations(&conn).await?, 1);
    Ok(())
}

#[tokio::test]
async fn connect_alone_leaves_schema_empty() -> Result<(), AppError> {
    let conn = connect_db(DbProfile::InMemory).await?;

    assert_eq!(count_applied_migrations(&conn).await?, 0);
    assert_eq!(get_latest_migration_version(&conn).await?, None);
    Ok(())
}
