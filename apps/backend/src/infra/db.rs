use std::time::Duration;

use migration::migrate;
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::db::{db_url, sanitize_db_url, DbProfile};
use crate::error::AppError;
use crate::utils::retry::{retry, Backoff, RetryPolicy};

/// Connection attempts for networked databases before startup fails.
const CONNECT_POLICY: RetryPolicy = RetryPolicy {
    max_attempts: 5,
    backoff: Backoff::Exponential {
        base: Duration::from_millis(200),
        max: Duration::from_secs(2),
    },
};

fn connect_options(profile: DbProfile, url: String) -> ConnectOptions {
    let mut opts = ConnectOptions::new(url);
    opts.sqlx_logging(false)
        .connect_timeout(Duration::from_secs(5))
        .acquire_timeout(Duration::from_secs(10));

    match profile {
        // Every SQLite in-memory connection is its own database: pin the pool to one.
        DbProfile::InMemory => {
            let forever = Duration::from_secs(24 * 60 * 60);
            opts.max_connections(1)
                .min_connections(1)
                .idle_timeout(forever)
                .max_lifetime(forever);
        }
        DbProfile::Prod | DbProfile::Test => {
            opts.max_connections(20).min_connections(1);
        }
    }
    opts
}

/// Open a pool for `profile`. Does NOT run migrations.
pub async fn connect_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let url = db_url(profile)?;
    let display_url = sanitize_db_url(&url);

    let policy = match profile {
        DbProfile::InMemory => RetryPolicy::immediate(1),
        DbProfile::Prod | DbProfile::Test => CONNECT_POLICY,
    };

    let conn = retry(policy, "db_connect", |_| {
        Database::connect(connect_options(profile, url.clone()))
    })
    .await?;

    info!(profile = ?profile, url = %display_url, "database connected");
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(profile: DbProfile) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(profile).await?;
    migrate(&conn)
        .await
        .map_err(|e| AppError::config(format!("migrations failed: {e}")))?;
    Ok(conn)
}
