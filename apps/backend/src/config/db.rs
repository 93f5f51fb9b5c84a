use std::env;

use crate::error::AppError;

/// Which database a process talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DbProfile {
    /// Production Postgres
    Prod,
    /// Test Postgres; the database name must end in `_test`
    Test,
    /// Private SQLite in-memory database, one per connection pool
    InMemory,
}

pub const SQLITE_MEMORY_URL: &str = "sqlite::memory:";

/// Resolve the connection URL for `profile`.
///
/// `DATABASE_URL` wins when set. Otherwise the Postgres URL is assembled from
/// `POSTGRES_HOST`, `POSTGRES_PORT`, `PROD_DB`/`TEST_DB`, `APP_DB_USER` and
/// `APP_DB_PASSWORD`.
pub fn db_url(profile: DbProfile) -> Result<String, AppError> {
    if profile == DbProfile::InMemory {
        return Ok(SQLITE_MEMORY_URL.to_string());
    }

    if let Ok(url) = env::var("DATABASE_URL") {
        if !url.trim().is_empty() {
            if profile == DbProfile::Test {
                validate_test_database_url(&url)?;
            }
            return Ok(url);
        }
    }

    let host = env::var("POSTGRES_HOST").unwrap_or_else(|_| "localhost".to_string());
    let port = env::var("POSTGRES_PORT").unwrap_or_else(|_| "5432".to_string());
    let db_name = db_name(profile)?;
    let username = must_var("APP_DB_USER")?;
    let password = must_var("APP_DB_PASSWORD")?;

    Ok(format!(
        "postgresql://{username}:{password}@{host}:{port}/{db_name}"
    ))
}

fn db_name(profile: DbProfile) -> Result<String, AppError> {
    match profile {
        DbProfile::Prod => must_var("PROD_DB"),
        DbProfile::Test => {
            let name = must_var("TEST_DB")?;
            ensure_test_name(&name)?;
            Ok(name)
        }
        DbProfile::InMemory => Ok(String::new()),
    }
}

fn ensure_test_name(name: &str) -> Result<(), AppError> {
    if name.ends_with("_test") {
        Ok(())
    } else {
        Err(AppError::config(format!(
            "Test profile requires database name to end with '_test', but got: '{name}'"
        )))
    }
}

/// Checks the database name segment of a URL like `postgresql://u:p@h:5432/name?opts`.
fn validate_test_database_url(url: &str) -> Result<(), AppError> {
    let tail = url
        .rsplit_once('/')
        .map(|(_, tail)| tail)
        .ok_or_else(|| AppError::config("Invalid database URL format"))?;
    let name = tail.split('?').next().unwrap_or(tail);
    ensure_test_name(name)
}

/// Required environment variable, or a config error naming it.
pub fn must_var(name: &str) -> Result<String, AppError> {
    env::var(name)
        .map_err(|_| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Display form of a URL with any password replaced.
pub fn sanitize_db_url(url: &str) -> String {
    match (url.find("://"), url.rfind('@')) {
        (Some(scheme_end), Some(at)) if at > scheme_end => {
            let creds = &url[scheme_end + 3..at];
            match creds.split_once(':') {
                Some((user, _)) => format!("{}{user}:***{}", &url[..scheme_end + 3], &url[at..]),
                None => url.to_string(),
            }
        }
        _ => url.to_string(),
    }
}
