use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::config::join_codes::JoinCodeSettings;

/// Shared, cloneable application state handed to every request.
#[derive(Debug, Clone)]
pub struct AppState {
    /// None only in tests that exercise routes without storage
    db: Option<DatabaseConnection>,
    pub security: SecurityConfig,
    pub join_codes: JoinCodeSettings,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        security: SecurityConfig,
        join_codes: JoinCodeSettings,
    ) -> Self {
        Self {
            db: Some(db),
            security,
            join_codes,
        }
    }

    pub fn new_without_db(security: SecurityConfig, join_codes: JoinCodeSettings) -> Self {
        Self {
            db: None,
            security,
            join_codes,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
