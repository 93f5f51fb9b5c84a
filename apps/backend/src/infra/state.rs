use crate::config::db::DbProfile;
use crate::config::join_codes::JoinCodeSettings;
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for AppState, shared by `main` and tests.
pub struct StateBuilder {
    security_config: SecurityConfig,
    join_codes: JoinCodeSettings,
    db_profile: Option<DbProfile>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            join_codes: JoinCodeSettings::default(),
            db_profile: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub fn with_join_codes(mut self, join_codes: JoinCodeSettings) -> Self {
        self.join_codes = join_codes;
        self
    }

    /// Connects and migrates when a profile was given.
    pub async fn build(self) -> Result<AppState, AppError> {
        match self.db_profile {
            Some(profile) => {
                let conn = bootstrap_db(profile).await?;
                Ok(AppState::new(conn, self.security_config, self.join_codes))
            }
            None => Ok(AppState::new_without_db(
                self.security_config,
                self.join_codes,
            )),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
