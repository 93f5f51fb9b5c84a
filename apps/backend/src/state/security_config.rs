use jsonwebtoken::Algorithm;

/// JWT verification settings for organizer bearer tokens.
#[derive(Debug, Clone)]
pub struct SecurityConfig {
    /// Shared HS256 secret of the auth provider
    pub jwt_secret: Vec<u8>,
    pub algorithm: Algorithm,
    /// Required `aud` claim, when the provider sets one
    pub audience: Option<String>,
}

impl SecurityConfig {
    pub fn new(jwt_secret: impl Into<Vec<u8>>) -> Self {
        Self {
            jwt_secret: jwt_secret.into(),
            algorithm: Algorithm::HS256,
            audience: None,
        }
    }

    pub fn with_audience(mut self, audience: impl Into<String>) -> Self {
        self.audience = Some(audience.into());
        self
    }
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self::new(b"default_secret_for_tests_only".to_vec())
    }
}
