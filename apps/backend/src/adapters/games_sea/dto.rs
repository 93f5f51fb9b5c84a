//! DTOs for games_sea adapter.

/// DTO for creating a new game.
#[derive(Debug, Clone)]
pub struct GameCreate {
    pub owner_sub: String,
    pub name: Option<String>,
}

impl GameCreate {
    pub fn new(owner_sub: impl Into<String>) -> Self {
        Self {
            owner_sub: owner_sub.into(),
            name: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
