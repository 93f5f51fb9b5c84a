pub mod current_organizer;
pub mod game_id;
pub mod validated_json;

pub use current_organizer::CurrentOrganizer;
pub use game_id::GameId;
pub use validated_json::ValidatedJson;
