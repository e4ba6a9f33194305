pub mod analytics;
pub mod assignments;
pub mod auth;
pub mod courses;
pub mod decks;
pub mod flashcards;
pub mod health;
pub mod lessons;
pub mod progress;
pub mod sessions;
pub mod users;

pub use analytics::configure_analytics_routes;
pub use assignments::configure_assignment_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use decks::configure_deck_routes;
pub use flashcards::configure_flashcard_routes;
pub use health::{configure_gateway_routes, configure_health_routes};
pub use lessons::configure_lesson_routes;
pub use progress::configure_progress_routes;
pub use sessions::configure_session_routes;
pub use users::configure_user_routes;
