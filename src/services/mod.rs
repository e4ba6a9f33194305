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

pub use analytics::AnalyticsService;
pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use decks::DeckService;
pub use flashcards::FlashcardService;
pub use health::HealthService;
pub use lessons::LessonService;
pub use progress::ProgressService;
pub use sessions::SessionService;
pub use users::UserService;
