//! 预导入模块，方便使用

pub use super::assignments::{
    ActiveModel as AssignmentActiveModel, Entity as Assignments, Model as AssignmentModel,
};
pub use super::courses::{
    ActiveModel as CourseActiveModel, Entity as Courses, Model as CourseModel,
};
pub use super::decks::{ActiveModel as DeckActiveModel, Entity as Decks, Model as DeckModel};
pub use super::flashcards::{
    ActiveModel as FlashcardActiveModel, Entity as Flashcards, Model as FlashcardModel,
};
pub use super::lessons::{
    ActiveModel as LessonActiveModel, Entity as Lessons, Model as LessonModel,
};
pub use super::progress::{
    ActiveModel as ProgressActiveModel, Entity as Progress, Model as ProgressModel,
};
pub use super::refresh_tokens::{
    ActiveModel as RefreshTokenActiveModel, Entity as RefreshTokens, Model as RefreshTokenModel,
};
pub use super::study_sessions::{
    ActiveModel as StudySessionActiveModel, Entity as StudySessions, Model as StudySessionModel,
};
pub use super::users::{ActiveModel as UserActiveModel, Entity as Users, Model as UserModel};
