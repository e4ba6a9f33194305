use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建课程表
        manager
            .create_table(
                Table::create()
                    .table(Courses::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Courses::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Courses::Title).string().not_null())
                    .col(ColumnDef::new(Courses::Description).text().null())
                    .col(
                        ColumnDef::new(Courses::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Courses::InstructorName).string().null())
                    .col(
                        ColumnDef::new(Courses::TotalLessons)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Courses::EstimatedDurationMinutes)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(Courses::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Courses::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Courses::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Courses::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建课时表
        manager
            .create_table(
                Table::create()
                    .table(Lessons::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Lessons::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Lessons::CourseId).string_len(36).not_null())
                    .col(ColumnDef::new(Lessons::Title).string().not_null())
                    .col(ColumnDef::new(Lessons::Content).text().null())
                    .col(ColumnDef::new(Lessons::Order).integer().not_null())
                    .col(ColumnDef::new(Lessons::ImageUrl).string().null())
                    .col(ColumnDef::new(Lessons::VideoUrl).string().null())
                    .col(ColumnDef::new(Lessons::DurationMinutes).integer().null())
                    .col(
                        ColumnDef::new(Lessons::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Lessons::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Lessons::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Lessons::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Lessons::Table, Lessons::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建卡组表
        manager
            .create_table(
                Table::create()
                    .table(Decks::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Decks::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Decks::Title).string().not_null())
                    .col(ColumnDef::new(Decks::Description).text().null())
                    .col(ColumnDef::new(Decks::InstructorId).big_integer().not_null())
                    .col(ColumnDef::new(Decks::InstructorName).string().null())
                    .col(
                        ColumnDef::new(Decks::TotalFlashcards)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Decks::Category).string().null())
                    .col(ColumnDef::new(Decks::Tags).text().null())
                    .col(
                        ColumnDef::new(Decks::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Decks::IsPublished)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(ColumnDef::new(Decks::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Decks::UpdatedAt).big_integer().not_null())
                    .to_owned(),
            )
            .await?;

        // 创建抽认卡表
        manager
            .create_table(
                Table::create()
                    .table(Flashcards::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Flashcards::Id)
                            .string_len(36)
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Flashcards::DeckId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Flashcards::Front).text().not_null())
                    .col(ColumnDef::new(Flashcards::Back).text().not_null())
                    .col(ColumnDef::new(Flashcards::Order).integer().not_null())
                    .col(ColumnDef::new(Flashcards::Difficulty).string().null())
                    .col(ColumnDef::new(Flashcards::Wordclass).string().null())
                    .col(ColumnDef::new(Flashcards::Definition).text().null())
                    .col(ColumnDef::new(Flashcards::Example).text().null())
                    .col(
                        ColumnDef::new(Flashcards::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Flashcards::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Flashcards::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Flashcards::Table, Flashcards::DeckId)
                            .to(Decks::Table, Decks::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_courses_instructor_id")
                    .table(Courses::Table)
                    .col(Courses::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_lessons_course_id")
                    .table(Lessons::Table)
                    .col(Lessons::CourseId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_decks_instructor_id")
                    .table(Decks::Table)
                    .col(Decks::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_flashcards_deck_id")
                    .table(Flashcards::Table)
                    .col(Flashcards::DeckId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Flashcards::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Decks::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Lessons::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Title,
    Description,
    InstructorId,
    InstructorName,
    TotalLessons,
    EstimatedDurationMinutes,
    IsActive,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Lessons {
    #[sea_orm(iden = "lessons")]
    Table,
    Id,
    CourseId,
    Title,
    Content,
    #[sea_orm(iden = "sort_order")]
    Order,
    ImageUrl,
    VideoUrl,
    DurationMinutes,
    IsActive,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Decks {
    #[sea_orm(iden = "decks")]
    Table,
    Id,
    Title,
    Description,
    InstructorId,
    InstructorName,
    TotalFlashcards,
    Category,
    Tags,
    IsActive,
    IsPublished,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Flashcards {
    #[sea_orm(iden = "flashcards")]
    Table,
    Id,
    DeckId,
    Front,
    Back,
    #[sea_orm(iden = "sort_order")]
    Order,
    Difficulty,
    Wordclass,
    Definition,
    Example,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
