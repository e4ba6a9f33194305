use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建作业分配表
        manager
            .create_table(
                Table::create()
                    .table(Assignments::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Assignments::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Assignments::InstructorId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::ContentType).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::ContentId)
                            .string_len(36)
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::ContentTitle).string().null())
                    .col(ColumnDef::new(Assignments::SupportingDecks).text().null())
                    .col(
                        ColumnDef::new(Assignments::SupportingDeckTitles)
                            .text()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::Title).string().not_null())
                    .col(ColumnDef::new(Assignments::Description).text().null())
                    .col(ColumnDef::new(Assignments::Instructions).text().null())
                    .col(
                        ColumnDef::new(Assignments::AssignedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Assignments::DueDate).big_integer().null())
                    .col(
                        ColumnDef::new(Assignments::CompletedAt)
                            .big_integer()
                            .null(),
                    )
                    .col(ColumnDef::new(Assignments::Status).string().not_null())
                    .col(
                        ColumnDef::new(Assignments::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(Assignments::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Assignments::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学习进度表
        manager
            .create_table(
                Table::create()
                    .table(Progress::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Progress::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Progress::AssignmentId)
                            .big_integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Progress::TotalItems)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Progress::CompletedItems)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Progress::CompletionPercentage)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(
                        ColumnDef::new(Progress::TotalStudyTimeMinutes)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(Progress::SessionsCount)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(Progress::StartedAt).big_integer().null())
                    .col(ColumnDef::new(Progress::LastAccessed).big_integer().null())
                    .col(ColumnDef::new(Progress::ProgressDetails).text().null())
                    .col(ColumnDef::new(Progress::CreatedAt).big_integer().not_null())
                    .col(ColumnDef::new(Progress::UpdatedAt).big_integer().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .from(Progress::Table, Progress::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学习会话表
        manager
            .create_table(
                Table::create()
                    .table(StudySessions::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudySessions::Id)
                            .big_integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::AssignmentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::StudentId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::StartedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudySessions::EndedAt).big_integer().null())
                    .col(
                        ColumnDef::new(StudySessions::DurationMinutes)
                            .integer()
                            .null(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::ItemsStudied)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudySessions::ItemsCompleted)
                            .integer()
                            .not_null()
                            .default(0),
                    )
                    .col(
                        ColumnDef::new(StudySessions::SessionProgress)
                            .double()
                            .not_null()
                            .default(0.0),
                    )
                    .col(ColumnDef::new(StudySessions::SessionNotes).text().null())
                    .col(ColumnDef::new(StudySessions::ItemsDetails).text().null())
                    .col(
                        ColumnDef::new(StudySessions::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(
                        ColumnDef::new(StudySessions::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(StudySessions::UpdatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(StudySessions::Table, StudySessions::AssignmentId)
                            .to(Assignments::Table, Assignments::Id)
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
                    .name("idx_assignments_student_id")
                    .table(Assignments::Table)
                    .col(Assignments::StudentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_instructor_id")
                    .table(Assignments::Table)
                    .col(Assignments::InstructorId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_assignments_status")
                    .table(Assignments::Table)
                    .col(Assignments::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_progress_assignment_id")
                    .table(Progress::Table)
                    .col(Progress::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_study_sessions_assignment_id")
                    .table(StudySessions::Table)
                    .col(StudySessions::AssignmentId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_study_sessions_student_id")
                    .table(StudySessions::Table)
                    .col(StudySessions::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(StudySessions::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Progress::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Assignments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Assignments {
    #[sea_orm(iden = "assignments")]
    Table,
    Id,
    InstructorId,
    StudentId,
    ContentType,
    ContentId,
    ContentTitle,
    SupportingDecks,
    SupportingDeckTitles,
    Title,
    Description,
    Instructions,
    AssignedAt,
    DueDate,
    CompletedAt,
    Status,
    IsActive,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum Progress {
    #[sea_orm(iden = "progress")]
    Table,
    Id,
    AssignmentId,
    TotalItems,
    CompletedItems,
    CompletionPercentage,
    TotalStudyTimeMinutes,
    SessionsCount,
    StartedAt,
    LastAccessed,
    ProgressDetails,
    CreatedAt,
    UpdatedAt,
}

#[derive(DeriveIden)]
enum StudySessions {
    #[sea_orm(iden = "study_sessions")]
    Table,
    Id,
    AssignmentId,
    StudentId,
    StartedAt,
    EndedAt,
    DurationMinutes,
    ItemsStudied,
    ItemsCompleted,
    SessionProgress,
    SessionNotes,
    ItemsDetails,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
