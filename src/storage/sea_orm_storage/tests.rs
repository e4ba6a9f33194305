//! 存储层集成测试（内存 SQLite）

use super::SeaOrmStorage;
use crate::config::DatabaseConfig;
use crate::models::assignments::entities::{AssignmentStatus, ContentType};
use crate::models::assignments::requests::{
    CreateAssignmentRequest, EndSessionRequest, StartSessionRequest, UpdateProgressRequest,
};
use crate::models::content::requests::{
    ChildListQuery, ContentListQuery, CreateCourseRequest, CreateDeckRequest,
    CreateFlashcardRequest, CreateLessonRequest, ReorderItem,
};
use crate::models::users::requests::{CreateUserRequest, UserListQuery};

// 内存库必须单连接，多连接会各自拿到独立的数据库
async fn new_storage() -> SeaOrmStorage {
    let config = DatabaseConfig {
        url: ":memory:".to_string(),
        pool_size: 1,
        timeout: 5,
    };
    SeaOrmStorage::new_async(&config)
        .await
        .expect("storage init failed")
}

fn course_request(title: &str) -> CreateCourseRequest {
    CreateCourseRequest {
        title: title.to_string(),
        description: None,
        estimated_duration_minutes: Some(90),
        is_published: true,
    }
}

fn lesson_request(course_id: &str, title: &str, order: i32) -> CreateLessonRequest {
    CreateLessonRequest {
        course_id: course_id.to_string(),
        title: title.to_string(),
        content: None,
        order,
        image_url: None,
        video_url: None,
        duration_minutes: Some(10),
        is_published: true,
    }
}

fn assignment_request(student_id: i64, content_id: &str) -> CreateAssignmentRequest {
    CreateAssignmentRequest {
        student_id,
        content_type: ContentType::Course,
        content_id: content_id.to_string(),
        content_title: Some("Course".to_string()),
        supporting_decks: None,
        supporting_deck_titles: None,
        title: "Week 1".to_string(),
        description: None,
        instructions: None,
        due_date: None,
    }
}

#[tokio::test]
async fn test_create_user_and_lookup() {
    let storage = new_storage().await;

    let user = storage
        .create_user_impl(CreateUserRequest {
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "hashed".to_string(),
            role: None,
            full_name: Some("Alice".to_string()),
            created_by: None,
        })
        .await
        .unwrap();

    assert!(user.is_active);

    let by_name = storage.get_user_by_username_impl("alice").await.unwrap();
    assert_eq!(by_name.map(|u| u.id), Some(user.id));

    let by_either = storage
        .get_user_by_username_or_email_impl("alice@example.com")
        .await
        .unwrap();
    assert!(by_either.is_some());
}

#[tokio::test]
async fn test_list_users_search_escapes_like() {
    let storage = new_storage().await;

    for name in ["bob", "b_ob"] {
        storage
            .create_user_impl(CreateUserRequest {
                username: name.to_string(),
                email: format!("{name}@example.com"),
                password: "hashed".to_string(),
                role: None,
                full_name: None,
                created_by: None,
            })
            .await
            .unwrap();
    }

    let result = storage
        .list_users_with_pagination_impl(UserListQuery {
            page: Some(1),
            size: Some(10),
            role: None,
            is_active: None,
            search: Some("b_o".to_string()),
        })
        .await
        .unwrap();

    // 下划线按字面匹配，不是 LIKE 通配符
    assert_eq!(result.items.len(), 1);
    assert_eq!(result.items[0].username, "b_ob");
}

#[tokio::test]
async fn test_refresh_token_revocation() {
    let storage = new_storage().await;

    let user = storage
        .create_user_impl(CreateUserRequest {
            username: "carol".to_string(),
            email: "carol@example.com".to_string(),
            password: "hashed".to_string(),
            role: None,
            full_name: None,
            created_by: None,
        })
        .await
        .unwrap();

    let expires = chrono::Utc::now() + chrono::Duration::days(7);
    storage
        .store_refresh_token_impl(user.id, "token-1", expires)
        .await
        .unwrap();
    storage
        .store_refresh_token_impl(user.id, "token-2", expires)
        .await
        .unwrap();

    assert!(storage.revoke_refresh_token_impl("token-1").await.unwrap());
    // 再次吊销同一令牌没有效果
    assert!(!storage.revoke_refresh_token_impl("token-1").await.unwrap());

    let revoked = storage.revoke_user_refresh_tokens_impl(user.id).await.unwrap();
    assert_eq!(revoked, 1);

    let record = storage.get_refresh_token_impl("token-2").await.unwrap();
    assert!(!record.unwrap().is_active);
}

#[tokio::test]
async fn test_lesson_count_recomputed_on_create_and_delete() {
    let storage = new_storage().await;

    let course = storage
        .create_course_impl(1, Some("Teacher".to_string()), course_request("Rust 101"))
        .await
        .unwrap();
    assert_eq!(course.total_lessons, 0);

    let l1 = storage
        .create_lesson_impl(lesson_request(&course.id, "Intro", 1))
        .await
        .unwrap();
    storage
        .create_lesson_impl(lesson_request(&course.id, "Ownership", 2))
        .await
        .unwrap();

    let course = storage.get_course_by_id_impl(&course.id).await.unwrap().unwrap();
    assert_eq!(course.total_lessons, 2);

    assert!(storage.delete_lesson_impl(&l1.id).await.unwrap());

    let course = storage.get_course_by_id_impl(&course.id).await.unwrap().unwrap();
    assert_eq!(course.total_lessons, 1);
}

#[tokio::test]
async fn test_delete_course_cascades_to_lessons() {
    let storage = new_storage().await;

    let course = storage
        .create_course_impl(1, None, course_request("Doomed"))
        .await
        .unwrap();
    let lesson = storage
        .create_lesson_impl(lesson_request(&course.id, "Only", 1))
        .await
        .unwrap();

    assert!(storage.delete_course_impl(&course.id).await.unwrap());

    // 软删除后仍可按 ID 读到（审计用），但标记为非活跃
    let course_row = storage.get_course_by_id_impl(&course.id).await.unwrap().unwrap();
    assert!(!course_row.is_active);
    let lesson_row = storage.get_lesson_by_id_impl(&lesson.id).await.unwrap().unwrap();
    assert!(!lesson_row.is_active);

    // 列表不再包含已删除的课程
    let listed = storage
        .list_courses_with_pagination_impl(ContentListQuery::default())
        .await
        .unwrap();
    assert!(listed.items.is_empty());

    // 重复删除返回 false
    assert!(!storage.delete_course_impl(&course.id).await.unwrap());
}

#[tokio::test]
async fn test_delete_deck_keeps_rows_fetchable_by_id() {
    let storage = new_storage().await;

    let deck = storage
        .create_deck_impl(
            1,
            None,
            CreateDeckRequest {
                title: "Old Vocab".to_string(),
                description: None,
                category: None,
                tags: vec![],
                is_published: true,
            },
        )
        .await
        .unwrap();
    let card = storage
        .create_flashcard_impl(CreateFlashcardRequest {
            deck_id: deck.id.clone(),
            front: "front".to_string(),
            back: "back".to_string(),
            order: 1,
            difficulty: None,
            wordclass: None,
            definition: None,
            example: None,
        })
        .await
        .unwrap();

    assert!(storage.delete_deck_impl(&deck.id).await.unwrap());

    let deck_row = storage.get_deck_by_id_impl(&deck.id).await.unwrap().unwrap();
    assert!(!deck_row.is_active);
    let card_row = storage.get_flashcard_by_id_impl(&card.id).await.unwrap().unwrap();
    assert!(!card_row.is_active);
}

#[tokio::test]
async fn test_student_visibility_includes_assigned_unpublished() {
    let storage = new_storage().await;

    let published = storage
        .create_course_impl(1, None, course_request("Published"))
        .await
        .unwrap();

    let mut unpublished_req = course_request("Draft");
    unpublished_req.is_published = false;
    let draft = storage
        .create_course_impl(1, None, unpublished_req)
        .await
        .unwrap();

    let mut hidden_req = course_request("Hidden");
    hidden_req.is_published = false;
    storage.create_course_impl(1, None, hidden_req).await.unwrap();

    let result = storage
        .list_courses_with_pagination_impl(ContentListQuery {
            visible_ids: Some(vec![draft.id.clone()]),
            ..Default::default()
        })
        .await
        .unwrap();

    let ids: Vec<&str> = result.items.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(result.items.len(), 2);
    assert!(ids.contains(&published.id.as_str()));
    assert!(ids.contains(&draft.id.as_str()));
}

#[tokio::test]
async fn test_reorder_rejects_duplicate_ids() {
    let storage = new_storage().await;

    let course = storage
        .create_course_impl(1, None, course_request("Order"))
        .await
        .unwrap();
    let lesson = storage
        .create_lesson_impl(lesson_request(&course.id, "One", 1))
        .await
        .unwrap();

    let err = storage
        .reorder_lessons_impl(
            &course.id,
            vec![
                ReorderItem {
                    id: lesson.id.clone(),
                    order: 2,
                },
                ReorderItem {
                    id: lesson.id.clone(),
                    order: 3,
                },
            ],
        )
        .await
        .unwrap_err();

    assert!(err.to_string().contains("重复"));

    // 拒绝时不写入任何变更
    let unchanged = storage.get_lesson_by_id_impl(&lesson.id).await.unwrap().unwrap();
    assert_eq!(unchanged.order, 1);
}

#[tokio::test]
async fn test_reorder_ignores_foreign_lessons() {
    let storage = new_storage().await;

    let course_a = storage
        .create_course_impl(1, None, course_request("A"))
        .await
        .unwrap();
    let course_b = storage
        .create_course_impl(1, None, course_request("B"))
        .await
        .unwrap();

    let mine = storage
        .create_lesson_impl(lesson_request(&course_a.id, "Mine", 1))
        .await
        .unwrap();
    let foreign = storage
        .create_lesson_impl(lesson_request(&course_b.id, "Foreign", 1))
        .await
        .unwrap();

    let updated = storage
        .reorder_lessons_impl(
            &course_a.id,
            vec![
                ReorderItem {
                    id: mine.id.clone(),
                    order: 5,
                },
                ReorderItem {
                    id: foreign.id.clone(),
                    order: 9,
                },
            ],
        )
        .await
        .unwrap();

    assert_eq!(updated, 1);

    let foreign = storage.get_lesson_by_id_impl(&foreign.id).await.unwrap().unwrap();
    assert_eq!(foreign.order, 1);
}

#[tokio::test]
async fn test_deck_tags_normalized() {
    let storage = new_storage().await;

    let deck = storage
        .create_deck_impl(
            1,
            None,
            CreateDeckRequest {
                title: "Vocab".to_string(),
                description: None,
                category: Some("language".to_string()),
                tags: vec![
                    " Vocab ".to_string(),
                    "vocab".to_string(),
                    "Grammar".to_string(),
                ],
                is_published: true,
            },
        )
        .await
        .unwrap();

    assert_eq!(deck.tags, vec!["vocab", "grammar"]);
}

#[tokio::test]
async fn test_create_assignment_seeds_zero_progress() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    assert_eq!(assignment.status, AssignmentStatus::Pending);

    let progress = storage
        .get_progress_by_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(progress.total_items, 0);
    assert_eq!(progress.completed_items, 0);
    assert_eq!(progress.completion_percentage, 0.0);
    assert_eq!(progress.sessions_count, 0);
    assert!(progress.started_at.is_none());
}

#[tokio::test]
async fn test_update_progress_cascades_status() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    // 部分进度：pending -> in_progress
    let progress = storage
        .update_progress_impl(
            assignment.id,
            UpdateProgressRequest {
                total_items: Some(10),
                completed_items: Some(4),
                progress_details: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(progress.completion_percentage, 40.0);
    assert!(progress.started_at.is_some());

    let assignment_row = storage
        .get_assignment_by_id_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment_row.status, AssignmentStatus::InProgress);
    assert!(assignment_row.completed_at.is_none());

    // 全部完成：级联为 completed
    let progress = storage
        .update_progress_impl(
            assignment.id,
            UpdateProgressRequest {
                total_items: None,
                completed_items: Some(10),
                progress_details: None,
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(progress.completion_percentage, 100.0);

    let assignment_row = storage
        .get_assignment_by_id_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(assignment_row.status, AssignmentStatus::Completed);
    assert!(assignment_row.completed_at.is_some());
}

#[tokio::test]
async fn test_complete_assignment_forces_full_progress() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    storage
        .update_progress_impl(
            assignment.id,
            UpdateProgressRequest {
                total_items: Some(8),
                completed_items: Some(2),
                progress_details: None,
            },
        )
        .await
        .unwrap();

    let completed = storage
        .complete_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(completed.status, AssignmentStatus::Completed);

    let progress = storage
        .get_progress_by_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.completion_percentage, 100.0);
    assert_eq!(progress.completed_items, progress.total_items);
}

#[tokio::test]
async fn test_start_session_forces_out_stale_session() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    let first = storage
        .start_session_impl(assignment.id, 20, StartSessionRequest::default())
        .await
        .unwrap();
    assert!(first.is_active);

    let second = storage
        .start_session_impl(assignment.id, 20, StartSessionRequest::default())
        .await
        .unwrap();

    // 旧会话被结算
    let first = storage
        .get_session_by_id_impl(first.id)
        .await
        .unwrap()
        .unwrap();
    assert!(!first.is_active);
    assert!(first.ended_at.is_some());

    let active = storage
        .get_active_session_impl(assignment.id, 20)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(active.id, second.id);

    // 只有被结算的旧会话计入，进行中的新会话不算
    let progress = storage
        .get_progress_by_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.sessions_count, 1);
}

#[tokio::test]
async fn test_start_session_does_not_bump_sessions_count() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    storage
        .start_session_impl(assignment.id, 20, StartSessionRequest::default())
        .await
        .unwrap();

    // 会话计数在结束时才增长
    let progress = storage
        .get_progress_by_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.sessions_count, 0);
    assert_eq!(progress.total_study_time_minutes, 0);
}

#[tokio::test]
async fn test_end_session_rolls_up_progress() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();

    let session = storage
        .start_session_impl(assignment.id, 20, StartSessionRequest::default())
        .await
        .unwrap();

    let ended = storage
        .end_session_impl(
            session.id,
            EndSessionRequest {
                items_studied: Some(6),
                items_completed: Some(3),
                session_notes: Some("flashcards".to_string()),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert!(!ended.is_active);
    assert_eq!(ended.session_progress, 50.0);
    assert_eq!(ended.duration_minutes, Some(0));

    // 已结束的会话不能再次结束
    let err = storage
        .end_session_impl(session.id, EndSessionRequest::default())
        .await
        .unwrap_err();
    assert!(err.to_string().contains("已结束"));

    let progress = storage
        .get_progress_by_assignment_impl(assignment.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(progress.sessions_count, 1);
    assert_eq!(progress.total_study_time_minutes, 0);
    assert!(progress.last_accessed.is_some());
}

#[tokio::test]
async fn test_student_progress_summary_counts() {
    let storage = new_storage().await;

    let a1 = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();
    storage
        .create_assignment_impl(10, assignment_request(20, "course-2"))
        .await
        .unwrap();

    storage.complete_assignment_impl(a1.id).await.unwrap();

    let summary = storage.student_progress_summary_impl(20).await.unwrap();
    assert_eq!(summary.total_assignments, 2);
    assert_eq!(summary.completed, 1);
    assert_eq!(summary.pending, 1);
    assert_eq!(summary.completion_rate, 50.0);
}

#[tokio::test]
async fn test_learning_analytics_window() {
    let storage = new_storage().await;

    let assignment = storage
        .create_assignment_impl(10, assignment_request(20, "course-1"))
        .await
        .unwrap();
    storage.complete_assignment_impl(assignment.id).await.unwrap();

    let analytics = storage
        .learning_analytics_impl(Some(10), None, 30)
        .await
        .unwrap();

    assert_eq!(analytics.period_days, 30);
    assert_eq!(analytics.total_assignments, 1);
    assert_eq!(analytics.completed_assignments, 1);
    assert_eq!(analytics.completion_rate, 100.0);

    // 其他讲师看不到
    let other = storage
        .learning_analytics_impl(Some(99), None, 30)
        .await
        .unwrap();
    assert_eq!(other.total_assignments, 0);
    assert_eq!(other.completion_rate, 0.0);
}

#[tokio::test]
async fn test_child_list_orders_by_sort_order() {
    let storage = new_storage().await;

    let course = storage
        .create_course_impl(1, None, course_request("Sorted"))
        .await
        .unwrap();

    storage
        .create_lesson_impl(lesson_request(&course.id, "Second", 2))
        .await
        .unwrap();
    storage
        .create_lesson_impl(lesson_request(&course.id, "First", 1))
        .await
        .unwrap();

    let listed = storage
        .list_course_lessons_impl(&course.id, ChildListQuery::default())
        .await
        .unwrap();

    let titles: Vec<&str> = listed.items.iter().map(|l| l.title.as_str()).collect();
    assert_eq!(titles, vec!["First", "Second"]);
}
