//! 基于角色的访问策略
//!
//! 分配查询的身份约束集中在这里：非管理员的 student_id / instructor_id
//! 过滤条件由调用者身份改写，而不是信任请求参数。

use crate::models::users::entities::UserRole;

/// 改写后的分配列表过滤条件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssignmentScope {
    pub student_id: Option<i64>,
    pub instructor_id: Option<i64>,
}

/// 按调用者身份改写列表过滤条件
///
/// - 管理员：请求参数原样生效
/// - 教师：instructor_id 强制为本人，student_id 保留请求值
/// - 学生：student_id 强制为本人，instructor_id 被清空
pub fn scope_assignment_filters(
    role: UserRole,
    user_id: i64,
    requested_student: Option<i64>,
    requested_instructor: Option<i64>,
) -> AssignmentScope {
    match role {
        UserRole::Admin => AssignmentScope {
            student_id: requested_student,
            instructor_id: requested_instructor,
        },
        UserRole::Teacher => AssignmentScope {
            student_id: requested_student,
            instructor_id: Some(user_id),
        },
        UserRole::Student => AssignmentScope {
            student_id: Some(user_id),
            instructor_id: None,
        },
    }
}

/// 单条分配的可见性：学生仅本人，教师仅自己创建，管理员不受限
pub fn can_view_assignment(
    role: UserRole,
    user_id: i64,
    assignment_student_id: i64,
    assignment_instructor_id: i64,
) -> bool {
    match role {
        UserRole::Admin => true,
        UserRole::Teacher => assignment_instructor_id == user_id,
        UserRole::Student => assignment_student_id == user_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_filters_pass_through() {
        let scope = scope_assignment_filters(UserRole::Admin, 1, Some(7), Some(9));
        assert_eq!(scope.student_id, Some(7));
        assert_eq!(scope.instructor_id, Some(9));
    }

    #[test]
    fn test_teacher_instructor_forced_to_self() {
        let scope = scope_assignment_filters(UserRole::Teacher, 5, Some(7), Some(9));
        assert_eq!(scope.student_id, Some(7));
        assert_eq!(scope.instructor_id, Some(5));
    }

    #[test]
    fn test_student_sees_only_own() {
        let scope = scope_assignment_filters(UserRole::Student, 3, Some(7), Some(9));
        assert_eq!(scope.student_id, Some(3));
        assert_eq!(scope.instructor_id, None);
    }

    #[test]
    fn test_student_without_filters_still_scoped() {
        let scope = scope_assignment_filters(UserRole::Student, 3, None, None);
        assert_eq!(scope.student_id, Some(3));
    }

    #[test]
    fn test_can_view_assignment() {
        assert!(can_view_assignment(UserRole::Admin, 1, 10, 20));
        assert!(can_view_assignment(UserRole::Teacher, 20, 10, 20));
        assert!(!can_view_assignment(UserRole::Teacher, 21, 10, 20));
        assert!(can_view_assignment(UserRole::Student, 10, 10, 20));
        assert!(!can_view_assignment(UserRole::Student, 11, 10, 20));
    }
}
