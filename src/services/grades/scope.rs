//! 成绩访问范围解析
//!
//! 在任何成绩读写进入存储层之前，先把调用者的角色和身份
//! 解析为一个封闭的访问范围，范围之外的操作一律拒绝（fail closed）。

use std::sync::Arc;

use crate::errors::{GradelinkError, Result};
use crate::models::grades::entities::Grade;
use crate::models::grades::requests::GradeListQuery;
use crate::models::users::entities::{User, UserRole};
use crate::storage::Storage;

/// 调用者对成绩数据的访问范围
#[derive(Debug, Clone)]
pub enum GradeScope {
    /// 管理员：不受限制
    Unrestricted,
    /// 教师：限定在自己任课的科目集合内
    TeacherSubjects {
        teacher_id: i64,
        subject_ids: Vec<i64>,
    },
    /// 学生：只能访问自己的成绩
    StudentOwn { student_id: i64 },
}

/// 解析调用者的成绩访问范围
///
/// 角色为封闭枚举，穷尽匹配；档案缺失或角色无对应数据链路时拒绝访问。
pub async fn resolve_grade_scope(
    storage: &Arc<dyn Storage>,
    user: &User,
) -> Result<GradeScope> {
    match user.role {
        UserRole::Admin => Ok(GradeScope::Unrestricted),
        UserRole::Teacher => {
            let teacher = storage
                .get_teacher_by_user_id(user.id)
                .await?
                .ok_or_else(|| {
                    GradelinkError::permission_denied("当前用户没有教师档案，无法访问成绩")
                })?;
            let subject_ids = storage.list_subject_ids_by_teacher(teacher.id).await?;
            Ok(GradeScope::TeacherSubjects {
                teacher_id: teacher.id,
                subject_ids,
            })
        }
        UserRole::Student => {
            let student = storage
                .get_student_by_user_id(user.id)
                .await?
                .ok_or_else(|| {
                    GradelinkError::permission_denied("当前用户没有学生档案，无法访问成绩")
                })?;
            Ok(GradeScope::StudentOwn {
                student_id: student.id,
            })
        }
        // 家长与学生之间没有档案级关联，按关闭原则拒绝
        UserRole::Parent => Err(GradelinkError::permission_denied(
            "家长账号暂不支持访问成绩数据",
        )),
    }
}

/// 把访问范围叠加到列表查询上
///
/// 显式指定了范围之外的学生/科目时直接拒绝，
/// 未指定时收窄为范围内可见的记录。
pub fn scoped_list_query(scope: &GradeScope, mut query: GradeListQuery) -> Result<GradeListQuery> {
    match scope {
        GradeScope::Unrestricted => Ok(query),
        GradeScope::TeacherSubjects { subject_ids, .. } => {
            if let Some(subject_id) = query.subject_id {
                if !subject_ids.contains(&subject_id) {
                    return Err(GradelinkError::permission_denied(
                        "只能查询自己任课科目的成绩",
                    ));
                }
            } else {
                query.subject_ids = Some(subject_ids.clone());
            }
            Ok(query)
        }
        GradeScope::StudentOwn { student_id } => {
            if let Some(requested) = query.student_id
                && requested != *student_id
            {
                return Err(GradelinkError::permission_denied("只能查询自己的成绩"));
            }
            query.student_id = Some(*student_id);
            Ok(query)
        }
    }
}

/// 单条成绩读取授权
pub fn authorize_grade_read(scope: &GradeScope, grade: &Grade) -> Result<()> {
    match scope {
        GradeScope::Unrestricted => Ok(()),
        GradeScope::TeacherSubjects { subject_ids, .. } => {
            if subject_ids.contains(&grade.subject.id) {
                Ok(())
            } else {
                Err(GradelinkError::permission_denied("只能查看自己任课科目的成绩"))
            }
        }
        GradeScope::StudentOwn { student_id } => {
            if grade.student.id == *student_id {
                Ok(())
            } else {
                Err(GradelinkError::permission_denied("只能查看自己的成绩"))
            }
        }
    }
}

/// 成绩写操作（创建/更新/删除）授权
///
/// 范围之外的科目必须显式拒绝，不允许静默过滤。
pub fn authorize_grade_write(scope: &GradeScope, subject_id: i64) -> Result<()> {
    match scope {
        GradeScope::Unrestricted => Ok(()),
        GradeScope::TeacherSubjects { subject_ids, .. } => {
            if subject_ids.contains(&subject_id) {
                Ok(())
            } else {
                Err(GradelinkError::permission_denied(
                    "只能录入自己任课科目的成绩",
                ))
            }
        }
        GradeScope::StudentOwn { .. } => {
            Err(GradelinkError::permission_denied("学生不能录入或修改成绩"))
        }
    }
}

/// 解析成绩归属的教师档案 ID
///
/// 教师录入时使用自己的档案，请求中的 teacher_id 被忽略；
/// 管理员录入时必须显式指定。
pub fn resolve_grading_teacher(scope: &GradeScope, requested: Option<i64>) -> Result<i64> {
    match scope {
        GradeScope::TeacherSubjects { teacher_id, .. } => Ok(*teacher_id),
        GradeScope::Unrestricted => requested.ok_or_else(|| {
            GradelinkError::validation("管理员录入成绩时必须指定 teacher_id")
        }),
        GradeScope::StudentOwn { .. } => {
            Err(GradelinkError::permission_denied("学生不能录入或修改成绩"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::grades::entities::{
        ExamType, GradeLetter, StudentRef, SubjectRef, TeacherRef, Term,
    };

    fn teacher_scope() -> GradeScope {
        GradeScope::TeacherSubjects {
            teacher_id: 7,
            subject_ids: vec![1, 2, 3],
        }
    }

    fn sample_grade(student_id: i64, subject_id: i64) -> Grade {
        Grade {
            id: 1,
            student: StudentRef {
                id: student_id,
                student_no: "STU001".into(),
                display_name: "张三".into(),
            },
            subject: SubjectRef {
                id: subject_id,
                subject_code: "MATH101".into(),
                subject_name: "数学".into(),
            },
            teacher: TeacherRef {
                id: 7,
                teacher_no: "TCH001".into(),
                display_name: "李老师".into(),
            },
            marks: 88.0,
            max_marks: 100.0,
            grade: GradeLetter::A,
            gpa: 3.7,
            term: Term::First,
            academic_year: "2024-2025".into(),
            exam_type: ExamType::Final,
            comments: None,
            is_published: false,
            published_at: None,
            created_at: Default::default(),
            updated_at: Default::default(),
        }
    }

    #[test]
    fn test_admin_list_unrestricted() {
        let query = GradeListQuery {
            student_id: Some(42),
            subject_id: Some(99),
            ..Default::default()
        };
        let scoped = scoped_list_query(&GradeScope::Unrestricted, query).unwrap();
        assert_eq!(scoped.student_id, Some(42));
        assert_eq!(scoped.subject_id, Some(99));
        assert!(scoped.subject_ids.is_none());
    }

    #[test]
    fn test_teacher_list_scoped_to_own_subjects() {
        let scoped = scoped_list_query(&teacher_scope(), GradeListQuery::default()).unwrap();
        assert_eq!(scoped.subject_ids, Some(vec![1, 2, 3]));
    }

    #[test]
    fn test_teacher_list_foreign_subject_rejected() {
        let query = GradeListQuery {
            subject_id: Some(99),
            ..Default::default()
        };
        let err = scoped_list_query(&teacher_scope(), query).unwrap_err();
        assert!(matches!(err, GradelinkError::PermissionDenied(_)));
    }

    #[test]
    fn test_student_list_forced_to_own() {
        let scope = GradeScope::StudentOwn { student_id: 5 };
        let scoped = scoped_list_query(&scope, GradeListQuery::default()).unwrap();
        assert_eq!(scoped.student_id, Some(5));
    }

    #[test]
    fn test_student_list_other_student_rejected() {
        let scope = GradeScope::StudentOwn { student_id: 5 };
        let query = GradeListQuery {
            student_id: Some(6),
            ..Default::default()
        };
        let err = scoped_list_query(&scope, query).unwrap_err();
        assert!(matches!(err, GradelinkError::PermissionDenied(_)));
    }

    #[test]
    fn test_student_read_own_allowed_other_denied() {
        let scope = GradeScope::StudentOwn { student_id: 5 };
        assert!(authorize_grade_read(&scope, &sample_grade(5, 1)).is_ok());
        let err = authorize_grade_read(&scope, &sample_grade(6, 1)).unwrap_err();
        assert!(matches!(err, GradelinkError::PermissionDenied(_)));
    }

    #[test]
    fn test_teacher_write_foreign_subject_rejected() {
        assert!(authorize_grade_write(&teacher_scope(), 2).is_ok());
        let err = authorize_grade_write(&teacher_scope(), 99).unwrap_err();
        assert!(matches!(err, GradelinkError::PermissionDenied(_)));
    }

    #[test]
    fn test_student_write_rejected() {
        let scope = GradeScope::StudentOwn { student_id: 5 };
        let err = authorize_grade_write(&scope, 1).unwrap_err();
        assert!(matches!(err, GradelinkError::PermissionDenied(_)));
    }

    #[test]
    fn test_resolve_grading_teacher() {
        assert_eq!(resolve_grading_teacher(&teacher_scope(), Some(99)).unwrap(), 7);
        assert_eq!(
            resolve_grading_teacher(&GradeScope::Unrestricted, Some(9)).unwrap(),
            9
        );
        assert!(matches!(
            resolve_grading_teacher(&GradeScope::Unrestricted, None).unwrap_err(),
            GradelinkError::Validation(_)
        ));
    }
}
