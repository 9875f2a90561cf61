//! 成绩存储操作
//!
//! 等级与绩点在写入前由分数计算得出；唯一性约束依赖数据库原子判定，
//! 冲突映射为 DuplicateKey，不做先查后插。

use super::SeaOrmStorage;
use crate::entity::grades::{ActiveModel, Column, Entity as Grades, Model as GradeModel};
use crate::entity::students::{Column as StudentColumn, Entity as Students};
use crate::entity::subjects::{Column as SubjectColumn, Entity as Subjects};
use crate::entity::teachers::{Column as TeacherColumn, Entity as Teachers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradelinkError, Result};
use crate::models::{
    PaginationInfo,
    grades::{
        entities::{
            compute_grade, next_published_at, ExamType, Grade, GradeLetter, StudentRef,
            SubjectRef, TeacherRef, Term,
        },
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
        responses::GradeListResponse,
    },
};
use crate::utils::validate::validate_marks;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
    SqlErr,
};
use std::collections::HashMap;

const DEFAULT_MAX_MARKS: f64 = 100.0;

impl SeaOrmStorage {
    /// 创建成绩
    ///
    /// teacher_id 为录入教师的档案 ID，由服务层解析后传入。
    pub async fn create_grade_impl(
        &self,
        teacher_id: i64,
        req: CreateGradeRequest,
    ) -> Result<Grade> {
        let now = chrono::Utc::now().timestamp();
        let max_marks = req.max_marks.unwrap_or(DEFAULT_MAX_MARKS);

        // 分数范围校验
        validate_marks(req.marks, max_marks).map_err(GradelinkError::validation)?;

        // 等级与绩点由分数推导
        let (letter, gpa) = compute_grade(req.marks);

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            teacher_id: Set(teacher_id),
            marks: Set(req.marks),
            max_marks: Set(max_marks),
            grade: Set(letter.to_string()),
            gpa: Set(gpa),
            term: Set(req.term.to_string()),
            academic_year: Set(req.academic_year),
            exam_type: Set(req.exam_type.to_string()),
            comments: Set(req.comments),
            is_published: Set(false),
            published_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        // 直接插入，唯一冲突由数据库原子判定
        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => GradelinkError::duplicate_key(
                "该学生在此科目、学期、学年已有成绩记录",
            ),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                GradelinkError::dependency_not_found("关联的学生、科目或教师不存在")
            }
            _ => GradelinkError::database_operation(format!("创建成绩失败: {e}")),
        })?;

        let mut grades = self.attach_grade_refs(vec![result]).await?;
        grades
            .pop()
            .ok_or_else(|| GradelinkError::database_operation("成绩关联信息补齐失败"))
    }

    /// 通过 ID 获取成绩
    pub async fn get_grade_by_id_impl(&self, grade_id: i64) -> Result<Option<Grade>> {
        let result = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询成绩失败: {e}")))?;

        match result {
            Some(model) => Ok(self.attach_grade_refs(vec![model]).await?.pop()),
            None => Ok(None),
        }
    }

    /// 列出成绩（分页）
    pub async fn list_grades_with_pagination_impl(
        &self,
        query: GradeListQuery,
    ) -> Result<GradeListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Grades::find();

        // 学生筛选
        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }

        // 科目筛选
        if let Some(subject_id) = query.subject_id {
            select = select.filter(Column::SubjectId.eq(subject_id));
        }

        // 授权范围限定的科目集合
        if let Some(subject_ids) = query.subject_ids {
            select = select.filter(Column::SubjectId.is_in(subject_ids));
        }

        // 学期筛选
        if let Some(term) = query.term {
            select = select.filter(Column::Term.eq(term.to_string()));
        }

        // 学年筛选
        if let Some(ref academic_year) = query.academic_year {
            select = select.filter(Column::AcademicYear.eq(academic_year));
        }

        // 排序：学年倒序，学期正序
        select = select
            .order_by_desc(Column::AcademicYear)
            .order_by_asc(Column::Term);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询成绩总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询成绩页数失败: {e}")))?;

        let grades = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询成绩列表失败: {e}")))?;

        Ok(GradeListResponse {
            items: self.attach_grade_refs(grades).await?,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新成绩
    ///
    /// 分数或满分变化时重新计算等级与绩点；
    /// published_at 只在首次发布时写入，之后不再改动。
    pub async fn update_grade_impl(
        &self,
        grade_id: i64,
        update: UpdateGradeRequest,
    ) -> Result<Option<Grade>> {
        // 取原始记录，用于计算生效后的分数与发布状态
        let Some(existing) = Grades::find_by_id(grade_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询成绩失败: {e}")))?
        else {
            return Ok(None);
        };

        let now = chrono::Utc::now().timestamp();

        let marks = update.marks.unwrap_or(existing.marks);
        let max_marks = update.max_marks.unwrap_or(existing.max_marks);
        validate_marks(marks, max_marks).map_err(GradelinkError::validation)?;

        // 用生效分数重新计算，重复提交同一分数结果不变
        let (letter, gpa) = compute_grade(marks);

        let is_published = update.is_published.unwrap_or(existing.is_published);
        let published_at = next_published_at(existing.published_at, is_published, now);

        let model = ActiveModel {
            id: Set(grade_id),
            marks: Set(marks),
            max_marks: Set(max_marks),
            grade: Set(letter.to_string()),
            gpa: Set(gpa),
            exam_type: Set(update
                .exam_type
                .map(|t| t.to_string())
                .unwrap_or(existing.exam_type)),
            comments: Set(update.comments.or(existing.comments)),
            is_published: Set(is_published),
            published_at: Set(published_at),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("更新成绩失败: {e}")))?;

        self.get_grade_by_id_impl(grade_id).await
    }

    /// 删除成绩（硬删除）
    pub async fn delete_grade_impl(&self, grade_id: i64) -> Result<bool> {
        let result = Grades::delete_by_id(grade_id)
            .exec(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("删除成绩失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 批量补齐成绩的学生/科目/教师展示信息
    async fn attach_grade_refs(&self, models: Vec<GradeModel>) -> Result<Vec<Grade>> {
        use chrono::{DateTime, Utc};

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let student_ids: Vec<i64> = models.iter().map(|m| m.student_id).collect();
        let subject_ids: Vec<i64> = models.iter().map(|m| m.subject_id).collect();
        let teacher_ids: Vec<i64> = models.iter().map(|m| m.teacher_id).collect();

        let students: HashMap<i64, (String, i64)> = Students::find()
            .filter(StudentColumn::Id.is_in(student_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联学生失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, (s.student_no, s.user_id)))
            .collect();

        let subjects: HashMap<i64, (String, String)> = Subjects::find()
            .filter(SubjectColumn::Id.is_in(subject_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联科目失败: {e}")))?
            .into_iter()
            .map(|s| (s.id, (s.subject_code, s.subject_name)))
            .collect();

        let teachers: HashMap<i64, (String, i64)> = Teachers::find()
            .filter(TeacherColumn::Id.is_in(teacher_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联教师失败: {e}")))?
            .into_iter()
            .map(|t| (t.id, (t.teacher_no, t.user_id)))
            .collect();

        // 学生与教师的显示名都在用户表
        let user_ids: Vec<i64> = students
            .values()
            .map(|(_, uid)| *uid)
            .chain(teachers.values().map(|(_, uid)| *uid))
            .collect();

        let display_names: HashMap<i64, String> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联用户失败: {e}")))?
            .into_iter()
            .map(|u| (u.id, u.profile_name.unwrap_or_default()))
            .collect();

        let grades = models
            .into_iter()
            .map(|m| {
                let (student_no, student_user_id) = students
                    .get(&m.student_id)
                    .cloned()
                    .unwrap_or((String::new(), 0));
                let (subject_code, subject_name) = subjects
                    .get(&m.subject_id)
                    .cloned()
                    .unwrap_or((String::new(), String::new()));
                let (teacher_no, teacher_user_id) = teachers
                    .get(&m.teacher_id)
                    .cloned()
                    .unwrap_or((String::new(), 0));

                Grade {
                    id: m.id,
                    student: StudentRef {
                        id: m.student_id,
                        student_no,
                        display_name: display_names
                            .get(&student_user_id)
                            .cloned()
                            .unwrap_or_default(),
                    },
                    subject: SubjectRef {
                        id: m.subject_id,
                        subject_code,
                        subject_name,
                    },
                    teacher: TeacherRef {
                        id: m.teacher_id,
                        teacher_no,
                        display_name: display_names
                            .get(&teacher_user_id)
                            .cloned()
                            .unwrap_or_default(),
                    },
                    marks: m.marks,
                    max_marks: m.max_marks,
                    grade: m.grade.parse::<GradeLetter>().unwrap_or(GradeLetter::F),
                    gpa: m.gpa,
                    term: m.term.parse::<Term>().unwrap_or(Term::Final),
                    academic_year: m.academic_year,
                    exam_type: m.exam_type.parse::<ExamType>().unwrap_or_default(),
                    comments: m.comments,
                    is_published: m.is_published,
                    published_at: m
                        .published_at
                        .map(|ts| DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default()),
                    created_at: DateTime::<Utc>::from_timestamp(m.created_at, 0)
                        .unwrap_or_default(),
                    updated_at: DateTime::<Utc>::from_timestamp(m.updated_at, 0)
                        .unwrap_or_default(),
                }
            })
            .collect();

        Ok(grades)
    }
}
