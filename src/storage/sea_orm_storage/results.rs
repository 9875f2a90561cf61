//! 考试结果存储操作（简化评分方案）

use super::SeaOrmStorage;
use crate::entity::results::{ActiveModel, Column, Entity as Results};
use crate::errors::{GradelinkError, Result};
use crate::models::results::{
    entities::{exam_grade, ExamResult},
    requests::CreateResultRequest,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set, SqlErr};

impl SeaOrmStorage {
    /// 录入考试结果
    ///
    /// 总分 = 平时分 + 考试分，等级由粗粒度阈值表计算。
    pub async fn create_result_impl(&self, req: CreateResultRequest) -> Result<ExamResult> {
        let now = chrono::Utc::now().timestamp();

        let total = req.ca + req.exam;
        let letter = exam_grade(total);

        let model = ActiveModel {
            student_id: Set(req.student_id),
            subject_id: Set(req.subject_id),
            session: Set(req.session),
            term: Set(req.term),
            ca: Set(req.ca),
            exam: Set(req.exam),
            total: Set(total),
            grade: Set(letter.to_string()),
            created_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => GradelinkError::duplicate_key(
                "该学生在此科目、学期、学年会话已有考试结果",
            ),
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                GradelinkError::dependency_not_found("关联的学生或科目不存在")
            }
            _ => GradelinkError::database_operation(format!("录入考试结果失败: {e}")),
        })?;

        Ok(result.into_result())
    }

    /// 列出某学生的考试结果
    pub async fn list_results_by_student_impl(&self, student_id: i64) -> Result<Vec<ExamResult>> {
        let results = Results::find()
            .filter(Column::StudentId.eq(student_id))
            .order_by_desc(Column::Session)
            .order_by_asc(Column::Term)
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询考试结果失败: {e}")))?;

        Ok(results.into_iter().map(|m| m.into_result()).collect())
    }
}
