//! 考试结果实体（简化评分方案）

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "results")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub subject_id: i64,
    pub session: String,
    pub term: String,
    pub ca: f64,
    pub exam: f64,
    pub total: f64,
    pub grade: String,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::subjects::Entity",
        from = "Column::SubjectId",
        to = "super::subjects::Column::Id"
    )]
    Subject,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::subjects::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_result(self) -> crate::models::results::entities::ExamResult {
        use crate::models::results::entities::{ExamLetter, ExamResult};
        use chrono::{DateTime, Utc};

        ExamResult {
            id: self.id,
            student_id: self.student_id,
            subject_id: self.subject_id,
            session: self.session,
            term: self.term,
            ca: self.ca,
            exam: self.exam,
            total: self.total,
            grade: self.grade.parse::<ExamLetter>().unwrap_or(ExamLetter::F),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
