use super::entities::{ExamType, Term};
use crate::models::common::PaginationQuery;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 成绩查询参数（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeQueryParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_string_to_option_i64"
    )]
    pub student_id: Option<i64>,
    #[serde(
        default,
        deserialize_with = "crate::models::common::pagination::deserialize_string_to_option_i64"
    )]
    pub subject_id: Option<i64>,
    pub term: Option<Term>,
    pub academic_year: Option<String>,
}

// 创建成绩请求
//
// # teacher_id 字段说明
// - **教师录入**：忽略该字段，自动使用当前教师档案
// - **管理员录入**：必填，指定录入成绩的教师
//
// 等级和绩点由分数计算，不接受请求方传入。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct CreateGradeRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub teacher_id: Option<i64>,
    pub marks: f64,
    pub max_marks: Option<f64>,
    pub term: Term,
    pub academic_year: String,
    #[serde(default)]
    pub exam_type: ExamType,
    pub comments: Option<String>,
}

// 更新成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct UpdateGradeRequest {
    pub marks: Option<f64>,
    pub max_marks: Option<f64>,
    pub exam_type: Option<ExamType>,
    pub comments: Option<String>,
    pub is_published: Option<bool>,
}

// 批量录入成绩请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkCreateGradesRequest {
    pub grades: Vec<CreateGradeRequest>,
}

// 成绩列表查询参数（用于存储层）
#[derive(Debug, Clone, Default, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub subject_id: Option<i64>,
    // 授权范围限定的科目集合，None 表示不限制
    pub subject_ids: Option<Vec<i64>>,
    pub term: Option<Term>,
    pub academic_year: Option<String>,
}
