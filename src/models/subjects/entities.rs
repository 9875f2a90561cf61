use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 科目
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/subject.ts")]
pub struct Subject {
    pub id: i64,
    // 科目代码，唯一，统一大写
    pub subject_code: String,
    pub subject_name: String,
    // 所属班级
    pub class_id: i64,
    // 任课教师（教师档案ID）
    pub teacher_id: i64,
    // 学分权重
    pub credits: i32,
    pub description: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
