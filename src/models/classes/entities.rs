use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 班级
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/class.ts")]
pub struct Class {
    // 班级ID
    pub id: i64,
    // 班级名称，唯一，统一大写
    pub class_name: String,
    // 年级（1-12）
    pub grade_level: i32,
    // 班号/分部
    pub section: String,
    // 班主任（教师档案ID）
    pub teacher_id: i64,
    // 学年，形如 "2024-2025"，由创建方显式指定
    pub academic_year: String,
    // 班级描述
    pub description: Option<String>,
    // 创建时间
    pub created_at: chrono::DateTime<chrono::Utc>,
    // 更新时间
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
