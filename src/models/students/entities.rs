use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 学生档案
//
// 与 User 一对一绑定，注销时停用关联用户而非删除档案，
// 历史成绩始终保留。
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub user_id: i64,
    // 学号，唯一，统一大写
    pub student_no: String,
    pub class_id: i64,
    pub roll_number: String,
    pub birth_date: chrono::NaiveDate,
    pub address: String,
    pub guardian_name: String,
    pub guardian_contact: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

// 学生档案 + 关联展示信息
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentDetail {
    #[serde(flatten)]
    #[ts(flatten)]
    pub student: Student,
    pub display_name: String,
    pub class_name: Option<String>,
    pub user_status: String,
}
