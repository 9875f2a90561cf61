use serde::Deserialize;
use ts_rs::TS;

// 录入考试结果请求
//
// total 和 grade 由服务端计算，不接受请求方传入。
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct CreateResultRequest {
    pub student_id: i64,
    pub subject_id: i64,
    pub session: String,
    pub term: String,
    pub ca: f64,
    pub exam: f64,
}
