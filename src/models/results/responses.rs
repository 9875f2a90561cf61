use super::entities::ExamResult;
use serde::Serialize;
use ts_rs::TS;

// 单条考试结果响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultResponse {
    pub result: ExamResult,
}

// 学生考试结果列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/result.ts")]
pub struct ResultListResponse {
    pub items: Vec<ExamResult>,
}
