use super::entities::Grade;
use super::requests::CreateGradeRequest;
use crate::models::common::PaginationInfo;
use serde::Serialize;
use ts_rs::TS;

// 单条成绩响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeResponse {
    pub grade: Grade,
}

// 成绩列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct GradeListResponse {
    pub items: Vec<Grade>,
    pub pagination: PaginationInfo,
}

// 批量录入失败记录，保留原始输入和失败原因
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeFailure {
    pub input: CreateGradeRequest,
    pub error_code: i32,
    pub error: String,
}

// 批量录入响应：逐条独立成功/失败，绝不合并错误
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeResponse {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub results: BulkGradeResults,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/grade.ts")]
pub struct BulkGradeResults {
    pub successful: Vec<Grade>,
    pub failed: Vec<BulkGradeFailure>,
}
