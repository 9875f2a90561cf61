//! 批量成绩录入
//!
//! 逐条独立处理：单条的权限、校验或唯一性失败只记入失败列表，
//! 不回滚也不中断其余记录，每条记录是独立的原子单元。

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use super::{GradeService, grade_error_code, grade_error_response, scope};
use crate::middlewares::RequireJWT;
use crate::models::grades::requests::BulkCreateGradesRequest;
use crate::models::grades::responses::{BulkGradeFailure, BulkGradeResponse, BulkGradeResults};
use crate::models::{ApiResponse, ErrorCode};

pub async fn bulk_create_grades(
    service: &GradeService,
    request: &HttpRequest,
    bulk_data: BulkCreateGradesRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let current_user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if bulk_data.grades.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "grades 数组不能为空",
        )));
    }

    // 范围解析失败时整批拒绝（调用者本身无权限）
    let scope = match scope::resolve_grade_scope(&storage, &current_user).await {
        Ok(scope) => scope,
        Err(e) => return Ok(grade_error_response(&e)),
    };

    let total = bulk_data.grades.len();
    let mut successful = Vec::new();
    let mut failed = Vec::new();

    // 按输入顺序逐条处理
    for grade_data in bulk_data.grades {
        // 单条授权
        if let Err(e) = scope::authorize_grade_write(&scope, grade_data.subject_id) {
            failed.push(BulkGradeFailure {
                error_code: grade_error_code(&e) as i32,
                error: e.message().to_string(),
                input: grade_data,
            });
            continue;
        }

        let teacher_id = match scope::resolve_grading_teacher(&scope, grade_data.teacher_id) {
            Ok(id) => id,
            Err(e) => {
                failed.push(BulkGradeFailure {
                    error_code: grade_error_code(&e) as i32,
                    error: e.message().to_string(),
                    input: grade_data,
                });
                continue;
            }
        };

        // 单条创建，失败不影响其他记录
        match storage.create_grade(teacher_id, grade_data.clone()).await {
            Ok(grade) => successful.push(grade),
            Err(e) => failed.push(BulkGradeFailure {
                error_code: grade_error_code(&e) as i32,
                error: e.message().to_string(),
                input: grade_data,
            }),
        }
    }

    info!(
        "Bulk grade upload by user {}: {} total, {} successful, {} failed",
        current_user.id,
        total,
        successful.len(),
        failed.len()
    );

    let response = BulkGradeResponse {
        total,
        successful: successful.len(),
        failed: failed.len(),
        results: BulkGradeResults { successful, failed },
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(response, "批量录入完成")))
}
