use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::results::requests::CreateResultRequest;
use crate::models::users::entities::UserRole;
use crate::services::ResultService;
use crate::utils::SafeStudentIdI64;

// 懒加载的全局 RESULT_SERVICE 实例
static RESULT_SERVICE: Lazy<ResultService> = Lazy::new(ResultService::new_lazy);

// HTTP处理程序
pub async fn create_result(
    req: HttpRequest,
    result_data: web::Json<CreateResultRequest>,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .create_result(&req, result_data.into_inner())
        .await
}

pub async fn list_student_results(
    req: HttpRequest,
    student_id: SafeStudentIdI64,
) -> ActixResult<HttpResponse> {
    RESULT_SERVICE
        .list_student_results(&req, student_id.0)
        .await
}

// 配置路由（简化评分方案，与 /grades 的 GPA 方案相互独立）
pub fn configure_results_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/results")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("").route(
                    web::post()
                        .to(create_result)
                        // 教师/管理员录入
                        .wrap(middlewares::RequireRole::new_any(UserRole::teacher_roles())),
                ),
            )
            .service(
                // 学生/家长查询入口，服务层做本人范围检查
                web::resource("/student/{student_id}")
                    .route(web::get().to(list_student_results)),
            ),
    );
}
