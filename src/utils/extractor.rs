//! 路径参数安全提取器
//!
//! 在进入处理函数之前完成 ID 解析与正数校验，
//! 非法参数直接返回统一格式的 400 响应。

use actix_web::error::InternalError;
use actix_web::{FromRequest, HttpRequest, HttpResponse, dev::Payload};
use futures_util::future::{Ready, ready};

use crate::models::{ApiResponse, ErrorCode};

macro_rules! declare_id_extractor {
    ($name:ident, $param:literal) => {
        pub struct $name(pub i64);

        impl FromRequest for $name {
            type Error = actix_web::Error;
            type Future = Ready<Result<Self, Self::Error>>;

            fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
                let parsed = req
                    .match_info()
                    .get($param)
                    .and_then(|v| v.parse::<i64>().ok())
                    .filter(|id| *id > 0);

                ready(match parsed {
                    Some(id) => Ok($name(id)),
                    None => Err(InternalError::from_response(
                        concat!("invalid path parameter: ", $param),
                        HttpResponse::BadRequest().json(ApiResponse::error_empty(
                            ErrorCode::BadRequest,
                            concat!("Invalid ", $param, ", expected a positive integer"),
                        )),
                    )
                    .into()),
                })
            }
        }
    };
}

declare_id_extractor!(SafeIDI64, "id");
declare_id_extractor!(SafeStudentIdI64, "student_id");
declare_id_extractor!(SafeTeacherIdI64, "teacher_id");
declare_id_extractor!(SafeClassIdI64, "class_id");
declare_id_extractor!(SafeSubjectIdI64, "subject_id");
declare_id_extractor!(SafeGradeIdI64, "grade_id");
declare_id_extractor!(SafeResultIdI64, "result_id");
