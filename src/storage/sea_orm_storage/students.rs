//! 学生档案存储操作

use super::SeaOrmStorage;
use crate::entity::students::{ActiveModel, Column, Entity as Students};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradelinkError, Result};
use crate::models::{
    PaginationInfo,
    students::{
        entities::{Student, StudentDetail},
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        responses::StudentListResponse,
    },
    users::entities::UserStatus,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set, SqlErr,
};
use std::collections::HashMap;

impl SeaOrmStorage {
    /// 创建学生档案
    pub async fn create_student_impl(&self, req: CreateStudentRequest) -> Result<Student> {
        let now = chrono::Utc::now().timestamp();

        // 出生日期格式校验，统一存储为 YYYY-MM-DD
        let birth_date = chrono::NaiveDate::parse_from_str(&req.birth_date, "%Y-%m-%d")?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            // 学号统一大写
            student_no: Set(req.student_no.trim().to_uppercase()),
            class_id: Set(req.class_id),
            roll_number: Set(req.roll_number),
            birth_date: Set(birth_date.format("%Y-%m-%d").to_string()),
            address: Set(req.address),
            guardian_name: Set(req.guardian_name),
            guardian_contact: Set(req.guardian_contact),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                GradelinkError::duplicate_key("该用户已有学生档案或学号已被占用")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                GradelinkError::dependency_not_found("关联的用户或班级不存在")
            }
            _ => GradelinkError::database_operation(format!("创建学生档案失败: {e}")),
        })?;

        Ok(result.into_student())
    }

    /// 通过档案 ID 获取学生
    pub async fn get_student_by_id_impl(&self, student_id: i64) -> Result<Option<Student>> {
        let result = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过用户 ID 获取学生档案
    pub async fn get_student_by_user_id_impl(&self, user_id: i64) -> Result<Option<Student>> {
        let result = Students::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生失败: {e}")))?;

        Ok(result.map(|m| m.into_student()))
    }

    /// 通过档案 ID 获取学生详情（含用户与班级展示信息）
    pub async fn get_student_detail_by_id_impl(
        &self,
        student_id: i64,
    ) -> Result<Option<StudentDetail>> {
        let Some(model) = Students::find_by_id(student_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生失败: {e}")))?
        else {
            return Ok(None);
        };

        let user = self.get_user_by_id_impl(model.user_id).await?;
        let class = self.get_class_by_id_impl(model.class_id).await?;

        Ok(Some(StudentDetail {
            student: model.into_student(),
            display_name: user
                .as_ref()
                .map(|u| u.profile.profile_name.clone())
                .unwrap_or_default(),
            class_name: class.map(|c| c.class_name),
            user_status: user
                .map(|u| u.status.to_string())
                .unwrap_or_else(|| UserStatus::Inactive.to_string()),
        }))
    }

    /// 分页列出学生
    pub async fn list_students_with_pagination_impl(
        &self,
        query: StudentListQuery,
    ) -> Result<StudentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Students::find();

        // 班级筛选
        if let Some(class_id) = query.class_id {
            select = select.filter(Column::ClassId.eq(class_id));
        }

        // 搜索条件：学号或学籍号
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::StudentNo.contains(&escaped.to_uppercase()))
                    .add(Column::RollNumber.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_asc(Column::StudentNo);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生页数失败: {e}")))?;

        let students = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询学生列表失败: {e}")))?;

        // 批量补齐用户与班级展示信息
        let user_ids: Vec<i64> = students.iter().map(|s| s.user_id).collect();
        let class_ids: Vec<i64> = students.iter().map(|s| s.class_id).collect();

        let users: HashMap<i64, (String, String)> = Users::find()
            .filter(UserColumn::Id.is_in(user_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联用户失败: {e}")))?
            .into_iter()
            .map(|u| {
                (
                    u.id,
                    (u.profile_name.clone().unwrap_or_default(), u.status.clone()),
                )
            })
            .collect();

        let classes: HashMap<i64, String> = crate::entity::classes::Entity::find()
            .filter(crate::entity::classes::Column::Id.is_in(class_ids))
            .all(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询关联班级失败: {e}")))?
            .into_iter()
            .map(|c| (c.id, c.class_name))
            .collect();

        let items = students
            .into_iter()
            .map(|m| {
                let (display_name, user_status) =
                    users.get(&m.user_id).cloned().unwrap_or_default();
                let class_name = classes.get(&m.class_id).cloned();
                StudentDetail {
                    display_name,
                    class_name,
                    user_status,
                    student: m.into_student(),
                }
            })
            .collect();

        Ok(StudentListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新学生档案
    pub async fn update_student_impl(
        &self,
        student_id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        // 先检查学生是否存在
        let existing = self.get_student_by_id_impl(student_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(student_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(class_id) = update.class_id {
            model.class_id = Set(class_id);
        }

        if let Some(roll_number) = update.roll_number {
            model.roll_number = Set(roll_number);
        }

        if let Some(birth_date) = update.birth_date {
            let parsed = chrono::NaiveDate::parse_from_str(&birth_date, "%Y-%m-%d")?;
            model.birth_date = Set(parsed.format("%Y-%m-%d").to_string());
        }

        if let Some(address) = update.address {
            model.address = Set(address);
        }

        if let Some(guardian_name) = update.guardian_name {
            model.guardian_name = Set(guardian_name);
        }

        if let Some(guardian_contact) = update.guardian_contact {
            model.guardian_contact = Set(guardian_contact);
        }

        model.update(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                GradelinkError::dependency_not_found("关联的班级不存在")
            }
            _ => GradelinkError::database_operation(format!("更新学生档案失败: {e}")),
        })?;

        self.get_student_by_id_impl(student_id).await
    }

    /// 注销学生：停用关联用户，档案与历史成绩保留
    pub async fn deactivate_student_impl(&self, student_id: i64) -> Result<bool> {
        let Some(student) = self.get_student_by_id_impl(student_id).await? else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                UserColumn::Status,
                sea_orm::sea_query::Expr::value(UserStatus::Inactive.to_string()),
            )
            .col_expr(UserColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(UserColumn::Id.eq(student.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("注销学生失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
