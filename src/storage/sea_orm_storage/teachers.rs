//! 教师档案存储操作

use super::SeaOrmStorage;
use crate::entity::teachers::{ActiveModel, Column, Entity as Teachers};
use crate::entity::users::{Column as UserColumn, Entity as Users};
use crate::errors::{GradelinkError, Result};
use crate::models::{
    PaginationInfo,
    teachers::{
        entities::{Teacher, TeacherDetail},
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
        responses::TeacherListResponse,
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
    /// 创建教师档案
    pub async fn create_teacher_impl(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        let now = chrono::Utc::now().timestamp();

        let specializations = serde_json::to_string(&req.specializations)?;

        let model = ActiveModel {
            user_id: Set(req.user_id),
            // 工号统一大写
            teacher_no: Set(req.teacher_no.trim().to_uppercase()),
            department: Set(req.department),
            qualification: Set(req.qualification),
            specializations: Set(specializations),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model.insert(&self.db).await.map_err(|e| match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(_)) => {
                GradelinkError::duplicate_key("该用户已有教师档案或工号已被占用")
            }
            Some(SqlErr::ForeignKeyConstraintViolation(_)) => {
                GradelinkError::dependency_not_found("关联的用户不存在")
            }
            _ => GradelinkError::database_operation(format!("创建教师档案失败: {e}")),
        })?;

        Ok(result.into_teacher())
    }

    /// 通过档案 ID 获取教师
    pub async fn get_teacher_by_id_impl(&self, teacher_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过用户 ID 获取教师档案
    pub async fn get_teacher_by_user_id_impl(&self, user_id: i64) -> Result<Option<Teacher>> {
        let result = Teachers::find()
            .filter(Column::UserId.eq(user_id))
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师失败: {e}")))?;

        Ok(result.map(|m| m.into_teacher()))
    }

    /// 通过档案 ID 获取教师详情（含用户展示信息）
    pub async fn get_teacher_detail_by_id_impl(
        &self,
        teacher_id: i64,
    ) -> Result<Option<TeacherDetail>> {
        let Some(model) = Teachers::find_by_id(teacher_id)
            .one(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师失败: {e}")))?
        else {
            return Ok(None);
        };

        let user = self.get_user_by_id_impl(model.user_id).await?;

        Ok(Some(TeacherDetail {
            teacher: model.into_teacher(),
            display_name: user
                .as_ref()
                .map(|u| u.profile.profile_name.clone())
                .unwrap_or_default(),
            user_status: user
                .map(|u| u.status.to_string())
                .unwrap_or_else(|| UserStatus::Inactive.to_string()),
        }))
    }

    /// 分页列出教师
    pub async fn list_teachers_with_pagination_impl(
        &self,
        query: TeacherListQuery,
    ) -> Result<TeacherListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Teachers::find();

        // 部门筛选
        if let Some(ref department) = query.department {
            select = select.filter(Column::Department.eq(department));
        }

        // 搜索条件：工号或部门
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(
                Condition::any()
                    .add(Column::TeacherNo.contains(&escaped.to_uppercase()))
                    .add(Column::Department.contains(&escaped)),
            );
        }

        // 排序
        select = select.order_by_asc(Column::TeacherNo);

        // 分页查询
        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师总数失败: {e}")))?;

        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师页数失败: {e}")))?;

        let teachers = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("查询教师列表失败: {e}")))?;

        // 批量补齐用户展示信息
        let user_ids: Vec<i64> = teachers.iter().map(|t| t.user_id).collect();
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

        let items = teachers
            .into_iter()
            .map(|m| {
                let (display_name, user_status) =
                    users.get(&m.user_id).cloned().unwrap_or_default();
                TeacherDetail {
                    display_name,
                    user_status,
                    teacher: m.into_teacher(),
                }
            })
            .collect();

        Ok(TeacherListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 更新教师档案
    pub async fn update_teacher_impl(
        &self,
        teacher_id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        // 先检查教师是否存在
        let existing = self.get_teacher_by_id_impl(teacher_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = chrono::Utc::now().timestamp();

        let mut model = ActiveModel {
            id: Set(teacher_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(department) = update.department {
            model.department = Set(department);
        }

        if let Some(qualification) = update.qualification {
            model.qualification = Set(qualification);
        }

        if let Some(specializations) = update.specializations {
            model.specializations = Set(serde_json::to_string(&specializations)?);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("更新教师档案失败: {e}")))?;

        self.get_teacher_by_id_impl(teacher_id).await
    }

    /// 注销教师：停用关联用户，档案保留
    pub async fn deactivate_teacher_impl(&self, teacher_id: i64) -> Result<bool> {
        let Some(teacher) = self.get_teacher_by_id_impl(teacher_id).await? else {
            return Ok(false);
        };

        let now = chrono::Utc::now().timestamp();

        let result = Users::update_many()
            .col_expr(
                UserColumn::Status,
                sea_orm::sea_query::Expr::value(UserStatus::Inactive.to_string()),
            )
            .col_expr(UserColumn::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(UserColumn::Id.eq(teacher.user_id))
            .exec(&self.db)
            .await
            .map_err(|e| GradelinkError::database_operation(format!("注销教师失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
