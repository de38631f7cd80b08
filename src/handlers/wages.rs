use actix_web::{HttpResponse, web};

use crate::AppState;
use crate::database::models::{RolePool, UpdateRoleWageInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::user_context::{UserContext, permissions};

pub async fn list_role_wages(
    state: web::Data<AppState>,
    user_context: UserContext,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::MANAGE_WAGES_VIEW)?;

    let wages = state.role_wage_service.list().await?;

    Ok(ApiResponse::success(wages))
}

pub async fn update_role_wage(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<String>,
    input: web::Json<UpdateRoleWageInput>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::MANAGE_WAGES_VIEW)?;

    let role: RolePool = path.parse().map_err(|_| AppError::InvalidRole)?;
    let update = state.role_wage_service.update(role, input.wage).await?;

    Ok(ApiResponse::success(update))
}
