use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{AttendanceInput, BookingScopeQuery, WageAdjustment};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::user_context::{UserContext, permissions};

pub async fn my_bookings(
    state: web::Data<AppState>,
    user_context: UserContext,
    query: web::Query<BookingScopeQuery>,
) -> Result<HttpResponse, AppError> {
    let bookings = state
        .booking_service
        .list_for_user(user_context.user_id(), query.scope)
        .await?;

    Ok(ApiResponse::success(bookings))
}

pub async fn my_booking(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = state
        .booking_service
        .get_for_user(user_context.user_id(), path.into_inner())
        .await?;

    Ok(ApiResponse::success(booking))
}

pub async fn update_attendance(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
    input: web::Json<AttendanceInput>,
) -> Result<HttpResponse, AppError> {
    let actor = user_context.operator(permissions::EVENT_OPERATE)?;

    let booking = state
        .attendance_service
        .update_attendance(actor, path.into_inner(), input.into_inner())
        .await?;

    Ok(ApiResponse::success(booking))
}

pub async fn override_wage(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
    input: web::Json<WageAdjustment>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::WAGE_EDIT)?;

    let booking = state
        .wage_override_service
        .override_wage(user_context.user_id(), path.into_inner(), input.into_inner())
        .await?;

    Ok(ApiResponse::success(booking))
}
