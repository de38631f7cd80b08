use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::AppState;
use crate::database::models::{CreateEventInput, EventBookingFilter, EventQuery, UpdateEventInput};
use crate::error::AppError;
use crate::handlers::shared::ApiResponse;
use crate::services::user_context::{UserContext, permissions};

pub async fn create_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    input: web::Json<CreateEventInput>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_CREATE)?;

    let event = state.event_service.create(input.into_inner()).await?;

    Ok(ApiResponse::created(event))
}

pub async fn list_events(
    state: web::Data<AppState>,
    user_context: UserContext,
    query: web::Query<EventQuery>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_VIEW)?;

    let events = state.event_service.list(&query).await?;

    Ok(ApiResponse::success(events))
}

pub async fn list_available_events(
    state: web::Data<AppState>,
    user_context: UserContext,
) -> Result<HttpResponse, AppError> {
    user_context.requires_worker()?;

    let events = state
        .event_service
        .list_available(user_context.user_id())
        .await?;

    Ok(ApiResponse::success(events))
}

pub async fn get_event(
    state: web::Data<AppState>,
    _user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let event = state.event_service.get(path.into_inner()).await?;

    Ok(ApiResponse::success(event))
}

pub async fn update_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
    input: web::Json<UpdateEventInput>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_EDIT)?;

    let event = state
        .event_service
        .update(path.into_inner(), input.into_inner())
        .await?;

    Ok(ApiResponse::success(event))
}

pub async fn delete_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_DELETE)?;

    state.event_service.delete(path.into_inner()).await?;

    Ok(ApiResponse::message("Event deleted successfully"))
}

pub async fn start_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let actor = user_context.operator(permissions::EVENT_OPERATE)?;

    let event = state.event_service.start(actor, path.into_inner()).await?;

    Ok(ApiResponse::success(event))
}

pub async fn complete_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let actor = user_context.operator(permissions::EVENT_OPERATE)?;

    let report = state
        .event_service
        .complete(actor, path.into_inner())
        .await?;

    Ok(ApiResponse::success(report))
}

pub async fn cancel_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_OPERATE)?;

    let event = state
        .event_service
        .cancel(user_context.actor(), path.into_inner())
        .await?;

    Ok(ApiResponse::success(event))
}

pub async fn book_event(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let booking = state
        .booking_service
        .book(user_context.user_id(), path.into_inner())
        .await?;

    Ok(ApiResponse::created(booking))
}

pub async fn list_event_bookings(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
    query: web::Query<EventBookingFilter>,
) -> Result<HttpResponse, AppError> {
    let actor = user_context.operator(permissions::EVENT_VIEW)?;

    let bookings = state
        .booking_service
        .list_for_event(actor, path.into_inner(), &query)
        .await?;

    Ok(ApiResponse::success(bookings))
}

pub async fn remove_booking(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<(Uuid, Uuid)>,
) -> Result<HttpResponse, AppError> {
    user_context.requires_admin_permission(permissions::EVENT_OPERATE)?;

    let (event_id, booking_id) = path.into_inner();
    state.booking_service.remove(event_id, booking_id).await?;

    Ok(ApiResponse::message("Booking removed successfully"))
}

pub async fn event_wage_summary(
    state: web::Data<AppState>,
    user_context: UserContext,
    path: web::Path<Uuid>,
) -> Result<HttpResponse, AppError> {
    let actor = user_context.operator(permissions::WAGE_VIEW)?;

    let summary = state
        .attendance_service
        .event_wage_summary(actor, path.into_inner())
        .await?;

    Ok(ApiResponse::success(summary))
}
