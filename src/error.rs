use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use thiserror::Error;

use crate::database::models::{EventStatus, LifecycleAction, RolePool};
use crate::handlers::shared::ApiResponse;

/// Coarse classification of an [`AppError`], used for status mapping and logging.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Conflict,
    State,
    NotFound,
    Auth,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(sqlx::Error),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("User role cannot book events")]
    InvalidRole,

    #[error("No changes detected")]
    NoChanges,

    #[error("User already booked this event")]
    AlreadyBooked,

    #[error("No {0} slots remaining")]
    NoSlots(RolePool),

    #[error("User already has a booking on this date")]
    SameDayConflict,

    #[error("Event is {0} and cannot be booked or changed")]
    NotBookable(EventStatus),

    #[error("Event is not ongoing")]
    EventNotOngoing,

    #[error("Event is not completed")]
    EventNotCompleted,

    #[error("Booking is marked absent")]
    BookingAbsent,

    #[error("Booking wage was already overridden")]
    AlreadyOverridden,

    #[error("Cannot {action} an event that is {from}")]
    InvalidTransition {
        from: EventStatus,
        action: LifecycleAction,
    },

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Unauthorized access")]
    Unauthorized,

    #[error("Internal server error{}", .0.as_ref().map_or("".to_string(), |s| format!(": {}", s)))]
    InternalServerError(Option<String>),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Validation(_) | AppError::InvalidRole | AppError::NoChanges => {
                ErrorKind::Validation
            }
            AppError::AlreadyBooked | AppError::NoSlots(_) | AppError::SameDayConflict => {
                ErrorKind::Conflict
            }
            AppError::NotBookable(_)
            | AppError::EventNotOngoing
            | AppError::EventNotCompleted
            | AppError::BookingAbsent
            | AppError::AlreadyOverridden
            | AppError::InvalidTransition { .. } => ErrorKind::State,
            AppError::NotFound(_) => ErrorKind::NotFound,
            AppError::PermissionDenied(_) | AppError::Forbidden(_) | AppError::Unauthorized => {
                ErrorKind::Auth
            }
            AppError::DatabaseError(_) | AppError::InternalServerError(_) => ErrorKind::Internal,
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn internal_server_error_message(message: impl Into<String>) -> Self {
        AppError::InternalServerError(Some(message.into()))
    }

    pub fn internal_server_error() -> Self {
        AppError::InternalServerError(None)
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Unauthorized => StatusCode::UNAUTHORIZED,
            AppError::PermissionDenied(_) | AppError::Forbidden(_) => StatusCode::FORBIDDEN,
            _ => match self.kind() {
                ErrorKind::Validation => StatusCode::BAD_REQUEST,
                ErrorKind::Conflict => StatusCode::CONFLICT,
                ErrorKind::State => StatusCode::UNPROCESSABLE_ENTITY,
                ErrorKind::NotFound => StatusCode::NOT_FOUND,
                ErrorKind::Auth => StatusCode::FORBIDDEN,
                ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
            },
        }
    }

    fn error_response(&self) -> HttpResponse {
        let status_code = self.status_code();
        let error_message = self.to_string();

        if self.kind() == ErrorKind::Internal {
            log::error!(
                "Request failed with status {}: {}",
                status_code,
                error_message
            );
        } else {
            log::warn!(
                "Request rejected with status {}: {}",
                status_code,
                error_message
            );
        }

        let response_body = ApiResponse::<()>::error(&error_message);

        HttpResponse::build(status_code).json(response_body)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> Self {
        log::error!("Database error: {}", error);
        AppError::DatabaseError(error)
    }
}

impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        log::error!("Anyhow error: {}", error);

        match error.downcast::<sqlx::Error>() {
            Ok(sqlx_err) => AppError::DatabaseError(sqlx_err),
            Err(original_error) => AppError::InternalServerError(Some(original_error.to_string())),
        }
    }
}
