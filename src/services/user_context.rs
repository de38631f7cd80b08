use actix_web::{Error as ActixError, FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};
use uuid::Uuid;

use crate::database::models::{Actor, UserRole};
use crate::error::AppError;
use crate::services::auth::Claims;

/// Admin permission slugs carried in the token.
pub mod permissions {
    pub const EVENT_VIEW: &str = "event:view";
    pub const EVENT_CREATE: &str = "event:create";
    pub const EVENT_EDIT: &str = "event:edit";
    pub const EVENT_DELETE: &str = "event:delete";
    pub const EVENT_OPERATE: &str = "event:operate";
    pub const WAGE_VIEW: &str = "wage:view";
    pub const WAGE_EDIT: &str = "wage:edit";
    pub const MANAGE_WAGES_VIEW: &str = "managewages:view";
}

/// The authenticated caller of a request, taken from the bearer token.
#[derive(Debug, Clone)]
pub struct UserContext {
    pub user_id: Uuid,
    pub role: UserRole,
    pub permissions: Vec<String>,
}

impl From<Claims> for UserContext {
    fn from(claims: Claims) -> Self {
        Self {
            user_id: claims.sub,
            role: claims.role,
            permissions: claims.permissions,
        }
    }
}

impl UserContext {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_captain(&self) -> bool {
        self.role == UserRole::Captain
    }

    pub fn has_permission(&self, slug: &str) -> bool {
        self.permissions.iter().any(|p| p == slug)
    }

    /// Admin holding `slug`.
    pub fn is_admin_with(&self, slug: &str) -> bool {
        self.is_admin() && self.has_permission(slug)
    }

    pub fn requires_admin_permission(&self, slug: &str) -> Result<(), AppError> {
        if self.is_admin_with(slug) {
            Ok(())
        } else {
            Err(AppError::Forbidden(format!("requires admin permission {}", slug)))
        }
    }

    pub fn requires_worker(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Err(AppError::InvalidRole)
        } else {
            Ok(())
        }
    }

    /// Caller allowed to operate an event: an admin holding `slug`, or a captain
    /// whose captaincy of the specific event is checked later against bookings.
    pub fn operator(&self, slug: &str) -> Result<Actor, AppError> {
        if self.is_admin() {
            self.requires_admin_permission(slug)?;
            Ok(self.actor())
        } else if self.is_captain() {
            Ok(self.actor())
        } else {
            Err(AppError::Forbidden(
                "only admins or the event's captain may do this".to_string(),
            ))
        }
    }

    pub fn actor(&self) -> Actor {
        if self.is_admin() {
            Actor::Admin(self.user_id)
        } else {
            Actor::Worker {
                user_id: self.user_id,
                role: self.role,
            }
        }
    }
}

impl FromRequest for UserContext {
    type Error = ActixError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        ready(
            Claims::from_request(req, payload)
                .into_inner()
                .map(UserContext::from),
        )
    }
}
