use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::database::{
    models::{
        Actor, AttendanceRow, Booking, BookingScope, EventBookingFilter, EventStatus, RolePool,
        User, UserBookingRow, UserStatus,
    },
    repositories::{
        booking as booking_repo, event as event_repo, role_wage as role_wage_repo,
        user as user_repo,
    },
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::access::ensure_event_operator;

fn insert_error(error: sqlx::Error) -> AppError {
    match &error {
        sqlx::Error::Database(db) if db.is_unique_violation() => AppError::AlreadyBooked,
        _ => AppError::from(error),
    }
}

/// The standard wage a new booking snapshots: the user's own wage, or the role
/// table entry while the user has none assigned.
async fn resolve_wage(
    tx: &mut Transaction<'_, Postgres>,
    user: &User,
    role: RolePool,
) -> Result<i64, AppError> {
    if user.current_wage > 0 {
        return Ok(user.current_wage);
    }

    role_wage_repo::find_role_wage(&mut **tx, role)
        .await?
        .map(|rw| rw.wage)
        .ok_or_else(|| {
            AppError::internal_server_error_message(format!("No standard wage set for {}", role))
        })
}

#[derive(Clone)]
pub struct BookingService {
    pool: PgPool,
    same_day_exclusive: bool,
}

impl BookingService {
    pub fn new(pool: PgPool, same_day_exclusive: bool) -> Self {
        Self {
            pool,
            same_day_exclusive,
        }
    }

    /// Books `user_id` into the pool matching their role on `event_id`.
    ///
    /// The event row is locked for the whole operation, so two workers racing
    /// for the last slot are serialized and the loser sees `NoSlots`.
    pub async fn book(&self, user_id: Uuid, event_id: Uuid) -> Result<Booking, AppError> {
        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let user = user_repo::find_user(&mut *tx, user_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("User {} not found", user_id)))?;
            let mut event = event_repo::lock_event(&mut tx, event_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

            if event.status != EventStatus::Upcoming {
                return Err(AppError::NotBookable(event.status));
            }
            if booking_repo::find_active_booking(&mut *tx, event_id, user_id)
                .await?
                .is_some()
            {
                return Err(AppError::AlreadyBooked);
            }
            let role = user.role.pool().ok_or(AppError::InvalidRole)?;
            if user.status == UserStatus::Blocked {
                return Err(AppError::PermissionDenied(
                    "blocked users cannot book events".to_string(),
                ));
            }

            if self.same_day_exclusive {
                user_repo::lock_user(&mut tx, user_id).await?;
                if booking_repo::has_booking_on_date(&mut tx, user_id, event.event_date, event_id)
                    .await?
                {
                    return Err(AppError::SameDayConflict);
                }
            }

            if !event.try_reserve(role) {
                return Err(AppError::NoSlots(role));
            }
            let wage = resolve_wage(&mut tx, &user, role).await?;

            event_repo::save_event(&mut tx, &event).await?;
            let booking = booking_repo::insert_booking(&mut tx, event_id, user_id, role, wage)
                .await
                .map_err(insert_error)?;
            Ok::<_, AppError>(booking)
        }
        .await;

        match DatabaseTransaction::finish(tx, result).await {
            Ok(booking) => {
                log::info!(
                    "User {} booked {} slot on event {} at wage {}",
                    user_id,
                    booking.role,
                    event_id,
                    booking.wage_snapshot
                );
                Ok(booking)
            }
            Err(err) => {
                log::debug!("Booking of event {} by {} rejected: {}", event_id, user_id, err);
                Err(err)
            }
        }
    }

    /// Removes a booking from an upcoming event and returns its slot to the pool.
    pub async fn remove(&self, event_id: Uuid, booking_id: Uuid) -> Result<(), AppError> {
        let not_found = || AppError::NotFound(format!("Booking {} not found", booking_id));

        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let booking = booking_repo::lock_booking(&mut tx, booking_id)
                .await?
                .filter(|b| b.event_id == event_id)
                .ok_or_else(not_found)?;
            let mut event = event_repo::lock_event(&mut tx, event_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;

            if event.status != EventStatus::Upcoming {
                return Err(AppError::NotBookable(event.status));
            }
            if !event.release(booking.role) {
                log::warn!(
                    "Pool {} on event {} already full while removing booking {}",
                    booking.role,
                    event_id,
                    booking_id
                );
            }

            event_repo::save_event(&mut tx, &event).await?;
            booking_repo::delete_booking(&mut tx, booking_id).await?;
            Ok::<_, AppError>(booking)
        }
        .await;
        let booking = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Removed booking {} of user {} from event {}",
            booking.id,
            booking.user_id,
            event_id
        );
        Ok(())
    }

    pub async fn list_for_user(
        &self,
        user_id: Uuid,
        scope: BookingScope,
    ) -> Result<Vec<UserBookingRow>, AppError> {
        Ok(booking_repo::list_for_user(&self.pool, user_id, scope, Utc::now().date_naive()).await?)
    }

    pub async fn get_for_user(
        &self,
        user_id: Uuid,
        booking_id: Uuid,
    ) -> Result<UserBookingRow, AppError> {
        booking_repo::get_for_user(&self.pool, user_id, booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))
    }

    pub async fn list_for_event(
        &self,
        actor: Actor,
        event_id: Uuid,
        filter: &EventBookingFilter,
    ) -> Result<Vec<AttendanceRow>, AppError> {
        event_repo::find_event(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;
        ensure_event_operator(&self.pool, actor, event_id).await?;

        Ok(booking_repo::list_for_event(&self.pool, event_id, filter).await?)
    }
}
