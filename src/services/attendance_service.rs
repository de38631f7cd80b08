use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Actor, AttendanceInput, Booking, EventWageSummary},
    repositories::{booking as booking_repo, event as event_repo},
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::{access::ensure_event_operator, wage::apply_attendance};

#[derive(Clone)]
pub struct AttendanceService {
    pool: PgPool,
}

impl AttendanceService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Records attendance on a booking of an ongoing event and recomputes its wage.
    ///
    /// Locks the booking, then its event. Re-applying the same input leaves the
    /// stored row untouched.
    pub async fn update_attendance(
        &self,
        actor: Actor,
        booking_id: Uuid,
        input: AttendanceInput,
    ) -> Result<Booking, AppError> {
        input.adjustment.validate_for(input.status)?;

        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let booking = booking_repo::lock_booking(&mut tx, booking_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;
            let event = event_repo::lock_event(&mut tx, booking.event_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Event {} not found", booking.event_id))
                })?;
            ensure_event_operator(&mut *tx, actor, event.id).await?;

            let mut updated = booking.clone();
            apply_attendance(&mut updated, &event, input.status, input.adjustment)?;
            if updated == booking {
                log::debug!("Attendance for booking {} unchanged; skipping write", booking_id);
                return Ok(booking);
            }

            Ok::<_, AppError>(booking_repo::save_booking(&mut tx, &updated).await?)
        }
        .await;
        let booking = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Attendance for booking {} set to {} by {} (total {})",
            booking.id,
            booking.status,
            actor.user_id(),
            booking.total_amount
        );
        Ok(booking)
    }

    pub async fn event_wage_summary(
        &self,
        actor: Actor,
        event_id: Uuid,
    ) -> Result<EventWageSummary, AppError> {
        event_repo::find_event(&self.pool, event_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Event {} not found", event_id)))?;
        ensure_event_operator(&self.pool, actor, event_id).await?;

        Ok(booking_repo::wage_summary(&self.pool, event_id).await?)
    }
}
