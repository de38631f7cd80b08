use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::{
    models::{Booking, WageAdjustment},
    repositories::{booking as booking_repo, event as event_repo},
    transaction::DatabaseTransaction,
};
use crate::error::AppError;
use crate::services::wage::apply_override;

#[derive(Clone)]
pub struct WageOverrideService {
    pool: PgPool,
}

impl WageOverrideService {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// One-time correction of TA, bonus and fine on a booking of a completed event.
    pub async fn override_wage(
        &self,
        admin_id: Uuid,
        booking_id: Uuid,
        adjustment: WageAdjustment,
    ) -> Result<Booking, AppError> {
        adjustment.validate()?;

        let mut tx = DatabaseTransaction::begin(&self.pool).await?;
        let result = async {
            let mut booking = booking_repo::lock_booking(&mut tx, booking_id)
                .await?
                .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;
            let event = event_repo::lock_event(&mut tx, booking.event_id)
                .await?
                .ok_or_else(|| {
                    AppError::NotFound(format!("Event {} not found", booking.event_id))
                })?;

            apply_override(&mut booking, &event, adjustment, admin_id, Utc::now())?;
            Ok::<_, AppError>(booking_repo::save_booking(&mut tx, &booking).await?)
        }
        .await;
        let booking = DatabaseTransaction::finish(tx, result).await?;

        log::info!(
            "Wage of booking {} overridden by {} (total {})",
            booking.id,
            admin_id,
            booking.total_amount
        );
        Ok(booking)
    }
}
