//! Wage arithmetic shared by every writer of booking money fields.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::database::models::{Booking, BookingStatus, Event, EventStatus, WageAdjustment};
use crate::error::AppError;

/// `max(0, base + extra + ta + bonus - fine)`.
pub fn compute_total(base: i64, extra: i64, ta: i64, bonus: i64, fine: i64) -> i64 {
    base.saturating_add(extra)
        .saturating_add(ta)
        .saturating_add(bonus)
        .saturating_sub(fine)
        .max(0)
}

impl WageAdjustment {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.ta_amount < 0 || self.bonus_amount < 0 || self.fine_amount < 0 {
            return Err(AppError::validation(
                "TA, bonus and fine amounts cannot be negative",
            ));
        }
        Ok(())
    }

    /// Input check for an attendance update, run before any row is locked.
    pub fn validate_for(&self, status: BookingStatus) -> Result<(), AppError> {
        self.validate()?;
        if status == BookingStatus::Absent && !self.is_zero() {
            return Err(AppError::validation(
                "Absent bookings cannot carry TA, bonus or fine",
            ));
        }
        Ok(())
    }

    pub fn is_zero(&self) -> bool {
        self.ta_amount == 0 && self.bonus_amount == 0 && self.fine_amount == 0
    }
}

impl Booking {
    fn recompute_total(&mut self) {
        self.total_amount = compute_total(
            self.base_amount,
            self.extra_amount,
            self.ta_amount,
            self.bonus_amount,
            self.fine_amount,
        );
    }

    fn zero_money(&mut self) {
        self.base_amount = 0;
        self.extra_amount = 0;
        self.ta_amount = 0;
        self.bonus_amount = 0;
        self.fine_amount = 0;
        self.total_amount = 0;
    }
}

/// Sets the booking's status and rebuilds its money fields from the event.
/// The event must be ongoing.
pub fn apply_attendance(
    booking: &mut Booking,
    event: &Event,
    status: BookingStatus,
    adjustment: WageAdjustment,
) -> Result<(), AppError> {
    adjustment.validate_for(status)?;
    if event.status != EventStatus::Ongoing {
        return Err(AppError::EventNotOngoing);
    }

    booking.status = status;
    match status {
        BookingStatus::Absent => booking.zero_money(),
        BookingStatus::Booked | BookingStatus::Present | BookingStatus::Completed => {
            booking.base_amount = booking.wage_snapshot;
            booking.extra_amount = if event.long_work {
                event.extra_wage_amount
            } else {
                0
            };
            booking.ta_amount = adjustment.ta_amount;
            booking.bonus_amount = adjustment.bonus_amount;
            booking.fine_amount = adjustment.fine_amount;
            booking.recompute_total();
        }
    }

    Ok(())
}

/// One-time correction of TA, bonus and fine on a completed event.
/// Base and extra are kept as they are.
pub fn apply_override(
    booking: &mut Booking,
    event: &Event,
    adjustment: WageAdjustment,
    overridden_by: Uuid,
    at: DateTime<Utc>,
) -> Result<(), AppError> {
    adjustment.validate()?;
    if event.status != EventStatus::Completed {
        return Err(AppError::EventNotCompleted);
    }
    match booking.status {
        BookingStatus::Absent => return Err(AppError::BookingAbsent),
        BookingStatus::Booked | BookingStatus::Present | BookingStatus::Completed => {}
    }
    if booking.overridden_at.is_some() {
        return Err(AppError::AlreadyOverridden);
    }

    booking.ta_amount = adjustment.ta_amount;
    booking.bonus_amount = adjustment.bonus_amount;
    booking.fine_amount = adjustment.fine_amount;
    booking.recompute_total();
    booking.overridden_at = Some(at);
    booking.overridden_by = Some(overridden_by);

    Ok(())
}
