use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::event::{EventStatus, TimeSlot};
use super::macros::string_enum;
use super::user::RolePool;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum BookingStatus {
        Booked => "booked",
        Present => "present",
        Absent => "absent",
        Completed => "completed",
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub event_id: Uuid,
    pub user_id: Uuid,
    pub role: RolePool,
    pub status: BookingStatus,
    /// Standard wage at booking time. Never rewritten.
    pub wage_snapshot: i64,
    pub base_amount: i64,
    pub extra_amount: i64,
    pub ta_amount: i64,
    pub bonus_amount: i64,
    pub fine_amount: i64,
    pub total_amount: i64,
    pub overridden_at: Option<DateTime<Utc>>,
    pub overridden_by: Option<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The three amounts an operator may set on a booking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WageAdjustment {
    #[serde(default)]
    pub ta_amount: i64,
    #[serde(default)]
    pub bonus_amount: i64,
    #[serde(default)]
    pub fine_amount: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceInput {
    pub status: BookingStatus,
    #[serde(flatten)]
    pub adjustment: WageAdjustment,
}

/// Which of a worker's own bookings to list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingScope {
    /// Events still upcoming or ongoing.
    #[default]
    Active,
    Completed,
    Today,
    Upcoming,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BookingScopeQuery {
    #[serde(default)]
    pub scope: BookingScope,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventBookingFilter {
    pub status: Option<BookingStatus>,
    pub name: Option<String>,
}

/// A worker's booking together with the event it is for.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserBookingRow {
    pub booking_id: Uuid,
    pub event_id: Uuid,
    pub event_name: String,
    pub event_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub reporting_time: NaiveTime,
    pub work_type: String,
    pub location_link: Option<String>,
    pub event_status: EventStatus,
    pub role: RolePool,
    pub status: BookingStatus,
    pub base_amount: i64,
    pub extra_amount: i64,
    pub ta_amount: i64,
    pub bonus_amount: i64,
    pub fine_amount: i64,
    pub total_amount: i64,
    pub created_at: DateTime<Utc>,
}

/// One line of an event's attendance sheet.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRow {
    pub booking_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub role: RolePool,
    pub status: BookingStatus,
    pub base_amount: i64,
    pub extra_amount: i64,
    pub ta_amount: i64,
    pub bonus_amount: i64,
    pub fine_amount: i64,
    pub total_amount: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventWageSummary {
    pub total_workers: i64,
    pub base_total: i64,
    pub extra_total: i64,
    pub ta_total: i64,
    pub bonus_total: i64,
    pub fine_total: i64,
    pub grand_total: i64,
}
