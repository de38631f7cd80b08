use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::macros::string_enum;

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum EventStatus {
        Upcoming => "upcoming",
        Ongoing => "ongoing",
        Completed => "completed",
        Cancelled => "cancelled",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TimeSlot {
        Morning => "morning",
        Lunch => "lunch",
        Night => "night",
    }
}

string_enum! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum TransportType {
        Bus => "bus",
        Train => "train",
    }
}

string_enum! {
    /// A requested lifecycle move. Kept separate from the target status so that
    /// every (status, action) pair is matched explicitly.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
    pub enum LifecycleAction {
        Start => "start",
        Complete => "complete",
        Cancel => "cancel",
        Edit => "edit",
        Delete => "delete",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: Uuid,
    pub name: String,
    pub event_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub reporting_time: NaiveTime,
    pub work_type: String,
    pub location_link: Option<String>,

    pub required_captains: i32,
    pub required_sub_captains: i32,
    pub required_main_boys: i32,
    pub required_juniors: i32,

    pub remaining_captains: i32,
    pub remaining_sub_captains: i32,
    pub remaining_main_boys: i32,
    pub remaining_juniors: i32,

    pub long_work: bool,
    pub extra_wage_amount: i64,
    pub transport_provided: bool,
    pub transport_type: Option<TransportType>,

    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventInput {
    pub name: String,
    pub event_date: NaiveDate,
    pub time_slot: TimeSlot,
    pub reporting_time: NaiveTime,
    pub work_type: String,
    pub location_link: Option<String>,
    #[serde(default)]
    pub required_captains: i32,
    #[serde(default)]
    pub required_sub_captains: i32,
    #[serde(default)]
    pub required_main_boys: i32,
    #[serde(default)]
    pub required_juniors: i32,
    #[serde(default)]
    pub long_work: bool,
    #[serde(default)]
    pub extra_wage_amount: i64,
    #[serde(default)]
    pub transport_provided: bool,
    pub transport_type: Option<TransportType>,
}

/// Partial edit of an upcoming event. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateEventInput {
    pub name: Option<String>,
    pub event_date: Option<NaiveDate>,
    pub time_slot: Option<TimeSlot>,
    pub reporting_time: Option<NaiveTime>,
    pub work_type: Option<String>,
    pub location_link: Option<String>,
    pub required_captains: Option<i32>,
    pub required_sub_captains: Option<i32>,
    pub required_main_boys: Option<i32>,
    pub required_juniors: Option<i32>,
    pub long_work: Option<bool>,
    pub extra_wage_amount: Option<i64>,
    pub transport_provided: Option<bool>,
    pub transport_type: Option<TransportType>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EventQuery {
    pub status: Option<EventStatus>,
    pub date: Option<NaiveDate>,
}

/// What completing an event did besides flipping the status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompletionReport {
    pub event: Event,
    pub bookings_completed: u64,
    pub workers_credited: u64,
}
