//! Event state machine and the field rules for creating and editing events.

use chrono::NaiveDate;

use crate::database::models::{
    CreateEventInput, Event, EventStatus, LifecycleAction, RolePool, UpdateEventInput,
};
use crate::error::AppError;

impl EventStatus {
    /// The status an event ends up in after `action`, or `InvalidTransition`.
    pub fn apply(self, action: LifecycleAction) -> Result<EventStatus, AppError> {
        use EventStatus::*;
        use LifecycleAction::*;

        match (self, action) {
            (Upcoming, Start) => Ok(Ongoing),
            (Upcoming, Cancel) => Ok(Cancelled),
            (Upcoming, Edit | Delete) => Ok(Upcoming),
            (Ongoing, Complete) => Ok(Completed),
            (Upcoming, Complete)
            | (Ongoing, Start | Cancel | Edit | Delete)
            | (Completed | Cancelled, Start | Complete | Cancel | Edit | Delete) => {
                Err(AppError::InvalidTransition { from: self, action })
            }
        }
    }
}

fn required_text(field: &str, value: &str) -> Result<String, AppError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(AppError::validation(format!("{} is required", field)));
    }
    Ok(value.to_string())
}

fn optional_link(value: Option<String>) -> Option<String> {
    value
        .map(|link| link.trim().to_string())
        .filter(|link| !link.is_empty())
}

fn check_not_past(date: NaiveDate, today: NaiveDate) -> Result<(), AppError> {
    if date < today {
        return Err(AppError::validation("Event date cannot be in the past"));
    }
    Ok(())
}

/// Upper bound on a single role pool.
pub const MAX_POOL_SIZE: i32 = 10_000;

fn check_count(role: RolePool, count: i32) -> Result<(), AppError> {
    if count < 0 {
        return Err(AppError::validation(format!(
            "Required {} count cannot be negative",
            role
        )));
    }
    if count > MAX_POOL_SIZE {
        return Err(AppError::validation(format!(
            "Required {} count cannot exceed {}",
            role, MAX_POOL_SIZE
        )));
    }
    Ok(())
}

/// Validates a create request and applies the dependent-field rules.
pub fn normalize_create(
    mut input: CreateEventInput,
    today: NaiveDate,
) -> Result<CreateEventInput, AppError> {
    input.name = required_text("Event name", &input.name)?;
    input.work_type = required_text("Work type", &input.work_type)?;
    input.location_link = optional_link(input.location_link);
    check_not_past(input.event_date, today)?;

    let counts = [
        (RolePool::Captain, input.required_captains),
        (RolePool::SubCaptain, input.required_sub_captains),
        (RolePool::MainBoy, input.required_main_boys),
        (RolePool::JuniorBoy, input.required_juniors),
    ];
    for (role, count) in counts {
        check_count(role, count)?;
    }
    if counts.iter().map(|(_, count)| i64::from(*count)).sum::<i64>() == 0 {
        return Err(AppError::validation("At least one worker is required"));
    }

    if input.extra_wage_amount < 0 {
        return Err(AppError::validation("Extra wage amount cannot be negative"));
    }
    if !input.long_work {
        input.extra_wage_amount = 0;
    }

    if !input.transport_provided {
        input.transport_type = None;
    } else if input.transport_type.is_none() {
        return Err(AppError::validation(
            "Transport type is required when transport is provided",
        ));
    }

    Ok(input)
}

/// Applies a partial edit to an upcoming, locked event.
///
/// Pool sizes may not drop below what is already booked. An edit that leaves
/// the event unchanged fails with `NoChanges`.
pub fn apply_update(
    event: &mut Event,
    input: UpdateEventInput,
    today: NaiveDate,
) -> Result<(), AppError> {
    event.status.apply(LifecycleAction::Edit)?;

    let mut edited = event.clone();

    if let Some(name) = input.name {
        edited.name = required_text("Event name", &name)?;
    }
    if let Some(work_type) = input.work_type {
        edited.work_type = required_text("Work type", &work_type)?;
    }
    if let Some(date) = input.event_date {
        if date != event.event_date {
            check_not_past(date, today)?;
        }
        edited.event_date = date;
    }
    if let Some(slot) = input.time_slot {
        edited.time_slot = slot;
    }
    if let Some(time) = input.reporting_time {
        edited.reporting_time = time;
    }
    if input.location_link.is_some() {
        edited.location_link = optional_link(input.location_link);
    }

    let resizes = [
        (RolePool::Captain, input.required_captains),
        (RolePool::SubCaptain, input.required_sub_captains),
        (RolePool::MainBoy, input.required_main_boys),
        (RolePool::JuniorBoy, input.required_juniors),
    ];
    for (role, new_required) in resizes {
        let Some(new_required) = new_required else {
            continue;
        };
        check_count(role, new_required)?;
        if !edited.resize(role, new_required) {
            return Err(AppError::validation(format!(
                "Required {} count cannot be lower than the {} already booked",
                role,
                edited.booked(role)
            )));
        }
    }
    if edited.total_required() == 0 {
        return Err(AppError::validation("At least one worker is required"));
    }

    if let Some(long_work) = input.long_work {
        edited.long_work = long_work;
    }
    if let Some(extra) = input.extra_wage_amount {
        if extra < 0 {
            return Err(AppError::validation("Extra wage amount cannot be negative"));
        }
        edited.extra_wage_amount = extra;
    }
    if !edited.long_work {
        edited.extra_wage_amount = 0;
    }

    if let Some(provided) = input.transport_provided {
        edited.transport_provided = provided;
    }
    if input.transport_type.is_some() {
        edited.transport_type = input.transport_type;
    }
    if !edited.transport_provided {
        edited.transport_type = None;
    } else if edited.transport_type.is_none() {
        return Err(AppError::validation(
            "Transport type is required when transport is provided",
        ));
    }

    if edited == *event {
        return Err(AppError::NoChanges);
    }

    *event = edited;
    Ok(())
}
