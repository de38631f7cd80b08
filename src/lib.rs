pub mod config;
pub mod database;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod services;

#[cfg(test)]
pub(crate) mod test_utils;

pub use config::Config;
pub use services::{
    AttendanceService, BookingService, EventService, RoleWageService, WageOverrideService,
};

use sqlx::PgPool;

pub struct AppState {
    pub event_service: EventService,
    pub booking_service: BookingService,
    pub attendance_service: AttendanceService,
    pub wage_override_service: WageOverrideService,
    pub role_wage_service: RoleWageService,
}

impl AppState {
    pub fn new(pool: PgPool, config: &Config) -> Self {
        Self {
            event_service: EventService::new(pool.clone(), config.same_day_exclusive_booking),
            booking_service: BookingService::new(pool.clone(), config.same_day_exclusive_booking),
            attendance_service: AttendanceService::new(pool.clone()),
            wage_override_service: WageOverrideService::new(pool.clone()),
            role_wage_service: RoleWageService::new(pool),
        }
    }
}
