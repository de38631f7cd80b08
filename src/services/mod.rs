pub mod access;
pub mod attendance_service;
pub mod auth;
pub mod booking_service;
pub mod capacity;
pub mod event_service;
pub mod lifecycle;
pub mod role_wage_service;
pub mod user_context;
pub mod wage;
pub mod wage_override;

pub use attendance_service::AttendanceService;
pub use booking_service::BookingService;
pub use event_service::EventService;
pub use role_wage_service::RoleWageService;
pub use wage_override::WageOverrideService;
