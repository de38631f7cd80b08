pub mod booking;
pub mod event;
pub mod role_wage;
pub mod user;
