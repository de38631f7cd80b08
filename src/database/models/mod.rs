pub mod booking;
pub mod event;
pub mod macros;
pub mod role_wage;
pub mod user;

// Re-export all models for easy importing
pub use booking::*;
pub use event::*;
pub use role_wage::*;
pub use user::*;
