pub mod bookings;
pub mod events;
pub mod shared;
pub mod wages;
