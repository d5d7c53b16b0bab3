pub mod booking;
pub mod client;
pub mod slot;

pub use booking::{Booking, Court, NewBooking, PaymentMethod, PaymentState};
pub use client::Client;
pub use slot::SlotTime;
