//! Database model definitions

mod availability_window;
mod booking;
mod customer;
mod field;
mod location;
mod maintenance;

pub use availability_window::*;
pub use booking::*;
pub use customer::*;
pub use field::*;
pub use location::*;
pub use maintenance::*;
