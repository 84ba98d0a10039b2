//! Request and response schemas

pub mod availability;
pub mod booking;
pub mod customer;
pub mod field;
pub mod location;
pub mod maintenance;
