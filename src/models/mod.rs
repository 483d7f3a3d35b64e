pub mod booking;
pub mod movie;
pub mod show;
pub mod theater;
pub mod user;
