pub mod booking_route;
pub mod catalog_route;
pub mod catcher;
pub mod user_route;
