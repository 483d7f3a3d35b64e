#[macro_use]
extern crate rocket;

pub mod models;
pub mod routes;
pub mod services;
pub mod swagger;
pub mod utils;

use rocket::fairing::AdHoc;
use rocket::{Build, Rocket};
use rocket_okapi::openapi_get_routes;
use rocket_okapi::rapidoc::make_rapidoc;
use rocket_okapi::swagger_ui::make_swagger_ui;

use crate::services::booking_ledger::BookingLedger;
use crate::swagger::{rapidoc, swagger_ui};

/// Assemble the HTTP application around an already constructed ledger.
pub fn build_rocket(ledger: BookingLedger) -> Rocket<Build> {
    rocket::build()
        .manage(ledger)
        .mount(
            "/api",
            openapi_get_routes![
                routes::catalog_route::add_movie,
                routes::catalog_route::get_movies,
                routes::catalog_route::add_theater,
                routes::catalog_route::get_theaters,
                routes::catalog_route::add_show,
                routes::catalog_route::get_show,
                routes::catalog_route::get_available_seats,
                routes::catalog_route::set_seat_price,
                routes::user_route::register,
                routes::user_route::get_user,
                routes::user_route::get_history,
                routes::booking_route::book_tickets,
                routes::booking_route::get_booking,
                routes::booking_route::confirm_booking,
                routes::booking_route::cancel_booking,
            ],
        )
        .register(
            "/api",
            catchers![routes::catcher::bad_request, routes::catcher::unprocessable],
        )
        .mount("/swagger", make_swagger_ui(&swagger_ui()))
        .mount("/rapidoc", make_rapidoc(&rapidoc()))
        .attach(AdHoc::on_response("CORS", |_, res| {
            Box::pin(async move {
                res.set_header(rocket::http::Header::new(
                    "Access-Control-Allow-Origin",
                    "*",
                ));
            })
        }))
}
