use crate::models::movie::{Movie, MovieRegistrationRequest};
use crate::models::show::{
    AvailableSeatsResponse, Seat, SeatPriceUpdateRequest, Show, ShowRegistrationRequest,
};
use crate::models::theater::{Theater, TheaterRegistrationRequest};
use crate::services::booking_ledger::BookingLedger;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// Register a movie
#[openapi(tag = "Catalog")]
#[post("/movies", format = "json", data = "<request>")]
pub async fn add_movie(
    request: Json<MovieRegistrationRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<Movie>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let movie = Movie::from(request);
    ledger.add_movie(movie.clone());
    Ok(Json(movie))
}

/// List all movies
#[openapi(tag = "Catalog")]
#[get("/movies")]
pub async fn get_movies(ledger: &State<BookingLedger>) -> Json<Vec<Movie>> {
    Json(ledger.get_movies())
}

/// Register a theater
#[openapi(tag = "Catalog")]
#[post("/theaters", format = "json", data = "<request>")]
pub async fn add_theater(
    request: Json<TheaterRegistrationRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<Theater>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let theater = Theater::from(request);
    ledger.add_theater(theater.clone());
    Ok(Json(theater))
}

/// List all theaters with the shows they host
#[openapi(tag = "Catalog")]
#[get("/theaters")]
pub async fn get_theaters(ledger: &State<BookingLedger>) -> Json<Vec<Theater>> {
    Json(ledger.get_theaters())
}

/// Register a show. Its movie and theater must already be registered.
#[openapi(tag = "Catalog")]
#[post("/shows", format = "json", data = "<request>")]
pub async fn add_show(
    request: Json<ShowRegistrationRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<Show>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    if ledger.find_movie(&request.movie_id).is_none() {
        return Err(AppError::NotFound(format!("Movie {}", request.movie_id)));
    }
    if ledger.find_theater(&request.theater_id).is_none() {
        return Err(AppError::NotFound(format!("Theater {}", request.theater_id)));
    }

    let show = Show::from(request);
    ledger.add_show(show.clone());
    Ok(Json(show))
}

/// Get a show with its seat map
#[openapi(tag = "Catalog")]
#[get("/shows/<show_id>")]
pub async fn get_show(
    show_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<Show>, AppError> {
    ledger
        .get_show(&show_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Show {}", show_id)))
}

/// List the seats of a show that can still be booked
#[openapi(tag = "Catalog")]
#[get("/shows/<show_id>/seats")]
pub async fn get_available_seats(
    show_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<AvailableSeatsResponse>, AppError> {
    let available_seats = ledger.available_seats(&show_id)?;
    Ok(Json(AvailableSeatsResponse {
        show_id,
        available_seats,
    }))
}

/// Change the price of one seat
#[openapi(tag = "Catalog")]
#[put("/shows/<show_id>/seats/<seat_id>/price", format = "json", data = "<request>")]
pub async fn set_seat_price(
    show_id: String,
    seat_id: String,
    request: Json<SeatPriceUpdateRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<Seat>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let seat = ledger.set_seat_price(&show_id, &seat_id, request.price)?;
    Ok(Json(seat))
}
