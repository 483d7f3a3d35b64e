use crate::models::booking::{Booking, TicketBookingRequest};
use crate::services::booking_ledger::BookingLedger;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use validator::Validate;

/// Book seats of a show for a registered user
#[openapi(tag = "Book")]
#[post("/bookings", format = "json", data = "<request>")]
pub async fn book_tickets(
    request: Json<TicketBookingRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<Booking>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user = ledger
        .get_user(&request.user_id)
        .ok_or_else(|| AppError::NotFound(format!("User {}", request.user_id)))?;

    let booking = ledger.book_tickets(&user, &request.show_id, request.seat_ids.as_slice())?;
    Ok(Json(booking))
}

/// Get a booking
#[openapi(tag = "Book")]
#[get("/bookings/<booking_id>")]
pub async fn get_booking(
    booking_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<Booking>, AppError> {
    ledger
        .get_booking(&booking_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))
}

/// Confirm a pending booking
#[openapi(tag = "Book")]
#[post("/bookings/<booking_id>/confirm")]
pub async fn confirm_booking(
    booking_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<Booking>, AppError> {
    let booking = ledger.confirm_booking(&booking_id)?;
    Ok(Json(booking))
}

/// Cancel a booking and release its seats
#[openapi(tag = "Book")]
#[post("/bookings/<booking_id>/cancel")]
pub async fn cancel_booking(
    booking_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<Booking>, AppError> {
    let booking = ledger.cancel_booking(&booking_id)?;
    Ok(Json(booking))
}
