use crate::models::booking::BookingHistoryResponse;
use crate::models::user::{RegisterResponse, User, UserRegistrationRequest};
use crate::services::booking_ledger::BookingLedger;
use crate::utils::error::AppError;
use rocket::serde::json::Json;
use rocket::State;
use rocket_okapi::openapi;
use uuid::Uuid;
use validator::Validate;

/// Register a new user
#[openapi(tag = "Users")]
#[post("/users", format = "json", data = "<request>")]
pub async fn register(
    request: Json<UserRegistrationRequest>,
    ledger: &State<BookingLedger>,
) -> Result<Json<RegisterResponse>, AppError> {
    let request = request.into_inner();
    request.validate()?;

    let user_id = Uuid::new_v4().to_string();
    ledger.add_user(User::new(user_id.clone(), request.name, request.email));

    Ok(Json(RegisterResponse {
        user_id,
        status: "success".to_string(),
    }))
}

/// Get a registered user
#[openapi(tag = "Users")]
#[get("/users/<user_id>")]
pub async fn get_user(
    user_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<User>, AppError> {
    ledger
        .get_user(&user_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("User {}", user_id)))
}

/// Booking history of a user, oldest first
#[openapi(tag = "Users")]
#[get("/users/<user_id>/bookings")]
pub async fn get_history(
    user_id: String,
    ledger: &State<BookingLedger>,
) -> Result<Json<BookingHistoryResponse>, AppError> {
    if ledger.get_user(&user_id).is_none() {
        return Err(AppError::NotFound(format!("User {}", user_id)));
    }

    let bookings = ledger.bookings_for_user(&user_id);
    Ok(Json(BookingHistoryResponse { user_id, bookings }))
}
