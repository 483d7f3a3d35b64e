use crate::models::show::Seat;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};
use validator::Validate;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Cancelled,
}

impl BookingStatus {
    /// Whether the booking still holds its seats.
    pub fn holds_seats(self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Confirmed)
    }
}

/// A seat reservation made through the ledger.
///
/// `seats` and `total_price` are a snapshot taken when the booking was
/// created; later price changes on the show do not reach them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Booking {
    pub id: String,
    // Issue order within the ledger
    pub sequence: u64,
    pub user_id: String,
    pub show_id: String,
    pub seats: Vec<Seat>,
    pub total_price: Decimal,
    pub status: BookingStatus,
}

impl Booking {
    pub fn seat_ids(&self) -> impl Iterator<Item = &str> {
        self.seats.iter().map(|seat| seat.id.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, JsonSchema, Validate)]
pub struct TicketBookingRequest {
    #[validate(length(min = 1, message = "user id must not be empty"))]
    pub user_id: String,
    #[validate(length(min = 1, message = "show id must not be empty"))]
    pub show_id: String,
    #[validate(length(min = 1, message = "at least one seat must be selected"))]
    pub seat_ids: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct BookingHistoryResponse {
    pub user_id: String,
    pub bookings: Vec<Booking>,
}
