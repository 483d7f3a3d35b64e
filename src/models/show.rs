use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};
use strum_macros::{Display, EnumString};
use validator::{Validate, ValidationError};

// Seat Status Enum
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Display, EnumString,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum SeatStatus {
    Available,
    Booked,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Seat {
    pub id: String,
    pub price: Decimal,
    pub status: SeatStatus,
}

impl Seat {
    pub fn new(id: impl Into<String>, price: Decimal) -> Self {
        Seat {
            id: id.into(),
            price,
            status: SeatStatus::Available,
        }
    }

    pub fn is_available(&self) -> bool {
        self.status == SeatStatus::Available
    }
}

/// A screening of one movie in one theater.
///
/// Movie and theater are referenced by id and resolved through the ledger.
/// Every show owns its own seats, keyed by seat id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Show {
    pub id: String,
    pub movie_id: String,
    pub theater_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    pub seats: BTreeMap<String, Seat>,
}

impl Show {
    pub fn new(
        id: impl Into<String>,
        movie_id: impl Into<String>,
        theater_id: impl Into<String>,
        start_time: NaiveDateTime,
        end_time: NaiveDateTime,
        seats: impl IntoIterator<Item = Seat>,
    ) -> Self {
        Show {
            id: id.into(),
            movie_id: movie_id.into(),
            theater_id: theater_id.into(),
            start_time,
            end_time,
            seats: seats
                .into_iter()
                .map(|seat| (seat.id.clone(), seat))
                .collect(),
        }
    }

    pub fn seat(&self, seat_id: &str) -> Option<&Seat> {
        self.seats.get(seat_id)
    }

    pub fn available_seat_ids(&self) -> Vec<String> {
        self.seats
            .values()
            .filter(|seat| seat.is_available())
            .map(|seat| seat.id.clone())
            .collect()
    }
}

fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::new("negative_price")
            .with_message("seat price must not be negative".into()));
    }
    Ok(())
}

fn validate_show_request(request: &ShowRegistrationRequest) -> Result<(), ValidationError> {
    if request.end_time <= request.start_time {
        return Err(ValidationError::new("show_times")
            .with_message("end time must be after start time".into()));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = request.seats.iter().find(|seat| !seen.insert(seat.id.as_str())) {
        let mut err = ValidationError::new("duplicate_seat")
            .with_message("seat ids must be unique within a show".into());
        err.add_param("seat_id".into(), &duplicate.id);
        return Err(err);
    }
    Ok(())
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct SeatRequest {
    #[validate(length(min = 1, message = "seat id must not be empty"))]
    pub id: String,
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
#[validate(schema(function = "validate_show_request"))]
pub struct ShowRegistrationRequest {
    #[validate(length(min = 1, message = "show id must not be empty"))]
    pub id: String,
    #[validate(length(min = 1, message = "movie id must not be empty"))]
    pub movie_id: String,
    #[validate(length(min = 1, message = "theater id must not be empty"))]
    pub theater_id: String,
    pub start_time: NaiveDateTime,
    pub end_time: NaiveDateTime,
    #[validate(nested)]
    pub seats: Vec<SeatRequest>,
}

impl From<ShowRegistrationRequest> for Show {
    fn from(request: ShowRegistrationRequest) -> Self {
        Show::new(
            request.id,
            request.movie_id,
            request.theater_id,
            request.start_time,
            request.end_time,
            request
                .seats
                .into_iter()
                .map(|seat| Seat::new(seat.id, seat.price)),
        )
    }
}

#[derive(Debug, Clone, Deserialize, JsonSchema, Validate)]
pub struct SeatPriceUpdateRequest {
    #[validate(custom(function = "validate_price"))]
    pub price: Decimal,
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AvailableSeatsResponse {
    pub show_id: String,
    pub available_seats: Vec<String>,
}
