#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use movie_booking_system::models::movie::Movie;
use movie_booking_system::models::show::{Seat, SeatStatus, Show};
use movie_booking_system::models::theater::Theater;
use movie_booking_system::models::user::User;
use movie_booking_system::services::booking_ledger::BookingLedger;
use once_cell::sync::OnceCell;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

static LOGGING: OnceCell<()> = OnceCell::new();

// Prefix every line with the test name so interleaved output stays readable
#[macro_export]
macro_rules! test_println {
    ($test_name:expr, $($arg:tt)*) => {
        println!("[{}] {}", $test_name, format!($($arg)*))
    };
}

// Installs one subscriber per test binary; RUST_LOG=debug shows ledger events
pub fn init_test_logging() {
    LOGGING.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
            )
            .with_test_writer()
            .try_init();
    });
}

pub fn show_time(hour: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 12, 8)
        .unwrap()
        .and_hms_opt(hour, 0, 0)
        .unwrap()
}

pub fn dollars(amount: i64) -> Decimal {
    Decimal::new(amount, 0)
}

pub fn user(id: &str) -> User {
    User::new(id, format!("User {}", id), format!("{}@example.com", id.to_lowercase()))
}

/// Seat ids `A1..A<per_row>`, `B1..` and so on, all at `price`.
pub fn seat_grid(rows: &[char], per_row: u32, price: Decimal) -> Vec<Seat> {
    rows.iter()
        .flat_map(|&row| (1..=per_row).map(move |n| Seat::new(format!("{}{}", row, n), price)))
        .collect()
}

/// A ledger with movie M1 in theater T1 and show S1 holding `{A1: $10, A2: $12}`.
pub fn ledger_with_small_show() -> BookingLedger {
    let ledger = BookingLedger::default();
    register_catalog(
        &ledger,
        vec![Seat::new("A1", dollars(10)), Seat::new("A2", dollars(12))],
    );
    ledger.add_user(user("U1"));
    ledger.add_user(user("U2"));
    ledger
}

pub fn register_catalog(ledger: &BookingLedger, seats: Vec<Seat>) {
    ledger.add_movie(Movie::new("M1", "Arrival", "First contact", 116));
    ledger.add_theater(Theater::new("T1", "Odeon", "Leicester Square"));
    ledger.add_show(Show::new(
        "S1",
        "M1",
        "T1",
        show_time(19),
        show_time(21),
        seats,
    ));
}

pub fn seat_status(ledger: &BookingLedger, show_id: &str, seat_id: &str) -> SeatStatus {
    ledger
        .get_show(show_id)
        .and_then(|show| show.seat(seat_id).map(|seat| seat.status))
        .expect("seat should exist")
}

pub fn booked_seat_count(ledger: &BookingLedger, show_id: &str) -> usize {
    ledger
        .get_show(show_id)
        .map(|show| {
            show.seats
                .values()
                .filter(|seat| seat.status == SeatStatus::Booked)
                .count()
        })
        .unwrap_or(0)
}
