use crate::models::booking::{Booking, BookingStatus};
use crate::models::movie::Movie;
use crate::models::show::{Seat, SeatStatus, Show};
use crate::models::theater::Theater;
use crate::models::user::User;
use crate::services::booking_id::BookingIdGenerator;
use crate::utils::config::{AppConfig, DEFAULT_BOOKING_ID_PREFIX};
use crate::utils::error::{AppError, AppResult};
use rust_decimal::Decimal;
use std::collections::{HashMap, HashSet};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, info};

#[derive(Debug, Default)]
struct LedgerState {
    movies: Vec<Movie>,
    theaters: Vec<Theater>,
    shows: HashMap<String, Show>,
    users: HashMap<String, User>,
    bookings: HashMap<String, Booking>,
}

/// Owns the catalog and every booking, and runs the booking lifecycle.
///
/// All state sits behind one mutex that each operation holds for its whole
/// duration, reads included. Nothing awaits or does I/O while holding it.
/// Callers get snapshots; no reference into the ledger escapes the lock.
#[derive(Debug)]
pub struct BookingLedger {
    state: Mutex<LedgerState>,
    booking_ids: BookingIdGenerator,
}

impl Default for BookingLedger {
    fn default() -> Self {
        BookingLedger::new(DEFAULT_BOOKING_ID_PREFIX)
    }
}

impl BookingLedger {
    pub fn new(booking_id_prefix: impl Into<String>) -> Self {
        BookingLedger {
            state: Mutex::new(LedgerState::default()),
            booking_ids: BookingIdGenerator::new(booking_id_prefix),
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        BookingLedger::new(config.booking_id_prefix.clone())
    }

    // No code path panics while holding the lock, so a poisoned state is still consistent
    fn state(&self) -> MutexGuard<'_, LedgerState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add_movie(&self, movie: Movie) {
        debug!(movie_id = %movie.id, title = %movie.title, "registering movie");
        self.state().movies.push(movie);
    }

    pub fn add_theater(&self, theater: Theater) {
        debug!(theater_id = %theater.id, name = %theater.name, "registering theater");
        self.state().theaters.push(theater);
    }

    // Last write wins for a duplicate show id
    pub fn add_show(&self, show: Show) {
        let mut guard = self.state();
        let state = &mut *guard;

        // A replacement that moves the show to another theater unlinks it from the old one
        if let Some(previous) = state.shows.get(&show.id) {
            if previous.theater_id != show.theater_id {
                if let Some(theater) = state
                    .theaters
                    .iter_mut()
                    .find(|theater| theater.id == previous.theater_id)
                {
                    theater.shows.retain(|id| *id != show.id);
                }
            }
        }

        if let Some(theater) = state
            .theaters
            .iter_mut()
            .find(|theater| theater.id == show.theater_id)
        {
            if !theater.hosts(&show.id) {
                theater.shows.push(show.id.clone());
            }
        }

        debug!(
            show_id = %show.id,
            movie_id = %show.movie_id,
            theater_id = %show.theater_id,
            seats = show.seats.len(),
            "registering show"
        );
        state.shows.insert(show.id.clone(), show);
    }

    pub fn add_user(&self, user: User) {
        debug!(user_id = %user.id, "registering user");
        self.state().users.insert(user.id.clone(), user);
    }

    pub fn get_movies(&self) -> Vec<Movie> {
        self.state().movies.clone()
    }

    pub fn get_theaters(&self) -> Vec<Theater> {
        self.state().theaters.clone()
    }

    pub fn get_show(&self, show_id: &str) -> Option<Show> {
        self.state().shows.get(show_id).cloned()
    }

    pub fn get_user(&self, user_id: &str) -> Option<User> {
        self.state().users.get(user_id).cloned()
    }

    pub fn get_booking(&self, booking_id: &str) -> Option<Booking> {
        self.state().bookings.get(booking_id).cloned()
    }

    pub fn find_movie(&self, movie_id: &str) -> Option<Movie> {
        self.state()
            .movies
            .iter()
            .find(|movie| movie.id == movie_id)
            .cloned()
    }

    pub fn find_theater(&self, theater_id: &str) -> Option<Theater> {
        self.state()
            .theaters
            .iter()
            .find(|theater| theater.id == theater_id)
            .cloned()
    }

    /// Ids of the show's seats that can still be booked, in seat id order.
    pub fn available_seats(&self, show_id: &str) -> AppResult<Vec<String>> {
        self.state()
            .shows
            .get(show_id)
            .map(Show::available_seat_ids)
            .ok_or_else(|| AppError::NotFound(format!("Show {}", show_id)))
    }

    /// Bookings of one user, in the order they were made.
    pub fn bookings_for_user(&self, user_id: &str) -> Vec<Booking> {
        let mut bookings: Vec<Booking> = self
            .state()
            .bookings
            .values()
            .filter(|booking| booking.user_id == user_id)
            .cloned()
            .collect();
        bookings.sort_by_key(|booking| booking.sequence);
        bookings
    }

    /// Changes the price of one seat. Existing bookings keep the price they were made at.
    pub fn set_seat_price(&self, show_id: &str, seat_id: &str, price: Decimal) -> AppResult<Seat> {
        let mut state = self.state();
        let show = state
            .shows
            .get_mut(show_id)
            .ok_or_else(|| AppError::NotFound(format!("Show {}", show_id)))?;
        let seat = show
            .seats
            .get_mut(seat_id)
            .ok_or_else(|| AppError::NotFound(format!("Seat {} in show {}", seat_id, show_id)))?;

        debug!(show_id, seat_id, old = %seat.price, new = %price, "updating seat price");
        seat.price = price;
        Ok(seat.clone())
    }

    /// Books every seat in `seat_ids` for `user`, or none of them.
    ///
    /// On success the seats are BOOKED and a PENDING booking priced at the sum
    /// of the seat prices is stored and returned. If any seat is missing from
    /// the show or already booked, nothing changes and `SeatUnavailable` is
    /// returned.
    pub fn book_tickets<S: AsRef<str>>(
        &self,
        user: &User,
        show_id: &str,
        seat_ids: &[S],
    ) -> AppResult<Booking> {
        let seat_ids: Vec<&str> = seat_ids.iter().map(|id| id.as_ref()).collect();
        validate_selection(&seat_ids)?;

        let mut guard = self.state();
        let state = &mut *guard;

        let show = state
            .shows
            .get_mut(show_id)
            .ok_or_else(|| AppError::NotFound(format!("Show {}", show_id)))?;

        if let Err(err) = ensure_seats_available(show, &seat_ids) {
            debug!(user_id = %user.id, show_id, error = %err, "booking rejected");
            return Err(err);
        }

        let seats = mark_seats_booked(show, &seat_ids);
        let total_price: Decimal = seats.iter().map(|seat| seat.price).sum();

        let issued = self.booking_ids.next_id();
        let booking = Booking {
            id: issued.id,
            sequence: issued.sequence,
            user_id: user.id.clone(),
            show_id: show_id.to_string(),
            seats,
            total_price,
            status: BookingStatus::Pending,
        };
        state.bookings.insert(booking.id.clone(), booking.clone());

        info!(
            booking_id = %booking.id,
            user_id = %booking.user_id,
            show_id,
            seats = booking.seats.len(),
            total_price = %booking.total_price,
            "booking created"
        );
        Ok(booking)
    }

    /// Moves a PENDING booking to CONFIRMED.
    pub fn confirm_booking(&self, booking_id: &str) -> AppResult<Booking> {
        let mut state = self.state();
        let booking = state
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;

        if booking.status != BookingStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "booking {} is {}, only PENDING bookings can be confirmed",
                booking_id, booking.status
            )));
        }

        booking.status = BookingStatus::Confirmed;
        info!(booking_id, "booking confirmed");
        Ok(booking.clone())
    }

    /// Cancels a booking and hands its seats back to the show.
    ///
    /// Cancelling an already cancelled booking changes nothing and succeeds.
    pub fn cancel_booking(&self, booking_id: &str) -> AppResult<Booking> {
        let mut guard = self.state();
        let state = &mut *guard;

        let booking = state
            .bookings
            .get_mut(booking_id)
            .ok_or_else(|| AppError::NotFound(format!("Booking {}", booking_id)))?;

        if booking.status == BookingStatus::Cancelled {
            debug!(booking_id, "booking already cancelled");
            return Ok(booking.clone());
        }

        booking.status = BookingStatus::Cancelled;
        let cancelled = booking.clone();

        let released = match state.shows.get_mut(&cancelled.show_id) {
            Some(show) => release_seats(show, &cancelled, &state.bookings),
            None => 0,
        };

        info!(booking_id, released, "booking cancelled");
        Ok(cancelled)
    }
}

fn validate_selection(seat_ids: &[&str]) -> AppResult<()> {
    if seat_ids.is_empty() {
        return Err(AppError::ValidationError(
            "at least one seat must be selected".into(),
        ));
    }

    let mut seen = HashSet::new();
    if let Some(duplicate) = seat_ids.iter().find(|id| !seen.insert(**id)) {
        return Err(AppError::ValidationError(format!(
            "seat {} is selected more than once",
            duplicate
        )));
    }
    Ok(())
}

fn ensure_seats_available(show: &Show, seat_ids: &[&str]) -> AppResult<()> {
    for seat_id in seat_ids {
        match show.seat(seat_id) {
            None => {
                return Err(AppError::SeatUnavailable(format!(
                    "seat {} does not exist in show {}",
                    seat_id, show.id
                )))
            }
            Some(seat) if !seat.is_available() => {
                return Err(AppError::SeatUnavailable(format!(
                    "seat {} is already booked",
                    seat_id
                )))
            }
            Some(_) => {}
        }
    }
    Ok(())
}

// Seats were checked under the same lock, so every id resolves
fn mark_seats_booked(show: &mut Show, seat_ids: &[&str]) -> Vec<Seat> {
    let mut booked = Vec::with_capacity(seat_ids.len());
    for seat_id in seat_ids {
        if let Some(seat) = show.seats.get_mut(*seat_id) {
            seat.status = SeatStatus::Booked;
            booked.push(seat.clone());
        }
    }
    booked
}

// A replaced show may hand the same seat id to a newer live booking; leave those booked
fn release_seats(show: &mut Show, cancelled: &Booking, bookings: &HashMap<String, Booking>) -> usize {
    let held_elsewhere: HashSet<&str> = bookings
        .values()
        .filter(|other| other.status.holds_seats() && other.show_id == show.id)
        .flat_map(|other| other.seat_ids())
        .collect();

    let mut released = 0;
    for seat_id in cancelled.seat_ids() {
        if held_elsewhere.contains(seat_id) {
            continue;
        }
        if let Some(seat) = show.seats.get_mut(seat_id) {
            if seat.status == SeatStatus::Booked {
                seat.status = SeatStatus::Available;
                released += 1;
            }
        }
    }
    released
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};

    fn at(hour: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 12, 8)
            .unwrap()
            .and_hms_opt(hour, 0, 0)
            .unwrap()
    }

    fn ledger_with_show() -> BookingLedger {
        let ledger = BookingLedger::default();
        ledger.add_movie(Movie::new("M1", "Arrival", "First contact", 116));
        ledger.add_theater(Theater::new("T1", "Odeon", "Leicester Square"));
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T1",
            at(19),
            at(21),
            vec![
                Seat::new("A1", Decimal::new(10, 0)),
                Seat::new("A2", Decimal::new(12, 0)),
                Seat::new("A3", Decimal::new(15, 0)),
            ],
        ));
        ledger
    }

    fn seat_status(ledger: &BookingLedger, seat_id: &str) -> SeatStatus {
        ledger.get_show("S1").unwrap().seats[seat_id].status
    }

    #[test]
    fn add_show_links_the_theater_once() {
        let ledger = ledger_with_show();
        let show = ledger.get_show("S1").unwrap();
        ledger.add_show(show);

        let theaters = ledger.get_theaters();
        assert_eq!(theaters[0].shows, vec!["S1".to_string()]);
    }

    #[test]
    fn add_show_overwrites_duplicate_ids() {
        let ledger = ledger_with_show();
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T1",
            at(22),
            at(23),
            vec![Seat::new("B1", Decimal::new(9, 0))],
        ));

        let show = ledger.get_show("S1").unwrap();
        assert_eq!(show.start_time, at(22));
        assert_eq!(show.seats.len(), 1);
    }

    #[test]
    fn replacing_show_in_another_theater_moves_the_link() {
        let ledger = ledger_with_show();
        ledger.add_theater(Theater::new("T2", "Prince Charles", "Leicester Place"));
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T2",
            at(19),
            at(21),
            vec![Seat::new("A1", Decimal::new(10, 0))],
        ));

        let theaters = ledger.get_theaters();
        assert!(theaters[0].shows.is_empty());
        assert_eq!(theaters[1].shows, vec!["S1".to_string()]);
        assert_eq!(ledger.get_show("S1").unwrap().theater_id, "T2");
    }

    #[test]
    fn snapshots_do_not_observe_later_mutation() {
        let ledger = ledger_with_show();
        let movies = ledger.get_movies();
        ledger.add_movie(Movie::new("M2", "Heat", "", 170));

        assert_eq!(movies.len(), 1);
        assert_eq!(ledger.get_movies().len(), 2);
    }

    #[test]
    fn booking_marks_only_selected_seats() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");

        let booking = ledger.book_tickets(&user, "S1", &["A1", "A2"]).unwrap();

        assert_eq!(booking.status, BookingStatus::Pending);
        assert_eq!(booking.total_price, Decimal::new(22, 0));
        assert!(booking.id.starts_with("BKG"));
        assert_eq!(seat_status(&ledger, "A1"), SeatStatus::Booked);
        assert_eq!(seat_status(&ledger, "A2"), SeatStatus::Booked);
        assert_eq!(seat_status(&ledger, "A3"), SeatStatus::Available);
    }

    #[test]
    fn missing_seat_aborts_without_side_effects() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");

        let err = ledger.book_tickets(&user, "S1", &["A1", "Z9"]).unwrap_err();

        assert!(matches!(err, AppError::SeatUnavailable(_)));
        assert_eq!(seat_status(&ledger, "A1"), SeatStatus::Available);
        assert!(ledger.bookings_for_user("U1").is_empty());
    }

    #[test]
    fn unknown_show_is_not_found() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");

        let err = ledger.book_tickets(&user, "S9", &["A1"]).unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn empty_or_repeated_selection_is_rejected() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let none: [&str; 0] = [];

        assert!(matches!(
            ledger.book_tickets(&user, "S1", &none),
            Err(AppError::ValidationError(_))
        ));
        assert!(matches!(
            ledger.book_tickets(&user, "S1", &["A1", "A1"]),
            Err(AppError::ValidationError(_))
        ));
        assert_eq!(seat_status(&ledger, "A1"), SeatStatus::Available);
    }

    #[test]
    fn confirm_only_from_pending() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let booking = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();

        let confirmed = ledger.confirm_booking(&booking.id).unwrap();
        assert_eq!(confirmed.status, BookingStatus::Confirmed);

        let err = ledger.confirm_booking(&booking.id).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));

        let err = ledger.confirm_booking("BKG-missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn cancelled_booking_cannot_be_confirmed() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let booking = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();
        ledger.cancel_booking(&booking.id).unwrap();

        let err = ledger.confirm_booking(&booking.id).unwrap_err();
        assert!(matches!(err, AppError::InvalidTransition(_)));
    }

    #[test]
    fn cancel_releases_seats_and_is_idempotent() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let booking = ledger.book_tickets(&user, "S1", &["A1", "A2"]).unwrap();

        let cancelled = ledger.cancel_booking(&booking.id).unwrap();
        assert_eq!(cancelled.status, BookingStatus::Cancelled);
        assert_eq!(seat_status(&ledger, "A1"), SeatStatus::Available);
        assert_eq!(seat_status(&ledger, "A2"), SeatStatus::Available);

        let again = ledger.cancel_booking(&booking.id).unwrap();
        assert_eq!(again, cancelled);

        let err = ledger.cancel_booking("BKG-missing").unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[test]
    fn cancel_leaves_seats_held_by_a_replacement_show_booking() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let old = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();

        // Replace the show; A1 is fresh again and gets booked by someone else
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T1",
            at(19),
            at(21),
            vec![Seat::new("A1", Decimal::new(10, 0))],
        ));
        let other = User::new("U2", "Grace", "grace@example.com");
        ledger.book_tickets(&other, "S1", &["A1"]).unwrap();

        ledger.cancel_booking(&old.id).unwrap();
        assert_eq!(seat_status(&ledger, "A1"), SeatStatus::Booked);
    }

    #[test]
    fn price_change_does_not_touch_existing_booking() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let booking = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();

        let seat = ledger.set_seat_price("S1", "A1", Decimal::new(99, 0)).unwrap();
        assert_eq!(seat.price, Decimal::new(99, 0));

        let stored = ledger.get_booking(&booking.id).unwrap();
        assert_eq!(stored.total_price, Decimal::new(10, 0));
        assert_eq!(stored.seats[0].price, Decimal::new(10, 0));

        assert!(matches!(
            ledger.set_seat_price("S1", "Z9", Decimal::ONE),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn available_seats_and_history() {
        let ledger = ledger_with_show();
        let user = User::new("U1", "Ada", "ada@example.com");
        let first = ledger.book_tickets(&user, "S1", &["A2"]).unwrap();
        let second = ledger.book_tickets(&user, "S1", &["A3"]).unwrap();

        assert_eq!(ledger.available_seats("S1").unwrap(), vec!["A1".to_string()]);
        assert!(matches!(ledger.available_seats("S9"), Err(AppError::NotFound(_))));

        let history: Vec<String> = ledger
            .bookings_for_user("U1")
            .into_iter()
            .map(|booking| booking.id)
            .collect();
        assert_eq!(history, vec![first.id, second.id]);
        assert!(ledger.bookings_for_user("U2").is_empty());
    }

    #[test]
    fn history_follows_issue_order_past_counter_padding() {
        let ledger = BookingLedger {
            state: Mutex::new(LedgerState::default()),
            booking_ids: BookingIdGenerator::starting_after("BKG", 999_998),
        };
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T1",
            at(19),
            at(21),
            vec![
                Seat::new("A1", Decimal::new(10, 0)),
                Seat::new("A2", Decimal::new(12, 0)),
            ],
        ));
        let user = User::new("U1", "Ada", "ada@example.com");
        let first = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();
        let second = ledger.book_tickets(&user, "S1", &["A2"]).unwrap();
        assert_eq!((first.sequence, second.sequence), (999_999, 1_000_000));

        let history: Vec<u64> = ledger
            .bookings_for_user("U1")
            .into_iter()
            .map(|booking| booking.sequence)
            .collect();
        assert_eq!(history, vec![999_999, 1_000_000]);
    }

    #[test]
    fn configured_prefix_is_used() {
        let config = AppConfig {
            booking_id_prefix: "TKT".into(),
            ..AppConfig::default()
        };
        let ledger = BookingLedger::from_config(&config);
        ledger.add_show(Show::new(
            "S1",
            "M1",
            "T1",
            at(19),
            at(21),
            vec![Seat::new("A1", Decimal::new(10, 0))],
        ));
        let user = User::new("U1", "Ada", "ada@example.com");

        let booking = ledger.book_tickets(&user, "S1", &["A1"]).unwrap();
        assert!(booking.id.starts_with("TKT"));
        assert_eq!(booking.id.len(), "TKT".len() + 14 + 6);
    }
}
