use crate::models::movie::Movie;
use crate::models::show::{Seat, Show};
use crate::models::theater::Theater;
use crate::services::booking_ledger::BookingLedger;
use chrono::{Duration, Local, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use tracing::info;

const ROWS: [char; 3] = ['A', 'B', 'C'];
const SEATS_PER_ROW: u32 = 8;

// Front row is cheaper, back rows cost more
fn row_price(row: char) -> Decimal {
    match row {
        'A' => Decimal::new(1000, 2),
        'B' => Decimal::new(1250, 2),
        _ => Decimal::new(1500, 2),
    }
}

fn seat_grid() -> Vec<Seat> {
    ROWS.iter()
        .flat_map(|&row| {
            (1..=SEATS_PER_ROW).map(move |number| Seat::new(format!("{}{}", row, number), row_price(row)))
        })
        .collect()
}

fn screening(
    id: &str,
    movie: &Movie,
    theater: &Theater,
    start_time: NaiveDateTime,
) -> Show {
    let end_time = start_time + Duration::minutes(i64::from(movie.duration_in_minutes));
    Show::new(id, movie.id.clone(), theater.id.clone(), start_time, end_time, seat_grid())
}

/// Registers a small demo catalog: two movies, two theaters and three shows
/// scheduled for tomorrow evening.
pub fn seed_demo_catalog(ledger: &BookingLedger) {
    let tomorrow = Local::now().date_naive() + Duration::days(1);
    let evening = |hour: u32| {
        tomorrow.and_time(NaiveTime::from_hms_opt(hour, 0, 0).unwrap_or(NaiveTime::MIN))
    };

    let arrival = Movie::new(
        "M1",
        "Arrival",
        "A linguist works with the military to communicate with alien lifeforms.",
        116,
    );
    let heat = Movie::new(
        "M2",
        "Heat",
        "A group of professional bank robbers start to feel the heat from police.",
        170,
    );
    let odeon = Theater::new("T1", "Odeon", "Leicester Square");
    let prince = Theater::new("T2", "Prince Charles", "Leicester Place");

    let shows = vec![
        screening("S1", &arrival, &odeon, evening(18)),
        screening("S2", &heat, &odeon, evening(21)),
        screening("S3", &arrival, &prince, evening(20)),
    ];

    ledger.add_movie(arrival);
    ledger.add_movie(heat);
    ledger.add_theater(odeon);
    ledger.add_theater(prince);
    for show in shows {
        ledger.add_show(show);
    }

    info!(movies = 2, theaters = 2, shows = 3, "demo catalog registered");
}
