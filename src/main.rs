#[macro_use]
extern crate rocket;

use movie_booking_system::build_rocket;
use movie_booking_system::services::booking_ledger::BookingLedger;
use movie_booking_system::services::catalog_seed::seed_demo_catalog;
use movie_booking_system::utils::config::AppConfig;
use movie_booking_system::utils::logging::init_tracing;

#[launch]
fn rocket() -> _ {
    let config = AppConfig::from_env();
    init_tracing(&config.log_level);

    // The one ledger of this process; routes reach it through managed state
    let ledger = BookingLedger::from_config(&config);
    if config.seed_catalog {
        seed_demo_catalog(&ledger);
    }

    tracing::info!(
        booking_id_prefix = %config.booking_id_prefix,
        seed_catalog = config.seed_catalog,
        "starting movie booking service"
    );

    build_rocket(ledger)
}
