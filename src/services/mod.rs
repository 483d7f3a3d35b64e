pub mod booking_id;
pub mod booking_ledger;
pub mod catalog_seed;
