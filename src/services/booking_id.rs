use chrono::{Local, NaiveDateTime};
use std::sync::atomic::{AtomicU64, Ordering};

/// A booking id together with the counter value it was issued with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedId {
    pub sequence: u64,
    pub id: String,
}

/// Issues booking ids of the form `PREFIX + yyyyMMddHHmmss + counter`.
///
/// The counter is zero-padded to six digits and is the only part that
/// guarantees uniqueness; two ids generated in the same second differ in
/// their counter. Issue order is the counter order, not the string order
/// of the ids.
#[derive(Debug)]
pub struct BookingIdGenerator {
    prefix: String,
    counter: AtomicU64,
}

impl BookingIdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        BookingIdGenerator::starting_after(prefix, 0)
    }

    /// A generator whose first id carries `last_issued + 1`.
    pub fn starting_after(prefix: impl Into<String>, last_issued: u64) -> Self {
        BookingIdGenerator {
            prefix: prefix.into(),
            counter: AtomicU64::new(last_issued),
        }
    }

    pub fn next_id(&self) -> IssuedId {
        self.next_id_at(Local::now().naive_local())
    }

    pub fn next_id_at(&self, at: NaiveDateTime) -> IssuedId {
        let sequence = self.counter.fetch_add(1, Ordering::SeqCst) + 1;
        IssuedId {
            sequence,
            id: format!("{}{}{:06}", self.prefix, at.format("%Y%m%d%H%M%S"), sequence),
        }
    }
}
