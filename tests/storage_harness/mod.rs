//! Shared test harness for storage backend testing
//!
//! Provides fixture builders for events and two macro-generated contract
//! suites:
//!
//! - `record_store_tests!` for any `RecordStore<Event>`
//! - `membership_store_tests!` for any `MembershipStore + Clone`
//!
//! # Usage
//!
//! From any integration test file in `tests/`:
//! ```rust,ignore
//! #[macro_use]
//! mod storage_harness;
//! use storage_harness::*;
//! ```

#![allow(dead_code)]

#[macro_use]
mod record_store_tests;
#[macro_use]
mod membership_store_tests;

use chrono::{TimeZone, Utc};
use tupulung::core::store::RecordStore;
use tupulung::entities::Event;

/// An unsaved event with the fields the suites filter and sort on
pub fn sample_event(title: &str, category_id: u64, user_id: u64, location: &str) -> Event {
    Event::new(
        title.to_string(),
        "Host".to_string(),
        String::new(),
        user_id,
        category_id,
        Utc.with_ymd_and_hms(2024, 8, 17, 0, 0, 0).unwrap(),
        location.to_string(),
        format!("about {}", title),
    )
}

/// Store `n` events titled `event 00`, `event 01`, ... spread over
/// categories 1 to 3 and owned by user 1
pub async fn seed_events(store: &dyn RecordStore<Event>, n: usize) -> Vec<Event> {
    let mut stored = Vec::with_capacity(n);
    for i in 0..n {
        let event = sample_event(&format!("event {:02}", i), (i % 3) as u64 + 1, 1, "Jakarta");
        stored.push(store.store(event).await.unwrap());
    }
    stored
}

pub fn titles(events: &[Event]) -> Vec<&str> {
    events.iter().map(|e| e.title.as_str()).collect()
}
