//! Clock behaviour tests

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{Clock, FixedClock, SystemClock};

fn march_first() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 1, 9, 0, 0).unwrap()
}

#[test]
fn test_fixed_clock_reports_its_instant() {
    let clock = FixedClock::at(march_first());
    assert_eq!(clock.now(), march_first());
    assert_eq!(clock.now(), clock.now());
}

#[test]
fn test_set_replaces_the_instant() {
    let clock = FixedClock::at(march_first());
    let later = Utc.with_ymd_and_hms(2025, 12, 31, 23, 59, 59).unwrap();

    clock.set(later);

    assert_eq!(clock.now(), later);
}

#[test]
fn test_advance_accumulates() {
    let clock = FixedClock::at(march_first());

    clock.advance(Duration::days(1));
    clock.advance(Duration::hours(2));

    assert_eq!(clock.now(), march_first() + Duration::days(1) + Duration::hours(2));
}

#[test]
fn test_negative_advance_moves_back() {
    let clock = FixedClock::at(march_first());
    clock.advance(Duration::days(-3));
    assert_eq!(clock.now(), Utc.with_ymd_and_hms(2025, 2, 26, 9, 0, 0).unwrap());
}

#[test]
fn test_shared_trait_object_sees_updates() {
    let fixed = FixedClock::at(march_first());
    let shared: Arc<dyn Clock> = Arc::new(fixed.clone());

    fixed.advance(Duration::minutes(30));

    assert_eq!(shared.now(), march_first() + Duration::minutes(30));
}

#[test]
fn test_system_clock_is_close_to_now() {
    let before = Utc::now();
    let reported = SystemClock.now();
    let after = Utc::now();

    assert!(reported >= before && reported <= after);
}
