use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

use super::*;

fn midnight(year: i32, month: u32, day: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

#[test]
fn well_known_instants() {
    assert_eq!(midnight(1, 1, 1).to_ticks(), Some(0));
    assert_eq!(midnight(1970, 1, 1).to_ticks(), Some(621_355_968_000_000_000));
    assert_eq!(midnight(2000, 1, 1).to_ticks(), Some(630_822_816_000_000_000));

    assert_eq!(
        DateTime::<Utc>::UNIX_EPOCH.to_ticks(),
        midnight(1970, 1, 1).to_ticks()
    );
}

#[test]
fn instants_convert_back() {
    let instant = NaiveDate::from_ymd_opt(2010, 10, 10)
        .unwrap()
        .and_hms_nano_opt(10, 10, 10, 123_456_700)
        .unwrap();

    let ticks = instant.to_ticks().unwrap();
    assert_eq!(NaiveDateTime::from_ticks(ticks), Some(instant));

    let before = midnight(0, 12, 31);
    assert_eq!(before.to_ticks(), Some(-TICKS_PER_DAY));
    assert_eq!(NaiveDateTime::from_ticks(-TICKS_PER_DAY), Some(before));
}

#[test]
fn leap_seconds_have_no_tick_count() {
    let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 1_500)
        .unwrap();

    assert_eq!(leap.to_ticks(), None);
    assert_eq!(leap.and_utc().to_ticks(), None);
}

#[test]
fn durations() {
    assert_eq!(TimeDelta::seconds(1).to_ticks(), Some(TICKS_PER_SECOND));
    assert_eq!(TimeDelta::nanoseconds(-250).to_ticks(), Some(-2));
    assert_eq!(TimeDelta::from_ticks(-15), Some(TimeDelta::nanoseconds(-1_500)));
    assert_eq!(TimeDelta::MAX.to_ticks(), None);
}

#[test]
fn resolution_defaults_to_one_tick() {
    assert_eq!(DateTimeSerializer::<TimeDelta>::resolution(None).unwrap(), 1);
    assert_eq!(
        DateTimeSerializer::<TimeDelta>::resolution(Some(&DateTimeArg::MINUTES))
            .unwrap(),
        60 * TICKS_PER_SECOND
    );
    assert!(matches!(
        DateTimeSerializer::<TimeDelta>::resolution(Some(&DateTimeArg::new(0))),
        Err(Error::InvalidArgument { .. })
    ));
}
