//! Instants and durations at various tick resolutions.

use binconv::{
    Binary, Error, SerializerArg, SerializerRegistry, SerializerSettings,
    serializers::time::{DateTimeArg, TICKS_PER_SECOND},
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

fn date_time(
    (year, month, day): (i32, u32, u32),
    (hour, minute, second): (u32, u32, u32),
    nanos: u32,
) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap()
        .and_hms_nano_opt(hour, minute, second, nanos)
        .unwrap()
}

fn with<T: Binary>(argument: DateTimeArg) -> SerializerSettings {
    SerializerSettings::new().with_argument::<T>(argument)
}

fn duration(days: i64, hours: i64, minutes: i64, seconds: i64) -> TimeDelta {
    TimeDelta::days(days)
        + TimeDelta::hours(hours)
        + TimeDelta::minutes(minutes)
        + TimeDelta::seconds(seconds)
}

/// An instant with sub-second precision, a multiple of 100 nanoseconds.
fn recent() -> NaiveDateTime {
    date_time((2026, 10, 19), (12, 34, 56), 789_123_400)
}

#[test]
fn the_first_instant_is_zero() {
    let epoch = date_time((1, 1, 1), (0, 0, 0), 0);

    assert_eq!(binconv::serialize(&epoch, None).unwrap(), [0]);

    let settings = with::<NaiveDateTime>(DateTimeArg::DAYS);
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&[1], Some(&settings)).unwrap(),
        date_time((1, 1, 2), (0, 0, 0), 0)
    );
}

#[test]
fn default_instant_roundtrips() {
    let value = NaiveDateTime::default();

    let bytes = binconv::serialize(&value, None).unwrap();
    assert_eq!(binconv::deserialize::<NaiveDateTime>(&bytes, None).unwrap(), value);
}

#[test]
fn tick_resolution() {
    let settings = with::<NaiveDateTime>(DateTimeArg::TICKS);
    let value = recent();

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 9);
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap(),
        value
    );
}

#[test]
fn nullable_instant_with_value() {
    let settings = with::<NaiveDateTime>(DateTimeArg::TICKS);
    let value = Some(recent());

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 10);
    assert_eq!(
        binconv::deserialize::<Option<NaiveDateTime>>(&bytes, Some(&settings))
            .unwrap(),
        value
    );
}

#[test]
fn nullable_instant_without_value() {
    let settings = with::<NaiveDateTime>(DateTimeArg::TICKS);

    let bytes = binconv::serialize(&None::<NaiveDateTime>, Some(&settings)).unwrap();
    assert_eq!(bytes, [0]);
    assert_eq!(
        binconv::deserialize::<Option<NaiveDateTime>>(&bytes, Some(&settings))
            .unwrap(),
        None
    );
}

#[test]
fn second_resolution() {
    let settings = with::<NaiveDateTime>(DateTimeArg::SECONDS);
    let value = date_time((2010, 10, 10), (10, 10, 10), 0);

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 6);
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap(),
        value
    );
}

#[test]
fn day_resolution() {
    let settings = with::<NaiveDateTime>(DateTimeArg::DAYS);
    let value = date_time((2010, 10, 10), (0, 0, 0), 0);

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 3);
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap(),
        value
    );
}

#[test]
fn coarse_resolution_truncates() {
    let settings = with::<NaiveDateTime>(DateTimeArg::SECONDS);
    let value = date_time((2010, 10, 10), (10, 10, 10), 999_999_900);

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap(),
        date_time((2010, 10, 10), (10, 10, 10), 0)
    );

    let settings = with::<NaiveDateTime>(DateTimeArg::MINUTES);
    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap(),
        date_time((2010, 10, 10), (10, 10, 0), 0)
    );
}

#[test]
fn sub_tick_precision_is_dropped() {
    let value = date_time((2010, 10, 10), (10, 10, 10), 123_456_789);

    let bytes = binconv::serialize(&value, None).unwrap();
    assert_eq!(
        binconv::deserialize::<NaiveDateTime>(&bytes, None).unwrap(),
        date_time((2010, 10, 10), (10, 10, 10), 123_456_700)
    );
}

#[test]
fn instants_before_the_common_era() {
    let value = date_time((-100, 3, 1), (6, 0, 0), 0);

    let bytes = binconv::serialize(&value, None).unwrap();
    assert_eq!(bytes.len(), 10);
    assert_eq!(binconv::deserialize::<NaiveDateTime>(&bytes, None).unwrap(), value);
}

#[test]
fn utc_instants() {
    let settings = with::<DateTime<Utc>>(DateTimeArg::MILLISECONDS);
    let value = recent().and_utc();

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    let decoded: DateTime<Utc> =
        binconv::deserialize(&bytes, Some(&settings)).unwrap();
    assert_eq!(decoded, date_time((2026, 10, 19), (12, 34, 56), 789_000_000).and_utc());

    // the argument is keyed by type, so naive instants keep full precision
    let naive = binconv::serialize(&recent(), Some(&settings)).unwrap();
    assert_eq!(naive.len(), 9);
}

#[test]
fn duration_second_resolution() {
    let settings = with::<TimeDelta>(DateTimeArg::SECONDS);
    let value = duration(7, 10, 10, 10);

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 3);
    assert_eq!(binconv::deserialize::<TimeDelta>(&bytes, Some(&settings)).unwrap(), value);
}

#[test]
fn duration_full_precision() {
    let value = duration(7, 10, 10, 10) + TimeDelta::milliseconds(6);

    let bytes = binconv::serialize(&value, None).unwrap();
    assert_eq!(bytes.len(), 7);
    assert_eq!(binconv::deserialize::<TimeDelta>(&bytes, None).unwrap(), value);
}

#[test]
fn negative_durations_truncate_toward_zero() {
    let settings = with::<TimeDelta>(DateTimeArg::SECONDS);
    let value = -TimeDelta::milliseconds(1_500);

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(
        binconv::deserialize::<TimeDelta>(&bytes, Some(&settings)).unwrap(),
        -TimeDelta::seconds(1)
    );

    let exact = -TimeDelta::nanoseconds(1_234_567_800);
    let bytes = binconv::serialize(&exact, None).unwrap();
    assert_eq!(binconv::deserialize::<TimeDelta>(&bytes, None).unwrap(), exact);
}

#[test]
fn non_positive_resolution_is_rejected() {
    for resolution in [0, -TICKS_PER_SECOND] {
        let settings = with::<NaiveDateTime>(DateTimeArg::new(resolution));

        let error = binconv::serialize(&recent(), Some(&settings)).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument { .. }), "{error}");

        let error =
            binconv::deserialize::<NaiveDateTime>(&[0], Some(&settings)).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument { .. }), "{error}");
    }
}

#[test]
fn foreign_argument_is_rejected() {
    #[derive(Debug)]
    struct Precision;

    impl SerializerArg for Precision {}

    let settings = SerializerSettings::new().with_argument::<TimeDelta>(Precision);

    let error = binconv::serialize(&TimeDelta::zero(), Some(&settings)).unwrap_err();
    assert!(matches!(error, Error::InvalidArgument { .. }), "{error}");
}

#[test]
fn unrepresentable_duration_is_out_of_range() {
    let error = binconv::serialize(&TimeDelta::MAX, None).unwrap_err();
    assert!(matches!(error, Error::OutOfRange { .. }), "{error}");
}

#[test]
fn leap_second_is_out_of_range() {
    let leap = NaiveDate::from_ymd_opt(2016, 12, 31)
        .unwrap()
        .and_hms_milli_opt(23, 59, 59, 1_500)
        .unwrap();

    let error = binconv::serialize(&leap, None).unwrap_err();
    assert!(matches!(error, Error::OutOfRange { .. }), "{error}");

    let error = binconv::serialize(&leap.and_utc(), None).unwrap_err();
    assert!(matches!(error, Error::OutOfRange { .. }), "{error}");
}

#[test]
fn decoded_instant_out_of_range_is_malformed() {
    let settings = with::<NaiveDateTime>(DateTimeArg::DAYS);
    let bytes = binconv::serialize(&(i64::MAX / 2), None).unwrap();

    let error =
        binconv::deserialize::<NaiveDateTime>(&bytes, Some(&settings)).unwrap_err();
    assert!(error.is_malformed(), "{error}");
}

#[derive(Debug, Clone, Default, PartialEq, Binary)]
struct Meeting {
    title: String,
    day: NaiveDateTime,
    starts: Option<NaiveDateTime>,
}

#[test]
fn member_argument_overrides_settings() {
    let registry = SerializerRegistry::new();
    registry
        .register_class_map::<Meeting>(|class_map| {
            class_map.map_member("day")?.set_argument(DateTimeArg::DAYS);
            class_map.map_member("starts")?.set_argument(DateTimeArg::MINUTES);
            Ok(())
        })
        .unwrap();

    let settings = with::<NaiveDateTime>(DateTimeArg::SECONDS);
    let meeting = Meeting {
        title: "standup".to_owned(),
        day: date_time((2010, 10, 10), (0, 0, 0), 0),
        starts: Some(date_time((2010, 10, 10), (9, 30, 0), 0)),
    };

    let bytes = registry.serialize(&meeting, Some(&settings)).unwrap();
    // 8 for the title, 3 for the day, 1 + 5 for the start
    assert_eq!(bytes.len(), 8 + 3 + 6);

    let decoded: Meeting = registry.deserialize(&bytes, Some(&settings)).unwrap();
    assert_eq!(decoded, meeting);
}

#[test]
fn settings_reach_nested_values() {
    let settings = with::<NaiveDateTime>(DateTimeArg::DAYS);
    let value = vec![
        Some(date_time((2000, 1, 1), (0, 0, 0), 0)),
        None,
        Some(date_time((2002, 2, 2), (0, 0, 0), 0)),
    ];

    let bytes = binconv::serialize(&value, Some(&settings)).unwrap();
    assert_eq!(bytes.len(), 1 + 4 + 1 + 4);

    let decoded: Vec<Option<NaiveDateTime>> =
        binconv::deserialize(&bytes, Some(&settings)).unwrap();
    assert_eq!(decoded, value);
}
