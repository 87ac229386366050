use chrono::{DateTime, NaiveDate, TimeZone, Timelike, Utc};
use photoplan::{
    complement_within, find_event, intersect_periods, position, solve_iso, solve_shutter_speed,
    Almanac, Body, Error, EventResult, ExposureParameter, ExposureValue, Instant, Observer, Period,
    ResultCache, StopScale, TwilightKind, UT,
};
use qtty::Days;
use std::cell::Cell;
use std::time::Duration;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn minutes_of_day(result: EventResult) -> f64 {
    let t: DateTime<Utc> = result.instant().expect("event instant").to_utc().expect("to_utc");
    f64::from(t.hour() * 60 + t.minute()) + f64::from(t.second()) / 60.0
}

#[test]
fn greenwich_equinox_sunrise_noon_sunset() {
    let greenwich = Observer::new(51.48, 0.0).unwrap();
    let d = date(2024, 3, 20);

    let sunrise = minutes_of_day(find_event(Body::Sun, TwilightKind::Sunrise, &greenwich, d).unwrap());
    let noon = minutes_of_day(find_event(Body::Sun, TwilightKind::SolarNoon, &greenwich, d).unwrap());
    let sunset = minutes_of_day(find_event(Body::Sun, TwilightKind::Sunset, &greenwich, d).unwrap());

    assert!((sunrise - (6.0 * 60.0 + 5.0)).abs() <= 3.0, "sunrise {sunrise}");
    assert!((noon - (12.0 * 60.0 + 6.0)).abs() <= 2.0, "noon {noon}");
    assert!((sunset - (18.0 * 60.0 + 8.0)).abs() <= 3.0, "sunset {sunset}");
}

#[test]
fn arctic_solstices_are_polar_day_and_night() {
    let arctic = Observer::new(67.5, 25.0).unwrap();
    assert_eq!(
        find_event(Body::Sun, TwilightKind::Sunset, &arctic, date(2024, 6, 20)).unwrap(),
        EventResult::AlwaysAbove
    );
    assert_eq!(
        find_event(Body::Sun, TwilightKind::Sunset, &arctic, date(2024, 12, 21)).unwrap(),
        EventResult::AlwaysBelow
    );
}

#[test]
fn invalid_observer_fails_fast() {
    assert!(matches!(Observer::new(f64::NAN, 0.0), Err(Error::InvalidObserver(_))));
    assert!(matches!(Observer::new(0.0, 200.0), Err(Error::InvalidObserver(_))));
}

#[test]
fn shutter_speed_for_two_stops_smaller_aperture() {
    let base = ExposureValue::parse("1/125", "f/5.6", "100").unwrap();
    let solved = solve_shutter_speed(
        &base,
        "f/11".parse().unwrap(),
        "100".parse().unwrap(),
        StopScale::Full,
        0.0,
    )
    .unwrap();
    assert_eq!(solved.shutter.to_string(), "1/30");
}

#[test]
fn iso_beyond_the_scale_is_signalled() {
    let base = ExposureValue::parse("1/60", "f/16", "100").unwrap();
    let result = solve_iso(&base, "1/4000".parse().unwrap(), base.aperture, StopScale::Full, 0.0);
    match result {
        Err(Error::Overexposed { parameter, stops }) => {
            assert_eq!(parameter, ExposureParameter::Iso);
            assert!(stops > 1.0);
        }
        other => panic!("expected overexposure, got {other:?}"),
    }
}

#[test]
fn cache_computes_once_within_ttl() {
    let cache = ResultCache::new();
    let calls = Cell::new(0);
    let observer = Observer::new(40.0, -3.7).unwrap();
    let instant = Instant::from_utc(Utc.with_ymd_and_hms(2024, 5, 1, 9, 0, 0).unwrap());
    let compute = || {
        calls.set(calls.get() + 1);
        position(Body::Sun, &observer, instant).unwrap()
    };

    let first = cache.get_or_compute("madrid-sun", Duration::from_secs(60), compute);
    let second = cache.get_or_compute("madrid-sun", Duration::from_secs(60), compute);
    assert_eq!(first, second);
    assert_eq!(calls.get(), 1);
}

#[test]
fn almanac_matches_direct_queries() {
    let almanac = Almanac::default();
    let observer = Observer::new(-33.87, 151.21).unwrap();
    let instant = Instant::from_utc(Utc.with_ymd_and_hms(2024, 7, 1, 2, 0, 0).unwrap());

    let direct = position(Body::Moon, &observer, instant).unwrap();
    let cached = almanac.position(Body::Moon, &observer, instant).unwrap();
    assert_eq!(direct, cached);

    let events = almanac.day_events(&observer, date(2024, 7, 1)).unwrap();
    assert_eq!(events.len(), TwilightKind::SOLAR_DAY.len());
    assert!(events.iter().all(|(_, r)| r.is_at()));
}

#[test]
fn period_set_ops_compose_into_between() {
    let p = |a: f64, b: f64| Period::<UT>::new(Instant::new(a), Instant::new(b));
    let outer = p(0.0, 10.0);
    let above_min = vec![p(1.0, 3.0), p(5.0, 9.0)];
    let above_max = vec![p(2.0, 4.0), p(7.0, 8.0)];

    let between = intersect_periods(&above_min, &complement_within(outer, &above_max));
    let bounds: Vec<(Days, Days)> = between
        .iter()
        .map(|i| (i.start.quantity(), i.end.quantity()))
        .collect();
    assert_eq!(
        bounds,
        vec![
            (Days::new(1.0), Days::new(2.0)),
            (Days::new(5.0), Days::new(7.0)),
            (Days::new(8.0), Days::new(9.0)),
        ]
    );
}

#[cfg(feature = "serde")]
#[test]
fn serde_round_trips_public_values() {
    let base = ExposureValue::parse("1/1.5", "f/2.8", "400").unwrap();
    let json = serde_json::to_string(&base).unwrap();
    assert!(json.contains("\"1/1.5\""));
    assert!(json.contains("\"f/2.8\""));
    let back: ExposureValue = serde_json::from_str(&json).unwrap();
    assert_eq!(back, base);

    let bad = json.replace("f/2.8", "2.8");
    assert!(serde_json::from_str::<ExposureValue>(&bad).is_err());

    let result = EventResult::At(Instant::new(8_845.25));
    let json = serde_json::to_string(&result).unwrap();
    assert_eq!(serde_json::from_str::<EventResult>(&json).unwrap(), result);

    let config: photoplan::SearchConfig = serde_json::from_str(r#"{"step_seconds": 300.0}"#).unwrap();
    assert_eq!(config.step_seconds, 300.0);
    assert_eq!(config.tolerance_seconds, 1.0);
}
