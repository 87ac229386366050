// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Cached front door to the position and event engines.

use crate::cache::{CacheKey, ResultCache};
use crate::config::EngineConfig;
use crate::error::Result;
use crate::events::{self, EventResult, TwilightKind};
use crate::observer::Observer;
use crate::position::{self, Body, CelestialPosition, Instant};
use chrono::NaiveDate;
use once_cell::sync::Lazy;

static GLOBAL: Lazy<Almanac> = Lazy::new(|| Almanac::new(EngineConfig::default()));

/// Position and event queries memoised in three [`ResultCache`]s.
///
/// The results are identical to calling [`position`](crate::position) and
/// [`find_event_with`](crate::find_event_with) directly, except that
/// positions are served per key bucket (one minute by default). Failures
/// are never cached.
#[derive(Debug, Default)]
pub struct Almanac {
    config: EngineConfig,
    positions: ResultCache<CacheKey, CelestialPosition>,
    events: ResultCache<CacheKey, EventResult>,
    days: ResultCache<CacheKey, Vec<(TwilightKind, EventResult)>>,
}

impl Almanac {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    /// The process-wide instance, built with [`EngineConfig::default`] on
    /// first use.
    pub fn global() -> &'static Almanac {
        &GLOBAL
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn position(&self, body: Body, observer: &Observer, instant: Instant) -> Result<CelestialPosition> {
        // Keys round coordinates and bucket instants, so invalid input could
        // alias a cached entry.
        position::validate_query(observer, instant)?;
        let key = CacheKey::position(observer, instant, body, &self.config.cache);
        self.positions
            .try_get_or_compute(key, self.config.cache.position_ttl(), || {
                position::position(body, observer, instant)
            })
    }

    pub fn find_event(
        &self,
        body: Body,
        kind: TwilightKind,
        observer: &Observer,
        date: NaiveDate,
    ) -> Result<EventResult> {
        observer.validate()?;
        let key = CacheKey::event(observer, date, body, kind, &self.config.cache);
        self.events.try_get_or_compute(key, self.config.cache.event_ttl(), || {
            events::find_event_with(body, kind, observer, date, &self.config.search)
        })
    }

    pub fn day_events(&self, observer: &Observer, date: NaiveDate) -> Result<Vec<(TwilightKind, EventResult)>> {
        observer.validate()?;
        let key = CacheKey::day_events(observer, date, &self.config.cache);
        self.days.try_get_or_compute(key, self.config.cache.event_ttl(), || {
            events::day_events_with(observer, date, &self.config.search)
        })
    }

    /// Purge expired entries from every cache.
    pub fn sweep(&self) -> usize {
        self.positions.sweep() + self.events.sweep() + self.days.sweep()
    }

    pub fn clear(&self) {
        self.positions.clear();
        self.events.clear();
        self.days.clear();
    }

    /// Entries currently held, expired ones included.
    pub fn len(&self) -> usize {
        self.positions.len() + self.events.len() + self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CacheConfig;
    use crate::error::Error;

    fn date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 3, 20).unwrap()
    }

    #[test]
    fn cached_event_matches_direct_search() {
        let almanac = Almanac::default();
        let obs = Observer::new(51.48, 0.0).unwrap();
        let direct = events::find_event(Body::Sun, TwilightKind::Sunset, &obs, date()).unwrap();
        let first = almanac.find_event(Body::Sun, TwilightKind::Sunset, &obs, date()).unwrap();
        let second = almanac.find_event(Body::Sun, TwilightKind::Sunset, &obs, date()).unwrap();
        assert_eq!(direct, first);
        assert_eq!(first, second);
        assert_eq!(almanac.len(), 1);
    }

    #[test]
    fn failures_are_not_cached() {
        let almanac = Almanac::default();
        let obs = Observer::new(0.0, 0.0).unwrap();
        let err = almanac
            .find_event(Body::Moon, TwilightKind::Sunrise, &obs, date())
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
        assert!(almanac.is_empty());
    }

    #[test]
    fn sweep_drops_expired_positions() {
        let almanac = Almanac::new(EngineConfig {
            cache: CacheConfig {
                position_ttl_seconds: 0,
                ..Default::default()
            },
            ..Default::default()
        });
        let obs = Observer::new(45.0, 9.0).unwrap();
        almanac.position(Body::Sun, &obs, Instant::new(9000.0)).unwrap();
        almanac.day_events(&obs, date()).unwrap();
        assert_eq!(almanac.len(), 2);
        assert_eq!(almanac.sweep(), 1);
        assert_eq!(almanac.len(), 1);
        almanac.clear();
        assert!(almanac.is_empty());
    }

    #[test]
    fn invalid_input_never_hits_a_cached_entry() {
        let almanac = Almanac::default();
        let obs = Observer::new(0.0, 0.0).unwrap();
        almanac.position(Body::Sun, &obs, Instant::new(0.0)).unwrap();
        almanac.find_event(Body::Sun, TwilightKind::Sunrise, &obs, date()).unwrap();
        almanac.day_events(&obs, date()).unwrap();
        assert_eq!(almanac.len(), 3);

        let err = almanac
            .position(Body::Sun, &obs, Instant::new(f64::NAN))
            .unwrap_err();
        assert!(matches!(err, Error::InvalidInstant(_)));

        // NaN latitude would round onto the cached (0, 0) key.
        let bad = Observer::unchecked(f64::NAN, 0.0);
        assert!(matches!(
            almanac.position(Body::Sun, &bad, Instant::new(0.0)),
            Err(Error::InvalidObserver(_))
        ));
        assert!(matches!(
            almanac.find_event(Body::Sun, TwilightKind::Sunrise, &bad, date()),
            Err(Error::InvalidObserver(_))
        ));
        assert!(matches!(
            almanac.day_events(&bad, date()),
            Err(Error::InvalidObserver(_))
        ));
        assert_eq!(almanac.len(), 3);
    }

    #[test]
    fn global_is_shared() {
        assert!(std::ptr::eq(Almanac::global(), Almanac::global()));
    }
}
