// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (C) 2026 Vallés Puig, Ramon

//! Concurrent time-to-live cache for computed results.
//!
//! Backed by a [`DashMap`], so readers on different shards never contend.
//! There is no single-flight: two callers missing the same key at the same
//! moment both compute, and the last insert wins. Compute closures always
//! run with no shard lock held.

use crate::config::CacheConfig;
use crate::events::TwilightKind;
use crate::observer::Observer;
use crate::position::{Body, Instant};
use chrono::NaiveDate;
use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant as Clock};
use tracing::{debug, trace};

/// A stored value and the moment it stops being served.
#[derive(Debug, Clone)]
pub struct CacheEntry<V> {
    pub value: V,
    /// `None` when the TTL does not fit the clock (never expires).
    pub expires_at: Option<Clock>,
}

impl<V> CacheEntry<V> {
    fn new(value: V, ttl: Duration, now: Clock) -> Self {
        Self {
            value,
            expires_at: now.checked_add(ttl),
        }
    }

    /// An entry read at or after its expiry is a miss.
    pub fn is_expired_at(&self, now: Clock) -> bool {
        self.expires_at.is_some_and(|at| now >= at)
    }
}

/// Process-lifetime cache keyed by `K`.
#[derive(Debug)]
pub struct ResultCache<K: Eq + Hash, V> {
    entries: DashMap<K, CacheEntry<V>>,
}

impl<K: Eq + Hash, V> Default for ResultCache<K, V> {
    fn default() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }
}

impl<K, V> ResultCache<K, V>
where
    K: Eq + Hash + Clone + std::fmt::Debug,
    V: Clone,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// Fresh value for `key`, purging it if it has expired.
    pub fn get(&self, key: &K) -> Option<V> {
        let now = Clock::now();
        {
            let entry = self.entries.get(key)?;
            if !entry.is_expired_at(now) {
                return Some(entry.value.clone());
            }
        }
        self.entries.remove_if(key, |_, entry| entry.is_expired_at(now));
        trace!(?key, "expired entry purged on read");
        None
    }

    /// Store `value` under `key` for `ttl`, replacing any previous entry.
    pub fn insert(&self, key: K, value: V, ttl: Duration) {
        self.entries.insert(key, CacheEntry::new(value, ttl, Clock::now()));
    }

    /// Return the cached value, or run `compute` and cache its result.
    pub fn get_or_compute<F>(&self, key: K, ttl: Duration, compute: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(hit) = self.get(&key) {
            return hit;
        }
        debug!(?key, "cache miss");
        let value = compute();
        self.insert(key, value.clone(), ttl);
        value
    }

    /// Like [`get_or_compute`](Self::get_or_compute) for fallible work.
    /// Errors are returned to the caller and never cached.
    pub fn try_get_or_compute<F, E>(&self, key: K, ttl: Duration, compute: F) -> Result<V, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.get(&key) {
            return Ok(hit);
        }
        debug!(?key, "cache miss");
        let value = compute()?;
        self.insert(key, value.clone(), ttl);
        Ok(value)
    }

    /// Drop every expired entry; returns how many were removed.
    pub fn sweep(&self) -> usize {
        let now = Clock::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before.saturating_sub(self.entries.len());
        debug!(removed, remaining = self.entries.len(), "cache sweep");
        removed
    }

    /// Number of stored entries, expired ones included until swept.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&self) {
        self.entries.clear();
    }
}

// ═══════════════════════════════════════════════════════════════════════════
// Keys
// ═══════════════════════════════════════════════════════════════════════════

/// Time component of a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// A civil date, for event queries.
    Date(NaiveDate),
    /// Index of a fixed-width slice of the UT axis.
    Instant(i64),
}

/// What was asked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Query {
    Position,
    Event(TwilightKind),
    DayEvents,
}

/// Composite key: rounded observer, time bucket, body and query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CacheKey {
    latitude: i64,
    longitude: i64,
    elevation_m: i64,
    pub bucket: Bucket,
    pub body: Body,
    pub query: Query,
}

impl CacheKey {
    fn new(observer: &Observer, bucket: Bucket, body: Body, query: Query, config: &CacheConfig) -> Self {
        let scale = 10f64.powi(i32::from(config.coordinate_decimals));
        Self {
            latitude: (observer.latitude_deg() * scale).round() as i64,
            longitude: (observer.longitude_deg() * scale).round() as i64,
            elevation_m: observer.elevation_m().unwrap_or(0.0).round() as i64,
            bucket,
            body,
            query,
        }
    }

    /// Key for a position query, bucketed by `instant_bucket_seconds`.
    pub fn position(observer: &Observer, instant: Instant, body: Body, config: &CacheConfig) -> Self {
        let width = f64::from(config.instant_bucket_seconds.max(1));
        let index = (instant.value() * 86_400.0 / width).floor() as i64;
        Self::new(observer, Bucket::Instant(index), body, Query::Position, config)
    }

    pub fn event(
        observer: &Observer,
        date: NaiveDate,
        body: Body,
        kind: TwilightKind,
        config: &CacheConfig,
    ) -> Self {
        Self::new(observer, Bucket::Date(date), body, Query::Event(kind), config)
    }

    pub fn day_events(observer: &Observer, date: NaiveDate, config: &CacheConfig) -> Self {
        Self::new(observer, Bucket::Date(date), Body::Sun, Query::DayEvents, config)
    }
}
