// SPDX-FileCopyrightText: 2026 Reva Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Local per-provider daily request limits.
//!
//! Checked before any network call; an exhausted provider is skipped for
//! the rest of the UTC day without being attempted.

use chrono::{NaiveDate, Utc};
use dashmap::DashMap;
use reva_core::RevaError;
use tracing::warn;

/// Tracks request counts per provider per UTC day.
#[derive(Default)]
pub struct DailyRateLimiter {
    counters: DashMap<String, (NaiveDate, u32)>,
}

impl DailyRateLimiter {
    pub fn new() -> Self {
        Self::default()
    }

    fn today() -> NaiveDate {
        Utc::now().date_naive()
    }

    /// How many requests the provider has made today.
    pub fn used_today(&self, provider: &str) -> u32 {
        match self.counters.get(provider) {
            Some(entry) if entry.0 == Self::today() => entry.1,
            _ => 0,
        }
    }

    /// Whether the provider may make another request under `limit`.
    /// `None` means unlimited.
    pub fn check(&self, provider: &str, limit: Option<u32>) -> Result<(), RevaError> {
        let Some(limit) = limit else { return Ok(()) };
        if self.used_today(provider) >= limit {
            return Err(RevaError::RateLimitExceeded {
                provider: provider.to_string(),
                limit,
            });
        }
        Ok(())
    }

    /// Count one request against the provider's daily budget.
    pub fn record(&self, provider: &str, limit: Option<u32>) {
        let today = Self::today();
        let mut entry = self
            .counters
            .entry(provider.to_string())
            .or_insert((today, 0));
        if entry.0 != today {
            *entry = (today, 0);
        }
        entry.1 += 1;

        if let Some(limit) = limit
            && limit > 0
            && entry.1 * 5 >= limit * 4
            && entry.1 <= limit
        {
            warn!(
                provider,
                used = entry.1,
                limit,
                "provider at or above 80% of its daily request limit"
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unlimited_providers_always_pass() {
        let limiter = DailyRateLimiter::new();
        for _ in 0..1_000 {
            limiter.record("alpha", None);
        }
        assert!(limiter.check("alpha", None).is_ok());
    }

    #[test]
    fn limit_is_enforced_after_recording() {
        let limiter = DailyRateLimiter::new();
        let limit = Some(2);

        assert!(limiter.check("alpha", limit).is_ok());
        limiter.record("alpha", limit);
        assert!(limiter.check("alpha", limit).is_ok());
        limiter.record("alpha", limit);

        let err = limiter.check("alpha", limit).unwrap_err();
        assert!(matches!(err, RevaError::RateLimitExceeded { limit: 2, .. }));
    }

    #[test]
    fn providers_are_tracked_independently() {
        let limiter = DailyRateLimiter::new();
        limiter.record("alpha", Some(1));
        assert!(limiter.check("alpha", Some(1)).is_err());
        assert!(limiter.check("beta", Some(1)).is_ok());
    }

    #[tracing_test::traced_test]
    #[test]
    fn warns_when_nearing_the_limit() {
        let limiter = DailyRateLimiter::new();
        for _ in 0..7 {
            limiter.record("alpha", Some(10));
        }
        assert!(!logs_contain("daily request limit"));
        limiter.record("alpha", Some(10));
        assert!(logs_contain("daily request limit"));
    }

    #[test]
    fn used_today_reports_the_count() {
        let limiter = DailyRateLimiter::new();
        assert_eq!(limiter.used_today("alpha"), 0);
        limiter.record("alpha", None);
        limiter.record("alpha", None);
        assert_eq!(limiter.used_today("alpha"), 2);
    }
}
