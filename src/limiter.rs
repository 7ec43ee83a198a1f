// SPDX-FileCopyrightText: 2025 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Once-per-calendar-day pull limiter.
//!
//! Tracks the last successful pull per (guild, user) pair and blocks a new
//! pull only while "now" falls on the same local calendar date as the
//! recorded one. This is a calendar-day policy, not a rolling 24 h window:
//! a pull at 23:59 does not block one at 00:01 the next day.
//!
//! State is guild-scoped: recording a pull in one guild never affects the
//! same user in another guild. Entries live for the process lifetime, minus
//! periodic eviction of entries too old to block anything.

use chrono::{DateTime, Local, NaiveDate, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

/// Thread-safe daily pull limiter, guild → user → last-pull instant.
pub struct DailyLimiter {
    pulls: RwLock<HashMap<String, HashMap<String, DateTime<Utc>>>>,
}

impl DailyLimiter {
    /// Create an empty limiter.
    pub fn new() -> Self {
        Self {
            pulls: RwLock::new(HashMap::new()),
        }
    }

    /// Whether the pair has already used today's pull.
    ///
    /// Pairs with no recorded pull are never limited.
    pub async fn has_reached_daily_limit(&self, guild_id: &str, user_id: &str) -> bool {
        self.limit_reached_on(guild_id, user_id, today()).await
    }

    async fn limit_reached_on(&self, guild_id: &str, user_id: &str, date: NaiveDate) -> bool {
        let pulls = self.pulls.read().await;
        let Some(users) = pulls.get(guild_id) else {
            return false;
        };
        let Some(last_pull) = users.get(user_id) else {
            return false;
        };
        pulled_on(*last_pull, date)
    }

    /// Record "now" as the pair's last successful pull, creating map levels
    /// as needed. Call only after the fetch succeeded; a failed fetch must
    /// not consume the day's allowance.
    pub async fn record_pull(&self, guild_id: &str, user_id: &str) {
        self.record_pull_at(guild_id, user_id, Utc::now()).await;
    }

    async fn record_pull_at(&self, guild_id: &str, user_id: &str, instant: DateTime<Utc>) {
        let mut pulls = self.pulls.write().await;
        pulls
            .entry(guild_id.to_string())
            .or_default()
            .insert(user_id.to_string(), instant);
        debug!(guild_id, user_id, "recorded pull");
    }

    /// Evict entries from previous calendar days (should be called
    /// periodically). A pull recorded before today can no longer limit
    /// anything, so the store stays bounded by one day's distinct pairs.
    pub async fn cleanup(&self) {
        let today = today();
        let mut pulls = self.pulls.write().await;
        for users in pulls.values_mut() {
            users.retain(|_, last_pull| pulled_on(*last_pull, today));
        }
        pulls.retain(|_, users| !users.is_empty());
    }
}

impl Default for DailyLimiter {
    fn default() -> Self {
        Self::new()
    }
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whether `last_pull` falls on `date` in the process-local time zone.
fn pulled_on(last_pull: DateTime<Utc>, date: NaiveDate) -> bool {
    last_pull.with_timezone(&Local).date_naive() == date
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Days;

    #[tokio::test]
    async fn test_unseen_pair_is_not_limited() {
        let limiter = DailyLimiter::new();

        assert!(!limiter.has_reached_daily_limit("guild-1", "user-1").await);

        // Guild known, user not
        limiter.record_pull("guild-1", "user-2").await;
        assert!(!limiter.has_reached_daily_limit("guild-1", "user-1").await);
    }

    #[tokio::test]
    async fn test_limited_for_rest_of_day_only() {
        let limiter = DailyLimiter::new();
        limiter.record_pull("guild-1", "user-1").await;

        let today = today();
        let tomorrow = today.checked_add_days(Days::new(1)).unwrap();

        assert!(limiter.limit_reached_on("guild-1", "user-1", today).await);
        assert!(!limiter.limit_reached_on("guild-1", "user-1", tomorrow).await);
    }

    #[tokio::test]
    async fn test_guilds_are_independent() {
        let limiter = DailyLimiter::new();
        limiter.record_pull("guild-a", "user-1").await;

        assert!(limiter.has_reached_daily_limit("guild-a", "user-1").await);
        assert!(!limiter.has_reached_daily_limit("guild-b", "user-1").await);
    }

    #[tokio::test]
    async fn test_newer_pull_overwrites_older() {
        let limiter = DailyLimiter::new();
        let two_days_ago = Utc::now().checked_sub_days(Days::new(2)).unwrap();

        limiter.record_pull_at("guild-1", "user-1", two_days_ago).await;
        assert!(!limiter.has_reached_daily_limit("guild-1", "user-1").await);

        limiter.record_pull("guild-1", "user-1").await;
        assert!(limiter.has_reached_daily_limit("guild-1", "user-1").await);
    }

    #[tokio::test]
    async fn test_cleanup_evicts_only_stale_entries() {
        let limiter = DailyLimiter::new();
        let two_days_ago = Utc::now().checked_sub_days(Days::new(2)).unwrap();

        limiter.record_pull_at("guild-1", "user-old", two_days_ago).await;
        limiter.record_pull("guild-1", "user-today").await;
        limiter.record_pull_at("guild-2", "user-old", two_days_ago).await;

        limiter.cleanup().await;

        let pulls = limiter.pulls.read().await;
        assert_eq!(pulls.len(), 1);
        assert!(pulls["guild-1"].contains_key("user-today"));
        assert!(!pulls["guild-1"].contains_key("user-old"));
    }

    #[test]
    fn test_pulled_on_compares_local_dates() {
        let now = Utc::now();
        let local_today = now.with_timezone(&Local).date_naive();

        assert!(pulled_on(now, local_today));
        assert!(!pulled_on(
            now,
            local_today.checked_add_days(Days::new(1)).unwrap()
        ));
    }
}
